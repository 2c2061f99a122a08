//! Configuration module for nfc-pins
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PinPaths;
pub use settings::Settings;
