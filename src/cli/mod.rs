//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod pin;

pub use export::{handle_export_command, ExportCommands, ExportTarget, PinSelection};
pub use pin::{handle_pin_command, PinCommands};
