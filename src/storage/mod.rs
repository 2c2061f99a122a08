//! Storage layer for nfc-pins
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. A [`Storage`] value is the data-access handle passed to services
//! and commands; nothing in the crate reaches the store through globals.

pub mod file_io;
pub mod pins;

pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use pins::{ImportSummary, PinRepository};

use crate::config::paths::PinPaths;
use crate::error::PinError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PinPaths,
    pub pins: PinRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PinPaths) -> Result<Self, PinError> {
        paths.ensure_directories()?;

        Ok(Self {
            pins: PinRepository::new(paths.pins_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PinPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PinError> {
        self.pins.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PinError> {
        self.pins.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
