//! Path management for nfc-pins
//!
//! Provides XDG-compliant path resolution for configuration, pin data, and
//! exported files.
//!
//! ## Path Resolution Order
//!
//! 1. `NFC_PINS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/nfc-pins` or `~/.config/nfc-pins`
//! 3. Windows: `%APPDATA%\nfc-pins`

use std::path::PathBuf;

use crate::error::PinError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "NFC_PINS_DATA_DIR";

/// Manages all paths used by nfc-pins
#[derive(Debug, Clone)]
pub struct PinPaths {
    /// Base directory for all nfc-pins data
    base_dir: PathBuf,
}

impl PinPaths {
    /// Create a new PinPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PinError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create PinPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/nfc-pins/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/nfc-pins/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default export directory (~/.config/nfc-pins/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to pins.json
    pub fn pins_file(&self) -> PathBuf {
        self.data_dir().join("pins.json")
    }

    /// Ensure the base, data and export directories exist
    pub fn ensure_directories(&self) -> Result<(), PinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PinError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| PinError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }

    /// Check if nfc-pins has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PinError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| PinError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("nfc-pins"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PinError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PinError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("nfc-pins"))
}
