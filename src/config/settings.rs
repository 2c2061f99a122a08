//! User settings for nfc-pins
//!
//! Manages preferences for timestamp rendering in exports, logging, public
//! profile links and pin code generation.

use serde::{Deserialize, Serialize};

use super::paths::PinPaths;
use crate::error::PinError;
use crate::logging::normalize_level;
use crate::models::timestamp::{TimestampFormatter, TimestampZone, DEFAULT_DISPLAY_FORMAT};

/// User settings for nfc-pins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Time zone used when rendering timestamps in exports
    #[serde(default)]
    pub timestamp_zone: TimestampZone,

    /// Timestamp display format (strftime format)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base URL of the public profile pages, e.g. `https://pins.example.com/p`
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Number of characters in generated pin codes
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_timestamp_format() -> String {
    DEFAULT_DISPLAY_FORMAT.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_profile_base_url() -> String {
    "https://localhost/p".to_string()
}

fn default_code_length() -> usize {
    8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            timestamp_zone: TimestampZone::default(),
            timestamp_format: default_timestamp_format(),
            log_level: default_log_level(),
            profile_base_url: default_profile_base_url(),
            code_length: default_code_length(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PinPaths) -> Result<Self, PinError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PinError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| PinError::Config(format!("Failed to parse settings file: {}", e)))?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PinPaths) -> Result<(), PinError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make generated codes or exports unusable
    pub fn validate(&self) -> Result<(), PinError> {
        if !(4..=32).contains(&self.code_length) {
            return Err(PinError::Config(format!(
                "code_length must be between 4 and 32, got {}",
                self.code_length
            )));
        }
        if self.timestamp_format.trim().is_empty() {
            return Err(PinError::Config("timestamp_format cannot be empty".into()));
        }
        Ok(())
    }

    /// Log level to start with; an unknown `log_level` falls back to the default
    pub fn effective_log_level(&self) -> &'static str {
        normalize_level(&self.log_level)
            .or_else(|_| normalize_level(&default_log_level()))
            .unwrap_or("warn")
    }

    /// Build the timestamp formatter used by exports
    pub fn timestamp_formatter(&self) -> TimestampFormatter {
        TimestampFormatter::new(self.timestamp_zone, self.timestamp_format.clone())
    }

    /// Public profile URL for a pin code
    pub fn profile_url(&self, code: &str) -> String {
        format!("{}/{}", self.profile_base_url.trim_end_matches('/'), code)
    }
}
