//! Custom error types for nfc-pins
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for nfc-pins operations
#[derive(Error, Debug)]
pub enum PinError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for records, schemas and profile input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Pin is claimed by a different user
    #[error("Pin {code} is already claimed")]
    AlreadyClaimed { code: String },

    /// Pin has no owner yet
    #[error("Pin {code} has not been claimed")]
    Unclaimed { code: String },

    /// Errors while building an export document
    #[error("Export error: {0}")]
    Export(String),

    /// The file-delivery collaborator rejected the document
    #[error("Delivery failed for '{filename}': {reason}")]
    Delivery { filename: String, reason: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PinError {
    /// Create a "not found" error for pins
    pub fn pin_not_found(code: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Pin",
            identifier: code.into(),
        }
    }

    /// Create a delivery failure for the given file
    pub fn delivery(filename: impl Into<String>, reason: impl ToString) -> Self {
        Self::Delivery {
            filename: filename.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a delivery failure
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery { .. })
    }
}

impl From<std::io::Error> for PinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for PinError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for nfc-pins operations
pub type PinResult<T> = Result<T, PinError>;
