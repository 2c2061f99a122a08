//! File delivery for finished export documents
//!
//! The exporter builds a document in memory and hands the bytes to a
//! [`FileDelivery`] exactly once. Delivery failures are returned to the
//! caller unchanged; nothing here retries.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};

use crate::error::{PinError, PinResult};
use crate::storage::file_io::write_bytes_atomic;

/// Accepts a finished document and saves it somewhere the user can reach
pub trait FileDelivery {
    /// Deliver `bytes` as a file named `filename`
    fn deliver(&self, bytes: &[u8], mime_type: &str, filename: &str) -> PinResult<()>;
}

/// Saves documents into a directory
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path a file with this name would be written to
    pub fn target_path(&self, filename: &str) -> PinResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.dir.join(filename))
    }
}

impl FileDelivery for DirectoryDelivery {
    fn deliver(&self, bytes: &[u8], mime_type: &str, filename: &str) -> PinResult<()> {
        let path = self.target_path(filename)?;

        write_bytes_atomic(&path, bytes).map_err(|e| PinError::delivery(filename, e))?;

        info!(
            "delivered {} ({}, {} bytes) to {}",
            filename,
            mime_type,
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// Writes documents to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutDelivery;

impl FileDelivery for StdoutDelivery {
    fn deliver(&self, bytes: &[u8], mime_type: &str, filename: &str) -> PinResult<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(bytes)
            .and_then(|_| handle.flush())
            .map_err(|e| PinError::delivery(filename, e))?;

        debug!("wrote {} ({}, {} bytes) to stdout", filename, mime_type, bytes.len());
        Ok(())
    }
}

/// A document captured by [`MemoryDelivery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DeliveredFile {
    /// Contents as UTF-8 text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Keeps delivered documents in memory
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    files: Mutex<Vec<DeliveredFile>>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// All documents delivered so far, oldest first
    pub fn files(&self) -> Vec<DeliveredFile> {
        self.files
            .lock()
            .map(|files| files.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<DeliveredFile> {
        self.files.lock().ok().and_then(|files| files.last().cloned())
    }
}

impl FileDelivery for MemoryDelivery {
    fn deliver(&self, bytes: &[u8], mime_type: &str, filename: &str) -> PinResult<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|e| PinError::delivery(filename, format!("lock poisoned: {}", e)))?;

        files.push(DeliveredFile {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Reject names that would escape the target directory
fn validate_filename(filename: &str) -> PinResult<()> {
    let trimmed = filename.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(PinError::Validation(format!(
            "Invalid export filename: '{}'",
            filename
        )));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(PinError::Validation(format!(
            "Export filename must not contain path separators: '{}'",
            filename
        )));
    }
    Ok(())
}
