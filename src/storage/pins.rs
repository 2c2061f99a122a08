//! Pin repository for JSON storage
//!
//! Manages loading and saving profile records to pins.json. Records are kept
//! keyed by code, so listings come back in code order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PinError;
use crate::models::ProfileRecord;

use super::file_io::{read_json, write_json_atomic};

/// Serializable pin data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PinData {
    pins: Vec<ProfileRecord>,
}

/// Outcome of merging records into the repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
}

/// Repository for pin persistence
pub struct PinRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, ProfileRecord>>,
}

impl PinRepository {
    /// Create a new pin repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load pins from disk
    pub fn load(&self) -> Result<(), PinError> {
        let file_data: PinData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for record in file_data.pins {
            data.insert(record.code.clone(), record);
        }

        Ok(())
    }

    /// Save pins to disk
    pub fn save(&self) -> Result<(), PinError> {
        let data = self
            .data
            .read()
            .map_err(|e| PinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = PinData {
            pins: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a pin by code
    pub fn get(&self, code: &str) -> Result<Option<ProfileRecord>, PinError> {
        let data = self
            .data
            .read()
            .map_err(|e| PinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(code).cloned())
    }

    /// Get all pins, ordered by code
    pub fn get_all(&self) -> Result<Vec<ProfileRecord>, PinError> {
        let data = self
            .data
            .read()
            .map_err(|e| PinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().cloned().collect())
    }

    /// Insert or update a pin
    pub fn upsert(&self, record: ProfileRecord) -> Result<(), PinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(record.code.clone(), record);
        Ok(())
    }

    /// Delete a pin
    pub fn delete(&self, code: &str) -> Result<bool, PinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(code).is_some())
    }

    /// Check if a pin exists
    pub fn exists(&self, code: &str) -> Result<bool, PinError> {
        let data = self
            .data
            .read()
            .map_err(|e| PinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(code))
    }

    /// Merge records, replacing existing pins with the same code
    pub fn import(&self, records: Vec<ProfileRecord>) -> Result<ImportSummary, PinError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PinError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut summary = ImportSummary::default();
        for record in &records {
            check_code(&record.code)?;
        }
        for record in records {
            match data.insert(record.code.clone(), record) {
                Some(_) => summary.updated += 1,
                None => summary.added += 1,
            }
        }

        Ok(summary)
    }
}

/// Codes double as lookup keys and export filenames
fn check_code(code: &str) -> Result<(), PinError> {
    if code.trim().is_empty() {
        return Err(PinError::Validation("Imported pin has an empty code".into()));
    }
    if code != code.trim() {
        return Err(PinError::Validation(format!(
            "Pin code must not have surrounding whitespace: '{}'",
            code
        )));
    }
    let unsafe_char = |c: char| c == '/' || c == '\\' || c.is_control();
    if code == "." || code == ".." || code.chars().any(unsafe_char) {
        return Err(PinError::Validation(format!(
            "Pin code must not contain path separators or control characters: '{}'",
            code.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PinRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pins.json");
        let repo = PinRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.get_all().unwrap().len(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(ProfileRecord::new("B2")).unwrap();
        repo.upsert(ProfileRecord::new("A1")).unwrap();

        assert!(repo.exists("A1").unwrap());
        let codes: Vec<_> = repo.get_all().unwrap().into_iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["A1", "B2"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut record = ProfileRecord::new("A1");
        record.uid = Some("u1".into());
        record.name = Some("Ann".into());
        repo.upsert(record.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = PinRepository::new(temp_dir.path().join("pins.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get("A1").unwrap(), Some(record));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(ProfileRecord::new("A1")).unwrap();

        assert!(repo.delete("A1").unwrap());
        assert!(!repo.delete("A1").unwrap());
        assert!(repo.get("A1").unwrap().is_none());
    }

    #[test]
    fn test_import_counts() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(ProfileRecord::new("A1")).unwrap();

        let summary = repo
            .import(vec![ProfileRecord::new("A1"), ProfileRecord::new("A2")])
            .unwrap();
        assert_eq!(summary, ImportSummary { added: 1, updated: 1 });
        assert_eq!(repo.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_import_rejects_blank_code() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.import(vec![ProfileRecord::new("  ")]).is_err());
    }

    #[test]
    fn test_import_rejects_unsafe_codes() {
        let (_temp_dir, repo) = create_test_repo();

        for code in ["A/1", "A\\1", "..", " A1", "A\n1"] {
            let err = repo
                .import(vec![ProfileRecord::new("OK1"), ProfileRecord::new(code)])
                .unwrap_err();
            assert!(err.is_validation(), "{:?} should be rejected", code);
        }
        // nothing from a rejected batch is kept
        assert!(repo.get_all().unwrap().is_empty());
    }
}
