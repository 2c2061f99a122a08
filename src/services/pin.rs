//! Pin service
//!
//! Business logic for the pin lifecycle: generating unclaimed pins, claiming
//! them, editing the attached profile, and counting profile views and
//! contact downloads.

use std::path::Path;

use log::{debug, info};
use uuid::Uuid;

use crate::error::{PinError, PinResult};
use crate::models::{Counter, ProfileRecord, TextField, TimestampValue};
use crate::storage::file_io::read_json_required;
use crate::storage::{ImportSummary, Storage};

/// Which pins to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinFilter {
    #[default]
    All,
    Claimed,
    Unclaimed,
}

impl PinFilter {
    pub fn matches(&self, record: &ProfileRecord) -> bool {
        match self {
            Self::All => true,
            Self::Claimed => record.is_claimed(),
            Self::Unclaimed => !record.is_claimed(),
        }
    }
}

/// Profile edits; `None` leaves a field alone, an empty string clears it
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub photo: Option<String>,
    pub file: Option<String>,
    pub info: Option<String>,
}

impl ProfileUpdate {
    fn fields(self) -> [(TextField, Option<String>); 8] {
        [
            (TextField::Name, self.name),
            (TextField::Email, self.email),
            (TextField::Organization, self.organization),
            (TextField::Phone, self.phone),
            (TextField::Role, self.role),
            (TextField::Photo, self.photo),
            (TextField::File, self.file),
            (TextField::Info, self.info),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.organization.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.photo.is_none()
            && self.file.is_none()
            && self.info.is_none()
    }
}

/// Dashboard totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinStats {
    pub total: usize,
    pub claimed: usize,
    pub unclaimed: usize,
    pub total_views: u64,
    pub total_downloads: u64,
}

/// Service for pin management
pub struct PinService<'a> {
    storage: &'a Storage,
}

impl<'a> PinService<'a> {
    /// Create a new pin service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a pin by code
    pub fn get(&self, code: &str) -> PinResult<ProfileRecord> {
        let code = code.trim();
        self.storage
            .pins
            .get(code)?
            .ok_or_else(|| PinError::pin_not_found(code))
    }

    /// List pins in code order
    pub fn list(&self, filter: PinFilter) -> PinResult<Vec<ProfileRecord>> {
        Ok(self
            .storage
            .pins
            .get_all()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    /// Create `count` unclaimed pins with random codes
    pub fn generate(&self, count: usize, code_length: usize) -> PinResult<Vec<ProfileRecord>> {
        if count == 0 {
            return Err(PinError::Validation("Pin count must be at least 1".into()));
        }
        if !(4..=32).contains(&code_length) {
            return Err(PinError::Validation(format!(
                "Code length must be between 4 and 32, got {}",
                code_length
            )));
        }

        let mut created = Vec::with_capacity(count);
        while created.len() < count {
            let code = random_code(code_length);
            if self.storage.pins.exists(&code)? {
                debug!("generated code {} collides, retrying", code);
                continue;
            }
            let record = ProfileRecord::new(code);
            self.storage.pins.upsert(record.clone())?;
            created.push(record);
        }

        self.storage.pins.save()?;
        info!("generated {} pins", created.len());
        Ok(created)
    }

    /// Attach a user to a pin. Claiming again with the same uid is a no-op.
    pub fn claim(&self, code: &str, uid: &str) -> PinResult<ProfileRecord> {
        let uid = uid.trim();
        if uid.is_empty() {
            return Err(PinError::Validation("User id cannot be empty".into()));
        }

        let mut record = self.get(code)?;
        match record.uid.clone().filter(|existing| !existing.is_empty()) {
            Some(existing) if existing == uid => return Ok(record),
            Some(_) => return Err(PinError::AlreadyClaimed { code: record.code }),
            None => {}
        }

        record.uid = Some(uid.to_string());
        record.claimed = Some(true);
        record.last_updated = Some(TimestampValue::now());
        self.storage.pins.upsert(record.clone())?;
        self.storage.pins.save()?;

        info!("pin {} claimed", record.code);
        Ok(record)
    }

    /// Detach the user and clear the profile; counters are kept
    pub fn release(&self, code: &str) -> PinResult<ProfileRecord> {
        let mut record = self.get(code)?;
        if !record.is_claimed() {
            return Err(PinError::Unclaimed { code: record.code });
        }

        for (field, _) in ProfileUpdate::default().fields() {
            if let Some(slot) = record.text_slot_mut(field) {
                *slot = None;
            }
        }
        record.uid = None;
        record.claimed = None;
        record.last_updated = Some(TimestampValue::now());
        self.storage.pins.upsert(record.clone())?;
        self.storage.pins.save()?;

        info!("pin {} released", record.code);
        Ok(record)
    }

    /// Edit the profile of a claimed pin
    pub fn update_profile(&self, code: &str, update: ProfileUpdate) -> PinResult<ProfileRecord> {
        if update.is_empty() {
            return Err(PinError::Validation("No profile fields to update".into()));
        }

        let mut record = self.get(code)?;
        if !record.is_claimed() {
            return Err(PinError::Unclaimed { code: record.code });
        }

        if let Some(email) = update.email.as_deref().map(str::trim) {
            if !email.is_empty() && !is_valid_email(email) {
                return Err(PinError::Validation(format!("Invalid email address: '{}'", email)));
            }
        }

        for (field, value) in update.fields() {
            let Some(value) = value else { continue };
            if let Some(slot) = record.text_slot_mut(field) {
                let value = value.trim();
                *slot = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
        }

        record.last_updated = Some(TimestampValue::now());
        self.storage.pins.upsert(record.clone())?;
        self.storage.pins.save()?;

        debug!("profile for pin {} updated", record.code);
        Ok(record)
    }

    /// Count a public profile view; returns the new view count
    pub fn record_view(&self, code: &str) -> PinResult<u64> {
        let mut record = self.get(code)?;
        let views = record.total_views().saturating_add(1);

        record.view_count = Some(Counter::Count(views));
        record.viewed_at = Some(TimestampValue::now());
        self.storage.pins.upsert(record)?;
        self.storage.pins.save()?;
        Ok(views)
    }

    /// Count a contact download; returns the new download count
    pub fn record_download(&self, code: &str) -> PinResult<u64> {
        let mut record = self.get(code)?;
        let downloads = record.total_downloads().saturating_add(1);

        record.downloads = Some(Counter::Count(downloads));
        self.storage.pins.upsert(record)?;
        self.storage.pins.save()?;
        Ok(downloads)
    }

    /// Totals across all pins
    pub fn stats(&self) -> PinResult<PinStats> {
        let records = self.storage.pins.get_all()?;
        let claimed = records.iter().filter(|r| r.is_claimed()).count();

        Ok(PinStats {
            total: records.len(),
            claimed,
            unclaimed: records.len() - claimed,
            total_views: records
                .iter()
                .map(ProfileRecord::total_views)
                .fold(0, u64::saturating_add),
            total_downloads: records
                .iter()
                .map(ProfileRecord::total_downloads)
                .fold(0, u64::saturating_add),
        })
    }

    /// Merge a JSON array of records (e.g. a document-store dump)
    pub fn import_json(&self, path: impl AsRef<Path>) -> PinResult<ImportSummary> {
        let records: Vec<ProfileRecord> = read_json_required(path.as_ref())?;
        let summary = self.storage.pins.import(records)?;
        self.storage.pins.save()?;

        info!(
            "imported pins from {}: {} added, {} updated",
            path.as_ref().display(),
            summary.added,
            summary.updated
        );
        Ok(summary)
    }
}

fn random_code(length: usize) -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .to_uppercase()
        .chars()
        .take(length)
        .collect()
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
