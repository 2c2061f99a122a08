//! Column schemas for tabular exports
//!
//! A schema is an ordered list of columns, each pairing a header label with a
//! declarative extraction rule. Rules are total: a missing or malformed value
//! degrades to `""`, `"-"` or `"0"` instead of failing the export.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PinError, PinResult};
use crate::models::{CounterField, ProfileRecord, TextField, TimestampField, TimestampFormatter};

/// Cell text for a claimed record
pub const CLAIMED_YES: &str = "Yes";
/// Cell text for an unclaimed record
pub const CLAIMED_NO: &str = "No";

/// How a column derives its cell from a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractRule {
    /// Field value, or empty string when absent
    Text { field: TextField },
    /// "Yes" when the record has a uid, else "No"
    Claimed,
    /// Display date-time, or "-" when absent or unparseable
    Timestamp { field: TimestampField },
    /// Counter value, else the fallback field's value, else 0
    Counter {
        field: CounterField,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<CounterField>,
    },
}

impl ExtractRule {
    /// Compute the cell text for one record
    pub fn extract(&self, record: &ProfileRecord, timestamps: &TimestampFormatter) -> String {
        match self {
            Self::Text { field } => record.text(*field).to_string(),
            Self::Claimed => {
                if record.is_claimed() {
                    CLAIMED_YES.to_string()
                } else {
                    CLAIMED_NO.to_string()
                }
            }
            Self::Timestamp { field } => timestamps.render(record.timestamp(*field)),
            Self::Counter { field, fallback } => record
                .counter(*field)
                .and_then(|c| c.display())
                .or_else(|| {
                    fallback
                        .and_then(|legacy| record.counter(legacy))
                        .and_then(|c| c.display())
                })
                .unwrap_or_else(|| "0".to_string()),
        }
    }
}

/// One export column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    #[serde(flatten)]
    pub rule: ExtractRule,
}

/// Ordered, non-empty list of columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Create a schema from columns
    ///
    /// # Errors
    ///
    /// Returns a validation error when `columns` is empty.
    pub fn new(columns: Vec<Column>) -> PinResult<Self> {
        if columns.is_empty() {
            return Err(PinError::Validation(
                "Column schema must have at least one column".into(),
            ));
        }
        Ok(Self { columns })
    }

    pub fn builder() -> ColumnSchemaBuilder {
        ColumnSchemaBuilder::default()
    }

    /// Minimal claimed-pins export
    pub fn claimed_pins() -> Self {
        Self::builder()
            .text("Code", TextField::Code)
            .claimed("Claimed")
            .text("UID", TextField::Uid)
            .text("Name", TextField::Name)
            .text("Email", TextField::Email)
            .text("Organization", TextField::Organization)
            .build_unchecked()
    }

    /// Usage analytics export
    pub fn analytics() -> Self {
        Self::builder()
            .text("Code", TextField::Code)
            .text("Name", TextField::Name)
            .text("Organization", TextField::Organization)
            .views("Views")
            .counter("Downloads", CounterField::Downloads)
            .timestamp("Last Viewed", TimestampField::ViewedAt)
            .timestamp("Last Updated", TimestampField::LastUpdated)
            .build_unchecked()
    }

    /// Full pins-dashboard export
    pub fn dashboard() -> Self {
        Self::builder()
            .text("Code", TextField::Code)
            .claimed("Claimed")
            .text("UID", TextField::Uid)
            .text("Name", TextField::Name)
            .text("Email", TextField::Email)
            .text("Phone", TextField::Phone)
            .text("Organization", TextField::Organization)
            .text("Role", TextField::Role)
            .views("Views")
            .counter("Downloads", CounterField::Downloads)
            .timestamp("Last Updated", TimestampField::LastUpdated)
            .timestamp("Last Viewed", TimestampField::ViewedAt)
            .text("Photo", TextField::Photo)
            .text("File", TextField::File)
            .text("Info", TextField::Info)
            .build_unchecked()
    }

    /// Parse a schema from a JSON array of columns
    pub fn from_json_str(json: &str) -> PinResult<Self> {
        let columns: Vec<Column> = serde_json::from_str(json)
            .map_err(|e| PinError::Validation(format!("Invalid column schema: {}", e)))?;
        Self::new(columns)
    }

    /// Load a schema from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> PinResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PinError::Io(format!("Failed to read schema {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header labels in column order
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Cells for one record, one per column
    pub fn row(&self, record: &ProfileRecord, timestamps: &TimestampFormatter) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.rule.extract(record, timestamps))
            .collect()
    }
}

/// Builder for [`ColumnSchema`]
#[derive(Debug, Default)]
pub struct ColumnSchemaBuilder {
    columns: Vec<Column>,
}

impl ColumnSchemaBuilder {
    pub fn column(mut self, label: impl Into<String>, rule: ExtractRule) -> Self {
        self.columns.push(Column {
            label: label.into(),
            rule,
        });
        self
    }

    pub fn text(self, label: impl Into<String>, field: TextField) -> Self {
        self.column(label, ExtractRule::Text { field })
    }

    pub fn claimed(self, label: impl Into<String>) -> Self {
        self.column(label, ExtractRule::Claimed)
    }

    pub fn timestamp(self, label: impl Into<String>, field: TimestampField) -> Self {
        self.column(label, ExtractRule::Timestamp { field })
    }

    pub fn counter(self, label: impl Into<String>, field: CounterField) -> Self {
        self.column(
            label,
            ExtractRule::Counter {
                field,
                fallback: None,
            },
        )
    }

    /// View counter with the legacy `views` field as fallback
    pub fn views(self, label: impl Into<String>) -> Self {
        self.column(
            label,
            ExtractRule::Counter {
                field: CounterField::ViewCount,
                fallback: Some(CounterField::Views),
            },
        )
    }

    pub fn build(self) -> PinResult<ColumnSchema> {
        ColumnSchema::new(self.columns)
    }

    fn build_unchecked(self) -> ColumnSchema {
        debug_assert!(!self.columns.is_empty());
        ColumnSchema {
            columns: self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Counter, TimestampValue};

    fn formatter() -> TimestampFormatter {
        TimestampFormatter::utc()
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = ColumnSchema::builder().build().unwrap_err();
        assert!(err.is_validation());
        assert!(ColumnSchema::from_json_str("[]").is_err());
    }

    #[test]
    fn test_preset_labels() {
        assert_eq!(
            ColumnSchema::claimed_pins().labels(),
            vec!["Code", "Claimed", "UID", "Name", "Email", "Organization"]
        );
        assert_eq!(ColumnSchema::analytics().len(), 7);
        assert_eq!(ColumnSchema::dashboard().len(), 15);
    }

    #[test]
    fn test_claimed_rule() {
        let rule = ExtractRule::Claimed;
        let mut record = ProfileRecord::new("A1");
        assert_eq!(rule.extract(&record, &formatter()), "No");

        record.uid = Some("abc".into());
        assert_eq!(rule.extract(&record, &formatter()), "Yes");
    }

    #[test]
    fn test_text_rule_never_uses_dash() {
        let rule = ExtractRule::Text {
            field: TextField::Email,
        };
        let mut record = ProfileRecord::new("A1");
        assert_eq!(rule.extract(&record, &formatter()), "");

        record.email = Some(String::new());
        assert_eq!(rule.extract(&record, &formatter()), "");
    }

    #[test]
    fn test_timestamp_rule() {
        let rule = ExtractRule::Timestamp {
            field: TimestampField::LastUpdated,
        };
        let mut record = ProfileRecord::new("A1");
        assert_eq!(rule.extract(&record, &formatter()), "-");

        record.last_updated = Some(TimestampValue::Text("not-a-date".into()));
        assert_eq!(rule.extract(&record, &formatter()), "-");

        record.last_updated = Some(TimestampValue::Text("2024-01-01T00:00:00Z".into()));
        let cell = rule.extract(&record, &formatter());
        assert_ne!(cell, "-");
        assert_eq!(cell, "1/1/2024, 12:00:00 AM");
    }

    #[test]
    fn test_counter_rule_fallback() {
        let schema = ColumnSchema::builder().views("Views").build().unwrap();
        let mut record = ProfileRecord::new("A1");
        assert_eq!(schema.row(&record, &formatter()), vec!["0"]);

        record.views = Some(Counter::Count(5));
        assert_eq!(schema.row(&record, &formatter()), vec!["5"]);

        record.view_count = Some(Counter::Count(7));
        assert_eq!(schema.row(&record, &formatter()), vec!["7"]);
    }

    #[test]
    fn test_unusable_canonical_counter_falls_back() {
        let schema = ColumnSchema::builder().views("Views").build().unwrap();
        let mut record = ProfileRecord::new("A1");
        record.view_count = Some(Counter::Other(serde_json::Value::Null));
        record.views = Some(Counter::Count(3));
        assert_eq!(schema.row(&record, &formatter()), vec!["3"]);
    }

    #[test]
    fn test_schema_from_json() {
        let schema = ColumnSchema::from_json_str(
            r#"[
                {"label": "Pin", "kind": "text", "field": "code"},
                {"label": "Owner?", "kind": "claimed"},
                {"label": "Seen", "kind": "timestamp", "field": "viewedAt"},
                {"label": "Views", "kind": "counter", "field": "viewCount", "fallback": "views"}
            ]"#,
        )
        .unwrap();

        assert_eq!(schema.labels(), vec!["Pin", "Owner?", "Seen", "Views"]);
        assert_eq!(
            schema.columns()[3].rule,
            ExtractRule::Counter {
                field: CounterField::ViewCount,
                fallback: Some(CounterField::Views),
            }
        );
    }

    #[test]
    fn test_unknown_rule_kind_rejected() {
        let err = ColumnSchema::from_json_str(r#"[{"label": "X", "kind": "magic"}]"#).unwrap_err();
        assert!(err.is_validation());
    }
}
