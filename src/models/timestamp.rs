//! Timestamp values as they appear on profile records
//!
//! Records arrive from a document store where timestamps may be stored as
//! native timestamp objects, ISO-8601 strings, or epoch milliseconds. Any
//! other shape is kept verbatim so that loading a record never fails on a
//! malformed timestamp; such values simply render as `-`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Placeholder rendered for absent or unparseable timestamps
pub const MISSING_TIMESTAMP: &str = "-";

/// en-US style date-time, e.g. `1/15/2024, 3:04:05 PM`
pub const DEFAULT_DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Native document-store timestamp (`{seconds, nanoseconds}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTimestamp {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds")]
    pub nanoseconds: u32,
}

impl From<DateTime<Utc>> for DatabaseTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanoseconds: dt.timestamp_subsec_nanos(),
        }
    }
}

/// A timestamp field value in any of the shapes the store produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampValue {
    Database(DatabaseTimestamp),
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
    Other(serde_json::Value),
}

impl TimestampValue {
    /// Current time as a native store timestamp
    pub fn now() -> Self {
        Self::Database(Utc::now().into())
    }

    /// Interpret the value as a UTC instant, if it is one
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Database(ts) => DateTime::from_timestamp(ts.seconds, ts.nanoseconds),
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Self::FractionalMillis(ms) => {
                if !ms.is_finite() {
                    return None;
                }
                DateTime::from_timestamp_millis(ms.trunc() as i64)
            }
            Self::Text(s) => parse_text(s),
            Self::Other(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for TimestampValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Database(dt.into())
    }
}

/// Parse an ISO-8601 string. Values without an offset are read as UTC.
fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Time zone used to render timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    /// The machine's local time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

impl TimestampZone {
    /// Parse a zone name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "utc" | "z" => Some(Self::Utc),
            _ => None,
        }
    }
}

/// Renders timestamp values as human-readable date-times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormatter {
    zone: TimestampZone,
    format: String,
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(TimestampZone::Local, DEFAULT_DISPLAY_FORMAT)
    }
}

impl TimestampFormatter {
    /// Create a formatter for the given zone and strftime format
    pub fn new(zone: TimestampZone, format: impl Into<String>) -> Self {
        Self {
            zone,
            format: format.into(),
        }
    }

    /// UTC formatter with the default display format
    pub fn utc() -> Self {
        Self::new(TimestampZone::Utc, DEFAULT_DISPLAY_FORMAT)
    }

    /// Render a timestamp, or `-` when absent or unparseable.
    ///
    /// Never panics, including on an invalid format string.
    pub fn render(&self, value: Option<&TimestampValue>) -> String {
        value
            .and_then(TimestampValue::to_utc)
            .and_then(|dt| self.format_datetime(dt))
            .unwrap_or_else(|| MISSING_TIMESTAMP.to_string())
    }

    fn format_datetime(&self, dt: DateTime<Utc>) -> Option<String> {
        let mut out = String::new();
        let written = match self.zone {
            TimestampZone::Local => write!(out, "{}", dt.with_timezone(&Local).format(&self.format)),
            TimestampZone::Utc => write!(out, "{}", dt.format(&self.format)),
        };
        written.ok().map(|_| out)
    }
}
