//! Profile record model
//!
//! One NFC pin and the profile attached to it. Every field except `code` is
//! optional, and loading tolerates loosely typed documents: text fields accept
//! numbers and booleans, timestamps and counters accept any shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::timestamp::TimestampValue;

/// A usage counter as stored on a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Counter {
    Count(u64),
    Signed(i64),
    Decimal(f64),
    Text(String),
    Other(Value),
}

impl Counter {
    /// Decimal display string, if the value is usable
    pub fn display(&self) -> Option<String> {
        match self {
            Self::Count(n) => Some(n.to_string()),
            Self::Signed(n) => Some(n.to_string()),
            Self::Decimal(n) if n.is_finite() => Some(n.to_string()),
            Self::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Numeric value for incrementing; unusable values count as zero
    pub fn as_u64(&self) -> u64 {
        match self {
            Self::Count(n) => *n,
            Self::Signed(n) => u64::try_from(*n).unwrap_or(0),
            Self::Decimal(n) if n.is_finite() && *n > 0.0 => n.trunc() as u64,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Text fields that can be looked up by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    Code,
    Uid,
    Name,
    Email,
    Organization,
    Phone,
    Role,
    Photo,
    File,
    Info,
}

impl TextField {
    /// Parse a field name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "code" => Some(Self::Code),
            "uid" => Some(Self::Uid),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "organization" | "org" => Some(Self::Organization),
            "phone" => Some(Self::Phone),
            "role" | "title" => Some(Self::Role),
            "photo" => Some(Self::Photo),
            "file" => Some(Self::File),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Code => "code",
            Self::Uid => "uid",
            Self::Name => "name",
            Self::Email => "email",
            Self::Organization => "organization",
            Self::Phone => "phone",
            Self::Role => "role",
            Self::Photo => "photo",
            Self::File => "file",
            Self::Info => "info",
        };
        write!(f, "{}", name)
    }
}

/// Timestamp fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampField {
    LastUpdated,
    ViewedAt,
}

/// Counter fields, including the legacy `views` name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CounterField {
    ViewCount,
    Views,
    Downloads,
}

/// A pin and its profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Code printed on / encoded in the pin
    #[serde(deserialize_with = "required_text")]
    pub code: String,

    /// Identity of the user who claimed the pin
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Photo URL
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Attached file URL
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Free-form bio / notes
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Explicit claimed flag written by some clients; not authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<TimestampValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_at: Option<TimestampValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<Counter>,

    /// Legacy name of `view_count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<Counter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<Counter>,
}

impl ProfileRecord {
    /// Create an unclaimed record
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// A record is claimed when it carries a non-empty `uid`
    pub fn is_claimed(&self) -> bool {
        self.uid.as_deref().is_some_and(|uid| !uid.is_empty())
    }

    /// Text value of a field, or `""` when absent
    pub fn text(&self, field: TextField) -> &str {
        let value = match field {
            TextField::Code => return &self.code,
            TextField::Uid => &self.uid,
            TextField::Name => &self.name,
            TextField::Email => &self.email,
            TextField::Organization => &self.organization,
            TextField::Phone => &self.phone,
            TextField::Role => &self.role,
            TextField::Photo => &self.photo,
            TextField::File => &self.file,
            TextField::Info => &self.info,
        };
        value.as_deref().unwrap_or("")
    }

    /// Mutable slot for a profile text field; `code` is not editable
    pub fn text_slot_mut(&mut self, field: TextField) -> Option<&mut Option<String>> {
        match field {
            TextField::Code => None,
            TextField::Uid => Some(&mut self.uid),
            TextField::Name => Some(&mut self.name),
            TextField::Email => Some(&mut self.email),
            TextField::Organization => Some(&mut self.organization),
            TextField::Phone => Some(&mut self.phone),
            TextField::Role => Some(&mut self.role),
            TextField::Photo => Some(&mut self.photo),
            TextField::File => Some(&mut self.file),
            TextField::Info => Some(&mut self.info),
        }
    }

    pub fn timestamp(&self, field: TimestampField) -> Option<&TimestampValue> {
        match field {
            TimestampField::LastUpdated => self.last_updated.as_ref(),
            TimestampField::ViewedAt => self.viewed_at.as_ref(),
        }
    }

    pub fn counter(&self, field: CounterField) -> Option<&Counter> {
        match field {
            CounterField::ViewCount => self.view_count.as_ref(),
            CounterField::Views => self.views.as_ref(),
            CounterField::Downloads => self.downloads.as_ref(),
        }
    }

    /// Effective view count: `viewCount`, else legacy `views`, else zero
    pub fn total_views(&self) -> u64 {
        self.view_count
            .as_ref()
            .or(self.views.as_ref())
            .map(Counter::as_u64)
            .unwrap_or(0)
    }

    pub fn total_downloads(&self) -> u64 {
        self.downloads.as_ref().map(Counter::as_u64).unwrap_or(0)
    }
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string code, found {}",
            other
        ))),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
