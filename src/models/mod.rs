//! Core data models for nfc-pins
//!
//! Profile records as loaded from the pin store, and the timestamp values
//! they carry.

pub mod record;
pub mod timestamp;

pub use record::{Counter, CounterField, ProfileRecord, TextField, TimestampField};
pub use timestamp::{DatabaseTimestamp, TimestampFormatter, TimestampValue, TimestampZone};
