//! Business logic layer for nfc-pins
//!
//! Services take the [`Storage`](crate::storage::Storage) handle explicitly
//! and implement validation on top of the repositories.

pub mod pin;

pub use pin::{PinFilter, PinService, PinStats, ProfileUpdate};
