//! nfc-pins - NFC pin profiles with CSV and contact-card export
//!
//! Each NFC pin carries a code. A visitor claims the code, fills out a
//! profile, and the profile is served publicly with contact export links.
//! Admins list pins and export claimed/unclaimed pins as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: `log` / `env_logger` bootstrap
//! - `models`: Profile records and timestamp values
//! - `storage`: JSON file storage layer (the data-access handle)
//! - `services`: Pin lifecycle logic
//! - `export`: Schema-driven CSV export, vCard export, file delivery
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use nfcpins::export::{ColumnSchema, MemoryDelivery, TabularExporter};
//! use nfcpins::models::ProfileRecord;
//!
//! let records = vec![ProfileRecord::new("A1")];
//! let delivery = MemoryDelivery::new();
//! TabularExporter::default().export_csv(
//!     &records,
//!     &ColumnSchema::claimed_pins(),
//!     "claimed_pins.csv",
//!     &delivery,
//! )?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PinError, PinResult};
