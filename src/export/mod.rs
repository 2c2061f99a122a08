//! Export module for nfc-pins
//!
//! Provides export functionality for pin records:
//! - CSV: tabular exports driven by a column schema (claimed pins, analytics,
//!   full dashboard, or a custom schema)
//! - vCard: contact cards for claimed profiles
//!
//! Finished documents are handed to a [`FileDelivery`] implementation.

pub mod csv;
pub mod delivery;
pub mod schema;
pub mod vcard;

pub use self::csv::{render_csv, TabularExporter, CSV_MIME_TYPE};
pub use delivery::{DeliveredFile, DirectoryDelivery, FileDelivery, MemoryDelivery, StdoutDelivery};
pub use schema::{Column, ColumnSchema, ColumnSchemaBuilder, ExtractRule, CLAIMED_NO, CLAIMED_YES};
pub use vcard::{export_vcard, render_vcard, VCARD_MIME_TYPE};
