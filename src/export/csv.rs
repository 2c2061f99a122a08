//! CSV export of profile records
//!
//! Every cell is quoted, embedded quotes are doubled, and rows are joined
//! with `\n` without a trailing newline:
//!
//! ```text
//! "Code","Claimed","UID","Name","Email","Organization"
//! "A1","Yes","u1","Ann","",""
//! ```

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::{debug, info};

use super::delivery::FileDelivery;
use super::schema::ColumnSchema;
use crate::error::{PinError, PinResult};
use crate::models::{ProfileRecord, TimestampFormatter};

/// MIME type handed to the delivery collaborator
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Builds CSV documents from profile records and a column schema
#[derive(Debug, Clone, Default)]
pub struct TabularExporter {
    timestamps: TimestampFormatter,
}

impl TabularExporter {
    pub fn new(timestamps: TimestampFormatter) -> Self {
        Self { timestamps }
    }

    /// Render the document for `records` in input order
    pub fn render(&self, records: &[ProfileRecord], schema: &ColumnSchema) -> PinResult<String> {
        render_csv(records, schema, &self.timestamps)
    }

    /// Render the document and hand it to `delivery` as `filename`.
    ///
    /// Delivery errors are returned as-is and never retried.
    pub fn export_csv(
        &self,
        records: &[ProfileRecord],
        schema: &ColumnSchema,
        filename: &str,
        delivery: &dyn FileDelivery,
    ) -> PinResult<()> {
        let document = self.render(records, schema)?;
        debug!(
            "rendered {} rows x {} columns ({} bytes) for {}",
            records.len() + 1,
            schema.len(),
            document.len(),
            filename
        );

        delivery.deliver(document.as_bytes(), CSV_MIME_TYPE, filename)?;

        info!("exported {} records to {}", records.len(), filename);
        Ok(())
    }
}

/// Render the header row plus one row per record
pub fn render_csv(
    records: &[ProfileRecord],
    schema: &ColumnSchema,
    timestamps: &TimestampFormatter,
) -> PinResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(schema.labels())?;
    for record in records {
        writer.write_record(schema.row(record, timestamps))?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| PinError::Export(e.to_string()))?;

    // Rows are joined, not terminated
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|e| PinError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::delivery::MemoryDelivery;
    use crate::models::{Counter, TimestampValue};

    fn exporter() -> TabularExporter {
        TabularExporter::new(TimestampFormatter::utc())
    }

    fn record(code: &str) -> ProfileRecord {
        ProfileRecord::new(code)
    }

    #[test]
    fn test_claimed_pins_scenario() {
        let mut a1 = record("A1");
        a1.uid = Some("u1".into());
        a1.name = Some("Ann".into());
        let records = vec![a1, record("A2")];

        let document = exporter()
            .render(&records, &ColumnSchema::claimed_pins())
            .unwrap();

        assert_eq!(
            document,
            "\"Code\",\"Claimed\",\"UID\",\"Name\",\"Email\",\"Organization\"\n\
             \"A1\",\"Yes\",\"u1\",\"Ann\",\"\",\"\"\n\
             \"A2\",\"No\",\"\",\"\",\"\",\"\""
        );
    }

    #[test]
    fn test_empty_records_yield_header_only() {
        let schema = ColumnSchema::analytics();
        let document = exporter().render(&[], &schema).unwrap();

        assert_eq!(document.lines().count(), 1);
        assert!(!document.ends_with('\n'));
        assert_eq!(document.split(',').count(), schema.len());
    }

    #[test]
    fn test_quotes_are_doubled() {
        let mut r = record("Q1");
        r.name = Some("Ann \"The Pin\" Lee".into());
        let schema = ColumnSchema::builder()
            .text("Name", crate::models::TextField::Name)
            .build()
            .unwrap();

        let document = exporter().render(&[r], &schema).unwrap();
        assert_eq!(document, "\"Name\"\n\"Ann \"\"The Pin\"\" Lee\"");
    }

    #[test]
    fn test_embedded_newline_stays_inside_cell() {
        let mut r = record("N1");
        r.info = Some("line one\nline two".into());
        let schema = ColumnSchema::dashboard();

        let document = exporter().render(&[r], &schema).unwrap();
        assert!(document.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_analytics_row() {
        let mut r = record("A9");
        r.name = Some("Bo".into());
        r.views = Some(Counter::Count(5));
        r.downloads = Some(Counter::Count(2));
        r.viewed_at = Some(TimestampValue::Millis(1_704_067_200_000));
        r.last_updated = Some(TimestampValue::Text("garbage".into()));

        let document = exporter().render(&[r], &ColumnSchema::analytics()).unwrap();
        let row = document.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"A9\",\"Bo\",\"\",\"5\",\"2\",\"1/1/2024, 12:00:00 AM\",\"-\""
        );
    }

    #[test]
    fn test_export_delivers_once() {
        let delivery = MemoryDelivery::new();
        exporter()
            .export_csv(&[record("A1")], &ColumnSchema::claimed_pins(), "claimed_pins.csv", &delivery)
            .unwrap();

        let files = delivery.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "claimed_pins.csv");
        assert_eq!(files[0].mime_type, CSV_MIME_TYPE);
        assert!(files[0].text().starts_with("\"Code\""));
    }

    #[test]
    fn test_delivery_failure_propagates() {
        struct Rejecting;
        impl FileDelivery for Rejecting {
            fn deliver(&self, _: &[u8], _: &str, filename: &str) -> PinResult<()> {
                Err(PinError::delivery(filename, "user cancelled"))
            }
        }

        let err = exporter()
            .export_csv(&[], &ColumnSchema::claimed_pins(), "x.csv", &Rejecting)
            .unwrap_err();
        assert!(err.is_delivery());
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut r = record("D1");
        r.last_updated = Some(TimestampValue::Text("2024-01-01T00:00:00Z".into()));
        let records = vec![r, record("D2")];
        let schema = ColumnSchema::dashboard();

        let first = exporter().render(&records, &schema).unwrap();
        let second = exporter().render(&records, &schema).unwrap();
        assert_eq!(first, second);
    }
}
