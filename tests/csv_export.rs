//! Properties of the CSV exporter checked through a standard CSV reader

use nfcpins::export::{ColumnSchema, MemoryDelivery, TabularExporter, CSV_MIME_TYPE};
use nfcpins::models::{Counter, ProfileRecord, TextField, TimestampFormatter, TimestampValue};

fn exporter() -> TabularExporter {
    TabularExporter::new(TimestampFormatter::utc())
}

fn tricky_records() -> Vec<ProfileRecord> {
    let mut quoted = ProfileRecord::new("Q\"1");
    quoted.uid = Some("uid,with,commas".into());
    quoted.name = Some("She said \"hi\"".into());
    quoted.info = Some("multi\nline\r\ninfo, \"quoted\"".into());
    quoted.view_count = Some(Counter::Count(7));
    quoted.views = Some(Counter::Count(5));

    let mut legacy = ProfileRecord::new("L1");
    legacy.views = Some(Counter::Count(5));
    legacy.last_updated = Some(TimestampValue::Text("not-a-date".into()));

    let mut stamped = ProfileRecord::new("T1");
    stamped.last_updated = Some(TimestampValue::Text("2024-01-01T00:00:00Z".into()));
    stamped.organization = Some(String::new());

    vec![quoted, legacy, stamped, ProfileRecord::new("E1")]
}

fn parse(document: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(document.as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn header_only_for_every_preset() {
    for schema in [
        ColumnSchema::claimed_pins(),
        ColumnSchema::analytics(),
        ColumnSchema::dashboard(),
    ] {
        let document = exporter().render(&[], &schema).unwrap();
        let rows = parse(&document);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), schema.len());
        assert_eq!(rows[0], schema.labels());
        assert_eq!(document.lines().count(), 1);
    }
}

#[test]
fn round_trip_preserves_cells_and_width() {
    let records = tricky_records();
    let formatter = TimestampFormatter::utc();

    for schema in [
        ColumnSchema::claimed_pins(),
        ColumnSchema::analytics(),
        ColumnSchema::dashboard(),
    ] {
        let document = exporter().render(&records, &schema).unwrap();
        let rows = parse(&document);

        assert_eq!(rows.len(), records.len() + 1);
        for row in &rows {
            assert_eq!(row.len(), schema.len());
        }
        for (i, record) in records.iter().enumerate() {
            assert_eq!(rows[i + 1], schema.row(record, &formatter));
        }
    }
}

#[test]
fn every_cell_is_quoted() {
    let schema = ColumnSchema::builder()
        .text("Code", TextField::Code)
        .claimed("Claimed")
        .build()
        .unwrap();
    let document = exporter()
        .render(&[ProfileRecord::new("A1")], &schema)
        .unwrap();

    assert_eq!(document, "\"Code\",\"Claimed\"\n\"A1\",\"No\"");
}

#[test]
fn dashboard_cell_rules() {
    let records = tricky_records();
    let document = exporter()
        .render(&records, &ColumnSchema::dashboard())
        .unwrap();
    let rows = parse(&document);
    let header = &rows[0];
    let col = |label: &str| header.iter().position(|h| h == label).unwrap();

    // canonical counter wins over legacy
    assert_eq!(rows[1][col("Views")], "7");
    // legacy counter used when canonical is absent
    assert_eq!(rows[2][col("Views")], "5");
    assert_eq!(rows[4][col("Views")], "0");

    assert_eq!(rows[1][col("Claimed")], "Yes");
    assert_eq!(rows[2][col("Claimed")], "No");

    assert_eq!(rows[2][col("Last Updated")], "-");
    assert_eq!(rows[3][col("Last Updated")], "1/1/2024, 12:00:00 AM");
    assert_eq!(rows[4][col("Last Viewed")], "-");

    assert_eq!(rows[3][col("Organization")], "");
    assert_eq!(rows[4][col("Email")], "");
}

#[test]
fn export_hands_document_to_delivery() {
    let records = tricky_records();
    let delivery = MemoryDelivery::new();
    let schema = ColumnSchema::claimed_pins();

    exporter()
        .export_csv(&records, &schema, "claimed_pins.csv", &delivery)
        .unwrap();

    let files = delivery.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].mime_type, CSV_MIME_TYPE);
    assert_eq!(files[0].filename, "claimed_pins.csv");
    assert_eq!(files[0].text(), exporter().render(&records, &schema).unwrap());
}

#[test]
fn records_loaded_from_store_json_export_cleanly() {
    let records: Vec<ProfileRecord> = serde_json::from_str(
        r#"[
            {"code": "A1", "uid": "u1", "name": "Ann",
             "lastUpdated": {"_seconds": 1704067200, "_nanoseconds": 0},
             "viewedAt": 1704067200000, "views": 3, "downloads": "2"},
            {"code": "A2", "lastUpdated": {"weird": true}, "viewCount": null}
        ]"#,
    )
    .unwrap();

    let document = exporter()
        .render(&records, &ColumnSchema::analytics())
        .unwrap();

    assert_eq!(
        document,
        "\"Code\",\"Name\",\"Organization\",\"Views\",\"Downloads\",\"Last Viewed\",\"Last Updated\"\n\
         \"A1\",\"Ann\",\"\",\"3\",\"2\",\"1/1/2024, 12:00:00 AM\",\"1/1/2024, 12:00:00 AM\"\n\
         \"A2\",\"\",\"\",\"0\",\"0\",\"-\",\"-\""
    );
}
