//! Pin display formatting
//!
//! Formats pins for terminal output in table and detail views.

use crate::models::{ProfileRecord, TextField, TimestampField, TimestampFormatter};
use crate::services::PinStats;

/// Format a list of pins as a table
pub fn format_pin_list(records: &[ProfileRecord]) -> String {
    if records.is_empty() {
        return "No pins found.".to_string();
    }

    let code_width = records
        .iter()
        .map(|r| r.code.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let name_width = records
        .iter()
        .map(|r| r.text(TextField::Name).chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<code_width$}  {:<9}  {:<name_width$}  {:>6}  {:>9}\n",
        "Code",
        "Status",
        "Name",
        "Views",
        "Downloads",
        code_width = code_width,
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<code_width$}  {:-<9}  {:-<name_width$}  {:->6}  {:->9}\n",
        "",
        "",
        "",
        "",
        "",
        code_width = code_width,
        name_width = name_width,
    ));

    for record in records {
        let status = if record.is_claimed() {
            "Claimed"
        } else {
            "Unclaimed"
        };
        output.push_str(&format!(
            "{:<code_width$}  {:<9}  {:<name_width$}  {:>6}  {:>9}\n",
            record.code,
            status,
            truncate(record.text(TextField::Name), name_width),
            record.total_views(),
            record.total_downloads(),
            code_width = code_width,
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} pin(s)\n", records.len()));
    output
}

/// Format a single pin with its full profile
pub fn format_pin_details(record: &ProfileRecord, timestamps: &TimestampFormatter) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pin: {}\n", record.code));
    output.push_str(&format!("{}\n", "=".repeat(record.code.len() + 5)));
    output.push_str(&format!(
        "Status:        {}\n",
        if record.is_claimed() {
            "Claimed"
        } else {
            "Unclaimed"
        }
    ));

    let fields = [
        ("UID", TextField::Uid),
        ("Name", TextField::Name),
        ("Email", TextField::Email),
        ("Phone", TextField::Phone),
        ("Organization", TextField::Organization),
        ("Role", TextField::Role),
        ("Photo", TextField::Photo),
        ("File", TextField::File),
        ("Info", TextField::Info),
    ];
    for (label, field) in fields {
        let value = record.text(field);
        if !value.is_empty() {
            output.push_str(&format!("{:<15}{}\n", format!("{}:", label), value));
        }
    }

    output.push_str(&format!("Views:         {}\n", record.total_views()));
    output.push_str(&format!("Downloads:     {}\n", record.total_downloads()));
    output.push_str(&format!(
        "Last Updated:  {}\n",
        timestamps.render(record.timestamp(TimestampField::LastUpdated))
    ));
    output.push_str(&format!(
        "Last Viewed:   {}\n",
        timestamps.render(record.timestamp(TimestampField::ViewedAt))
    ));

    output
}

/// Format dashboard totals
pub fn format_stats(stats: &PinStats) -> String {
    format!(
        "Pins:       {}\nClaimed:    {}\nUnclaimed:  {}\nViews:      {}\nDownloads:  {}\n",
        stats.total, stats.claimed, stats.unclaimed, stats.total_views, stats.total_downloads
    )
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
