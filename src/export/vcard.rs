//! Contact card export
//!
//! Renders a claimed pin's profile as a vCard 3.0 so visitors of the public
//! profile page can save the contact.

use log::info;

use super::delivery::FileDelivery;
use crate::error::{PinError, PinResult};
use crate::models::ProfileRecord;

pub const VCARD_MIME_TYPE: &str = "text/vcard;charset=utf-8";

/// Render a vCard for a claimed pin
pub fn render_vcard(record: &ProfileRecord, profile_url: &str) -> PinResult<String> {
    if !record.is_claimed() {
        return Err(PinError::Unclaimed {
            code: record.code.clone(),
        });
    }

    let display_name = non_empty(&record.name).unwrap_or(&record.code);
    let (family, given) = split_name(display_name);

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{};{};;;", escape(family), escape(given)),
        format!("FN:{}", escape(display_name)),
    ];

    if let Some(org) = non_empty(&record.organization) {
        lines.push(format!("ORG:{}", escape(org)));
    }
    if let Some(role) = non_empty(&record.role) {
        lines.push(format!("TITLE:{}", escape(role)));
    }
    if let Some(phone) = non_empty(&record.phone) {
        lines.push(format!("TEL;TYPE=CELL:{}", escape(phone)));
    }
    if let Some(email) = non_empty(&record.email) {
        lines.push(format!("EMAIL;TYPE=INTERNET:{}", escape(email)));
    }
    if let Some(photo) = non_empty(&record.photo) {
        lines.push(format!("PHOTO;VALUE=URI:{}", photo));
    }
    if !profile_url.is_empty() {
        lines.push(format!("URL:{}", profile_url));
    }
    if let Some(info) = non_empty(&record.info) {
        lines.push(format!("NOTE:{}", escape(info)));
    }
    lines.push("END:VCARD".to_string());

    let mut card = lines.join("\r\n");
    card.push_str("\r\n");
    Ok(card)
}

/// Render the vCard and deliver it as `<code>.vcf`
pub fn export_vcard(
    record: &ProfileRecord,
    profile_url: &str,
    delivery: &dyn FileDelivery,
) -> PinResult<String> {
    let card = render_vcard(record, profile_url)?;
    let filename = format!("{}.vcf", record.code);

    delivery.deliver(card.as_bytes(), VCARD_MIME_TYPE, &filename)?;
    info!("exported contact card for pin {}", record.code);
    Ok(filename)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Split "Given Family" at the last space; single words are the given name
fn split_name(name: &str) -> (&str, &str) {
    match name.trim().rsplit_once(' ') {
        Some((given, family)) => (family.trim(), given.trim()),
        None => ("", name.trim()),
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::delivery::MemoryDelivery;

    fn claimed() -> ProfileRecord {
        let mut record = ProfileRecord::new("A1");
        record.uid = Some("u1".into());
        record.name = Some("Ann Marie Lee".into());
        record.organization = Some("Acme, Inc.".into());
        record.email = Some("ann@example.com".into());
        record
    }

    #[test]
    fn test_render_vcard() {
        let card = render_vcard(&claimed(), "https://pins.example.com/p/A1").unwrap();

        assert!(card.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert!(card.contains("N:Lee;Ann Marie;;;\r\n"));
        assert!(card.contains("FN:Ann Marie Lee\r\n"));
        assert!(card.contains("ORG:Acme\\, Inc.\r\n"));
        assert!(card.contains("EMAIL;TYPE=INTERNET:ann@example.com\r\n"));
        assert!(card.contains("URL:https://pins.example.com/p/A1\r\n"));
        assert!(!card.contains("TEL"));
        assert!(card.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn test_unclaimed_rejected() {
        let err = render_vcard(&ProfileRecord::new("A2"), "").unwrap_err();
        assert!(matches!(err, PinError::Unclaimed { .. }));
    }

    #[test]
    fn test_escape_note() {
        let mut record = claimed();
        record.info = Some("Line; one\r\nLine two".into());
        let card = render_vcard(&record, "").unwrap();
        assert!(card.contains("NOTE:Line\\; one\\nLine two\r\n"));
    }

    #[test]
    fn test_export_vcard_delivers() {
        let delivery = MemoryDelivery::new();
        let filename = export_vcard(&claimed(), "", &delivery).unwrap();

        assert_eq!(filename, "A1.vcf");
        let file = delivery.last().unwrap();
        assert_eq!(file.mime_type, VCARD_MIME_TYPE);
        assert!(file.text().contains("FN:Ann Marie Lee"));
    }
}
