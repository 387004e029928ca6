//! Human-readable plain-text rendering.

use pwncheck_core::BreachReport;
use std::fmt::Write;

/// Printed when the whole report is empty.
pub const NO_BREACHES_MESSAGE: &str = "No breaches found.";

/// Render the report as plain text.
///
/// One line per address with at least one record, followed by one indented
/// `<Name> <BreachDate>` line per record in insertion order. Addresses with
/// zero records are omitted. An empty report renders as the single
/// [`NO_BREACHES_MESSAGE`] line.
#[must_use]
pub fn render_plain(report: &BreachReport) -> String {
    if report.is_empty() {
        return format!("{NO_BREACHES_MESSAGE}\n");
    }

    let mut out = String::new();
    for (address, records) in report.iter() {
        if records.is_empty() {
            continue;
        }
        writeln!(out, "{address}").expect("write to string");
        for record in records {
            writeln!(
                out,
                "    {} {}",
                record.name().unwrap_or(""),
                record.breach_date().unwrap_or("")
            )
            .expect("write to string");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwncheck_core::{BreachRecord, EmailAddress};
    use serde_json::json;

    fn record(name: &str, date: &str) -> BreachRecord {
        match json!({"Name": name, "BreachDate": date}) {
            serde_json::Value::Object(map) => BreachRecord::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_report_prints_message() {
        let report = BreachReport::new();
        assert_eq!(render_plain(&report), "No breaches found.\n");
    }

    #[test]
    fn test_renders_records_in_insertion_order() {
        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("user@example.com").expect("valid address"),
            vec![record("Adobe", "2013-10-04"), record("LinkedIn", "2012-05-05")],
        );

        assert_eq!(
            render_plain(&report),
            "user@example.com\n    Adobe 2013-10-04\n    LinkedIn 2012-05-05\n"
        );
    }

    #[test]
    fn test_zero_record_address_omitted() {
        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("clean@example.com").expect("valid address"),
            vec![],
        );
        report.insert(
            EmailAddress::new("pwned@example.com").expect("valid address"),
            vec![record("Adobe", "2013-10-04")],
        );

        let out = render_plain(&report);
        assert!(!out.contains("clean@example.com"));
        assert!(out.contains("pwned@example.com"));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let mut report = BreachReport::new();
        let rec = match json!({"Domain": "x.example"}) {
            serde_json::Value::Object(map) => BreachRecord::new(map),
            _ => unreachable!(),
        };
        report.insert(
            EmailAddress::new("user@example.com").expect("valid address"),
            vec![rec],
        );

        assert_eq!(render_plain(&report), "user@example.com\n     \n");
    }
}
