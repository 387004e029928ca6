//! CSV export: flattens the heterogeneous breach records into one table.

use crate::error::Result;
use pwncheck_core::{BreachReport, ADDRESS_FIELD};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Compute the column set: the union of all field names across all records,
/// in first-occurrence order, with [`ADDRESS_FIELD`] forced first.
#[must_use]
pub fn column_order(report: &BreachReport) -> Vec<String> {
    let mut columns = vec![ADDRESS_FIELD.to_string()];
    let mut seen: HashSet<String> = columns.iter().cloned().collect();

    for record in report.records() {
        for field in record.field_names() {
            if seen.insert(field.to_string()) {
                columns.push(field.to_string());
            }
        }
    }
    columns
}

/// Render the report as a CSV table: a header row, then one row per breach
/// record across all addresses. Missing fields render as empty cells.
#[must_use]
pub fn render_csv(report: &BreachReport) -> String {
    let columns = column_order(report);
    let mut out = String::new();

    write_row(&mut out, columns.iter().map(String::as_str));
    for record in report.records() {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| record.get(col).map(cell_text).unwrap_or_default())
            .collect();
        write_row(&mut out, cells.iter().map(String::as_str));
    }
    out
}

/// Render and write the CSV to `path` as UTF-8 text.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_csv_file(report: &BreachReport, path: &Path) -> Result<()> {
    let contents = render_csv(report);
    fs::write(path, contents)?;
    tracing::info!(
        "Wrote {} record(s) to {}",
        report.total_records(),
        path.display()
    );
    Ok(())
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let escaped: Vec<String> = cells.map(escape_field).collect();
    write!(out, "{}\r\n", escaped.join(",")).expect("write to string");
}

/// RFC 4180 quoting: fields containing comma, quote, CR or LF are wrapped
/// in quotes with embedded quotes doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Cell text for a JSON value: strings verbatim, everything else in its
/// compact JSON form.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwncheck_core::{BreachRecord, EmailAddress};
    use serde_json::json;

    fn record(value: Value) -> BreachRecord {
        match value {
            Value::Object(map) => BreachRecord::new(map),
            _ => panic!("expected JSON object"),
        }
    }

    fn tagged(address: &str, value: Value) -> BreachRecord {
        let mut rec = record(value);
        rec.tag_address(&EmailAddress::new(address).expect("valid address"));
        rec
    }

    #[test]
    fn test_header_first_occurrence_order() {
        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("user@example.com").expect("valid address"),
            vec![
                tagged("user@example.com", json!({"A": 1, "B": 2})),
                tagged("user@example.com", json!({"B": 3, "C": 4})),
            ],
        );

        assert_eq!(
            column_order(&report),
            vec![ADDRESS_FIELD, "A", "B", "C"]
        );
    }

    #[test]
    fn test_row_count_is_total_record_count() {
        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("a@example.com").expect("valid address"),
            vec![
                tagged("a@example.com", json!({"Name": "X"})),
                tagged("a@example.com", json!({"Name": "Y"})),
            ],
        );
        report.insert(
            EmailAddress::new("b@example.com").expect("valid address"),
            vec![tagged("b@example.com", json!({"Name": "Z"}))],
        );

        let out = render_csv(&report);
        // Header plus one row per record.
        assert_eq!(out.lines().count(), 1 + report.total_records());
    }

    #[test]
    fn test_missing_fields_render_as_empty_cells() {
        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("a@example.com").expect("valid address"),
            vec![
                tagged("a@example.com", json!({"A": "1"})),
                tagged("a@example.com", json!({"B": "2"})),
            ],
        );

        let out = render_csv(&report);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "E-mail Address,A,B");
        assert_eq!(lines[1], "a@example.com,1,");
        assert_eq!(lines[2], "a@example.com,,2");
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_non_string_values_render_compact_json() {
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&json!(["a", "b"])), "[\"a\",\"b\"]");
        assert_eq!(cell_text(&json!("plain")), "plain");
    }

    #[test]
    fn test_write_csv_file() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("out.csv");

        let mut report = BreachReport::new();
        report.insert(
            EmailAddress::new("a@example.com").expect("valid address"),
            vec![tagged("a@example.com", json!({"Name": "X"}))],
        );

        write_csv_file(&report, &path).expect("write CSV");
        let contents = fs::read_to_string(&path).expect("read CSV back");
        assert!(contents.starts_with("E-mail Address,Name\r\n"));
        assert!(contents.contains("a@example.com,X"));
    }
}
