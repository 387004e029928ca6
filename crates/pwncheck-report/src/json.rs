//! Verbose JSON rendering.

use crate::error::Result;
use pwncheck_core::BreachReport;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Pretty-print the whole report as JSON with all object keys sorted
/// lexicographically and 4-space indentation.
///
/// Callers should only invoke this for non-empty reports.
pub fn render_json(report: &BreachReport) -> Result<String> {
    let value = sort_keys(serde_json::to_value(report)?);

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}

/// Recursively sort object keys. Records keep API field order in memory;
/// sorting happens only at render time.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, val)| (key, sort_keys(val)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
