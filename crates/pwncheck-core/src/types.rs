//! Shared types used across the pwncheck workspace.
//!
//! This module defines the newtypes and aggregates that model one batch run:
//! validated addresses, the per-breach records returned by the API, and the
//! report that maps addresses to their records.

use crate::error::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Name of the synthetic field injected into every breach record, naming
/// the queried address. Always the first CSV column.
pub const ADDRESS_FIELD: &str = "E-mail Address";

/// Permissive e-mail grammar: local part of alphanumerics plus `._+-`,
/// domain of alphanumerics plus `-` and `.` with at least one dot.
pub(crate) const EMAIL_PATTERN: &str = r"[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(&format!("^{EMAIL_PATTERN}$")).expect("valid regex")
    })
}

/// Newtype for validated e-mail addresses.
///
/// Construction trims surrounding whitespace and requires the whole string
/// to match the permissive e-mail grammar. Purely lexical; no DNS or
/// deliverability checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new `EmailAddress` from a string.
    ///
    /// # Errors
    /// Returns error if the trimmed string does not match the e-mail grammar.
    pub fn new(address: impl Into<String>) -> Result<Self, CoreError> {
        let address = address.into().trim().to_string();
        if email_regex().is_match(&address) {
            Ok(Self(address))
        } else {
            Err(CoreError::Validation(format!(
                "not a valid e-mail address: '{address}'"
            )))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One breach as returned by the API, plus the injected address field.
///
/// The API does not guarantee a fixed schema; field sets vary per breach, so
/// records are kept as ordered JSON objects rather than a fixed struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreachRecord {
    fields: Map<String, Value>,
}

impl BreachRecord {
    /// Wrap a raw JSON object from the API response.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Inject the [`ADDRESS_FIELD`] naming the queried address.
    pub fn tag_address(&mut self, address: &EmailAddress) {
        self.fields.insert(
            ADDRESS_FIELD.to_string(),
            Value::String(address.as_str().to_string()),
        );
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The breach's `Name` field, if present as a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("Name").and_then(Value::as_str)
    }

    /// The breach's `BreachDate` field, if present as a string.
    #[must_use]
    pub fn breach_date(&self) -> Option<&str> {
        self.fields.get("BreachDate").and_then(Value::as_str)
    }

    /// Iterate field names in record order (API order, injected field last).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Aggregated result of one batch run: addresses mapped to their breach
/// records in API response order.
///
/// Populated incrementally during the fetch phase and immutable afterwards.
/// An address queried successfully but with zero breaches in the response
/// body still gets an (empty) entry; addresses with no-breach-found status
/// or failed fetches get none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreachReport {
    entries: BTreeMap<EmailAddress, Vec<BreachRecord>>,
}

impl BreachReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the records fetched for one address.
    pub fn insert(&mut self, address: EmailAddress, records: Vec<BreachRecord>) {
        self.entries.insert(address, records);
    }

    /// Whether the report has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of addresses with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total breach record count across all addresses.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterate entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&EmailAddress, &[BreachRecord])> {
        self.entries.iter().map(|(addr, recs)| (addr, recs.as_slice()))
    }

    /// Iterate all records across all addresses, in address order.
    pub fn records(&self) -> impl Iterator<Item = &BreachRecord> {
        self.entries.values().flatten()
    }
}
