//! Lexical extraction of e-mail addresses from raw input text.
//!
//! Pure function: the same input always yields the same match set. No DNS
//! or deliverability checks, only the permissive grammar from [`crate::types`].

use crate::types::{EmailAddress, EMAIL_PATTERN};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn scan_regex() -> &'static Regex {
    static SCAN_REGEX: OnceLock<Regex> = OnceLock::new();
    SCAN_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex"))
}

/// Extract every substring of `text` matching the e-mail grammar.
///
/// Duplicate matches collapse via set semantics. Input with no matches
/// yields an empty set, not an error.
#[must_use]
pub fn extract_addresses(text: &str) -> BTreeSet<EmailAddress> {
    let addresses: BTreeSet<EmailAddress> = scan_regex()
        .find_iter(text)
        .filter_map(|m| EmailAddress::new(m.as_str()).ok())
        .collect();

    tracing::debug!("extracted {} unique address(es)", addresses.len());
    addresses
}
