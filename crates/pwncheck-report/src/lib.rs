//! Pwncheck Report - Rendering of aggregated breach reports.
//!
//! Three renderers over a [`pwncheck_core::BreachReport`]:
//!
//! - [`plain`] - address lines with indented `<Name> <BreachDate>` entries
//! - [`json`] - sorted-key, 4-space-indented JSON for verbose output
//! - [`csv`] - a flattened table with a first-occurrence-ordered column union
//!
//! The renderers are independent and stateless; the caller picks one based
//! on its output configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod csv;
pub mod error;
pub mod json;
pub mod plain;

// Re-export commonly used types
pub use csv::{column_order, render_csv, write_csv_file};
pub use error::{ReportError, Result};
pub use json::render_json;
pub use plain::{render_plain, NO_BREACHES_MESSAGE};
