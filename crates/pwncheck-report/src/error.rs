//! Error types for report rendering and export.

use thiserror::Error;

/// Errors that can occur while rendering or exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to serialize the report as JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write the output file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
