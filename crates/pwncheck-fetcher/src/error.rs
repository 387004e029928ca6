//! Error types for the fetch phase.
//!
//! Only sustained rate-limiting is fatal to the whole run; everything else
//! is contained to the address being processed.

use pwncheck_core::EmailAddress;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while querying the breach API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Sustained rate-limiting; the whole run is aborted.
    #[error("rate limited while querying {address}, hinted wait {retry_after:?} at or above ceiling")]
    RateLimitExceeded {
        /// Address being queried when the run was aborted
        address: EmailAddress,
        /// The server's hinted wait, if it sent a parseable one
        retry_after: Option<Duration>,
    },

    /// Status outside the API contract (not 200/404/429).
    #[error("unexpected HTTP status {status} for {address}")]
    UnexpectedStatus {
        /// Address being queried
        address: EmailAddress,
        /// The offending HTTP status code
        status: u16,
    },

    /// Transport failure (connect, read, or body decode).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether this error aborts the whole run rather than one address.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
