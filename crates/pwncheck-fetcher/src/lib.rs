//! Pwncheck Fetcher - Rate-limit-aware retrieval of breach records.
//!
//! This crate queries the breach-notification API for each validated
//! address, serially and with fixed pacing, and aggregates the results
//! into a [`pwncheck_core::BreachReport`].
//!
//! # Behavior
//!
//! - Fixed delay before every request (conservative pacing, not strictly
//!   inter-request)
//! - One bounded wait-and-retry on a rate-limit hint below the ceiling;
//!   hints at or above it abort the whole run
//! - Bounded retries for transient failures, then the address is skipped
//!
//! # Example
//!
//! ```rust,ignore
//! use pwncheck_core::{extract_addresses, AppConfig};
//! use pwncheck_fetcher::BreachFetcher;
//!
//! let config = AppConfig::load_with_env()?;
//! let fetcher = BreachFetcher::new(&config)?;
//! let report = fetcher.run(&extract_addresses(input)).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod fetcher;
pub mod retry;

// Re-export commonly used types
pub use client::{ApiResponse, BreachClient};
pub use error::{FetchError, Result};
pub use fetcher::{AddressOutcome, BreachFetcher};
pub use retry::{FetchPolicy, RateLimitAction};
