//! Pwncheck Core - Foundation crate for the pwncheck workspace.
//!
//! This crate provides the shared types, error handling, configuration
//! management, and e-mail extraction that the fetcher, report, and CLI
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared types (`EmailAddress`, `BreachRecord`, `BreachReport`)
//! - [`validate`] - Lexical e-mail extraction from raw input text
//!
//! # Example
//!
//! ```rust
//! use pwncheck_core::{extract_addresses, AppConfig};
//!
//! let config = AppConfig::default();
//! let addresses = extract_addresses("reach me at user@example.com");
//! assert_eq!(addresses.len(), 1);
//! assert_eq!(config.fetch.delay_secs, 1.6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, FetchConfig};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use types::{BreachRecord, BreachReport, EmailAddress, ADDRESS_FIELD};
pub use validate::extract_addresses;
