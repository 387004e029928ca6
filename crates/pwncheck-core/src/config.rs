//! Configuration management for pwncheck.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The loaded value is immutable and passed
//! by reference into each component; there is no ambient/global state.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// Loaded from `~/.config/pwncheck/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used. CLI flags override
/// whatever was loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Breach API endpoint settings
    pub api: ApiConfig,
    /// Fetch pacing and retry settings
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PWNCHECK_DELAY_SECS`: Override the inter-request delay
    /// - `PWNCHECK_USER_AGENT`: Override the client identifier header
    /// - `PWNCHECK_BASE_URL`: Override the breach API endpoint
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("PWNCHECK_DELAY_SECS") {
            if let Ok(secs) = val.parse() {
                config.fetch.delay_secs = secs;
                tracing::debug!("Override fetch.delay_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("PWNCHECK_USER_AGENT") {
            config.api.user_agent = val;
            tracing::debug!("Override api.user_agent from env");
        }

        if let Ok(val) = std::env::var("PWNCHECK_BASE_URL") {
            config.api.base_url = val;
            tracing::debug!("Override api.base_url from env");
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/pwncheck/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "pwncheck", "pwncheck").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check value constraints.
    ///
    /// # Errors
    /// Returns error if the delay is negative or not finite, or if the base
    /// URL is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.fetch.delay_secs.is_finite() || self.fetch.delay_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.delay_secs".to_string(),
                reason: format!("must be a non-negative number, got {}", self.fetch.delay_secs),
            });
        }
        if self.api.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Breach API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint the address is appended to, URL-escaped, as a path segment
    pub base_url: String,
    /// Client identifier sent as the `User-Agent` header
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://haveibeenpwned.com/api/v2/breachedaccount".to_string(),
            user_agent: "Pwnage-Checker".to_string(),
        }
    }
}

/// Fetch pacing and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Delay before every request, in seconds (conservative fixed pacing)
    pub delay_secs: f64,
    /// `Retry-After` hints at or above this many seconds abort the run
    pub rate_limit_ceiling_secs: u64,
    /// Attempts per address for transient failures before skipping it
    pub max_attempts: u32,
}

impl FetchConfig {
    /// The inter-request delay as a `Duration`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs)
    }

    /// The rate-limit ceiling as a `Duration`.
    #[must_use]
    pub fn rate_limit_ceiling(&self) -> Duration {
        Duration::from_secs(self.rate_limit_ceiling_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1.6,
            rate_limit_ceiling_secs: 10,
            max_attempts: 2,
        }
    }
}
