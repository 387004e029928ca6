//! Pacing and retry policy.
//!
//! The decisions are pure functions over the policy values so they can be
//! tested without a network.

use pwncheck_core::FetchConfig;
use std::time::Duration;

/// What to do about a rate-limit response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitAction {
    /// Sleep the hinted duration, then retry the same address once.
    Wait(Duration),
    /// Abort the entire run: the hinted wait is at or above the ceiling
    /// (or absent), so automated retry is no longer cost-effective.
    Abort,
}

/// Immutable pacing and retry policy for one run.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Delay before every request, including the first for each address.
    pub delay: Duration,
    /// `Retry-After` hints at or above this abort the run.
    pub rate_limit_ceiling: Duration,
    /// Attempts per address for transient failures before skipping it.
    pub max_attempts: u32,
}

impl FetchPolicy {
    /// Build the policy from the fetch configuration.
    #[must_use]
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            delay: config.delay(),
            rate_limit_ceiling: config.rate_limit_ceiling(),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Decide how to react to a 429 with the given `Retry-After` hint.
    ///
    /// A missing hint means the wait cannot be bounded and is treated as
    /// at-ceiling.
    #[must_use]
    pub fn rate_limit_action(&self, retry_after: Option<Duration>) -> RateLimitAction {
        match retry_after {
            Some(wait) if wait < self.rate_limit_ceiling => RateLimitAction::Wait(wait),
            _ => RateLimitAction::Abort,
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}
