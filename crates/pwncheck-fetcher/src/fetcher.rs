//! Serial fetch loop producing a [`BreachReport`].
//!
//! Addresses are queried one at a time, each preceded by the fixed pacing
//! delay. The serial, delay-gated execution is a compliance measure toward
//! the remote service's throttling policy, not a performance concern, and
//! must not be parallelized.

use crate::client::{ApiResponse, BreachClient};
use crate::error::{FetchError, Result};
use crate::retry::{FetchPolicy, RateLimitAction};
use pwncheck_core::{AppConfig, BreachRecord, BreachReport, EmailAddress};
use std::collections::BTreeSet;
use tokio::time::sleep;

/// Result of processing one address.
///
/// Typed rather than swallowed, so callers can tell "no breach" from
/// "fetch failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOutcome {
    /// Breaches found and stored (count, possibly zero for an empty body).
    Found(usize),
    /// The API reported no breaches for this account.
    Clean,
    /// Transient failures exhausted the attempt budget; address skipped.
    Failed,
}

/// Fetches breach records for a set of addresses, serially.
pub struct BreachFetcher {
    client: BreachClient,
    policy: FetchPolicy,
}

impl BreachFetcher {
    /// Create a fetcher from the application configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: BreachClient::new(&config.api)?,
            policy: FetchPolicy::from_config(&config.fetch),
        })
    }

    /// Create a fetcher from explicit parts.
    #[must_use]
    pub fn with_parts(client: BreachClient, policy: FetchPolicy) -> Self {
        Self { client, policy }
    }

    /// Query every address and aggregate the results.
    ///
    /// Per-address failures skip that address and continue; sustained
    /// rate-limiting is fatal and aborts the whole run, dropping whatever
    /// was accumulated so far.
    ///
    /// # Errors
    /// Returns [`FetchError::RateLimitExceeded`] on a fatal rate-limit
    /// abort.
    pub async fn run(&self, addresses: &BTreeSet<EmailAddress>) -> Result<BreachReport> {
        let mut report = BreachReport::new();

        for address in addresses {
            match self.fetch_address(address, &mut report).await? {
                AddressOutcome::Found(count) => {
                    tracing::debug!("{} breach(es) recorded for {}", count, address);
                }
                AddressOutcome::Clean => {
                    tracing::info!("No breaches found for {}", address);
                }
                AddressOutcome::Failed => {
                    tracing::debug!(
                        "giving up on {} after {} attempt(s)",
                        address,
                        self.policy.max_attempts
                    );
                }
            }
        }

        Ok(report)
    }

    /// Process one address: pace, query, classify, retry as allowed.
    async fn fetch_address(
        &self,
        address: &EmailAddress,
        report: &mut BreachReport,
    ) -> Result<AddressOutcome> {
        let mut attempts = 0;
        let mut rate_limit_retried = false;

        loop {
            // Fixed pacing before every request, including the first.
            sleep(self.policy.delay).await;

            match self.client.query(address).await {
                Ok(ApiResponse::Breaches(objects)) => {
                    let count = objects.len();
                    let records: Vec<BreachRecord> = objects
                        .into_iter()
                        .map(|fields| {
                            let mut record = BreachRecord::new(fields);
                            record.tag_address(address);
                            record
                        })
                        .collect();
                    report.insert(address.clone(), records);
                    return Ok(AddressOutcome::Found(count));
                }
                Ok(ApiResponse::NotFound) => return Ok(AddressOutcome::Clean),
                Ok(ApiResponse::RateLimited { retry_after }) => {
                    if rate_limit_retried {
                        // A second consecutive 429 counts as sustained.
                        return Err(FetchError::RateLimitExceeded {
                            address: address.clone(),
                            retry_after,
                        });
                    }
                    match self.policy.rate_limit_action(retry_after) {
                        RateLimitAction::Wait(wait) => {
                            tracing::warn!(
                                "rate limited for {}, waiting {:?} before one retry",
                                address,
                                wait
                            );
                            sleep(wait).await;
                            rate_limit_retried = true;
                        }
                        RateLimitAction::Abort => {
                            return Err(FetchError::RateLimitExceeded {
                                address: address.clone(),
                                retry_after,
                            });
                        }
                    }
                }
                Err(e) => {
                    attempts += 1;
                    tracing::debug!(
                        "attempt {}/{} failed for {}: {}",
                        attempts,
                        self.policy.max_attempts,
                        address,
                        e
                    );
                    if attempts >= self.policy.max_attempts {
                        return Ok(AddressOutcome::Failed);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwncheck_core::FetchConfig;

    #[test]
    fn test_fetcher_from_default_config() {
        let config = AppConfig::default();
        let fetcher = BreachFetcher::new(&config).expect("create fetcher");
        assert_eq!(fetcher.policy.max_attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_address_set_yields_empty_report() {
        let config = AppConfig::default();
        let fetcher = BreachFetcher::new(&config).expect("create fetcher");

        let report = fetcher.run(&BTreeSet::new()).await.expect("run fetch");
        assert!(report.is_empty());
    }

    #[test]
    fn test_policy_reflects_delay_override() {
        let mut config = AppConfig::default();
        config.fetch = FetchConfig {
            delay_secs: 0.2,
            ..FetchConfig::default()
        };
        let fetcher = BreachFetcher::new(&config).expect("create fetcher");
        assert_eq!(fetcher.policy.delay, std::time::Duration::from_millis(200));
    }
}
