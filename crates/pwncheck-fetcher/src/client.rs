//! HTTP client for the breach-notification API.
//!
//! One request per call; pacing and retries live in [`crate::fetcher`].
//! The API contract: 200 with a JSON array body means breaches found,
//! 404 means no breaches for that account, 429 with a `Retry-After` hint
//! means rate-limited.

use crate::error::{FetchError, Result};
use pwncheck_core::{ApiConfig, EmailAddress};
use reqwest::header::{HeaderMap, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

/// Classified response from one query against the breach API.
#[derive(Debug)]
pub enum ApiResponse {
    /// 200: breaches found, raw JSON objects in response order.
    Breaches(Vec<Map<String, Value>>),
    /// 404: no breaches recorded for this account.
    NotFound,
    /// 429: rate-limited, with the server's hinted wait if parseable.
    RateLimited {
        /// Parsed `Retry-After` header, integer seconds.
        retry_after: Option<Duration>,
    },
}

/// Client for the breach API.
///
/// No explicit request timeout is configured; the transport's defaults
/// apply.
pub struct BreachClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl BreachClient {
    /// Create a new client from the API configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// URL for one account query, with the address escaped into the path.
    #[must_use]
    pub fn account_url(&self, address: &EmailAddress) -> String {
        format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(address.as_str())
        )
    }

    /// Issue a single GET for one address and classify the response.
    ///
    /// # Errors
    /// Returns error on transport failures, unparseable 200 bodies, and
    /// statuses outside the API contract. Rate-limiting is not an error at
    /// this layer; it is reported as [`ApiResponse::RateLimited`].
    pub async fn query(&self, address: &EmailAddress) -> Result<ApiResponse> {
        let url = self.account_url(address);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let breaches: Vec<Map<String, Value>> = response.json().await?;
                Ok(ApiResponse::Breaches(breaches))
            }
            StatusCode::NOT_FOUND => Ok(ApiResponse::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Ok(ApiResponse::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            }),
            _ => Err(FetchError::UnexpectedStatus {
                address: address.clone(),
                status: status.as_u16(),
            }),
        }
    }
}

/// Parse the `Retry-After` header as integer seconds.
///
/// HTTP-date forms are not expected from this API and yield `None`.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn client() -> BreachClient {
        BreachClient::new(&ApiConfig::default()).expect("create client")
    }

    #[test]
    fn test_account_url_escapes_address() {
        let address = EmailAddress::new("tagged+inbox@example.com").expect("valid address");
        assert_eq!(
            client().account_url(&address),
            "https://haveibeenpwned.com/api/v2/breachedaccount/tagged%2Binbox%40example.com"
        );
    }

    #[test]
    fn test_account_url_with_trailing_slash_base() {
        let config = ApiConfig {
            base_url: "https://localhost:8080/api/".to_string(),
            ..ApiConfig::default()
        };
        let client = BreachClient::new(&config).expect("create client");
        let address = EmailAddress::new("user@example.com").expect("valid address");
        assert_eq!(
            client.account_url(&address),
            "https://localhost:8080/api/user%40example.com"
        );
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("5"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(5)));

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static(" 15 "));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_parse_retry_after_missing_or_malformed() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Fri, 31 Dec 1999 23:59:59 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }
}
