use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::config::{FetcherConfig, RetryConfig};
use crate::error::{FetchError, Result};

/// Raw HTTP client for the CollegeFootballData API.
///
/// Performs the network call and nothing else; caching and throttling are
/// layered on top by `CachedClient`.
#[derive(Debug)]
pub struct CfbdClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    retry: RetryConfig,
}

impl CfbdClient {
    /// Create a new client with the given bearer credential
    pub fn new(config: &FetcherConfig, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            client,
            retry: config.retry.clone(),
        })
    }

    /// Build the full request URL for `path` and `params`.
    ///
    /// Parameters with empty values are omitted. Identical inputs always
    /// produce an identical URL, which doubles as the cache key.
    pub fn request_url(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let filtered: Vec<&(&str, String)> =
            params.iter().filter(|(_, value)| !value.is_empty()).collect();

        let mut builder = self.client.get(format!("{}{}", self.base_url, path));
        if !filtered.is_empty() {
            builder = builder.query(&filtered);
        }
        let request = builder.build()?;
        Ok(request.url().as_str().to_string())
    }

    /// Issue a GET for `path` with `params`, returning the raw JSON payload
    pub async fn request(&self, path: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = self.request_url(path, params)?;
        self.execute(&url).await
    }

    /// Issue a GET against a pre-built URL.
    ///
    /// HTTP 429 and 5xx responses are retried up to two additional times
    /// with a linearly increasing delay (attempt x base delay); any other
    /// non-success status fails immediately with the response body attached.
    pub async fn execute(&self, url: &str) -> Result<serde_json::Value> {
        for attempt in 1..=self.retry.max_attempts {
            let response = self.client.get(url).bearer_auth(&self.api_key).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.json().await?);
            }

            if FetchError::is_retryable_status(status) && attempt < self.retry.max_attempts {
                let delay = Duration::from_millis(self.retry.base_delay_ms * attempt as u64);
                warn!(
                    "Upstream returned {} for {}, retrying in {:?} (attempt {}/{})",
                    status, url, delay, attempt, self.retry.max_attempts
                );
                sleep(delay).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Upstream { status: status.as_u16(), body });
        }

        unreachable!("retry loop always returns")
    }
}
