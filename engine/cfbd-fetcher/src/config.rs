use serde::{Deserialize, Serialize};

/// Configuration for the CFBD fetch layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Upstream API base URL
    pub api_base: String,

    /// Local key broker base URL (serves the bearer credential)
    pub broker_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum simultaneous in-flight requests
    pub max_parallel: usize,

    /// Retry behavior for transient upstream failures
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first (3 = two retries)
    pub max_attempts: u32,

    /// Base delay in milliseconds; attempt N waits N * base before retrying
    pub base_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.collegefootballdata.com".to_string(),
            broker_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            max_parallel: 4,
            retry: RetryConfig { max_attempts: 3, base_delay_ms: 400 },
        }
    }
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("CFBD_API_BASE") {
            config.api_base = base;
        }

        if let Ok(broker) = std::env::var("CFBD_KEY_BROKER_URL") {
            config.broker_url = broker;
        }

        if let Ok(max_parallel) = std::env::var("CFBD_MAX_PARALLEL") {
            config.max_parallel = max_parallel.parse().unwrap_or(4);
        }

        config
    }
}
