//! Error types for the fetch layer

use thiserror::Error;

/// Result type alias for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while talking to the upstream API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or undecodable response body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP response, after retries where the status allows them
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl FetchError {
    /// Whether the upstream status is worth retrying (rate limit or server
    /// side failure). Anything else fails immediately.
    pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
        status.as_u16() == 429 || status.is_server_error()
    }
}
