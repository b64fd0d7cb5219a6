//! Error types for the cache store

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while loading or persisting the cache blob.
///
/// These never escape the public API: write failures are swallowed after a
/// `warn` log and a corrupt blob on load degrades to an empty cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
