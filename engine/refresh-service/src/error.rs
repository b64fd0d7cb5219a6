//! Error types for the refresh service

use cfbd_fetcher::FetchError;
use thiserror::Error;

/// Result type alias for refresh operations
pub type Result<T> = std::result::Result<T, RefreshError>;

/// Errors that can surface from a refresh cycle.
///
/// Auxiliary data failures (teams, ratings, pace, schedule) never appear
/// here; those categories degrade to empty results with a log line. Only
/// the primary player fetch aborts the visible refresh.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// The per-week player stats fetch failed; the refresh cannot proceed
    #[error("Player stats unavailable: {0}")]
    PlayersUnavailable(#[source] FetchError),

    /// Fetch-layer failure outside a degradable category (client setup)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}
