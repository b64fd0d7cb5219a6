//! Refresh orchestration for the Ball Numbers data engine
//!
//! Drives one refresh cycle end to end: resolve the active week, hydrate
//! auxiliary data (teams, defense ratings, pace, schedule index), pull the
//! per-week player stats, then normalize, score, and project into an
//! immutable `Snapshot` installed behind a generation counter. Auxiliary
//! categories degrade to empty on failure; only the primary player fetch
//! aborts the refresh.
//!
//! Also owns the persisted user preferences (scoring scheme, projection
//! weights, favorites, compare list) and the filter/sort/paginate view over
//! a snapshot's records.

mod config;
mod error;
mod hydrate;
mod prefs;
mod service;
mod types;
mod view;

pub use config::RefreshConfig;
pub use error::{RefreshError, Result};
pub use prefs::{PrefsStore, MAX_COMPARE};
pub use service::{compute_records, RefreshService};
pub use types::{Snapshot, TeamInfo};
pub use view::{boom_board, query_players, PlayerPage, PlayerQuery, SortDir, SortKey};

/// Re-export the record types consumers page over
pub use boom_engine::{DefenseRatingIndex, ProjectionWeights};
pub use scoring_engine::ScoringConfig;
pub use stat_normalizer::{HomeAway, PlayerWeekRecord, Position, ScheduleIndex};
