//! Player stat normalization
//!
//! Upstream player rows arrive in arbitrarily drifting shapes: the same
//! logical stat can appear under several field names depending on endpoint
//! version. This crate maps every raw row into a canonical
//! `PlayerWeekRecord` via ordered alias lists (first present value wins,
//! absent means zero production), resolves opponent and home/away context
//! from the row or the schedule index, and computes the single-game usage
//! proxy. Malformed rows degrade to zeroed records; normalization never
//! fails a batch.

mod alias;
mod models;
mod normalize;
mod schedule;

pub use models::{HomeAway, PlayerWeekRecord, Position, StatLine};
pub use normalize::normalize_rows;
pub use schedule::{GameContext, ScheduleIndex};
