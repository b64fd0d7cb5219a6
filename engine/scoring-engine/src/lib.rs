//! Fantasy scoring engine
//!
//! Applies a user-tunable point scheme to canonical weekly stats: a linear
//! combination over the scoring categories plus up to three one-shot
//! yardage threshold bonuses. Scoring is pure and deterministic; identical
//! stats and configuration always produce identical points.

mod calculator;
mod config;

pub use calculator::{round2, ScoreCalculator};
pub use config::{BonusStat, ScoringConfig, ThresholdBonus, MAX_BONUSES};
