use stat_normalizer::{HomeAway, PlayerWeekRecord};
use tracing::debug;

use crate::defense::DefenseRatingIndex;
use crate::weights::ProjectionWeights;

/// Projection outputs for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Weighted composite factor score. Unclamped: misconfigured or
    /// deliberately oversized weights can push it outside [0, 1].
    pub score: f64,

    /// Projected points for the week
    pub proj: f64,

    /// Breakout probability in [0, 1]
    pub boom: f64,
}

/// Combines recent form, matchup favorability, home field, and usage into
/// the projection heuristic. Pure: identical record, defense index, and
/// weights always produce an identical projection.
#[derive(Debug, Clone)]
pub struct Projector {
    weights: ProjectionWeights,
}

impl Projector {
    pub fn new(weights: ProjectionWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ProjectionWeights {
        &self.weights
    }

    /// Project one record against the current defense index.
    ///
    /// `record.recent` feeds the recent-form factor; it defaults to the
    /// week's points but callers may inject a rolling multi-week average
    /// without touching this contract.
    pub fn project(&self, record: &PlayerWeekRecord, defense: &DefenseRatingIndex) -> Projection {
        let w = &self.weights;
        let recent_norm = recent_norm(record.recent);
        let favorability = defense.favorability(&record.opponent);
        let home_bump = if record.home_away == HomeAway::Home { 1.0 } else { 0.0 };
        let usage_norm = record.usage.clamp(0.0, 1.0);

        let score = w.recent_form * recent_norm
            + w.opponent_defense * favorability
            + w.home_away * home_bump
            + w.usage * usage_norm;

        // The score is deliberately not clamped before the multiply, so
        // weights summing past 1 can push the multiplier beyond its nominal
        // 0.8x..1.4x band.
        let proj = round2(record.points * (0.8 + 0.6 * score));
        let boom = score.max(0.0).powf(1.2).min(1.0);

        Projection { score, proj, boom }
    }

    /// Project every record in place, writing `proj` and `boom`
    pub fn apply(&self, records: &mut [PlayerWeekRecord], defense: &DefenseRatingIndex) {
        for record in records.iter_mut() {
            let projection = self.project(record, defense);
            record.proj = projection.proj;
            record.boom = projection.boom;
        }
        debug!("Projected {} records against {} rated defenses", records.len(), defense.len());
    }
}

/// Crude recent-form normalization against a 30-point benchmark game,
/// clamped to [0, 1]. A single week is a weak proxy for form; the caller
/// owns upgrading `recent` to a rolling average.
fn recent_norm(recent: f64) -> f64 {
    (recent / recent.max(30.0).max(1.0)).clamp(0.0, 1.0)
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}
