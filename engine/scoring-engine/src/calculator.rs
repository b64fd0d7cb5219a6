use stat_normalizer::StatLine;

use crate::config::{BonusStat, ScoringConfig};

/// Round to two decimals, the precision points are displayed and compared at
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Applies a scoring configuration to canonical weekly stats.
///
/// Pure and stateless beyond the config: identical `(stats, config)` inputs
/// always yield identical output.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weekly fantasy points for one stat line, rounded to two decimals
    pub fn score(&self, stats: &StatLine) -> f64 {
        let c = &self.config;
        let mut points = stats.pass_yards * c.pass_yard
            + stats.pass_td * c.pass_td
            + stats.interceptions * c.interception
            + stats.rush_yards * c.rush_yard
            + stats.rush_td * c.rush_td
            + stats.rec_yards * c.rec_yard
            + stats.rec_td * c.rec_td
            + stats.receptions * c.reception
            + stats.two_pt * c.two_pt
            + stats.fumbles * c.fumble;

        for bonus in c.bonuses.iter().take(crate::MAX_BONUSES) {
            // A zero-point bonus entry is configured-off, not a zero add.
            if bonus.points == 0.0 {
                continue;
            }
            let value = match bonus.stat {
                BonusStat::PassYards => stats.pass_yards,
                BonusStat::RushYards => stats.rush_yards,
                BonusStat::RecYards => stats.rec_yards,
            };
            if value >= bonus.threshold {
                points += bonus.points;
            }
        }

        round2(points)
    }
}
