use serde::{Deserialize, Serialize};

/// Contribution strengths for the four projection factors.
///
/// The weights combine linearly and need not sum to 1; each is an
/// independent strength, not a slice of a probability partition. Weights
/// summing above 1 push the composite score past 1.0 and with it the
/// projection multiplier past its nominal band, which is allowed on
/// purpose for advanced tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionWeights {
    pub recent_form: f64,
    pub opponent_defense: f64,
    pub home_away: f64,
    pub usage: f64,
}

impl Default for ProjectionWeights {
    fn default() -> Self {
        Self { recent_form: 0.5, opponent_defense: 0.3, home_away: 0.1, usage: 0.1 }
    }
}
