use serde::{Deserialize, Serialize};

/// Maximum number of threshold bonuses honored; extra entries are ignored
pub const MAX_BONUSES: usize = 3;

/// User-tunable point values for every scoring category plus up to
/// three one-shot yardage threshold bonuses.
///
/// Serialized field names match the persisted preference blob, so configs
/// saved by earlier versions of the app keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Points per passing yard
    pub pass_yard: f64,
    /// Points per passing touchdown
    pub pass_td: f64,
    /// Points per interception thrown (normally negative)
    pub interception: f64,
    /// Points per rushing yard
    pub rush_yard: f64,
    /// Points per rushing touchdown
    pub rush_td: f64,
    /// Points per receiving yard
    pub rec_yard: f64,
    /// Points per receiving touchdown
    pub rec_td: f64,
    /// Points per reception (PPR-style)
    pub reception: f64,
    /// Points per two-point conversion
    pub two_pt: f64,
    /// Points per fumble lost (normally negative)
    pub fumble: f64,
    /// One-shot yardage bonuses, at most three
    pub bonuses: Vec<ThresholdBonus>,
}

/// A bonus awarded once, in full, when one yardage stat reaches a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBonus {
    pub stat: BonusStat,
    pub threshold: f64,
    pub points: f64,
}

/// The yardage stats a threshold bonus may check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusStat {
    PassYards,
    RushYards,
    RecYards,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pass_yard: 0.04,
            pass_td: 4.0,
            interception: -2.0,
            rush_yard: 0.1,
            rush_td: 6.0,
            rec_yard: 0.1,
            rec_td: 6.0,
            reception: 1.0,
            two_pt: 2.0,
            fumble: -2.0,
            bonuses: vec![
                ThresholdBonus { stat: BonusStat::PassYards, threshold: 300.0, points: 3.0 },
                ThresholdBonus { stat: BonusStat::RushYards, threshold: 100.0, points: 3.0 },
                ThresholdBonus { stat: BonusStat::RecYards, threshold: 100.0, points: 3.0 },
            ],
        }
    }
}
