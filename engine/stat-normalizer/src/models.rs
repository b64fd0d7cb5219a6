use std::fmt;

use serde::{Deserialize, Serialize};

/// Skill position groups the scoring and projection engines care about.
/// Anything else (K, P, OL, defense) folds into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    Other,
}

impl Position {
    /// Parse an upstream position string, case-insensitively
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "QB" => Position::QB,
            "RB" => Position::RB,
            "WR" => Position::WR,
            "TE" => Position::TE,
            _ => Position::Other,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::Other => "OTHER",
        };
        write!(f, "{label}")
    }
}

/// Home/away context for a player's game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeAway {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
    #[serde(rename = "unknown")]
    Unknown,
}

impl HomeAway {
    /// Parse an upstream home/away marker ("H"/"A", "home"/"away")
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "H" | "HOME" => HomeAway::Home,
            "A" | "AWAY" | "@" => HomeAway::Away,
            _ => HomeAway::Unknown,
        }
    }
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HomeAway::Home => "H",
            HomeAway::Away => "A",
            HomeAway::Unknown => "-",
        };
        write!(f, "{label}")
    }
}

/// Canonical per-game stat counters.
///
/// Every field defaults to zero when the upstream row omits it; absence is
/// zero production, not an error. Values are always finite and
/// non-negative (penalties enter through scoring weights, not raw stats).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    pub pass_yards: f64,
    pub pass_td: f64,
    pub interceptions: f64,
    pub rush_yards: f64,
    pub rush_td: f64,
    pub rush_att: f64,
    pub receptions: f64,
    pub targets: f64,
    pub rec_yards: f64,
    pub rec_td: f64,
    pub fumbles: f64,
    pub two_pt: f64,
}

/// One player's performance in one week of one season.
///
/// Records are constructed fresh on every normalization pass and never
/// mutated across refreshes; a refresh replaces the prior set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerWeekRecord {
    /// Composite `name|team|position` key. Deterministic, but not unique
    /// across players sharing all three fields.
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub opponent: String,
    pub home_away: HomeAway,
    pub season: i32,
    pub week: u32,
    pub stats: StatLine,

    /// Single-game touch-share proxy in [0, 1]. Approximate: true team
    /// total denominators are not available from a single player row.
    pub usage: f64,

    /// Weekly fantasy points (computed by the scoring engine)
    pub points: f64,

    /// Recent-form scalar fed to the projection. Defaults to this week's
    /// points; callers may inject a rolling multi-week average instead.
    pub recent: f64,

    /// Season-to-date average; equals this week's points until a
    /// multi-week history source exists.
    pub avg: f64,

    /// Projected points (computed by the projection engine)
    pub proj: f64,

    /// Breakout heuristic in [0, 1] (computed by the projection engine)
    pub boom: f64,
}

impl PlayerWeekRecord {
    /// Build the composite identity key for a player
    pub fn composite_id(name: &str, team: &str, position: Position) -> String {
        format!("{name}|{team}|{position}")
    }
}
