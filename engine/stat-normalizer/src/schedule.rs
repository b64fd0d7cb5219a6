use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::pick_str;
use crate::models::HomeAway;

/// Opponent and venue context for one team's game in one week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContext {
    pub opponent: String,
    pub home_away: HomeAway,
    pub start_date: Option<String>,
}

/// Lookup from `(team, week, season)` to that team's game context.
///
/// Rebuilt whenever the active week or season changes; normalization for a
/// refresh must observe the index built for that refresh's week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleIndex {
    entries: HashMap<String, GameContext>,
}

impl ScheduleIndex {
    /// Build the index from raw `/games` rows for one (season, week).
    ///
    /// Each game contributes two entries: the home side and the away side.
    /// Rows missing either team name are skipped.
    pub fn build(games: &[Value], season: i32, week: u32) -> Self {
        let mut entries = HashMap::new();

        for game in games {
            let home = pick_str(game, &["home_team", "homeTeam", "home"]);
            let away = pick_str(game, &["away_team", "awayTeam", "away"]);
            let start_date = pick_str(game, &["start_date", "startDate"]);

            let (Some(home), Some(away)) = (home, away) else {
                continue;
            };

            entries.insert(
                Self::key(&home, week, season),
                GameContext {
                    opponent: away.clone(),
                    home_away: HomeAway::Home,
                    start_date: start_date.clone(),
                },
            );
            entries.insert(
                Self::key(&away, week, season),
                GameContext { opponent: home, home_away: HomeAway::Away, start_date },
            );
        }

        Self { entries }
    }

    fn key(team: &str, week: u32, season: i32) -> String {
        format!("{team}|{week}|{season}")
    }

    /// Look up a team's game context for a (week, season)
    pub fn get(&self, team: &str, week: u32, season: i32) -> Option<&GameContext> {
        self.entries.get(&Self::key(team, week, season))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
