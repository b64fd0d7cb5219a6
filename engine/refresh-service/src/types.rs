use std::collections::HashMap;

use boom_engine::DefenseRatingIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stat_normalizer::{PlayerWeekRecord, ScheduleIndex};

/// Team metadata from the upstream team list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInfo {
    pub school: String,
    pub conference: String,
}

/// Immutable result of one refresh cycle.
///
/// A refresh builds a whole new snapshot and installs it atomically;
/// records are never mutated in place across refreshes. Player and team
/// lookups are indexed for O(1) access.
#[derive(Debug)]
pub struct Snapshot {
    pub generation: u64,
    pub season: i32,
    pub week: u32,
    pub fetched_at: DateTime<Utc>,
    pub players: Vec<PlayerWeekRecord>,
    pub teams: Vec<TeamInfo>,
    pub defense: DefenseRatingIndex,
    pub pace: HashMap<String, f64>,
    pub schedule: ScheduleIndex,
    by_id: HashMap<String, usize>,
    by_team: HashMap<String, Vec<usize>>,
}

impl Snapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        generation: u64,
        season: i32,
        week: u32,
        players: Vec<PlayerWeekRecord>,
        teams: Vec<TeamInfo>,
        defense: DefenseRatingIndex,
        pace: HashMap<String, f64>,
        schedule: ScheduleIndex,
    ) -> Self {
        let mut by_id = HashMap::with_capacity(players.len());
        let mut by_team: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, player) in players.iter().enumerate() {
            by_id.entry(player.id.clone()).or_insert(index);
            by_team.entry(player.team.clone()).or_default().push(index);
        }

        Self {
            generation,
            season,
            week,
            fetched_at: Utc::now(),
            players,
            teams,
            defense,
            pace,
            schedule,
            by_id,
            by_team,
        }
    }

    /// An empty snapshot for service startup, before any refresh has run
    pub fn empty(season: i32) -> Self {
        Self::build(
            0,
            season,
            0,
            Vec::new(),
            Vec::new(),
            DefenseRatingIndex::default(),
            HashMap::new(),
            ScheduleIndex::default(),
        )
    }

    /// Look up a player by composite id
    pub fn player(&self, id: &str) -> Option<&PlayerWeekRecord> {
        self.by_id.get(id).map(|&index| &self.players[index])
    }

    /// All records for one team
    pub fn team_players(&self, team: &str) -> Vec<&PlayerWeekRecord> {
        self.by_team
            .get(team)
            .map(|indexes| indexes.iter().map(|&i| &self.players[i]).collect())
            .unwrap_or_default()
    }

    /// Pace value for a team, zero when unknown
    pub fn pace_for(&self, team: &str) -> f64 {
        self.pace.get(team).copied().unwrap_or(0.0)
    }
}
