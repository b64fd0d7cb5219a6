//! Filterable, sortable, paginated views over a snapshot's records
//!
//! Pure data operations: consumers render the returned pages however they
//! like. Filtering and sorting never mutate the snapshot.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use stat_normalizer::{PlayerWeekRecord, Position};

use crate::types::Snapshot;

/// Sortable record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Team,
    Position,
    Opponent,
    Usage,
    Points,
    Avg,
    Proj,
    Boom,
}

impl SortKey {
    /// Direction a column starts in when first selected: names read best
    /// ascending, every numeric column descending.
    pub fn default_dir(&self) -> SortDir {
        match self {
            SortKey::Name | SortKey::Team | SortKey::Position | SortKey::Opponent => SortDir::Asc,
            _ => SortDir::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Filter, sort, and pagination parameters for the player view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerQuery {
    /// Position filter
    pub position: Option<Position>,

    /// Conference filter; restricts to teams of that conference
    pub conference: String,

    /// Exact team filter
    pub team: String,

    /// Case-insensitive substring match on player or team name
    pub search: String,

    pub sort_key: SortKey,
    pub sort_dir: SortDir,

    /// 1-based page number, clamped into range
    pub page: usize,
    pub page_size: usize,
}

impl Default for PlayerQuery {
    fn default() -> Self {
        Self {
            position: None,
            conference: String::new(),
            team: String::new(),
            search: String::new(),
            sort_key: SortKey::Proj,
            sort_dir: SortDir::Desc,
            page: 1,
            page_size: 50,
        }
    }
}

impl PlayerQuery {
    /// Select a sort column with its natural starting direction
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self.sort_dir = key.default_dir();
        self
    }
}

/// One page of the filtered, sorted player view
#[derive(Debug, Clone)]
pub struct PlayerPage {
    pub rows: Vec<PlayerWeekRecord>,
    pub total_rows: usize,
    pub page: usize,
    pub total_pages: usize,
}

fn filtered<'a>(snapshot: &'a Snapshot, query: &PlayerQuery) -> Vec<&'a PlayerWeekRecord> {
    let conference_teams: Option<std::collections::HashSet<&str>> = (!query.conference.is_empty())
        .then(|| {
            snapshot
                .teams
                .iter()
                .filter(|t| t.conference == query.conference)
                .map(|t| t.school.as_str())
                .collect()
        });
    let search = query.search.trim().to_lowercase();

    snapshot
        .players
        .iter()
        .filter(|r| query.position.map_or(true, |p| r.position == p))
        .filter(|r| conference_teams.as_ref().map_or(true, |set| set.contains(r.team.as_str())))
        .filter(|r| query.team.is_empty() || r.team == query.team)
        .filter(|r| {
            search.is_empty()
                || r.name.to_lowercase().contains(&search)
                || r.team.to_lowercase().contains(&search)
        })
        .collect()
}

fn compare(a: &PlayerWeekRecord, b: &PlayerWeekRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Team => a.team.to_lowercase().cmp(&b.team.to_lowercase()),
        SortKey::Position => a.position.to_string().cmp(&b.position.to_string()),
        SortKey::Opponent => a.opponent.to_lowercase().cmp(&b.opponent.to_lowercase()),
        SortKey::Usage => a.usage.total_cmp(&b.usage),
        SortKey::Points => a.points.total_cmp(&b.points),
        SortKey::Avg => a.avg.total_cmp(&b.avg),
        SortKey::Proj => a.proj.total_cmp(&b.proj),
        SortKey::Boom => a.boom.total_cmp(&b.boom),
    }
}

/// Run the player view: filter, sort, and slice one page
pub fn query_players(snapshot: &Snapshot, query: &PlayerQuery) -> PlayerPage {
    let mut rows = filtered(snapshot, query);

    rows.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_key);
        match query.sort_dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    let total_rows = rows.len();
    let page_size = query.page_size.max(1);
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    let rows = rows
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PlayerPage { rows, total_rows, page, total_pages }
}

/// Top `count` records by boom probability under the same filters
pub fn boom_board(snapshot: &Snapshot, query: &PlayerQuery, count: usize) -> Vec<PlayerWeekRecord> {
    let mut rows = filtered(snapshot, query);
    rows.sort_by(|a, b| b.boom.total_cmp(&a.boom));
    rows.into_iter().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boom_engine::DefenseRatingIndex;
    use stat_normalizer::{HomeAway, ScheduleIndex, StatLine};
    use std::collections::HashMap;

    use crate::types::TeamInfo;

    fn record(name: &str, team: &str, position: Position, proj: f64, boom: f64) -> PlayerWeekRecord {
        PlayerWeekRecord {
            id: PlayerWeekRecord::composite_id(name, team, position),
            name: name.to_string(),
            team: team.to_string(),
            position,
            opponent: String::new(),
            home_away: HomeAway::Unknown,
            season: 2024,
            week: 6,
            stats: StatLine::default(),
            usage: 0.0,
            points: proj,
            recent: proj,
            avg: proj,
            proj,
            boom,
        }
    }

    fn snapshot() -> Snapshot {
        let players = vec![
            record("Alpha Back", "Utah", Position::RB, 21.0, 0.8),
            record("Bravo Wideout", "Utah", Position::WR, 14.0, 0.6),
            record("Charlie Quarterback", "Iowa", Position::QB, 18.0, 0.7),
            record("Delta End", "Baylor", Position::TE, 9.0, 0.3),
        ];
        let teams = vec![
            TeamInfo { school: "Utah".to_string(), conference: "Big 12".to_string() },
            TeamInfo { school: "Baylor".to_string(), conference: "Big 12".to_string() },
            TeamInfo { school: "Iowa".to_string(), conference: "Big Ten".to_string() },
        ];
        Snapshot::build(
            1,
            2024,
            6,
            players,
            teams,
            DefenseRatingIndex::default(),
            HashMap::new(),
            ScheduleIndex::default(),
        )
    }

    #[test]
    fn default_query_sorts_by_projection_descending() {
        let page = query_players(&snapshot(), &PlayerQuery::default());
        let names: Vec<_> = page.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha Back", "Charlie Quarterback", "Bravo Wideout", "Delta End"]);
        assert_eq!(page.total_rows, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn position_and_team_filters_compose() {
        let query = PlayerQuery {
            position: Some(Position::WR),
            team: "Utah".to_string(),
            ..PlayerQuery::default()
        };
        let page = query_players(&snapshot(), &query);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].name, "Bravo Wideout");
    }

    #[test]
    fn conference_filter_uses_the_team_list() {
        let query = PlayerQuery { conference: "Big 12".to_string(), ..PlayerQuery::default() };
        let page = query_players(&snapshot(), &query);
        let teams: Vec<_> = page.rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, ["Utah", "Utah", "Baylor"]);
    }

    #[test]
    fn search_matches_name_or_team_case_insensitively() {
        let query = PlayerQuery { search: "utah".to_string(), ..PlayerQuery::default() };
        assert_eq!(query_players(&snapshot(), &query).rows.len(), 2);

        let query = PlayerQuery { search: "CHARLIE".to_string(), ..PlayerQuery::default() };
        assert_eq!(query_players(&snapshot(), &query).rows.len(), 1);
    }

    #[test]
    fn name_sort_starts_ascending() {
        let query = PlayerQuery::default().sort_by(SortKey::Name);
        assert_eq!(query.sort_dir, SortDir::Asc);

        let page = query_players(&snapshot(), &query);
        assert_eq!(page.rows[0].name, "Alpha Back");
        assert_eq!(page.rows[3].name, "Delta End");
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let query = PlayerQuery { page_size: 3, ..PlayerQuery::default() };
        let first = query_players(&snapshot(), &query);
        assert_eq!(first.rows.len(), 3);
        assert_eq!(first.total_pages, 2);

        let second = query_players(&snapshot(), &PlayerQuery { page: 2, page_size: 3, ..PlayerQuery::default() });
        assert_eq!(second.rows.len(), 1);

        // A page past the end clamps to the last page instead of vanishing.
        let overshoot = query_players(&snapshot(), &PlayerQuery { page: 99, page_size: 3, ..PlayerQuery::default() });
        assert_eq!(overshoot.page, 2);
        assert_eq!(overshoot.rows.len(), 1);
    }

    #[test]
    fn boom_board_ranks_by_boom_within_filters() {
        let board = boom_board(&snapshot(), &PlayerQuery::default(), 2);
        let names: Vec<_> = board.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Alpha Back", "Charlie Quarterback"]);

        let query = PlayerQuery { conference: "Big 12".to_string(), ..PlayerQuery::default() };
        let board = boom_board(&snapshot(), &query, 10);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].name, "Alpha Back");
    }
}
