use serde_json::Value;
use tracing::debug;

use crate::alias::{pick_stat, pick_str};
use crate::models::{HomeAway, PlayerWeekRecord, Position, StatLine};
use crate::schedule::ScheduleIndex;

/// Normalize raw `/games/players` rows into canonical week records.
///
/// Every raw row produces exactly one record; missing or malformed fields
/// degrade to zeros and `Unknown` markers rather than failing the batch.
pub fn normalize_rows(
    raw_rows: &[Value],
    schedule: &ScheduleIndex,
    season: i32,
    week: u32,
) -> Vec<PlayerWeekRecord> {
    let records: Vec<PlayerWeekRecord> =
        raw_rows.iter().map(|row| normalize_row(row, schedule, season, week)).collect();
    debug!("Normalized {} raw rows for season {} week {}", records.len(), season, week);
    records
}

fn normalize_row(
    row: &Value,
    schedule: &ScheduleIndex,
    season: i32,
    week: u32,
) -> PlayerWeekRecord {
    let name = pick_str(row, &["player", "player_name", "athlete", "name"])
        .unwrap_or_else(|| "Unknown".to_string());
    let team = pick_str(row, &["team", "team_name", "school", "player_team", "teamSchool", "teamAbbr"])
        .unwrap_or_else(|| "Unknown".to_string());
    let position = pick_str(row, &["position", "player_position", "pos"])
        .map(|p| Position::parse(&p))
        .unwrap_or(Position::Other);

    // Opponent and venue come from the row when it carries them, otherwise
    // from the schedule index for this team/week/season.
    let context = schedule.get(&team, week, season);
    let opponent = pick_str(row, &["opponent", "opponent_team"])
        .or_else(|| context.map(|c| c.opponent.clone()))
        .unwrap_or_default();
    let home_away = pick_str(row, &["home_away", "homeAway"])
        .map(|raw| HomeAway::parse(&raw))
        .filter(|parsed| *parsed != HomeAway::Unknown)
        .or_else(|| context.map(|c| c.home_away))
        .unwrap_or(HomeAway::Unknown);

    let stats = StatLine {
        pass_yards: pick_stat(row, &["passingYards", "passYards", "netPassingYards", "yardsPassing"]),
        pass_td: pick_stat(row, &["passingTD", "passTD", "passingTouchdowns"]),
        interceptions: pick_stat(row, &["interceptions", "interception"]),
        rush_yards: pick_stat(row, &["rushingYards", "rushYards", "yardsRushing"]),
        rush_td: pick_stat(row, &["rushingTD", "rushTD"]),
        rush_att: pick_stat(row, &["rushingAttempts", "rushAttempts", "carries"]),
        receptions: pick_stat(row, &["receptions"]),
        targets: pick_stat(row, &["targets"]),
        rec_yards: pick_stat(row, &["receivingYards", "recYards"]),
        rec_td: pick_stat(row, &["receivingTD", "recTD"]),
        fumbles: pick_stat(row, &["fumblesLost", "fumbles"]),
        // Two-point conversions arrive split by play type; they sum rather
        // than alias.
        two_pt: pick_stat(row, &["twoPointRush"])
            + pick_stat(row, &["twoPointPass"])
            + pick_stat(row, &["twoPointRecv"])
            + pick_stat(row, &["twoPoint"]),
    };

    let pass_att = pick_stat(row, &["passAttempts", "attempts"]);
    let usage = usage_proxy(position, &stats, pass_att);

    PlayerWeekRecord {
        id: PlayerWeekRecord::composite_id(&name, &team, position),
        name,
        team,
        position,
        opponent,
        home_away,
        season,
        week,
        stats,
        usage,
        points: 0.0,
        recent: 0.0,
        avg: 0.0,
        proj: 0.0,
        boom: 0.0,
    }
}

/// Single-game touch-share proxy.
///
/// Quarterbacks: pass attempts + rush attempts measured against itself, so
/// 1.0 whenever the QB recorded any touches and 0 otherwise. Everyone
/// else: touches over an approximate in-game total. True team-total
/// denominators are not available from a single player row, so this is an
/// approximation by design of the data source, not a real team share.
fn usage_proxy(position: Position, stats: &StatLine, pass_att: f64) -> f64 {
    let touches =
        stats.rush_att + stats.receptions + (stats.targets - stats.receptions).max(0.0);
    let qb_touches = pass_att + stats.rush_att;

    if position == Position::QB {
        return safe_div(qb_touches, qb_touches.max(1.0));
    }

    let mut total_proxy = qb_touches + touches;
    if total_proxy <= 0.0 {
        total_proxy = stats.rush_att + stats.receptions;
    }
    if total_proxy <= 0.0 {
        total_proxy = 1.0;
    }
    safe_div(touches, total_proxy.max(1.0))
}

fn safe_div(a: f64, b: f64) -> f64 {
    if b != 0.0 {
        a / b
    } else {
        0.0
    }
}
