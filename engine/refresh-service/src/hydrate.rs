//! Extraction of auxiliary data payloads into lookup structures
//!
//! Like the player rows, these payloads drift across upstream versions, so
//! every extractor tries a short ordered list of field shapes and drops
//! rows it cannot make sense of.

use std::collections::HashMap;

use serde_json::Value;

use crate::types::TeamInfo;

fn field_str(row: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .find_map(|value| match value.as_str() {
            Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Extract team metadata from `/teams` rows, deduplicated by
/// school + conference.
pub(crate) fn parse_teams(rows: &[Value]) -> Vec<TeamInfo> {
    let mut seen = std::collections::HashSet::new();
    let mut teams = Vec::new();

    for row in rows {
        let Some(school) = field_str(row, &["school", "team"]) else {
            continue;
        };
        let conference = field_str(row, &["conference"]).unwrap_or_default();
        if seen.insert(format!("{school}|{conference}")) {
            teams.push(TeamInfo { school, conference });
        }
    }

    teams
}

/// Extract the defense rating per team from `/ratings/sp` rows.
///
/// The rating lives at `spRatings.defense.rating` in current payloads, with
/// flat `defense` or `defenseRating` fields in older ones.
pub(crate) fn parse_defense_ratings(rows: &[Value]) -> HashMap<String, f64> {
    let mut ratings = HashMap::new();

    for row in rows {
        let Some(team) = field_str(row, &["team"]) else {
            continue;
        };
        let nested = row
            .get("spRatings")
            .and_then(|sp| sp.get("defense"))
            .and_then(|d| d.get("rating"));
        let rating = nested
            .or_else(|| row.get("defense"))
            .or_else(|| row.get("defenseRating"))
            .and_then(as_number);
        if let Some(rating) = rating {
            ratings.insert(team, rating);
        }
    }

    ratings
}

/// Extract a pace value per team from `/metrics/pace` rows: plays per game
/// when present, else the inverse of seconds per play, else a bare `pace`
/// field, else zero.
pub(crate) fn parse_pace(rows: &[Value]) -> HashMap<String, f64> {
    let mut pace = HashMap::new();

    for row in rows {
        let Some(team) = field_str(row, &["team", "school"]) else {
            continue;
        };
        let value = row
            .get("playsPerGame")
            .and_then(as_number)
            .or_else(|| {
                row.get("secondsPerPlay")
                    .and_then(as_number)
                    .filter(|s| *s > 0.0)
                    .map(|s| 1.0 / s)
            })
            .or_else(|| row.get("pace").and_then(as_number))
            .unwrap_or(0.0);
        pace.insert(team, value);
    }

    pace
}

/// Pick the active week out of `/weeks` calendar rows: the row flagged
/// `currentWeek`, else the one flagged `lastWeek`, else the first row.
pub(crate) fn parse_current_week(rows: &[Value]) -> Option<u32> {
    let flagged = rows
        .iter()
        .find(|row| row.get("currentWeek").and_then(Value::as_bool).unwrap_or(false))
        .or_else(|| {
            rows.iter().find(|row| row.get("lastWeek").and_then(Value::as_bool).unwrap_or(false))
        })
        .or_else(|| rows.first());

    flagged.and_then(|row| row.get("week")).and_then(as_number).map(|week| week as u32)
}
