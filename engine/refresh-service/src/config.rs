use std::path::PathBuf;

use cfbd_fetcher::FetcherConfig;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Configuration for the refresh service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Season year (e.g. 2025)
    pub season: i32,

    /// Active week; `None` resolves the current week from the calendar
    pub week: Option<u32>,

    /// Season type passed upstream ("regular" or "both")
    pub season_type: String,

    /// Active conference filter; empty means all configured conferences
    pub conference: String,

    /// Active team filter; empty means all teams
    pub team: String,

    /// Conferences fetched when no conference filter is active
    pub conferences: Vec<String>,

    /// Directory holding the cache blob and preference files
    pub data_dir: PathBuf,

    /// Cache TTL in hours; zero or less disables time-based expiry
    pub ttl_hours: i64,

    /// Fetch layer configuration
    pub fetcher: FetcherConfig,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            season: chrono::Utc::now().year(),
            week: None,
            season_type: "regular".to_string(),
            conference: String::new(),
            team: String::new(),
            conferences: vec![
                "ACC".to_string(),
                "Big Ten".to_string(),
                "Big 12".to_string(),
                "SEC".to_string(),
                "Pac-12".to_string(),
            ],
            data_dir: PathBuf::from("./data"),
            ttl_hours: 6,
            fetcher: FetcherConfig::default(),
        }
    }
}

impl RefreshConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(season) = std::env::var("BALL_NUMBERS_SEASON") {
            config.season = season.parse().unwrap_or(config.season);
        }

        if let Ok(week) = std::env::var("BALL_NUMBERS_WEEK") {
            config.week = week.parse().ok();
        }

        if let Ok(conference) = std::env::var("BALL_NUMBERS_CONFERENCE") {
            config.conference = conference;
        }

        if let Ok(team) = std::env::var("BALL_NUMBERS_TEAM") {
            config.team = team;
        }

        if let Ok(data_dir) = std::env::var("BALL_NUMBERS_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(ttl) = std::env::var("BALL_NUMBERS_TTL_HOURS") {
            config.ttl_hours = ttl.parse().unwrap_or(6);
        }

        config.fetcher = FetcherConfig::from_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_the_power_five() {
        let config = RefreshConfig::default();
        assert_eq!(config.conferences.len(), 5);
        assert!(config.conferences.contains(&"SEC".to_string()));
        assert_eq!(config.season_type, "regular");
        assert!(config.week.is_none());
    }
}
