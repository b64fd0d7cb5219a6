use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use boom_engine::{DefenseRatingIndex, ProjectionWeights, Projector};
use cfbd_fetcher::{fetch_broker_key, CachedClient, CfbdClient, ConcurrencyLimiter};
use futures::future::join_all;
use scoring_engine::{ScoreCalculator, ScoringConfig};
use serde_json::Value;
use stat_cache::CacheStore;
use stat_normalizer::{normalize_rows, PlayerWeekRecord, ScheduleIndex};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::RefreshConfig;
use crate::error::{RefreshError, Result};
use crate::hydrate::{parse_current_week, parse_defense_ratings, parse_pace, parse_teams};
use crate::prefs::PrefsStore;
use crate::types::{Snapshot, TeamInfo};

/// Normalize, score, and project raw player rows into finished records.
///
/// Pure except for the inputs: the whole refresh pipeline below the fetch
/// layer lives here, so it is directly testable without a network.
pub fn compute_records(
    rows: &[Value],
    schedule: &ScheduleIndex,
    season: i32,
    week: u32,
    scoring: &ScoringConfig,
    weights: &ProjectionWeights,
    defense: &DefenseRatingIndex,
) -> Vec<PlayerWeekRecord> {
    let calculator = ScoreCalculator::new(scoring.clone());
    let projector = Projector::new(*weights);

    let mut records = normalize_rows(rows, schedule, season, week);
    for record in records.iter_mut() {
        record.points = calculator.score(&record.stats);
        // One week of data per fetch: this week's points stand in for
        // recent form and the season average until a rolling history
        // source exists.
        record.recent = record.points;
        record.avg = record.points;
    }
    projector.apply(&mut records, defense);
    records
}

/// Orchestrates refresh cycles and owns the installed snapshot.
///
/// Refreshes are guarded by a generation counter: a refresh superseded
/// mid-flight (the user changed week or season before it finished) discards
/// its result instead of clobbering the newer one.
pub struct RefreshService {
    config: RefreshConfig,
    client: CachedClient,
    prefs: PrefsStore,
    snapshot: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
}

impl RefreshService {
    /// Create the service, resolving the upstream credential from the
    /// `CFBD_API_KEY` environment variable or the local key broker. A
    /// missing credential degrades to unauthenticated requests.
    pub async fn new(config: RefreshConfig) -> Result<Self> {
        let api_key = match std::env::var("CFBD_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => match fetch_broker_key(&config.fetcher.broker_url).await {
                Ok(key) => key,
                Err(e) => {
                    warn!("Unable to retrieve API key: {}", e);
                    String::new()
                }
            },
        };

        let client = CfbdClient::new(&config.fetcher, api_key)?;
        let limiter = ConcurrencyLimiter::new(config.fetcher.max_parallel);
        let cache = CacheStore::open(&config.data_dir, config.ttl_hours);
        let prefs = PrefsStore::new(&config.data_dir);
        let snapshot = RwLock::new(Arc::new(Snapshot::empty(config.season)));

        Ok(Self {
            config,
            client: CachedClient::new(client, limiter, cache),
            prefs,
            snapshot,
            generation: AtomicU64::new(0),
        })
    }

    /// The most recently installed snapshot
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    pub fn prefs(&self) -> &PrefsStore {
        &self.prefs
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Run one refresh cycle and install the resulting snapshot unless a
    /// newer refresh started in the meantime.
    ///
    /// Auxiliary categories (teams, ratings, pace, schedule) degrade to
    /// empty on failure; only the per-week player fetch aborts the refresh.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let season = self.config.season;
        let week = match self.config.week {
            Some(week) => week,
            None => self.resolve_current_week(season).await,
        };
        info!("Refreshing season {} week {} (generation {})", season, week, generation);

        // All five fetches go out together through the limiter; the
        // schedule index is complete before normalization runs because the
        // join is a barrier.
        let (teams, defense, pace, schedule, players) = tokio::join!(
            self.fetch_teams(season),
            self.fetch_defense_ratings(season),
            self.fetch_pace(season),
            self.fetch_schedule(season, week),
            self.fetch_players_week(season, week),
        );
        let rows = players.map_err(RefreshError::PlayersUnavailable)?;

        let records = compute_records(
            &rows,
            &schedule,
            season,
            week,
            &self.prefs.scoring(),
            &self.prefs.weights(),
            &defense,
        );
        info!("Refresh produced {} player records", records.len());

        let snapshot =
            Arc::new(Snapshot::build(generation, season, week, records, teams, defense, pace, schedule));

        if self.generation.load(Ordering::SeqCst) == generation {
            *self.snapshot.write().await = Arc::clone(&snapshot);
        } else {
            info!("Refresh generation {} superseded, result discarded", generation);
        }
        Ok(snapshot)
    }

    /// Bust this week's cache scope, then refresh
    pub async fn force_refresh(&self) -> Result<Arc<Snapshot>> {
        let week = match self.config.week {
            Some(week) => week,
            None => self.resolve_current_week(self.config.season).await,
        };
        let removed = self.client.bust_week(self.config.season, week).await;
        info!("Busted {} cached entries for season {} week {}", removed, self.config.season, week);
        self.refresh().await
    }

    /// Fetch one degradable category, logging and returning empty on failure
    async fn category(
        &self,
        label: &str,
        path: &str,
        params: Vec<(&str, String)>,
        use_cache: bool,
    ) -> Vec<Value> {
        match self.client.get_json(path, &params, use_cache).await {
            Ok(data) => data.as_array().cloned().unwrap_or_default(),
            Err(e) => {
                warn!("{} fetch failed, degrading to empty: {}", label, e);
                Vec::new()
            }
        }
    }

    async fn resolve_current_week(&self, season: i32) -> u32 {
        let params = vec![("year", season.to_string()), ("seasonType", "regular".to_string())];
        let rows = self.category("weeks calendar", "/weeks", params, true).await;
        match parse_current_week(&rows) {
            Some(week) => week,
            None => {
                warn!("Unable to determine the current week, defaulting to 1");
                1
            }
        }
    }

    async fn fetch_teams(&self, season: i32) -> Vec<TeamInfo> {
        if !self.config.conference.is_empty() {
            let params = vec![
                ("year", season.to_string()),
                ("conference", self.config.conference.clone()),
            ];
            return parse_teams(&self.category("teams", "/teams", params, true).await);
        }

        // No conference filter: pull each configured conference and merge.
        let fetches = self.config.conferences.iter().map(|conference| {
            let params = vec![("year", season.to_string()), ("conference", conference.clone())];
            self.category("teams", "/teams", params, true)
        });
        let merged: Vec<Value> = join_all(fetches).await.into_iter().flatten().collect();
        parse_teams(&merged)
    }

    async fn fetch_defense_ratings(&self, season: i32) -> DefenseRatingIndex {
        let params = vec![("year", season.to_string())];
        let rows = self.category("defense ratings", "/ratings/sp", params, true).await;
        DefenseRatingIndex::new(parse_defense_ratings(&rows))
    }

    async fn fetch_pace(&self, season: i32) -> std::collections::HashMap<String, f64> {
        let params = vec![("year", season.to_string())];
        let rows = self.category("pace metrics", "/metrics/pace", params, true).await;
        parse_pace(&rows)
    }

    /// The schedule index is rebuilt uncached every refresh so week changes
    /// see current opponents immediately.
    async fn fetch_schedule(&self, season: i32, week: u32) -> ScheduleIndex {
        let params = vec![
            ("year", season.to_string()),
            ("week", week.to_string()),
            ("seasonType", "regular".to_string()),
        ];
        let rows = self.category("games schedule", "/games", params, false).await;
        ScheduleIndex::build(&rows, season, week)
    }

    /// The primary fetch: per-week player stat rows. Errors propagate; a
    /// refresh without player data has nothing to show.
    async fn fetch_players_week(&self, season: i32, week: u32) -> cfbd_fetcher::Result<Vec<Value>> {
        let mut params = vec![
            ("year", season.to_string()),
            ("week", week.to_string()),
            ("seasonType", self.config.season_type.clone()),
        ];
        if !self.config.conference.is_empty() {
            params.push(("conference", self.config.conference.clone()));
        }
        if !self.config.team.is_empty() {
            params.push(("team", self.config.team.clone()));
        }

        let data = self.client.get_json("/games/players", &params, false).await?;
        Ok(data.as_array().cloned().unwrap_or_default())
    }
}
