use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// File name the whole cache blob is persisted under, inside the data dir.
/// Kept stable so existing caches survive upgrades.
pub const CACHE_FILE_NAME: &str = "pb_numbers_cache_v1.json";

/// A single cached upstream payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Write time in epoch milliseconds
    pub ts: i64,

    /// Raw upstream JSON payload
    pub data: serde_json::Value,
}

/// Key/value cache with TTL expiry, persisted as one JSON blob.
///
/// Keys are `"CFBD:" + full request URL`. A `ttl_hours` of zero or less
/// disables time-based expiry entirely (manual bust only).
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    ttl_hours: i64,
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    /// Open the cache stored under `data_dir`, starting empty when the blob
    /// is missing or unreadable.
    pub fn open(data_dir: impl AsRef<Path>, ttl_hours: i64) -> Self {
        let path = data_dir.as_ref().join(CACHE_FILE_NAME);
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to load cache from {}, starting empty: {}", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, ttl_hours, entries }
    }

    fn load(path: &Path) -> Result<HashMap<String, CacheEntry>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// TTL in milliseconds, or `None` when entries never expire by time
    fn ttl_ms(&self) -> Option<i64> {
        (self.ttl_hours > 0).then(|| self.ttl_hours * 60 * 60 * 1000)
    }

    /// Look up a fresh entry. Entries older than the TTL are treated as
    /// absent and evicted so they are not resurrected by a later read.
    pub fn get(&mut self, key: &str) -> Option<serde_json::Value> {
        self.get_at(key, Utc::now().timestamp_millis())
    }

    fn get_at(&mut self, key: &str, now_ms: i64) -> Option<serde_json::Value> {
        let fresh = match self.entries.get(key) {
            None => return None,
            Some(entry) => match self.ttl_ms() {
                None => true,
                Some(ttl) => now_ms - entry.ts < ttl,
            },
        };
        if fresh {
            return self.entries.get(key).map(|e| e.data.clone());
        }
        self.entries.remove(key);
        self.persist();
        None
    }

    /// Insert or replace an entry, stamped with the current time.
    pub fn put(&mut self, key: impl Into<String>, data: serde_json::Value) {
        self.entries.insert(key.into(), CacheEntry { ts: Utc::now().timestamp_millis(), data });
        self.persist();
    }

    /// Remove every entry whose key matches `predicate`. Returns the number
    /// of entries removed.
    pub fn invalidate<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Drop cached responses scoped to one (season, week) so a forced
    /// refresh re-pulls that week without clearing season-level data such
    /// as ratings or pace.
    pub fn bust_week(&mut self, season: i32, week: u32) -> usize {
        let year = format!("year={season}");
        let season_param = format!("season={season}");
        let week_plain = format!("week={week}");
        let week_encoded = format!("week%3D{week}");
        self.invalidate(|key| {
            key.starts_with("CFBD:")
                && (key.contains(&year) || key.contains(&season_param))
                && (key.contains(&week_plain) || key.contains(&week_encoded))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-effort synchronous write of the whole cache blob.
    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("Cache write to {} failed (ignored): {}", self.path.display(), e);
        }
    }

    fn try_persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_blob(dir: &TempDir, entries: &HashMap<String, CacheEntry>) {
        let path = dir.path().join(CACHE_FILE_NAME);
        std::fs::write(path, serde_json::to_string(entries).unwrap()).unwrap();
    }

    #[test]
    fn put_then_get_round_trips_and_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = CacheStore::open(dir.path(), 6);
        store.put("CFBD:https://x/teams?year=2024", json!([{"school": "Ohio State"}]));

        assert_eq!(
            store.get("CFBD:https://x/teams?year=2024"),
            Some(json!([{"school": "Ohio State"}]))
        );

        let mut reopened = CacheStore::open(dir.path(), 6);
        assert_eq!(
            reopened.get("CFBD:https://x/teams?year=2024"),
            Some(json!([{"school": "Ohio State"}]))
        );
    }

    #[test]
    fn ttl_boundary_one_hour() {
        let dir = TempDir::new().unwrap();
        let now = Utc::now().timestamp_millis();
        let mut entries = HashMap::new();
        entries.insert(
            "CFBD:fresh".to_string(),
            CacheEntry { ts: now - 59 * 60 * 1000, data: json!(1) },
        );
        entries.insert(
            "CFBD:stale".to_string(),
            CacheEntry { ts: now - 61 * 60 * 1000, data: json!(2) },
        );
        write_blob(&dir, &entries);

        let mut store = CacheStore::open(dir.path(), 1);
        assert_eq!(store.get("CFBD:fresh"), Some(json!(1)));
        assert_eq!(store.get("CFBD:stale"), None);

        // The stale entry was evicted, not just hidden.
        assert_eq!(store.len(), 1);
        let reopened = CacheStore::open(dir.path(), 1);
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn non_positive_ttl_never_expires() {
        let dir = TempDir::new().unwrap();
        let mut entries = HashMap::new();
        entries.insert(
            "CFBD:ancient".to_string(),
            CacheEntry { ts: 0, data: json!("still here") },
        );
        write_blob(&dir, &entries);

        let mut store = CacheStore::open(dir.path(), 0);
        assert_eq!(store.get("CFBD:ancient"), Some(json!("still here")));
    }

    #[test]
    fn invalidate_removes_only_matching_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = CacheStore::open(dir.path(), 6);
        store.put("CFBD:https://x/teams?year=2024", json!(1));
        store.put("CFBD:https://x/ratings/sp?year=2024", json!(2));

        let removed = store.invalidate(|key| key.contains("/ratings/"));
        assert_eq!(removed, 1);
        assert_eq!(store.get("CFBD:https://x/ratings/sp?year=2024"), None);
        assert!(store.get("CFBD:https://x/teams?year=2024").is_some());
    }

    #[test]
    fn bust_week_leaves_season_level_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = CacheStore::open(dir.path(), 6);
        store.put("CFBD:https://x/games/players?year=2024&week=5", json!(1));
        store.put("CFBD:https://x/games?year=2024&week=5", json!(2));
        store.put("CFBD:https://x/ratings/sp?year=2024", json!(3));
        store.put("CFBD:https://x/games/players?year=2023&week=5", json!(4));

        let removed = store.bust_week(2024, 5);
        assert_eq!(removed, 2);
        assert!(store.get("CFBD:https://x/ratings/sp?year=2024").is_some());
        assert!(store.get("CFBD:https://x/games/players?year=2023&week=5").is_some());
    }

    #[test]
    fn corrupt_blob_degrades_to_empty_cache() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CACHE_FILE_NAME), "{not json").unwrap();

        let mut store = CacheStore::open(dir.path(), 6);
        assert!(store.is_empty());

        // The store remains usable and can overwrite the bad blob.
        store.put("CFBD:k", json!(true));
        assert_eq!(store.get("CFBD:k"), Some(json!(true)));
    }
}
