//! Persisted user preferences
//!
//! Four independent JSON blobs under the data directory: scoring scheme,
//! projection weights, favorite player ids, and the compare list. Each
//! falls back to its hardcoded default when absent or unparsable; corrupt
//! preference data is never surfaced as an error. Writes are best-effort,
//! matching the cache store.

use std::path::{Path, PathBuf};

use boom_engine::ProjectionWeights;
use scoring_engine::ScoringConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Storage file names, kept stable across versions
const SCORING_FILE: &str = "pb_numbers_scoring_v1.json";
const WEIGHTS_FILE: &str = "pb_numbers_weights_v1.json";
const FAVORITES_FILE: &str = "pb_numbers_favs_v1.json";
const COMPARE_FILE: &str = "pb_numbers_compare_v1.json";

/// Maximum number of players in the compare list
pub const MAX_COMPARE: usize = 3;

/// File-backed preference store
#[derive(Debug, Clone)]
pub struct PrefsStore {
    data_dir: PathBuf,
}

impl PrefsStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self { data_dir: data_dir.as_ref().to_path_buf() }
    }

    fn load<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.data_dir.join(file);
        if !path.exists() {
            return T::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Corrupt preference blob {}, using defaults: {}", path.display(), e);
                T::default()
            }),
            Err(e) => {
                warn!("Unreadable preference blob {}, using defaults: {}", path.display(), e);
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) {
        let path = self.data_dir.join(file);
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Preference serialization for {} failed (ignored): {}", path.display(), e);
                return;
            }
        };
        let result =
            std::fs::create_dir_all(&self.data_dir).and_then(|_| std::fs::write(&path, raw));
        if let Err(e) = result {
            warn!("Preference write to {} failed (ignored): {}", path.display(), e);
        }
    }

    /// Active scoring configuration, defaulted when absent or corrupt
    pub fn scoring(&self) -> ScoringConfig {
        self.load(SCORING_FILE)
    }

    pub fn set_scoring(&self, config: &ScoringConfig) {
        self.save(SCORING_FILE, config);
    }

    /// Active projection weights, defaulted when absent or corrupt
    pub fn weights(&self) -> ProjectionWeights {
        self.load(WEIGHTS_FILE)
    }

    pub fn set_weights(&self, weights: &ProjectionWeights) {
        self.save(WEIGHTS_FILE, weights);
    }

    /// Favorited player ids
    pub fn favorites(&self) -> Vec<String> {
        self.load(FAVORITES_FILE)
    }

    /// Toggle a favorite; returns whether the id is now favorited
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut favorites = self.favorites();
        let now_favorited = match favorites.iter().position(|f| f == id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(id.to_string());
                true
            }
        };
        self.save(FAVORITES_FILE, &favorites);
        now_favorited
    }

    /// Player ids selected for comparison, at most `MAX_COMPARE`
    pub fn compare(&self) -> Vec<String> {
        self.load(COMPARE_FILE)
    }

    /// Add an id to the compare list; returns false when the list is full
    /// or already contains the id
    pub fn add_compare(&self, id: &str) -> bool {
        let mut compare = self.compare();
        if compare.len() >= MAX_COMPARE || compare.iter().any(|c| c == id) {
            return false;
        }
        compare.push(id.to_string());
        self.save(COMPARE_FILE, &compare);
        true
    }

    pub fn remove_compare(&self, id: &str) {
        let mut compare = self.compare();
        if let Some(index) = compare.iter().position(|c| c == id) {
            compare.remove(index);
            self.save(COMPARE_FILE, &compare);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_blobs_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = PrefsStore::new(dir.path());

        assert_eq!(prefs.scoring(), ScoringConfig::default());
        assert_eq!(prefs.weights(), ProjectionWeights::default());
        assert!(prefs.favorites().is_empty());
        assert!(prefs.compare().is_empty());
    }

    #[test]
    fn corrupt_blob_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SCORING_FILE), "{broken").unwrap();
        std::fs::write(dir.path().join(WEIGHTS_FILE), "[1, 2, 3]").unwrap();

        let prefs = PrefsStore::new(dir.path());
        assert_eq!(prefs.scoring(), ScoringConfig::default());
        assert_eq!(prefs.weights(), ProjectionWeights::default());
    }

    #[test]
    fn scoring_round_trips_through_the_blob() {
        let dir = TempDir::new().unwrap();
        let prefs = PrefsStore::new(dir.path());

        let mut config = ScoringConfig::default();
        config.reception = 0.5;
        prefs.set_scoring(&config);

        assert_eq!(prefs.scoring().reception, 0.5);
    }

    #[test]
    fn favorites_toggle_on_and_off() {
        let dir = TempDir::new().unwrap();
        let prefs = PrefsStore::new(dir.path());

        assert!(prefs.toggle_favorite("A|X|QB"));
        assert!(prefs.toggle_favorite("B|Y|RB"));
        assert_eq!(prefs.favorites(), vec!["A|X|QB", "B|Y|RB"]);

        assert!(!prefs.toggle_favorite("A|X|QB"));
        assert_eq!(prefs.favorites(), vec!["B|Y|RB"]);
    }

    #[test]
    fn compare_list_caps_at_three_and_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let prefs = PrefsStore::new(dir.path());

        assert!(prefs.add_compare("a"));
        assert!(!prefs.add_compare("a"));
        assert!(prefs.add_compare("b"));
        assert!(prefs.add_compare("c"));
        assert!(!prefs.add_compare("d"));
        assert_eq!(prefs.compare(), vec!["a", "b", "c"]);

        prefs.remove_compare("b");
        assert_eq!(prefs.compare(), vec!["a", "c"]);
        assert!(prefs.add_compare("d"));
    }
}
