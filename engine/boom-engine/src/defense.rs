use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Season-level defense strength ratings keyed by team name.
///
/// Ratings are only used relative to each other, min-max normalized over
/// the currently known set, so their absolute scale never matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseRatingIndex {
    ratings: HashMap<String, f64>,
    min: f64,
    span: f64,
}

impl DefenseRatingIndex {
    pub fn new(ratings: HashMap<String, f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for rating in ratings.values().filter(|r| r.is_finite()) {
            min = min.min(*rating);
            max = max.max(*rating);
        }
        // A single-team (or degenerate) set spans zero; fall back to 1 so
        // normalization stays finite.
        let span = if (max - min).abs() > f64::EPSILON { max - min } else { 1.0 };
        Self { ratings, min, span }
    }

    /// Matchup favorability for facing `team`: the min-max normalized
    /// rating, inverted, so the dataset's minimum rating maps to 1.0 (best
    /// matchup) and its maximum to 0.0. A team absent from the index is
    /// neutral at 0.5, neither penalized nor favored.
    pub fn favorability(&self, team: &str) -> f64 {
        match self.ratings.get(team).filter(|r| r.is_finite()) {
            Some(rating) => 1.0 - ((rating - self.min) / self.span),
            None => 0.5,
        }
    }

    pub fn rating(&self, team: &str) -> Option<f64> {
        self.ratings.get(team).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(pairs: &[(&str, f64)]) -> DefenseRatingIndex {
        DefenseRatingIndex::new(pairs.iter().map(|(team, r)| (team.to_string(), *r)).collect())
    }

    #[test]
    fn favorability_spans_the_rating_range() {
        let idx = index(&[("Low Rated", 5.0), ("High Rated", 35.0), ("Mid Rated", 20.0)]);
        assert_eq!(idx.favorability("Low Rated"), 1.0);
        assert_eq!(idx.favorability("High Rated"), 0.0);
        assert_eq!(idx.favorability("Mid Rated"), 0.5);
    }

    #[test]
    fn absent_team_is_neutral() {
        let idx = index(&[("A", 1.0), ("B", 2.0)]);
        assert_eq!(idx.favorability("Unknown Tech"), 0.5);
    }

    #[test]
    fn single_team_index_stays_finite() {
        let idx = index(&[("Lonely", 12.0)]);
        let f = idx.favorability("Lonely");
        assert!(f.is_finite());
        assert_eq!(f, 1.0); // span falls back to 1, (12 - 12) / 1 inverted
        assert_eq!(idx.favorability("Absent"), 0.5);
    }

    #[test]
    fn empty_index_is_neutral_everywhere() {
        let idx = DefenseRatingIndex::default();
        assert_eq!(idx.favorability("Anyone"), 0.5);
    }

    #[test]
    fn non_finite_ratings_are_ignored() {
        let idx = index(&[("A", 1.0), ("B", 3.0), ("Broken", f64::NAN)]);
        assert!(idx.favorability("A").is_finite());
        assert_eq!(idx.favorability("Broken"), 0.5);
    }
}
