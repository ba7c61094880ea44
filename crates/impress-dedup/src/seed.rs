//! Seed assignment: mapping entries to canonical representatives
//!
//! A seed is the first entry seen that matched no earlier seed. Seeds are
//! scanned in registration order and the first one scoring at or above the
//! threshold wins, so resolution is reproducible for a given call order.
//! Every resolution is memoized by entry text.

use std::collections::HashMap;

use tracing::trace;

use crate::error::Result;
use crate::similarity::{checked_score, SimilarityScorer};

/// Position of a seed in registration order.
pub type SeedId = usize;

/// Assigns entries to seeds under a fixed threshold.
///
/// Scoped to a single clustering call; not shared between threads.
pub struct SeedAssigner<'s, S: SimilarityScorer + ?Sized> {
    scorer: &'s S,
    threshold: i32,
    seeds: Vec<String>,
    cache: HashMap<String, SeedId>,
    comparisons: usize,
}

impl<'s, S: SimilarityScorer + ?Sized> SeedAssigner<'s, S> {
    /// Create an empty assigner.
    ///
    /// The threshold is not range-checked: `<= 0` merges everything into the
    /// first seed and `> 100` makes every distinct entry its own seed.
    pub fn new(scorer: &'s S, threshold: i32) -> Self {
        Self {
            scorer,
            threshold,
            seeds: Vec::new(),
            cache: HashMap::new(),
            comparisons: 0,
        }
    }

    /// Resolve an entry to its seed text.
    pub fn resolve(&mut self, entry: &str) -> Result<&str> {
        let id = self.resolve_id(entry)?;
        Ok(&self.seeds[id])
    }

    /// Resolve an entry to the registration index of its seed.
    pub fn resolve_id(&mut self, entry: &str) -> Result<SeedId> {
        if let Some(&id) = self.cache.get(entry) {
            return Ok(id);
        }

        for (id, seed) in self.seeds.iter().enumerate() {
            self.comparisons += 1;
            let score = checked_score(self.scorer, entry, seed)?;
            if i32::from(score) >= self.threshold {
                self.cache.insert(entry.to_string(), id);
                return Ok(id);
            }
        }

        let id = self.seeds.len();
        trace!(seed = entry, id, "registered new seed");
        self.seeds.push(entry.to_string());
        self.cache.insert(entry.to_string(), id);
        Ok(id)
    }

    /// Seed text for a previously returned id.
    pub fn seed(&self, id: SeedId) -> Option<&str> {
        self.seeds.get(id).map(String::as_str)
    }

    /// Seeds in registration order.
    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    /// Number of seeds registered so far.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Minimum score, inclusive, for joining an existing seed.
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Scorer invocations performed so far.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DedupError;
    use crate::similarity::ScorerKind;
    use std::cell::Cell;

    #[test]
    fn test_first_entry_becomes_seed() {
        let scorer = ScorerKind::Ratio;
        let mut assigner = SeedAssigner::new(&scorer, 80);
        assert_eq!(assigner.resolve("Apple").unwrap(), "Apple");
        assert_eq!(assigner.seeds(), &["Apple".to_string()]);
    }

    #[test]
    fn test_similar_entry_joins_existing_seed() {
        let scorer = ScorerKind::Ratio;
        let mut assigner = SeedAssigner::new(&scorer, 80);
        assigner.resolve("Apple").unwrap();
        assert_eq!(assigner.resolve("Apples").unwrap(), "Apple");
        assert_eq!(assigner.len(), 1);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scorer = |_: &str, _: &str| 80u8;
        let mut assigner = SeedAssigner::new(&scorer, 80);
        assigner.resolve("a").unwrap();
        assert_eq!(assigner.resolve("b").unwrap(), "a");
    }

    #[test]
    fn test_first_registered_seed_wins() {
        // "ab" matches both seeds; the earlier one must be chosen.
        let scorer = |a: &str, b: &str| -> u8 {
            if a == b {
                100
            } else if a == "ab" || b == "ab" {
                90
            } else {
                0
            }
        };
        let mut assigner = SeedAssigner::new(&scorer, 50);
        assigner.resolve("a").unwrap();
        assigner.resolve("b").unwrap();
        assert_eq!(assigner.len(), 2);
        assert_eq!(assigner.resolve("ab").unwrap(), "a");
    }

    #[test]
    fn test_cache_skips_rescoring() {
        let calls = Cell::new(0usize);
        let scorer = |_: &str, _: &str| {
            calls.set(calls.get() + 1);
            0u8
        };
        let mut assigner = SeedAssigner::new(&scorer, 50);
        assigner.resolve("x").unwrap();
        assigner.resolve("y").unwrap();
        let before = calls.get();
        assert_eq!(assigner.resolve("y").unwrap(), "y");
        assert_eq!(calls.get(), before);
        assert_eq!(assigner.comparisons(), before);
    }

    #[test]
    fn test_degenerate_thresholds() {
        let scorer = ScorerKind::Ratio;

        let mut merge_all = SeedAssigner::new(&scorer, 0);
        for entry in ["Apple", "Zebra", "Quartz"] {
            assert_eq!(merge_all.resolve(entry).unwrap(), "Apple");
        }

        let mut split_all = SeedAssigner::new(&scorer, 101);
        assert_eq!(split_all.threshold(), 101);
        for entry in ["Apple", "Apple!", "Apples"] {
            assert_eq!(split_all.resolve(entry).unwrap(), entry);
        }
        assert_eq!(split_all.len(), 3);
    }

    #[test]
    fn test_scorer_error_propagates() {
        let scorer = |_: &str, _: &str| 255u8;
        let mut assigner = SeedAssigner::new(&scorer, 50);
        assigner.resolve("a").unwrap();
        assert!(matches!(
            assigner.resolve("b"),
            Err(DedupError::Scorer(_))
        ));
    }
}
