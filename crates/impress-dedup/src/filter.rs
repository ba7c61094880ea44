//! Blanket filter: pruning a list against a reference list
//!
//! An entry is removed when it scores strictly above the threshold against
//! any reference entry. The primary list is only read; the outcome is built
//! fresh, so removals never disturb the scan.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::similarity::{checked_score, SimilarityScorer};

/// An entry dropped by the filter and the reference entry that caught it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedEntry {
    pub entry: String,
    /// First reference entry scoring above the threshold
    pub matched: String,
    pub score: u8,
}

/// Result of a blanket filter run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Entries kept, in original order
    pub retained: Vec<String>,
    /// Entries dropped, in original order
    pub removed: Vec<RemovedEntry>,
}

impl FilterOutcome {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Texts of the removed entries.
    pub fn removed_entries(&self) -> Vec<String> {
        self.removed.iter().map(|r| r.entry.clone()).collect()
    }
}

/// Remove every `primary` entry scoring above `threshold` against any
/// `reference` entry.
pub fn blanket_filter<P, R, S>(
    primary: &[P],
    reference: &[R],
    threshold: i32,
    scorer: &S,
) -> Result<FilterOutcome>
where
    P: AsRef<str>,
    R: AsRef<str>,
    S: SimilarityScorer + ?Sized,
{
    let mut outcome = FilterOutcome::default();

    for entry in primary {
        let entry = entry.as_ref();
        match first_match(entry, reference, threshold, scorer)? {
            Some((matched, score)) => outcome.removed.push(RemovedEntry {
                entry: entry.to_string(),
                matched: matched.to_string(),
                score,
            }),
            None => outcome.retained.push(entry.to_string()),
        }
    }

    debug!(
        primary = primary.len(),
        reference = reference.len(),
        removed = outcome.removed_count(),
        threshold,
        "blanket filter applied"
    );

    Ok(outcome)
}

fn first_match<'r, R, S>(
    entry: &str,
    reference: &'r [R],
    threshold: i32,
    scorer: &S,
) -> Result<Option<(&'r str, u8)>>
where
    R: AsRef<str>,
    S: SimilarityScorer + ?Sized,
{
    for candidate in reference {
        let candidate = candidate.as_ref();
        let score = checked_score(scorer, entry, candidate)?;
        if i32::from(score) > threshold {
            return Ok(Some((candidate, score)));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::ScorerKind;

    #[test]
    fn test_removes_close_match() {
        let outcome = blanket_filter(
            &["Apple", "Banana", "Carrot"],
            &["Appel"],
            70,
            &ScorerKind::Ratio,
        )
        .unwrap();

        assert_eq!(outcome.retained, vec!["Banana", "Carrot"]);
        assert_eq!(outcome.removed_count(), 1);
        assert_eq!(outcome.removed[0].entry, "Apple");
        assert_eq!(outcome.removed[0].matched, "Appel");
        assert_eq!(outcome.removed[0].score, 80);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let scorer = |_: &str, _: &str| 70u8;
        let outcome = blanket_filter(&["a", "b"], &["c"], 70, &scorer).unwrap();
        assert_eq!(outcome.retained.len(), 2);
        assert_eq!(outcome.removed_count(), 0);
    }

    #[test]
    fn test_adjacent_matches_are_all_removed() {
        // Consecutive removals must not cause the next entry to be skipped.
        let outcome = blanket_filter(
            &["Apple", "Apple", "Apples", "Carrot"],
            &["Apple"],
            70,
            &ScorerKind::Ratio,
        )
        .unwrap();
        assert_eq!(outcome.retained, vec!["Carrot"]);
        assert_eq!(outcome.removed_count(), 3);
    }

    #[test]
    fn test_empty_reference_keeps_everything() {
        let reference: [&str; 0] = [];
        let outcome = blanket_filter(&["x", "y"], &reference, 0, &ScorerKind::Ratio).unwrap();
        assert_eq!(outcome.retained, vec!["x", "y"]);
        assert!(outcome.removed.is_empty());
    }
}
