//! Grouping a list into clusters of near-identical entries
//!
//! Seeds are discovered by resolving the distinct entries in natural string
//! order. The input is then stably sorted by seed and split into runs, so
//! clusters come out in seed order while each cluster keeps the original
//! relative order of its entries.
//!
//! Matching is greedy against the first qualifying seed and is not
//! transitive: with A≈B and B≈C but A≉C, C is only grouped with A when it
//! clears the threshold against A itself.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::seed::{SeedAssigner, SeedId};
use crate::similarity::SimilarityScorer;

/// A non-empty group of entries sharing one seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Canonical representative, always a member of `entries`
    pub seed: String,
    /// Members in their original relative order
    pub entries: Vec<String>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.entries.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Serialize the members as one record.
    pub fn join(&self, delimiter: &str) -> String {
        self.entries.join(delimiter)
    }
}

/// Builds clusters for a fixed scorer and threshold.
pub struct ClusterBuilder<'s, S: SimilarityScorer + ?Sized> {
    scorer: &'s S,
    threshold: i32,
}

impl<'s, S: SimilarityScorer + ?Sized> ClusterBuilder<'s, S> {
    pub fn new(scorer: &'s S, threshold: i32) -> Self {
        Self { scorer, threshold }
    }

    /// Partition `entries` into clusters.
    ///
    /// Every input entry lands in exactly one cluster; duplicates are kept.
    pub fn build<T: AsRef<str>>(&self, entries: &[T]) -> Result<Vec<Cluster>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut assigner = SeedAssigner::new(self.scorer, self.threshold);

        let mut discovery: Vec<&str> = entries.iter().map(AsRef::as_ref).collect();
        discovery.sort_unstable();
        discovery.dedup();
        for entry in &discovery {
            assigner.resolve_id(entry)?;
        }

        // Seeds were registered in ascending string order, so ordering by
        // id is ordering by seed text.
        let mut keyed: Vec<(SeedId, &str)> = entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref();
                assigner.resolve_id(entry).map(|id| (id, entry))
            })
            .collect::<Result<_>>()?;
        keyed.sort_by_key(|&(id, _)| id);

        let mut clusters: Vec<Cluster> = Vec::new();
        let mut current: Option<SeedId> = None;
        for (id, entry) in keyed {
            if current != Some(id) {
                let seed = assigner.seed(id).unwrap_or(entry).to_string();
                clusters.push(Cluster {
                    seed,
                    entries: Vec::new(),
                });
                current = Some(id);
            }
            if let Some(cluster) = clusters.last_mut() {
                cluster.entries.push(entry.to_string());
            }
        }

        debug!(
            entries = entries.len(),
            clusters = clusters.len(),
            threshold = assigner.threshold(),
            comparisons = assigner.comparisons(),
            "clustered entries"
        );

        Ok(clusters)
    }
}

/// Cluster `entries` with a fresh seed registry.
pub fn cluster<T, S>(entries: &[T], threshold: i32, scorer: &S) -> Result<Vec<Cluster>>
where
    T: AsRef<str>,
    S: SimilarityScorer + ?Sized,
{
    ClusterBuilder::new(scorer, threshold).build(entries)
}

/// Seed of each cluster, in cluster order.
pub fn representatives(clusters: &[Cluster]) -> Vec<String> {
    clusters.iter().map(|c| c.seed.clone()).collect()
}
