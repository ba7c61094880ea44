//! Similarity scoring for clustering and filtering
//!
//! Every decision the engine makes goes through [`SimilarityScorer`], an
//! integer score in `0..=100`. The built-in metrics are exposed through
//! [`ScorerKind`] so that configuration and the command line can pick one
//! by name; any `Fn(&str, &str) -> u8` closure works as well.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::error::{DedupError, Result};

/// Highest score a scorer may return.
pub const MAX_SCORE: u8 = 100;

/// Pure, symmetric string similarity in `0..=100`.
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> Result<u8>;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> u8,
{
    fn score(&self, a: &str, b: &str) -> Result<u8> {
        Ok(self(a, b))
    }
}

/// Score `a` against `b`, rejecting results outside the contract.
pub(crate) fn checked_score<S>(scorer: &S, a: &str, b: &str) -> Result<u8>
where
    S: SimilarityScorer + ?Sized,
{
    let score = scorer.score(a, b)?;
    if score > MAX_SCORE {
        return Err(DedupError::Scorer(format!(
            "score {} for {:?} / {:?} exceeds {}",
            score, a, b, MAX_SCORE
        )));
    }
    Ok(score)
}

/// Built-in similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    /// Indel ratio over characters
    #[default]
    Ratio,
    /// Ratio over lower-cased, sorted tokens
    TokenSort,
    /// Ratio over token set intersection and differences
    TokenSet,
    /// Normalized Levenshtein distance
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
    /// Weighted Jaro-Winkler and Levenshtein
    Blended,
}

impl ScorerKind {
    pub const ALL: [ScorerKind; 6] = [
        ScorerKind::Ratio,
        ScorerKind::TokenSort,
        ScorerKind::TokenSet,
        ScorerKind::Levenshtein,
        ScorerKind::JaroWinkler,
        ScorerKind::Blended,
    ];

    /// Name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ScorerKind::Ratio => "ratio",
            ScorerKind::TokenSort => "token-sort",
            ScorerKind::TokenSet => "token-set",
            ScorerKind::Levenshtein => "levenshtein",
            ScorerKind::JaroWinkler => "jaro-winkler",
            ScorerKind::Blended => "blended",
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScorerKind {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        ScorerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                DedupError::InvalidArgument(format!(
                    "unknown scorer '{}' (expected one of: {})",
                    s,
                    ScorerKind::ALL.map(|k| k.name()).join(", ")
                ))
            })
    }
}

impl SimilarityScorer for ScorerKind {
    fn score(&self, a: &str, b: &str) -> Result<u8> {
        Ok(match self {
            ScorerKind::Ratio => ratio(a, b),
            ScorerKind::TokenSort => token_sort_ratio(a, b),
            ScorerKind::TokenSet => token_set_ratio(a, b),
            ScorerKind::Levenshtein => to_score(normalized_levenshtein(a, b)),
            ScorerKind::JaroWinkler => to_score(jaro_winkler(a, b)),
            ScorerKind::Blended => blended(a, b),
        })
    }
}

/// Indel ratio: `2 * LCS / (|a| + |b|)` scaled to 0–100.
///
/// Two empty strings are identical and score 100.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return MAX_SCORE;
    }
    let common = lcs_len(&a, &b);
    to_score((2 * common) as f64 / total as f64)
}

/// Ratio of the two strings after lower-casing and sorting their tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best ratio between the shared tokens and each side's remainder.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let set_a = token_set(a);
    let set_b = token_set(b);

    let shared = join_tokens(set_a.intersection(&set_b));
    let only_a = join_tokens(set_a.difference(&set_b));
    let only_b = join_tokens(set_b.difference(&set_a));

    let with_a = concat_tokens(&shared, &only_a);
    let with_b = concat_tokens(&shared, &only_b);

    ratio(&shared, &with_a)
        .max(ratio(&shared, &with_b))
        .max(ratio(&with_a, &with_b))
}

fn blended(a: &str, b: &str) -> u8 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);
    to_score(jw * 0.6 + lev * 0.4)
}

fn to_score(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * f64::from(MAX_SCORE)).round() as u8
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn sorted_tokens(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_set(s: &str) -> BTreeSet<String> {
    s.split_whitespace().map(str::to_lowercase).collect()
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn concat_tokens(head: &str, tail: &str) -> String {
    format!("{} {}", head, tail).trim().to_string()
}
