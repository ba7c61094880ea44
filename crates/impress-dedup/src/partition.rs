//! Splitting a list by an anchored pattern.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Entries split by whether they match a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub matched: Vec<String>,
    pub remaining: Vec<String>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.matched.len() + self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.remaining.is_empty()
    }
}

/// A regular expression that must match at the start of an entry.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, entry: &str) -> bool {
        self.regex.is_match(entry)
    }

    /// Split `entries`, preserving order on both sides.
    pub fn partition<T: AsRef<str>>(&self, entries: &[T]) -> Partition {
        let (matched, remaining): (Vec<String>, Vec<String>) = entries
            .iter()
            .map(|e| e.as_ref().to_string())
            .partition(|e| self.is_match(e));
        debug!(
            pattern = self.as_str(),
            matched = matched.len(),
            remaining = remaining.len(),
            "partitioned entries"
        );
        Partition { matched, remaining }
    }
}

/// Compile `pattern` and split `entries` by it.
pub fn partition<T: AsRef<str>>(entries: &[T], pattern: &str) -> Result<Partition> {
    Ok(Pattern::new(pattern)?.partition(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DedupError;

    #[test]
    fn test_partition_by_extension() {
        let result = partition(&["file.txt", "image.jpg", "readme"], r"^.*\.txt$").unwrap();
        assert_eq!(result.matched, vec!["file.txt"]);
        assert_eq!(result.remaining, vec!["image.jpg", "readme"]);
    }

    #[test]
    fn test_pattern_is_anchored_at_start() {
        let pattern = Pattern::new("txt").unwrap();
        assert_eq!(pattern.as_str(), "txt");
        assert!(pattern.is_match("txt.log"));
        assert!(!pattern.is_match("file.txt"));
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let pattern = Pattern::new("a|b").unwrap();
        assert!(pattern.is_match("bee"));
        assert!(!pattern.is_match("cab"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(partition(&["x"], "("), Err(DedupError::Pattern(_))));
    }
}
