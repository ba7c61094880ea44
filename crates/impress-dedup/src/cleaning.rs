//! Order-preserving list filters applied before clustering
//!
//! - Exact duplicate removal
//! - Case conversion
//! - Character stripping and trimming
//! - Length and emptiness filters
//! - Accent folding

use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Drop exact duplicates, keeping the first occurrence.
pub fn unique(entries: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(e.as_str()))
        .cloned()
        .collect()
}

pub fn lowercase(entries: &[String]) -> Vec<String> {
    entries.iter().map(|e| e.to_lowercase()).collect()
}

pub fn uppercase(entries: &[String]) -> Vec<String> {
    entries.iter().map(|e| e.to_uppercase()).collect()
}

/// Remove every occurrence of any character in `chars`.
pub fn strip_chars(entries: &[String], chars: &str) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.chars().filter(|c| !chars.contains(*c)).collect())
        .collect()
}

pub fn trim(entries: &[String]) -> Vec<String> {
    entries.iter().map(|e| e.trim().to_string()).collect()
}

pub fn drop_empty(entries: &[String]) -> Vec<String> {
    entries.iter().filter(|e| !e.is_empty()).cloned().collect()
}

/// Keep entries whose character count lies in `min..=max`.
///
/// No upper bound when `max` is `None`.
pub fn filter_length(entries: &[String], min: usize, max: Option<usize>) -> Vec<String> {
    entries
        .iter()
        .filter(|e| {
            let len = e.chars().count();
            len >= min && max.map_or(true, |max| len <= max)
        })
        .cloned()
        .collect()
}

/// Decompose (NFKD) and drop combining marks, so `Müller` becomes `Muller`.
pub fn fold_accents(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.nfkd().filter(|c| !is_combining_mark(*c)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unique_keeps_first_occurrence_order() {
        let result = unique(&list(&["b", "a", "b", "c", "a"]));
        assert_eq!(result, list(&["b", "a", "c"]));
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(lowercase(&list(&["ApPle"])), list(&["apple"]));
        assert_eq!(uppercase(&list(&["ApPle"])), list(&["APPLE"]));
    }

    #[test]
    fn test_strip_chars() {
        let result = strip_chars(&list(&["a-b.c", "--"]), "-.");
        assert_eq!(result, list(&["abc", ""]));
    }

    #[test]
    fn test_trim_and_drop_empty() {
        let trimmed = trim(&list(&["  x ", "   ", "y"]));
        assert_eq!(drop_empty(&trimmed), list(&["x", "y"]));
    }

    #[test]
    fn test_filter_length_counts_chars() {
        let entries = list(&["é", "ab", "abcd"]);
        assert_eq!(filter_length(&entries, 1, Some(2)), list(&["é", "ab"]));
        assert_eq!(filter_length(&entries, 3, None), list(&["abcd"]));
    }

    #[test]
    fn test_fold_accents() {
        let result = fold_accents(&list(&["Müller", "Théorie", "plain"]));
        assert_eq!(result, list(&["Muller", "Theorie", "plain"]));
    }
}
