//! Interactive session state
//!
//! A [`Session`] owns the working list and the named result sets produced by
//! commands. Nothing is global: a session is created, used, and reset or
//! dropped explicitly.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cleaning;
use crate::cluster::{cluster, Cluster};
use crate::command::{Command, HELP};
use crate::config::DedupConfig;
use crate::error::{DedupError, Result};
use crate::filter::blanket_filter;
use crate::io::{read_lines, write_clusters, write_lines};
use crate::partition::partition;

/// Set name for the clusters stored by `cluster`.
pub const CLUSTERS_SET: &str = "clusters";
/// Set name for entries dropped by `blanket`.
pub const REMOVED_SET: &str = "removed";
/// Set name for entries matching the last `partition` pattern.
pub const MATCHED_SET: &str = "matched";
/// Set name for entries not matching the last `partition` pattern.
pub const REMAINING_SET: &str = "remaining";

/// A named result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSet {
    Entries(Vec<String>),
    Clusters(Vec<Cluster>),
}

impl ResultSet {
    /// Number of records (entries or clusters).
    pub fn len(&self) -> usize {
        match self {
            ResultSet::Entries(entries) => entries.len(),
            ResultSet::Clusters(clusters) => clusters.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One line per record, cluster members joined by `delimiter`.
    pub fn to_records(&self, delimiter: &str) -> Vec<String> {
        match self {
            ResultSet::Entries(entries) => entries.clone(),
            ResultSet::Clusters(clusters) => clusters.iter().map(|c| c.join(delimiter)).collect(),
        }
    }
}

/// What a command did, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded { path: PathBuf, entries: usize },
    Saved { path: PathBuf, records: usize },
    Listing(Vec<String>),
    Sets(Vec<(String, usize)>),
    Clustered { entries: usize, clusters: usize },
    Filtered { retained: usize, removed: usize },
    Partitioned { matched: usize, remaining: usize },
    Updated { before: usize, after: usize },
    Reset,
    Help,
    Quit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Loaded { path, entries } => {
                write!(f, "Loaded {} entries from {}", entries, path.display())
            }
            Outcome::Saved { path, records } => {
                write!(f, "Wrote {} records to {}", records, path.display())
            }
            Outcome::Listing(lines) => write!(f, "{}", lines.join("\n")),
            Outcome::Sets(sets) => {
                if sets.is_empty() {
                    return write!(f, "No result sets");
                }
                let lines: Vec<String> = sets
                    .iter()
                    .map(|(name, len)| format!("{}: {}", name, len))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Outcome::Clustered { entries, clusters } => {
                write!(f, "Grouped {} entries into {} clusters", entries, clusters)
            }
            Outcome::Filtered { retained, removed } => {
                write!(f, "Removed {} entries, {} retained", removed, retained)
            }
            Outcome::Partitioned { matched, remaining } => {
                write!(f, "{} matched, {} remaining", matched, remaining)
            }
            Outcome::Updated { before, after } => write!(f, "{} -> {} entries", before, after),
            Outcome::Reset => write!(f, "Session cleared"),
            Outcome::Help => write!(f, "{}", HELP),
            Outcome::Quit => write!(f, "Bye"),
        }
    }
}

/// Working list plus named result sets.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: DedupConfig,
    working: Vec<String>,
    sets: BTreeMap<String, ResultSet>,
}

impl Session {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            working: Vec::new(),
            sets: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Clear the working list and every named set.
    pub fn reset(&mut self) {
        self.working.clear();
        self.sets.clear();
    }

    pub fn working(&self) -> &[String] {
        &self.working
    }

    pub fn set_working(&mut self, entries: Vec<String>) {
        self.working = entries;
    }

    /// Replace the working list with the lines of `path`.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        self.working = read_lines(path)?;
        Ok(self.working.len())
    }

    pub fn get(&self, name: &str) -> Option<&ResultSet> {
        self.sets.get(name)
    }

    /// Named sets in name order.
    pub fn names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, set: ResultSet) {
        self.sets.insert(name.into(), set);
    }

    /// Write the working list, or the named set, to `path`.
    pub fn save(&self, set: Option<&str>, path: &Path) -> Result<usize> {
        match set {
            None => {
                write_lines(path, &self.working)?;
                Ok(self.working.len())
            }
            Some(name) => match self.require(name)? {
                ResultSet::Entries(entries) => {
                    write_lines(path, entries)?;
                    Ok(entries.len())
                }
                ResultSet::Clusters(clusters) => {
                    write_clusters(path, clusters, &self.config.output.delimiter)?;
                    Ok(clusters.len())
                }
            },
        }
    }

    fn require(&self, name: &str) -> Result<&ResultSet> {
        self.sets
            .get(name)
            .ok_or_else(|| DedupError::NotFound(format!("no result set named '{}'", name)))
    }

    /// Run one command against the session.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let outcome = match command {
            Command::Load(path) => {
                let entries = self.load(&path)?;
                Outcome::Loaded { path, entries }
            }
            Command::Save { path, set } => {
                let records = self.save(set.as_deref(), &path)?;
                Outcome::Saved { path, records }
            }
            Command::Show(None) => Outcome::Listing(self.working.clone()),
            Command::Show(Some(name)) => {
                let delimiter = &self.config.output.delimiter;
                Outcome::Listing(self.require(&name)?.to_records(delimiter))
            }
            Command::Sets => Outcome::Sets(
                self.sets
                    .iter()
                    .map(|(name, set)| (name.clone(), set.len()))
                    .collect(),
            ),
            Command::Cluster { threshold } => {
                let stage = &self.config.cluster;
                let threshold = threshold.unwrap_or(stage.threshold);
                let clusters: Vec<Cluster> = cluster(&self.working, threshold, &stage.scorer)?;
                let outcome = Outcome::Clustered {
                    entries: self.working.len(),
                    clusters: clusters.len(),
                };
                self.insert(CLUSTERS_SET, ResultSet::Clusters(clusters));
                outcome
            }
            Command::Blanket {
                reference,
                threshold,
            } => {
                let stage = &self.config.filter;
                let threshold = threshold.unwrap_or(stage.threshold);
                let reference = read_lines(&reference)?;
                let result = blanket_filter(&self.working, &reference, threshold, &stage.scorer)?;
                let outcome = Outcome::Filtered {
                    retained: result.retained.len(),
                    removed: result.removed_count(),
                };
                self.insert(REMOVED_SET, ResultSet::Entries(result.removed_entries()));
                self.working = result.retained;
                outcome
            }
            Command::Partition(pattern) => {
                let split = partition(&self.working, &pattern)?;
                let outcome = Outcome::Partitioned {
                    matched: split.matched.len(),
                    remaining: split.remaining.len(),
                };
                self.insert(MATCHED_SET, ResultSet::Entries(split.matched));
                self.insert(REMAINING_SET, ResultSet::Entries(split.remaining));
                outcome
            }
            Command::Unique => self.update(cleaning::unique),
            Command::Lower => self.update(cleaning::lowercase),
            Command::Upper => self.update(cleaning::uppercase),
            Command::Strip(chars) => self.update(|entries| cleaning::strip_chars(entries, &chars)),
            Command::Trim => self.update(cleaning::trim),
            Command::Length { min, max } => {
                self.update(|entries| cleaning::filter_length(entries, min, max))
            }
            Command::Fold => self.update(cleaning::fold_accents),
            Command::Reset => {
                self.reset();
                Outcome::Reset
            }
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        };

        info!(outcome = %outcome_summary(&outcome), "command executed");
        Ok(outcome)
    }

    fn update(&mut self, transform: impl FnOnce(&[String]) -> Vec<String>) -> Outcome {
        let before = self.working.len();
        self.working = transform(&self.working);
        Outcome::Updated {
            before,
            after: self.working.len(),
        }
    }
}

fn outcome_summary(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Listing(lines) => format!("listed {} lines", lines.len()),
        Outcome::Help => "help".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_command;

    fn session_with(entries: &[&str]) -> Session {
        let mut session = Session::default();
        session.set_working(entries.iter().map(|s| s.to_string()).collect());
        session
    }

    fn run(session: &mut Session, line: &str) -> Outcome {
        let command = parse_command(line).unwrap().unwrap();
        session.execute(command).unwrap()
    }

    #[test]
    fn test_cluster_stores_named_set() {
        let mut session = session_with(&["Apple", "Apples", "Carrot"]);
        let outcome = run(&mut session, "cluster 80");

        assert_eq!(
            outcome,
            Outcome::Clustered {
                entries: 3,
                clusters: 2
            }
        );
        assert_eq!(session.names(), vec![CLUSTERS_SET]);
        assert_eq!(session.working().len(), 3);
    }

    #[test]
    fn test_partition_keeps_working_list() {
        let mut session = session_with(&["file.txt", "image.jpg", "readme"]);
        run(&mut session, r"partition .*\.txt$");

        assert_eq!(
            session.get(MATCHED_SET),
            Some(&ResultSet::Entries(vec!["file.txt".to_string()]))
        );
        assert_eq!(session.get(REMAINING_SET).map(ResultSet::len), Some(2));
        assert_eq!(session.working().len(), 3);
    }

    #[test]
    fn test_cleaning_commands_replace_working() {
        let mut session = session_with(&["B", "b", " a ", ""]);
        run(&mut session, "lower");
        run(&mut session, "trim");
        let outcome = run(&mut session, "unique");
        assert_eq!(outcome, Outcome::Updated { before: 4, after: 3 });
        run(&mut session, "length 1");
        assert_eq!(session.working(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_show_unknown_set_fails() {
        let mut session = Session::default();
        let err = session.execute(Command::Show(Some("nope".into()))).unwrap_err();
        assert!(matches!(err, DedupError::NotFound(_)));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session_with(&["x", "y"]);
        run(&mut session, "cluster");
        assert_eq!(run(&mut session, "reset"), Outcome::Reset);
        assert!(session.working().is_empty());
        assert!(session.names().is_empty());
    }
}
