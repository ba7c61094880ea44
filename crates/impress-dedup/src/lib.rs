//! impress-dedup: fuzzy clustering and cross-list filtering of text entries.
//!
//! Entries are plain strings (names, labels, free-text tokens). Two entries
//! are "the same" when a [`SimilarityScorer`] rates them at or above a
//! threshold. The crate provides:
//! - [`cluster`]: group a list by canonical seed
//! - [`blanket_filter`]: drop entries that match a reference list
//! - [`partition`]: split a list by an anchored pattern
//! - cleaning filters, line I/O, configuration and an interactive [`Session`]
//!
//! # Example
//! ```
//! use impress_dedup::{cluster, ScorerKind};
//!
//! let clusters = cluster(&["Apple", "Apples", "Carrot"], 80, &ScorerKind::Ratio).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters[0].entries, vec!["Apple", "Apples"]);
//! ```

pub mod cleaning;
pub mod cluster;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod partition;
pub mod seed;
pub mod session;
pub mod similarity;

pub use cluster::{cluster, representatives, Cluster, ClusterBuilder};
pub use command::{parse_command, Command};
pub use config::{ConfigError, DedupConfig, OutputConfig, StageConfig};
pub use error::{DedupError, Result};
pub use filter::{blanket_filter, FilterOutcome, RemovedEntry};
pub use partition::{partition, Partition, Pattern};
pub use seed::{SeedAssigner, SeedId};
pub use session::{Outcome, ResultSet, Session};
pub use similarity::{ScorerKind, SimilarityScorer};
