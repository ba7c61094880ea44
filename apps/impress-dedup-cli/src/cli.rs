//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use impress_dedup::ScorerKind;

#[derive(Debug, Parser)]
#[command(
    name = "imdedup",
    version,
    about = "Cluster, filter and partition near-duplicate text entries"
)]
pub struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Group near-identical entries around canonical seeds
    Cluster(ClusterArgs),
    /// Drop entries that closely match any entry of a reference list
    Filter(FilterArgs),
    /// Split entries by a pattern anchored at the start of each entry
    Partition(PartitionArgs),
    /// Interactive session reading commands from stdin
    Repl(ReplArgs),
}

/// Threshold and scorer overrides shared by the fuzzy subcommands.
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Similarity threshold (0-100); defaults to the configured value
    #[arg(short, long, value_parser = clap::value_parser!(i32).range(0..=100))]
    pub threshold: Option<i32>,

    /// Similarity metric (ratio, token-sort, token-set, levenshtein, jaro-winkler, blended)
    #[arg(short, long)]
    pub scorer: Option<ScorerKind>,
}

#[derive(Debug, Args)]
pub struct ClusterArgs {
    /// Input list, one entry per line
    pub input: PathBuf,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Separator between cluster members; defaults to the configured value
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Write clusters here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit one representative per cluster instead of the full groups
    #[arg(long, conflicts_with = "json")]
    pub representatives: bool,

    /// Print clusters as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Primary list to prune
    pub input: PathBuf,

    /// Reference list to match against
    #[arg(short, long)]
    pub reference: PathBuf,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Write retained entries here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the removed entries to this file
    #[arg(long)]
    pub removed: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PartitionArgs {
    /// Input list, one entry per line
    pub input: PathBuf,

    /// Regular expression, anchored at the start of each entry
    #[arg(short, long)]
    pub pattern: String,

    /// Write matching entries here
    #[arg(long)]
    pub matched: Option<PathBuf>,

    /// Write non-matching entries here
    #[arg(long)]
    pub remaining: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReplArgs {
    /// List to load before reading commands
    pub input: Option<PathBuf>,
}
