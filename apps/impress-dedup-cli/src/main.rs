//! imdedup - near-duplicate cleanup for text lists
//!
//! One-shot subcommands for clustering, blanket filtering and partitioning,
//! plus an interactive session.

mod cli;
mod repl;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use impress_dedup::io::{read_lines, write_clusters, write_lines};
use impress_dedup::{
    blanket_filter, cluster, partition, representatives, DedupConfig, Session, StageConfig,
};

use cli::{Cli, ClusterArgs, Commands, FilterArgs, MatchArgs, PartitionArgs, ReplArgs};

fn main() -> CliResult {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for list output
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => DedupConfig::load(path)?,
        None => DedupConfig::load_default().unwrap_or_else(|e| {
            warn!("Failed to load default config: {}, using defaults", e);
            DedupConfig::default()
        }),
    };

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Cluster(args) => run_cluster(&config, args, &mut stdout),
        Commands::Filter(args) => run_filter(&config, args, &mut stdout),
        Commands::Partition(args) => run_partition(args, &mut stdout),
        Commands::Repl(args) => run_repl(config, args),
    }
}

/// Apply command-line overrides to a configured stage.
fn stage(configured: &StageConfig, overrides: &MatchArgs) -> StageConfig {
    StageConfig {
        threshold: overrides.threshold.unwrap_or(configured.threshold),
        scorer: overrides.scorer.unwrap_or(configured.scorer),
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn run_cluster<W: Write>(config: &DedupConfig, args: ClusterArgs, out: &mut W) -> CliResult {
    let stage = stage(&config.cluster, &args.matching);
    let delimiter = args
        .delimiter
        .unwrap_or_else(|| config.output.delimiter.clone());

    let entries = read_lines(&args.input)?;
    let clusters = cluster(&entries, stage.threshold, &stage.scorer)?;

    if args.json {
        let json = serde_json::to_string_pretty(&clusters)?;
        return emit(args.output.as_deref(), &[json], out);
    }
    if args.representatives {
        return emit(args.output.as_deref(), &representatives(&clusters), out);
    }
    match &args.output {
        Some(path) => write_clusters(path, &clusters, &delimiter)?,
        None => {
            for c in &clusters {
                writeln!(out, "{}", c.join(&delimiter))?;
            }
        }
    }
    Ok(())
}

fn run_filter<W: Write>(config: &DedupConfig, args: FilterArgs, out: &mut W) -> CliResult {
    let stage = stage(&config.filter, &args.matching);

    let primary = read_lines(&args.input)?;
    let reference = read_lines(&args.reference)?;
    let outcome = blanket_filter(&primary, &reference, stage.threshold, &stage.scorer)?;

    eprintln!(
        "Removed {} of {} entries (threshold {}, scorer {})",
        outcome.removed_count(),
        primary.len(),
        stage.threshold,
        stage.scorer
    );
    if let Some(path) = &args.removed {
        write_lines(path, &outcome.removed_entries())?;
    }
    emit(args.output.as_deref(), &outcome.retained, out)
}

fn run_partition<W: Write>(args: PartitionArgs, out: &mut W) -> CliResult {
    let entries = read_lines(&args.input)?;
    let split = partition(&entries, &args.pattern)?;

    if let Some(path) = &args.remaining {
        write_lines(path, &split.remaining)?;
    }
    emit(args.matched.as_deref(), &split.matched, out)
}

fn run_repl(config: DedupConfig, args: ReplArgs) -> CliResult {
    let mut session = Session::new(config);
    if let Some(path) = &args.input {
        session.load(path)?;
    }
    repl::run_stdio(&mut session)?;
    Ok(())
}

/// Write records to a file, or to `out` when no path is given.
fn emit<W: Write>(path: Option<&Path>, records: &[String], out: &mut W) -> CliResult {
    match path {
        Some(path) => write_lines(path, records)?,
        None => {
            for record in records {
                writeln!(out, "{}", record)?;
            }
        }
    }
    Ok(())
}
