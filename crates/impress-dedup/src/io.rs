//! Reading and writing line-oriented lists.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::cluster::Cluster;
use crate::error::{DedupError, Result};

/// Default separator between cluster members in written output.
pub const DEFAULT_DELIMITER: &str = ",";

/// Read one entry per line with trailing whitespace removed.
///
/// Blank lines are kept as empty entries.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| DedupError::io(path, e))?;
    let entries: Vec<String> = content
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();
    debug!(path = %path.display(), entries = entries.len(), "read list");
    Ok(entries)
}

/// Write one entry per line.
pub fn write_lines<T: AsRef<str>>(path: impl AsRef<Path>, entries: &[T]) -> Result<()> {
    let records = entries.iter().map(|e| e.as_ref().to_string());
    write_records(path.as_ref(), records)
}

/// Write one cluster per line, members joined by `delimiter`.
pub fn write_clusters(
    path: impl AsRef<Path>,
    clusters: &[Cluster],
    delimiter: &str,
) -> Result<()> {
    let records = clusters.iter().map(|c| c.join(delimiter));
    write_records(path.as_ref(), records)
}

fn write_records(path: &Path, records: impl Iterator<Item = String>) -> Result<()> {
    let file = File::create(path).map_err(|e| DedupError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;
    for record in records {
        writeln!(writer, "{}", record).map_err(|e| DedupError::io(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| DedupError::io(path, e))?;
    debug!(path = %path.display(), records = count, "wrote list");
    Ok(())
}
