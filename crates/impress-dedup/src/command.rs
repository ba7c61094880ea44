//! Session command parsing.
//!
//! Parses one line of the interactive loop into a [`Command`].

use std::path::PathBuf;

use crate::error::{DedupError, Result};
use crate::similarity::MAX_SCORE;

/// A session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the working list with a file's lines
    Load(PathBuf),
    /// Write the working list, or a named set, to a file
    Save { path: PathBuf, set: Option<String> },
    /// Print the working list, or a named set
    Show(Option<String>),
    /// List named result sets
    Sets,
    /// Cluster the working list
    Cluster { threshold: Option<i32> },
    /// Blanket-filter the working list against a reference file
    Blanket {
        reference: PathBuf,
        threshold: Option<i32>,
    },
    /// Split the working list by an anchored pattern
    Partition(String),
    Unique,
    Lower,
    Upper,
    /// Remove the given characters from every entry
    Strip(String),
    Trim,
    /// Keep entries with a character count in range
    Length { min: usize, max: Option<usize> },
    Fold,
    Reset,
    Help,
    Quit,
}

/// Usage text for the interactive loop.
pub const HELP: &str = "\
load <file>                  replace the working list with a file's lines
save <file> [set]            write the working list (or a named set)
show [set]                   print the working list (or a named set)
sets                         list named result sets
cluster [threshold]          group near-identical entries (stores 'clusters')
blanket <file> [threshold]   drop entries matching a reference list (stores 'removed')
partition <pattern>          split by anchored regex (stores 'matched', 'remaining')
unique | lower | upper | trim | fold
strip <chars>                remove characters from every entry
length <min> [max]           keep entries by character count
reset                        clear the working list and all sets
help | quit";

/// Parse a command line.
///
/// Blank lines and `#` comments yield `None`. The keyword is case
/// insensitive; `partition` and `strip` take the rest of the line verbatim.
///
/// # Examples
/// ```
/// use impress_dedup::{parse_command, Command};
/// assert_eq!(
///     parse_command("cluster 85").unwrap(),
///     Some(Command::Cluster { threshold: Some(85) })
/// );
/// assert_eq!(parse_command("   ").unwrap(), None);
/// assert!(parse_command("cluster high").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match keyword.to_lowercase().as_str() {
        "load" => Command::Load(required_path(&args, 0, "load <file>")?),
        "save" => {
            expect_at_most(&args, 2, "save <file> [set]")?;
            Command::Save {
                path: required_path(&args, 0, "save <file> [set]")?,
                set: args.get(1).map(|s| s.to_string()),
            }
        }
        "show" => {
            expect_at_most(&args, 1, "show [set]")?;
            Command::Show(args.first().map(|s| s.to_string()))
        }
        "sets" => no_args(&args, Command::Sets)?,
        "cluster" => {
            expect_at_most(&args, 1, "cluster [threshold]")?;
            Command::Cluster {
                threshold: optional_threshold(&args, 0)?,
            }
        }
        "blanket" => {
            expect_at_most(&args, 2, "blanket <file> [threshold]")?;
            Command::Blanket {
                reference: required_path(&args, 0, "blanket <file> [threshold]")?,
                threshold: optional_threshold(&args, 1)?,
            }
        }
        "partition" => {
            if rest.is_empty() {
                return Err(usage("partition <pattern>"));
            }
            Command::Partition(rest.to_string())
        }
        "unique" => no_args(&args, Command::Unique)?,
        "lower" => no_args(&args, Command::Lower)?,
        "upper" => no_args(&args, Command::Upper)?,
        "strip" => {
            if rest.is_empty() {
                return Err(usage("strip <chars>"));
            }
            Command::Strip(rest.to_string())
        }
        "trim" => no_args(&args, Command::Trim)?,
        "length" => {
            expect_at_most(&args, 2, "length <min> [max]")?;
            let min = args
                .first()
                .ok_or_else(|| usage("length <min> [max]"))
                .and_then(|s| parse_number::<usize>(s, "min length"))?;
            let max = args
                .get(1)
                .map(|s| parse_number::<usize>(s, "max length"))
                .transpose()?;
            Command::Length { min, max }
        }
        "fold" => no_args(&args, Command::Fold)?,
        "reset" => no_args(&args, Command::Reset)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(DedupError::InvalidArgument(format!(
                "unknown command '{}' (try 'help')",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn usage(form: &str) -> DedupError {
    DedupError::InvalidArgument(format!("usage: {}", form))
}

fn no_args(args: &[&str], command: Command) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(DedupError::InvalidArgument(format!(
            "{:?} takes no arguments",
            command
        )))
    }
}

fn expect_at_most(args: &[&str], max: usize, form: &str) -> Result<()> {
    if args.len() > max {
        return Err(usage(form));
    }
    Ok(())
}

fn required_path(args: &[&str], index: usize, form: &str) -> Result<PathBuf> {
    args.get(index)
        .map(PathBuf::from)
        .ok_or_else(|| usage(form))
}

/// Thresholds typed at the prompt must lie in `0..=MAX_SCORE`.
fn optional_threshold(args: &[&str], index: usize) -> Result<Option<i32>> {
    let Some(value) = args.get(index) else {
        return Ok(None);
    };
    let threshold = parse_number::<i32>(value, "threshold")?;
    if !(0..=i32::from(MAX_SCORE)).contains(&threshold) {
        return Err(DedupError::InvalidArgument(format!(
            "threshold must be between 0 and {}, got {}",
            MAX_SCORE, threshold
        )));
    }
    Ok(Some(threshold))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        DedupError::InvalidArgument(format!("{} must be an integer, got '{}'", what, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_load_and_save() {
        assert_eq!(
            parse_command("load names.txt").unwrap(),
            Some(Command::Load(PathBuf::from("names.txt")))
        );
        assert_eq!(
            parse_command("SAVE out.txt clusters").unwrap(),
            Some(Command::Save {
                path: PathBuf::from("out.txt"),
                set: Some("clusters".to_string()),
            })
        );
        assert!(parse_command("load").is_err());
    }

    #[test]
    fn parse_thresholds() {
        assert_eq!(
            parse_command("cluster").unwrap(),
            Some(Command::Cluster { threshold: None })
        );
        assert_eq!(
            parse_command("blanket ref.txt 70").unwrap(),
            Some(Command::Blanket {
                reference: PathBuf::from("ref.txt"),
                threshold: Some(70),
            })
        );
        assert!(parse_command("blanket ref.txt seventy").is_err());
    }

    #[test]
    fn parse_rejects_out_of_range_thresholds() {
        for line in ["cluster 150", "cluster -1", "blanket ref.txt -20", "blanket ref.txt 101"] {
            assert!(
                matches!(parse_command(line), Err(DedupError::InvalidArgument(_))),
                "{:?} should be rejected",
                line
            );
        }
        assert_eq!(
            parse_command("cluster 0").unwrap(),
            Some(Command::Cluster { threshold: Some(0) })
        );
        assert_eq!(
            parse_command("cluster 100").unwrap(),
            Some(Command::Cluster {
                threshold: Some(100)
            })
        );
    }

    #[test]
    fn parse_partition_keeps_spaces() {
        assert_eq!(
            parse_command("partition ^New York.*").unwrap(),
            Some(Command::Partition("^New York.*".to_string()))
        );
        assert!(parse_command("partition").is_err());
    }

    #[test]
    fn parse_length_bounds() {
        assert_eq!(
            parse_command("length 2 10").unwrap(),
            Some(Command::Length {
                min: 2,
                max: Some(10)
            })
        );
        assert_eq!(
            parse_command("length 3").unwrap(),
            Some(Command::Length { min: 3, max: None })
        );
        assert!(parse_command("length").is_err());
        assert!(parse_command("length -1").is_err());
    }

    #[test]
    fn parse_rejects_unknown_and_extra_args() {
        assert!(parse_command("explode").is_err());
        assert!(parse_command("unique now").is_err());
        assert_eq!(parse_command("# comment").unwrap(), None);
    }
}
