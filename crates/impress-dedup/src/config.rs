//! Configuration for impress-dedup
//!
//! Default thresholds and scorers for the clustering and filtering stages,
//! plus output formatting. Loaded from TOML or JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::io::DEFAULT_DELIMITER;
use crate::similarity::{ScorerKind, MAX_SCORE};

/// Top-level configuration
///
/// Any field left out of a file keeps its default, including a stage's
/// threshold when only its scorer is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct DedupConfig {
    /// Settings for self-clustering
    pub cluster: StageConfig,
    /// Settings for the blanket filter
    pub filter: StageConfig,
    /// Output formatting
    pub output: OutputConfig,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            cluster: StageConfig {
                threshold: 80,
                scorer: ScorerKind::Ratio,
            },
            filter: StageConfig {
                threshold: 70,
                scorer: ScorerKind::Ratio,
            },
            output: OutputConfig::default(),
        }
    }
}

/// Threshold and scorer for one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Similarity threshold (0-100)
    pub threshold: i32,
    /// Similarity metric
    #[serde(default)]
    pub scorer: ScorerKind,
}

/// File shape of [`DedupConfig`]; absent stage fields are filled from
/// [`DedupConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    cluster: RawStage,
    filter: RawStage,
    output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStage {
    threshold: Option<i32>,
    scorer: Option<ScorerKind>,
}

impl RawStage {
    fn over(self, defaults: StageConfig) -> StageConfig {
        StageConfig {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            scorer: self.scorer.unwrap_or(defaults.scorer),
        }
    }
}

impl From<RawConfig> for DedupConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = DedupConfig::default();
        Self {
            cluster: raw.cluster.over(defaults.cluster),
            filter: raw.filter.over(defaults.filter),
            output: raw.output,
        }
    }
}

/// Output formatting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Separator between cluster members on one line
    pub delimiter: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl DedupConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load and validate a configuration file; `.json` is parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_toml(&content)?,
        };
        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from the user config directory, falling back to defaults when
    /// no file exists there.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/impress/dedup.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impress").join("dedup.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, stage) in [("cluster", &self.cluster), ("filter", &self.filter)] {
            if stage.threshold < 0 || stage.threshold > i32::from(MAX_SCORE) {
                return Err(ConfigError::OutOfRange(format!(
                    "{}.threshold must be between 0 and {}, got {}",
                    name, MAX_SCORE, stage.threshold
                )));
            }
        }

        if self.output.delimiter.is_empty() {
            return Err(ConfigError::OutOfRange(
                "output.delimiter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Content could not be parsed or serialized
    #[error("Parse error: {0}")]
    Parse(String),
    /// File could not be read
    #[error("Read error: {0}")]
    Read(String),
}
