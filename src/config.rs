//! Classifier configuration.
//!
//! Every threshold the resolver and ensemble consult lives in
//! [`ClassifierConfig`]. The defaults reproduce the reference behaviour; a
//! YAML file may override any subset of fields:
//!
//! ```yaml
//! ensemble: stream-average
//! coerce_scalars: true
//! assignment:
//!   greedy_threshold: 70
//! ```

use std::{fs, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_SAMPLE_ROWS: usize = 10;
const MAX_LOCAL_SEARCH_ITERATIONS: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read classifier config {path:?}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse classifier config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{field} must be between 0 and 100 (got {value})")]
    ThresholdOutOfRange { field: &'static str, value: f64 },
    #[error("swap_margin must be a non-negative number (got {0})")]
    NegativeMargin(f64),
    #[error("max_iterations must not exceed 1000 (got {0})")]
    TooManyIterations(usize),
    #[error("max_sample_rows must be at least 1")]
    NoSampleRows,
}

/// Which combination formula turns a score card into one ensemble score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum EnsembleKind {
    #[default]
    WeightedSum,
    StreamAverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Minimum confidence for the greedy pass to claim a pair.
    pub greedy_threshold: f64,
    /// Assignments below this after local search are evicted.
    pub acceptance_threshold: f64,
    /// A swap must lower total cost by more than this.
    pub swap_margin: f64,
    pub max_iterations: usize,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            greedy_threshold: 75.0,
            acceptance_threshold: 60.0,
            swap_margin: 5.0,
            max_iterations: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub ensemble: EnsembleKind,
    /// Render numeric and boolean cells as text instead of dropping them.
    pub coerce_scalars: bool,
    /// Rows beyond this many are ignored by the classifier.
    pub max_sample_rows: usize,
    pub assignment: AssignmentConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ensemble: EnsembleKind::default(),
            coerce_scalars: false,
            max_sample_rows: DEFAULT_MAX_SAMPLE_ROWS,
            assignment: AssignmentConfig::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ClassifierConfig = if raw.trim().is_empty() {
            ClassifierConfig::default()
        } else {
            serde_yaml::from_str(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let assignment = &self.assignment;
        for (field, value) in [
            ("greedy_threshold", assignment.greedy_threshold),
            ("acceptance_threshold", assignment.acceptance_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { field, value });
            }
        }
        if assignment.swap_margin.is_nan() || assignment.swap_margin < 0.0 {
            return Err(ConfigError::NegativeMargin(assignment.swap_margin));
        }
        if assignment.max_iterations > MAX_LOCAL_SEARCH_ITERATIONS {
            return Err(ConfigError::TooManyIterations(assignment.max_iterations));
        }
        if self.max_sample_rows == 0 {
            return Err(ConfigError::NoSampleRows);
        }
        Ok(())
    }
}
