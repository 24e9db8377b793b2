//! Per-column feature extraction.
//!
//! Five independent scorers rate a column against a [`Role`] on a 0–100
//! scale:
//!
//! - [`HeaderPatternScorer`]: tiered header regexes with negative penalties
//! - [`ContentStatisticsScorer`]: sample length mean/variance ladders
//! - [`LinguisticPatternScorer`]: keyword/regex hits in the sample text
//! - [`ContextualClueScorer`]: column position and the preceding header
//! - [`SemanticCharacteristicsScorer`]: uniqueness, uniformity, keyword density
//!
//! A sixth stream reduces the samples to a [`FeatureVector`] which the
//! [`AdvancedFeatureClassifier`] turns into per-role scores.
//!
//! All scorers are pure. Tables are compiled once when a scorer is built and
//! never mutated afterwards.

mod advanced;
mod content;
mod context;
mod header;
mod linguistic;
mod patterns;
mod semantic;
mod vector;

pub use advanced::AdvancedFeatureClassifier;
pub use content::ContentStatisticsScorer;
pub use context::ContextualClueScorer;
pub use header::HeaderPatternScorer;
pub use linguistic::LinguisticPatternScorer;
pub use semantic::SemanticCharacteristicsScorer;
pub use vector::{FEATURE_NAMES, FeatureVector, vectorize};

use crate::model::{Column, Role, normalize_header};

/// A single 0–100 signal for a (column, role) pair.
pub trait FeatureScorer {
    fn name(&self) -> &'static str;
    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64;
}

/// Column data shared by every scorer, computed once per column.
#[derive(Debug, Clone)]
pub struct ScoringInput<'a> {
    pub column: &'a Column,
    pub headers: &'a [String],
    pub normalized_header: String,
    /// Lower-cased samples joined with a single space.
    pub lowered_text: String,
    pub lengths: LengthStats,
}

impl<'a> ScoringInput<'a> {
    pub fn new(column: &'a Column, headers: &'a [String]) -> Self {
        let lowered_text = column
            .samples
            .iter()
            .map(|sample| sample.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            column,
            headers,
            normalized_header: normalize_header(&column.header),
            lowered_text,
            lengths: LengthStats::from_samples(&column.samples),
        }
    }

    pub fn samples(&self) -> &[String] {
        &self.column.samples
    }

    pub fn has_samples(&self) -> bool {
        !self.column.samples.is_empty()
    }

    /// Normalized header of the column immediately to the left, if any.
    pub fn preceding_header(&self) -> Option<String> {
        let index = self.column.index.checked_sub(1)?;
        self.headers.get(index).map(|header| normalize_header(header))
    }

    /// `index / (columns - 1)`, or 0 for a single-column sheet.
    pub fn relative_position(&self) -> f64 {
        let total = self.headers.len();
        if total <= 1 {
            0.0
        } else {
            self.column.index as f64 / (total - 1) as f64
        }
    }
}

/// Length moments of the samples, measured in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LengthStats {
    pub count: usize,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
}

impl LengthStats {
    pub fn from_samples(samples: &[String]) -> Self {
        let lengths = samples
            .iter()
            .map(|sample| sample.chars().count() as f64)
            .collect::<Vec<_>>();
        Self::from_lengths(&lengths)
    }

    pub fn from_lengths(lengths: &[f64]) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }
        let count = lengths.len();
        let mean = lengths.iter().sum::<f64>() / count as f64;
        let variance = lengths
            .iter()
            .map(|length| (length - mean).powi(2))
            .sum::<f64>()
            / count as f64;
        Self {
            count,
            mean,
            variance,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.max(0.0).sqrt()
    }
}
