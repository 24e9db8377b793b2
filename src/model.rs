//! Core data model shared by the scorers, the ensemble and the resolver.
//!
//! A classification call turns caller-supplied headers and sample rows into
//! [`Column`] values, scores every (column, [`Role`]) pair into a
//! [`ScoreCard`], and reports the winning assignment as a
//! [`ClassificationResult`]. Nothing here outlives a single call.

use std::{collections::BTreeMap, fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Semantic role a column can play in a survey-style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Answer,
    Reason,
    #[serde(rename = "class")]
    ClassLabel,
    #[serde(rename = "name")]
    PersonName,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Answer, Role::Reason, Role::ClassLabel, Role::PersonName];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Answer => "answer",
            Role::Reason => "reason",
            Role::ClassLabel => "class",
            Role::PersonName => "name",
        }
    }

    /// Position of the role inside [`Role::ALL`] and cost-matrix rows.
    pub fn slot(self) -> usize {
        match self {
            Role::Answer => 0,
            Role::Reason => 1,
            Role::ClassLabel => 2,
            Role::PersonName => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "answer" => Ok(Role::Answer),
            "reason" => Ok(Role::Reason),
            "class" | "class_label" | "classlabel" => Ok(Role::ClassLabel),
            "name" | "person_name" | "personname" => Ok(Role::PersonName),
            other => Err(anyhow!("Unknown column role '{other}'")),
        }
    }
}

/// A raw cell as handed over by the caller.
///
/// Spreadsheet readers hand back numbers and booleans as well as text; only
/// text takes part in scoring unless scalar coercion is enabled.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// Returns the trimmed sample text this cell contributes, if any.
    pub fn sample_text(&self, coerce_scalars: bool) -> Option<String> {
        let rendered = match self {
            CellValue::Text(text) => text.trim().to_string(),
            CellValue::Number(number) if coerce_scalars && number.is_finite() => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{number:.0}")
                } else {
                    number.to_string()
                }
            }
            CellValue::Boolean(flag) if coerce_scalars => flag.to_string(),
            _ => return None,
        };
        if rendered.is_empty() {
            None
        } else {
            Some(rendered)
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// One input column with its non-empty sample values, in row order.
#[derive(Debug, Clone)]
pub struct Column {
    pub index: usize,
    pub header: String,
    pub samples: Vec<String>,
}

impl Column {
    pub fn from_rows(
        index: usize,
        header: &str,
        rows: &[Vec<CellValue>],
        coerce_scalars: bool,
    ) -> Self {
        let samples = rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter_map(|cell| cell.sample_text(coerce_scalars))
            .collect();
        Self {
            index,
            header: header.to_string(),
            samples,
        }
    }

    pub fn normalized_header(&self) -> String {
        normalize_header(&self.header)
    }

    /// Blank headers never compete for a role.
    pub fn is_scorable(&self) -> bool {
        !self.header.trim().is_empty()
    }
}

pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Every signal gathered for one (column, role) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    pub header: f64,
    pub content: f64,
    pub linguistic: f64,
    pub context: f64,
    pub semantic: f64,
    pub advanced: f64,
    pub ensemble: f64,
}

impl ScoreCard {
    /// Clamps every component into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            header: clamp_score(self.header),
            content: clamp_score(self.content),
            linguistic: clamp_score(self.linguistic),
            context: clamp_score(self.context),
            semantic: clamp_score(self.semantic),
            advanced: clamp_score(self.advanced),
            ensemble: clamp_score(self.ensemble),
        }
    }
}

/// Clamps to `[0, 100]`; NaN and negative zero collapse to `0.0`.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Final role assignment plus per-role confidence.
///
/// `mapping` only holds roles that cleared the acceptance threshold;
/// `confidence` may also report the best score seen for roles left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub mapping: BTreeMap<Role, usize>,
    pub confidence: BTreeMap<Role, f64>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty() && self.confidence.is_empty()
    }

    pub fn column_for(&self, role: Role) -> Option<usize> {
        self.mapping.get(&role).copied()
    }

    pub fn role_for(&self, column: usize) -> Option<Role> {
        self.mapping
            .iter()
            .find(|(_, assigned)| **assigned == column)
            .map(|(role, _)| *role)
    }
}

/// Per-column diagnostics exposed by `ColumnClassifier::explain`.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub index: usize,
    pub header: String,
    pub sample_count: usize,
    pub features: FeatureVector,
    pub scores: BTreeMap<Role, ScoreCard>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationReport {
    pub result: ClassificationResult,
    pub columns: Vec<ColumnReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_text_filters_non_text_by_default() {
        assert_eq!(CellValue::from("  1A ").sample_text(false).as_deref(), Some("1A"));
        assert_eq!(CellValue::from("   ").sample_text(false), None);
        assert_eq!(CellValue::from(3_i64).sample_text(false), None);
        assert_eq!(CellValue::from(true).sample_text(false), None);
        assert_eq!(CellValue::Empty.sample_text(true), None);
    }

    #[test]
    fn sample_text_coerces_scalars_when_enabled() {
        assert_eq!(CellValue::from(3_i64).sample_text(true).as_deref(), Some("3"));
        assert_eq!(CellValue::from(2.5).sample_text(true).as_deref(), Some("2.5"));
        assert_eq!(CellValue::from(false).sample_text(true).as_deref(), Some("false"));
        assert_eq!(CellValue::from(f64::NAN).sample_text(true), None);
    }

    #[test]
    fn column_skips_short_rows_and_blank_cells() {
        let rows = vec![
            vec![CellValue::from("a"), CellValue::from("x")],
            vec![CellValue::from("b")],
            vec![CellValue::from("c"), CellValue::from("")],
            vec![CellValue::from("d"), CellValue::from("y")],
        ];
        let column = Column::from_rows(1, " Name ", &rows, false);
        assert_eq!(column.samples, vec!["x", "y"]);
        assert_eq!(column.normalized_header(), "name");
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("timestamp".parse::<Role>().is_err());
    }

    #[test]
    fn clamp_score_handles_nan_and_bounds() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert!(clamp_score(-0.0).is_sign_positive());
        assert!(clamp_score(-1e-12).is_sign_positive());
    }
}
