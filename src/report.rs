//! Rendering of classification output for the command line.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    cli::OutputFormat,
    features::{FEATURE_NAMES, FeatureVector},
    model::{ClassificationReport, Role},
    table::render_table,
};

/// Structured rendering; `None` when the caller asked for a table.
fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    let rendered = match format {
        OutputFormat::Table => return Ok(None),
        OutputFormat::Json => {
            let mut rendered =
                serde_json::to_string_pretty(value).context("Serializing report as JSON")?;
            rendered.push('\n');
            rendered
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Serializing report as YAML")?
        }
    };
    Ok(Some(rendered))
}

fn score(value: f64) -> String {
    format!("{value:.2}")
}

/// Role mapping with one line per role, assigned or not.
pub fn render_result(report: &ClassificationReport, format: OutputFormat) -> Result<String> {
    if let Some(rendered) = serialize(&report.result, format)? {
        return Ok(rendered);
    }
    let headers = ["role", "column", "header", "confidence"].map(String::from);
    let rows = Role::ALL
        .iter()
        .map(|role| {
            let column = report.result.column_for(*role);
            let header = column
                .and_then(|index| report.columns.get(index))
                .map(|column| column.header.clone());
            vec![
                role.to_string(),
                column.map_or_else(|| "-".to_string(), |index| index.to_string()),
                header.unwrap_or_else(|| "-".to_string()),
                report
                    .result
                    .confidence
                    .get(role)
                    .map_or_else(|| "-".to_string(), |value| score(*value)),
            ]
        })
        .collect::<Vec<_>>();
    Ok(render_table(&headers, &rows))
}

/// Every (column, role) score card; `*` marks the accepted assignment.
pub fn render_scores(report: &ClassificationReport, format: OutputFormat) -> Result<String> {
    if let Some(rendered) = serialize(report, format)? {
        return Ok(rendered);
    }
    let headers = [
        "column",
        "header",
        "role",
        "header_score",
        "content",
        "linguistic",
        "context",
        "semantic",
        "advanced",
        "ensemble",
        "assigned",
    ]
    .map(String::from);
    let mut rows = Vec::new();
    for column in &report.columns {
        for (role, card) in &column.scores {
            let assigned = report.result.column_for(*role) == Some(column.index);
            rows.push(vec![
                column.index.to_string(),
                column.header.clone(),
                role.to_string(),
                score(card.header),
                score(card.content),
                score(card.linguistic),
                score(card.context),
                score(card.semantic),
                score(card.advanced),
                score(card.ensemble),
                if assigned { "*" } else { "" }.to_string(),
            ]);
        }
    }
    Ok(render_table(&headers, &rows))
}

#[derive(Serialize)]
struct ColumnFeatures<'a> {
    index: usize,
    header: &'a str,
    sample_count: usize,
    features: &'a FeatureVector,
}

pub fn render_features(report: &ClassificationReport, format: OutputFormat) -> Result<String> {
    let columns = report
        .columns
        .iter()
        .map(|column| ColumnFeatures {
            index: column.index,
            header: &column.header,
            sample_count: column.sample_count,
            features: &column.features,
        })
        .collect::<Vec<_>>();
    if let Some(rendered) = serialize(&columns, format)? {
        return Ok(rendered);
    }
    let headers = ["column", "header", "samples"]
        .into_iter()
        .chain(FEATURE_NAMES)
        .map(String::from)
        .collect::<Vec<_>>();
    let rows = report
        .columns
        .iter()
        .map(|column| {
            [
                column.index.to_string(),
                column.header.clone(),
                column.sample_count.to_string(),
            ]
            .into_iter()
            .chain(column.features.as_array().map(|value| format!("{value:.3}")))
            .collect::<Vec<String>>()
        })
        .collect::<Vec<_>>();
    Ok(render_table(&headers, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classifier::ColumnClassifier, model::CellValue};

    fn report() -> ClassificationReport {
        let headers = ["クラス", "名前"];
        let rows = [["1A", "田中太郎"], ["2B", "山田花子"], ["1A", "佐藤健"]]
            .iter()
            .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        ColumnClassifier::default().explain(&headers, &rows)
    }

    #[test]
    fn result_table_lists_every_role() {
        let rendered = render_result(&report(), OutputFormat::Table).expect("render");
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2 + Role::ALL.len());
        assert!(lines[0].starts_with("role"));
        assert!(lines.iter().any(|line| line.starts_with("answer")));
    }

    #[test]
    fn result_json_uses_role_names_as_keys() {
        let rendered = render_result(&report(), OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert!(value["confidence"]["class"].is_number());
        assert!(value["confidence"]["name"].is_number());
        assert!(value["mapping"].is_object());
    }

    #[test]
    fn scores_table_has_one_row_per_column_and_role() {
        let rendered = render_scores(&report(), OutputFormat::Table).expect("render");
        assert_eq!(rendered.lines().count(), 2 + 2 * Role::ALL.len());
    }

    #[test]
    fn features_yaml_lists_columns() {
        let rendered = render_features(&report(), OutputFormat::Yaml).expect("render");
        assert!(rendered.contains("class_pattern_score"));
        assert!(rendered.contains("クラス"));
    }
}
