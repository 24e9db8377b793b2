//! Column-role classification entry point.
//!
//! [`ColumnClassifier`] wires the scorers, the ensemble strategy and the
//! assignment resolver together. It never fails: degenerate input produces
//! an empty [`ClassificationResult`].

use std::{collections::BTreeMap, sync::OnceLock};

use itertools::Itertools;
use log::{Level, debug, log_enabled};

use crate::{
    assignment::{AssignmentResolver, CostMatrix, cost_row},
    config::ClassifierConfig,
    ensemble::{EnsembleStrategy, ensemble_score, strategy_for},
    features::{
        AdvancedFeatureClassifier, ContentStatisticsScorer, ContextualClueScorer, FeatureScorer,
        FeatureVector, HeaderPatternScorer, LinguisticPatternScorer, ScoringInput,
        SemanticCharacteristicsScorer, vectorize,
    },
    model::{
        CellValue, ClassificationReport, ClassificationResult, Column, ColumnReport, Role,
        ScoreCard,
    },
};

pub struct ColumnClassifier {
    config: ClassifierConfig,
    header: HeaderPatternScorer,
    content: ContentStatisticsScorer,
    linguistic: LinguisticPatternScorer,
    context: ContextualClueScorer,
    semantic: SemanticCharacteristicsScorer,
    advanced: AdvancedFeatureClassifier,
    strategy: Box<dyn EnsembleStrategy>,
    resolver: AssignmentResolver,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl ColumnClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            header: HeaderPatternScorer::new(),
            content: ContentStatisticsScorer,
            linguistic: LinguisticPatternScorer::new(),
            context: ContextualClueScorer,
            semantic: SemanticCharacteristicsScorer,
            advanced: AdvancedFeatureClassifier,
            strategy: strategy_for(config.ensemble),
            resolver: AssignmentResolver::new(config.assignment.clone()),
            config,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify<H: AsRef<str>>(
        &self,
        headers: &[H],
        rows: &[Vec<CellValue>],
    ) -> ClassificationResult {
        self.explain(headers, rows).result
    }

    /// Classifies and keeps every intermediate score for inspection.
    pub fn explain<H: AsRef<str>>(
        &self,
        headers: &[H],
        rows: &[Vec<CellValue>],
    ) -> ClassificationReport {
        if headers.is_empty() || rows.is_empty() {
            debug!(
                "Nothing to classify ({} header(s), {} row(s))",
                headers.len(),
                rows.len()
            );
            return ClassificationReport::default();
        }
        let headers = headers
            .iter()
            .map(|header| header.as_ref().to_string())
            .collect::<Vec<_>>();
        let rows = &rows[..rows.len().min(self.config.max_sample_rows)];

        let columns = headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let column = Column::from_rows(index, header, rows, self.config.coerce_scalars);
                self.report_column(&column, &headers)
            })
            .collect::<Vec<_>>();

        let cost: CostMatrix = columns
            .iter()
            .map(|report| cost_row(|role| report.scores[&role].ensemble))
            .collect();
        let assignments = self.resolver.resolve(&cost);

        let mut confidence = BTreeMap::new();
        for role in Role::ALL {
            let best = columns
                .iter()
                .map(|report| report.scores[&role].ensemble)
                .fold(0.0, f64::max);
            confidence.insert(role, best);
        }
        let mut mapping = BTreeMap::new();
        for assignment in assignments {
            mapping.insert(assignment.role, assignment.column);
            confidence.insert(
                assignment.role,
                columns[assignment.column].scores[&assignment.role].ensemble,
            );
        }

        ClassificationReport {
            result: ClassificationResult {
                mapping,
                confidence,
            },
            columns,
        }
    }

    fn report_column(&self, column: &Column, headers: &[String]) -> ColumnReport {
        let features = vectorize(&column.samples);
        let scores = Role::ALL
            .into_iter()
            .map(|role| {
                let card = if column.is_scorable() {
                    self.score_card(column, headers, &features, role)
                } else {
                    ScoreCard::default()
                };
                (role, card)
            })
            .collect::<BTreeMap<_, _>>();
        ColumnReport {
            index: column.index,
            header: column.header.clone(),
            sample_count: column.samples.len(),
            features,
            scores,
        }
    }

    fn scorers(&self) -> [&dyn FeatureScorer; 5] {
        [
            &self.header,
            &self.content,
            &self.linguistic,
            &self.context,
            &self.semantic,
        ]
    }

    fn score_card(
        &self,
        column: &Column,
        headers: &[String],
        features: &FeatureVector,
        role: Role,
    ) -> ScoreCard {
        let input = ScoringInput::new(column, headers);
        let scorers = self.scorers();
        let [header, content, linguistic, context, semantic] =
            scorers.map(|scorer| scorer.score(&input, role));
        let mut card = ScoreCard {
            header,
            content,
            linguistic,
            context,
            semantic,
            advanced: self.advanced.score(features, role),
            ensemble: 0.0,
        }
        .clamped();
        card.ensemble = ensemble_score(self.strategy.as_ref(), &card, role, features);
        if log_enabled!(Level::Debug) {
            let components = [
                card.header,
                card.content,
                card.linguistic,
                card.context,
                card.semantic,
            ];
            let breakdown = scorers
                .iter()
                .zip(components)
                .map(|(scorer, score)| format!("{}={score:.1}", scorer.name()))
                .join(" ");
            debug!(
                "Column {} ({:?}) as {role}: {breakdown} advanced={:.1} -> {} {:.2}",
                column.index,
                column.header,
                card.advanced,
                self.strategy.name(),
                card.ensemble
            );
        }
        card
    }
}

/// Classifies with the default configuration.
pub fn classify_columns<H: AsRef<str>>(
    headers: &[H],
    rows: &[Vec<CellValue>],
) -> ClassificationResult {
    static DEFAULT: OnceLock<ColumnClassifier> = OnceLock::new();
    DEFAULT
        .get_or_init(ColumnClassifier::default)
        .classify(headers, rows)
}
