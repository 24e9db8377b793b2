//! Combination of the per-scorer streams into one ensemble score.
//!
//! Two formulas exist. [`WeightedSum`] is the default: five weighted terms
//! (header, content, linguistic, context, semantic) whose weights depend on
//! how strong the header signal is.
//! [`StreamAverage`] blends only the header, content and advanced streams,
//! weighting each stream by its share of the strongest one. Both finish with
//! the same calibration multipliers.

use crate::{
    config::EnsembleKind,
    features::FeatureVector,
    model::{Role, ScoreCard, clamp_score},
};

/// Weights of the five terms of [`WeightedSum`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleWeights {
    pub header: f64,
    pub content: f64,
    pub linguistic: f64,
    pub context: f64,
    pub semantic: f64,
}

impl EnsembleWeights {
    /// Weight tier keyed by the header score itself.
    pub fn for_header_score(header: f64) -> Self {
        if header >= 90.0 {
            Self {
                header: 0.5,
                content: 0.2,
                linguistic: 0.15,
                context: 0.1,
                semantic: 0.05,
            }
        } else if header >= 70.0 {
            Self {
                header: 0.4,
                content: 0.25,
                linguistic: 0.2,
                context: 0.1,
                semantic: 0.05,
            }
        } else {
            Self {
                header: 0.3,
                content: 0.3,
                linguistic: 0.25,
                context: 0.1,
                semantic: 0.05,
            }
        }
    }
}

pub trait EnsembleStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Uncalibrated combination of the card's component scores.
    fn combine(&self, card: &ScoreCard) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum;

impl EnsembleStrategy for WeightedSum {
    fn name(&self) -> &'static str {
        "weighted-sum"
    }

    fn combine(&self, card: &ScoreCard) -> f64 {
        // the advanced classifier only feeds `StreamAverage`
        let weights = EnsembleWeights::for_header_score(card.header);
        weights.header * card.header
            + weights.content * card.content
            + weights.linguistic * card.linguistic
            + weights.context * card.context
            + weights.semantic * card.semantic
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StreamAverage;

impl EnsembleStrategy for StreamAverage {
    fn name(&self) -> &'static str {
        "stream-average"
    }

    fn combine(&self, card: &ScoreCard) -> f64 {
        let streams = [card.header, card.content, card.advanced];
        let strongest = streams.iter().copied().fold(0.0, f64::max);
        if strongest <= 0.0 {
            return 0.0;
        }
        let (weighted, total_weight) =
            streams
                .iter()
                .fold((0.0, 0.0), |(weighted, total_weight), score| {
                    let weight = 1.0 + score / strongest;
                    (weighted + weight * score, total_weight + weight)
                });
        weighted / total_weight
    }
}

pub fn strategy_for(kind: EnsembleKind) -> Box<dyn EnsembleStrategy> {
    match kind {
        EnsembleKind::WeightedSum => Box::new(WeightedSum),
        EnsembleKind::StreamAverage => Box::new(StreamAverage),
    }
}

/// Fixed per-role multipliers for columns whose profile is unambiguous.
pub fn calibration_multiplier(role: Role, features: &FeatureVector) -> f64 {
    match role {
        Role::PersonName if features.name_pattern_score > 0.8 => 1.10,
        Role::ClassLabel if features.class_pattern_score > 0.7 => 1.08,
        Role::Answer if features.char_entropy > 4.0 => 1.05,
        _ => 1.0,
    }
}

/// Combines, calibrates and clamps one card's ensemble score.
pub fn ensemble_score(
    strategy: &dyn EnsembleStrategy,
    card: &ScoreCard,
    role: Role,
    features: &FeatureVector,
) -> f64 {
    let combined = clamp_score(strategy.combine(card));
    clamp_score(combined * calibration_multiplier(role, features))
}
