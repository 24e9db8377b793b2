use super::FeatureVector;
use crate::model::Role;

/// Hand-tuned threshold rules over a [`FeatureVector`].
///
/// Each role owns one rule block; the first rule in the block that holds
/// decides the score, otherwise the role scores 0. The thresholds are
/// empirical and kept as-is so results stay comparable across releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedFeatureClassifier;

impl AdvancedFeatureClassifier {
    pub fn score(&self, features: &FeatureVector, role: Role) -> f64 {
        let avg = features.avg_length;
        match role {
            Role::PersonName => {
                let kanji_hiragana = features.kanji_ratio + features.hiragana_ratio;
                if features.name_pattern_score > 0.6
                    && (2.0..=8.0).contains(&avg)
                    && kanji_hiragana > 0.7
                {
                    95.0
                } else if features.name_pattern_score > 0.5 && avg <= 15.0 {
                    88.0
                } else {
                    0.0
                }
            }
            Role::ClassLabel => {
                if features.class_pattern_score > 0.7 && avg <= 4.0 {
                    95.0
                } else if features.class_pattern_score > 0.5 && avg <= 8.0 {
                    88.0
                } else {
                    0.0
                }
            }
            Role::Answer => {
                if features.question_density > 0.01 && avg > 10.0 && features.char_entropy > 3.0
                {
                    92.0
                } else if avg > 10.0
                    && features.japanese_ratio() > 0.5
                    && features.name_pattern_score < 0.3
                    && features.class_pattern_score < 0.3
                {
                    85.0
                } else {
                    0.0
                }
            }
            Role::Reason => {
                if features.reasoning_density > 0.005 && avg > 10.0 {
                    92.0
                } else if avg > 20.0
                    && features.bigram_entropy > 1.0
                    && features.class_pattern_score < 0.3
                {
                    85.0
                } else {
                    0.0
                }
            }
        }
    }
}
