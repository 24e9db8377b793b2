use std::collections::HashSet;

use super::{FeatureScorer, ScoringInput, patterns::keywords_present};
use crate::model::Role;

const KEYWORD_POINTS: f64 = 3.0;
const KEYWORD_CAP: f64 = 15.0;

const CAUSAL_MARKERS: &[&str] = &["から", "ので", "because"];

fn role_keywords(role: Role) -> &'static [&'static str] {
    match role {
        Role::Answer => &["?", "？", "です", "ます", "はい", "いいえ", "yes", "no"],
        Role::Reason => &["から", "ので", "ため", "because", "since", "理由", "なぜ"],
        Role::ClassLabel => &["組", "年", "class", "クラス", "grade"],
        Role::PersonName => &["さん", "くん", "ちゃん", "様", "mr", "ms"],
    }
}

/// `min(15, 3 × keywords found)` over the lower-cased sample text.
pub fn keyword_density_score(lowered_text: &str, role: Role) -> f64 {
    let found = keywords_present(role_keywords(role), lowered_text);
    (found as f64 * KEYWORD_POINTS).min(KEYWORD_CAP)
}

/// Combines value uniqueness, length uniformity and a few content probes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticCharacteristicsScorer;

impl FeatureScorer for SemanticCharacteristicsScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64 {
        if !input.has_samples() {
            return 0.0;
        }
        let samples = input.samples();
        let distinct = samples.iter().collect::<HashSet<_>>().len();
        let uniqueness = distinct as f64 / samples.len() as f64;
        let avg = input.lengths.mean;
        let std_dev = input.lengths.std_dev();
        let has_digit = samples
            .iter()
            .any(|sample| sample.chars().any(|c| c.is_ascii_digit()));

        let mut score = 0.0;
        match role {
            Role::Answer => {
                score += uniqueness_tier(uniqueness);
                if std_dev > 5.0 {
                    score += 20.0;
                }
                if avg >= 10.0 {
                    score += 20.0;
                }
                if samples.iter().any(|s| s.contains(['?', '？'])) {
                    score += 10.0;
                }
            }
            Role::Reason => {
                score += uniqueness_tier(uniqueness);
                if avg >= 15.0 {
                    score += 25.0;
                }
                if std_dev > 5.0 {
                    score += 15.0;
                }
                if CAUSAL_MARKERS
                    .iter()
                    .any(|marker| input.lowered_text.contains(marker))
                {
                    score += 10.0;
                }
            }
            Role::ClassLabel => {
                if uniqueness <= 0.5 {
                    score += 35.0;
                } else if uniqueness <= 0.8 {
                    score += 20.0;
                }
                if std_dev <= 1.0 {
                    score += 30.0;
                } else if std_dev <= 3.0 {
                    score += 15.0;
                }
                if has_digit {
                    score += 20.0;
                }
            }
            Role::PersonName => {
                if uniqueness >= 0.9 {
                    score += 35.0;
                } else if uniqueness >= 0.7 {
                    score += 20.0;
                }
                if std_dev <= 2.0 {
                    score += 25.0;
                } else if std_dev <= 4.0 {
                    score += 10.0;
                }
                if !has_digit {
                    score += 15.0;
                }
            }
        }

        (score + keyword_density_score(&input.lowered_text, role)).min(100.0)
    }
}

fn uniqueness_tier(uniqueness: f64) -> f64 {
    if uniqueness >= 0.8 {
        30.0
    } else if uniqueness >= 0.5 {
        15.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn score(samples: &[&str], role: Role) -> f64 {
        let column = Column {
            index: 0,
            header: "h".to_string(),
            samples: samples.iter().map(|s| s.to_string()).collect(),
        };
        let headers = vec!["h".to_string()];
        SemanticCharacteristicsScorer.score(&ScoringInput::new(&column, &headers), role)
    }

    #[test]
    fn empty_column_scores_zero() {
        for role in Role::ALL {
            assert_eq!(score(&[], role), 0.0);
        }
    }

    #[test]
    fn repeated_short_codes_look_like_classes() {
        // uniqueness 0.6 (+20), uniform length (+30), digits (+20)
        assert_eq!(score(&["1A", "2B", "1A", "3C", "2B"], Role::ClassLabel), 70.0);
        // same data is a poor name column: no uniqueness bonus, no "no digits" bonus
        assert_eq!(score(&["1A", "2B", "1A", "3C", "2B"], Role::PersonName), 25.0);
    }

    #[test]
    fn distinct_names_look_like_names() {
        let names = ["田中太郎", "山田花子", "佐藤健", "鈴木一郎", "高橋美咲"];
        assert_eq!(score(&names, Role::PersonName), 75.0);
    }

    #[test]
    fn reasons_collect_keyword_density() {
        let reasons = [
            "実験が楽しかったから",
            "先生の説明がわかりやすかったので",
            "前から気になっていたため",
            "友達と話し合えたから",
            "新しい発見があったので",
        ];
        // uniqueness (+30), causal marker (+10), three keywords (+9)
        assert_eq!(score(&reasons, Role::Reason), 49.0);
    }

    #[test]
    fn keyword_density_is_capped() {
        let text = "? ？ です ます はい いいえ yes no";
        assert_eq!(keyword_density_score(text, Role::Answer), 15.0);
        assert_eq!(keyword_density_score("", Role::Answer), 0.0);
    }
}
