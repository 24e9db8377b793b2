use super::{
    FeatureScorer, ScoringInput,
    patterns::{
        ANSWER_HEADER_KEYWORDS, CLASS_HEADER_KEYWORDS, FORM_METADATA_KEYWORDS,
        NAME_HEADER_KEYWORDS,
    },
};
use crate::model::Role;

/// Positional clues: where the column sits and what sits to its left.
///
/// Survey exports usually run timestamp, e-mail, class, name, then the free
/// text columns, with the reason following the answer it explains.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualClueScorer;

impl ContextualClueScorer {
    pub fn score_position(
        &self,
        index: usize,
        position: f64,
        preceding_header: Option<&str>,
        role: Role,
    ) -> f64 {
        let preceding_has = |keywords| follows(preceding_header, keywords);

        let mut score = 0.0;
        match role {
            Role::PersonName => {
                if index <= 1 || position <= 0.2 {
                    score += 40.0;
                } else if position <= 0.6 {
                    score += 20.0;
                }
                if preceding_has(CLASS_HEADER_KEYWORDS) {
                    score += 20.0;
                }
            }
            Role::ClassLabel => {
                if index <= 2 || position <= 0.3 {
                    score += 40.0;
                } else if position <= 0.5 {
                    score += 20.0;
                }
                if preceding_has(FORM_METADATA_KEYWORDS) {
                    score += 20.0;
                }
            }
            Role::Answer => {
                if (0.4..=0.9).contains(&position) {
                    score += 35.0;
                } else if position > 0.9 {
                    score += 20.0;
                }
                if preceding_has(NAME_HEADER_KEYWORDS) || preceding_has(CLASS_HEADER_KEYWORDS) {
                    score += 15.0;
                }
            }
            Role::Reason => {
                if position >= 0.6 {
                    score += 40.0;
                } else if position >= 0.4 {
                    score += 20.0;
                }
                if preceding_has(ANSWER_HEADER_KEYWORDS) {
                    score += 30.0;
                }
            }
        }
        f64::min(score, 100.0)
    }
}

fn follows(preceding_header: Option<&str>, keywords: &[&str]) -> bool {
    preceding_header.is_some_and(|header| keywords.iter().any(|keyword| header.contains(keyword)))
}

impl FeatureScorer for ContextualClueScorer {
    fn name(&self) -> &'static str {
        "context"
    }

    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64 {
        let preceding = input.preceding_header();
        self.score_position(
            input.column.index,
            input.relative_position(),
            preceding.as_deref(),
            role,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_layout_positions() {
        let scorer = ContextualClueScorer;
        // six columns: timestamp, mail, class, name, answer, reason
        assert_eq!(scorer.score_position(2, 0.4, Some("メール"), Role::ClassLabel), 60.0);
        assert_eq!(scorer.score_position(3, 0.6, Some("クラス"), Role::PersonName), 40.0);
        assert_eq!(scorer.score_position(4, 0.8, Some("名前"), Role::Answer), 50.0);
        assert_eq!(scorer.score_position(5, 1.0, Some("回答"), Role::Reason), 70.0);
    }

    #[test]
    fn leading_columns_favour_names_and_classes() {
        let scorer = ContextualClueScorer;
        assert_eq!(scorer.score_position(0, 0.0, None, Role::PersonName), 40.0);
        assert_eq!(scorer.score_position(0, 0.0, None, Role::ClassLabel), 40.0);
        assert_eq!(scorer.score_position(0, 0.0, None, Role::Answer), 0.0);
        assert_eq!(scorer.score_position(0, 0.0, None, Role::Reason), 0.0);
    }

    #[test]
    fn reason_after_answer_gets_neighbour_bonus() {
        let scorer = ContextualClueScorer;
        assert_eq!(scorer.score_position(1, 0.5, Some("answer"), Role::Reason), 50.0);
        assert_eq!(scorer.score_position(1, 0.5, Some("memo"), Role::Reason), 20.0);
    }
}
