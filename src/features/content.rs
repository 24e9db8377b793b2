use super::{FeatureScorer, LengthStats, ScoringInput};
use crate::model::Role;

/// Rates how well the sample length profile fits a role.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentStatisticsScorer;

impl ContentStatisticsScorer {
    pub fn score_lengths(&self, stats: &LengthStats, role: Role) -> f64 {
        if stats.count == 0 {
            return 0.0;
        }
        let avg = stats.mean;
        let variance = stats.variance;
        match role {
            Role::Answer => {
                if avg <= 20.0 && variance <= 100.0 {
                    75.0
                } else if avg <= 50.0 && variance <= 500.0 {
                    60.0
                } else if avg <= 100.0 {
                    40.0
                } else {
                    20.0
                }
            }
            Role::Reason => {
                if (10.0..=200.0).contains(&avg) && variance <= 2000.0 {
                    70.0
                } else if avg >= 5.0 {
                    50.0
                } else {
                    20.0
                }
            }
            Role::ClassLabel => {
                if avg <= 4.0 && variance <= 2.0 {
                    90.0
                } else if avg <= 8.0 && variance <= 10.0 {
                    70.0
                } else if avg <= 15.0 {
                    35.0
                } else {
                    5.0
                }
            }
            Role::PersonName => {
                if (2.0..=10.0).contains(&avg) && variance <= 9.0 {
                    80.0
                } else if avg <= 20.0 && variance <= 25.0 {
                    55.0
                } else if avg <= 30.0 {
                    25.0
                } else {
                    5.0
                }
            }
        }
    }
}

impl FeatureScorer for ContentStatisticsScorer {
    fn name(&self) -> &'static str {
        "content"
    }

    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64 {
        self.score_lengths(&input.lengths, role)
    }
}
