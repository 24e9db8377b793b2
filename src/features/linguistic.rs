use super::{
    FeatureScorer, ScoringInput,
    patterns::{WeightedPattern, additive_score},
};
use crate::model::Role;

fn role_patterns(role: Role) -> &'static [(&'static str, f64)] {
    match role {
        Role::Answer => &[
            (r"[?？]", 30.0),
            (r"(です|ます|でした|ました)", 20.0),
            (r"(好き|嫌い|賛成|反対|agree|disagree)", 25.0),
            (r"[ぁ-んァ-ヶ一-龯a-z]{3,}", 15.0),
        ],
        Role::Reason => &[
            (r"(から|ので|ため|because|since|なぜなら|だって)", 35.0),
            (r"(と思う|と思います|i think|i believe|考え)", 25.0),
            (r"(つまり|例えば|for example|具体的|実際)", 20.0),
            (r"(です|ます|だ。|。)", 10.0),
        ],
        Role::ClassLabel => &[
            (r"\d+\s*(年|組|class)", 40.0),
            (r"\b\d[a-h]\b", 40.0),
            (r"(組|クラス|class|grade)", 20.0),
        ],
        Role::PersonName => &[
            (r"(さん|くん|君|ちゃん|様|先生|mr\.?|ms\.?|mrs\.?)", 35.0),
            (r"[田山川木藤佐村中本野井]", 30.0),
            (r"\b[a-z]{2,}\s[a-z]{2,}\b", 15.0),
        ],
    }
}

/// Looks for role-specific wording in the lower-cased sample text.
#[derive(Debug, Clone)]
pub struct LinguisticPatternScorer {
    roles: [Vec<WeightedPattern>; 4],
}

impl Default for LinguisticPatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinguisticPatternScorer {
    pub fn new() -> Self {
        let roles = Role::ALL.map(|role| {
            role_patterns(role)
                .iter()
                .map(|(pattern, points)| WeightedPattern::new(pattern, *points))
                .collect()
        });
        Self { roles }
    }

    /// Scores lower-cased, space-joined sample text.
    pub fn score_text(&self, lowered_text: &str, role: Role) -> f64 {
        if lowered_text.is_empty() {
            return 0.0;
        }
        additive_score(&self.roles[role.slot()], lowered_text).min(100.0)
    }
}

impl FeatureScorer for LinguisticPatternScorer {
    fn name(&self) -> &'static str {
        "linguistic"
    }

    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64 {
        self.score_text(&input.lowered_text, role)
    }
}
