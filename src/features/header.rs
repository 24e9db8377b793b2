use regex::Regex;

use super::{
    FeatureScorer, ScoringInput,
    patterns::{WeightedPattern, compile},
};
use crate::model::Role;

const PRIMARY_SCORE: f64 = 98.0;
const STRONG_SCORE: f64 = 85.0;
const MEDIUM_SCORE: f64 = 60.0;
const WEAK_SCORE: f64 = 35.0;
const ULTRA_CLEAR_BONUS: f64 = 2.0;

struct TierTable {
    primary: &'static str,
    strong: &'static str,
    medium: &'static str,
    weak: &'static str,
    ultra_clear: &'static [&'static str],
}

const fn tier_table(role: Role) -> TierTable {
    match role {
        Role::Answer => TierTable {
            primary: r"^(answer|answers|response|回答|答え|解答|こたえ)$",
            strong: r"(回答|答え|解答|answer|response)",
            medium: r"(意見|感想|コメント|opinion|comment|feedback)",
            weak: r"(内容|記述|text|content|メッセージ|message)",
            ultra_clear: &["回答", "answer"],
        },
        Role::Reason => TierTable {
            primary: r"^(reason|reasons|理由|根拠|わけ)$",
            strong: r"(理由|根拠|reason|why|なぜ)",
            medium: r"(説明|explanation|because|詳細)",
            weak: r"(補足|note|備考|detail)",
            ultra_clear: &["理由", "reason"],
        },
        Role::ClassLabel => TierTable {
            primary: r"^(class|クラス|組|学級|group|グループ)$",
            strong: r"(クラス|学級|class|組)",
            medium: r"(group|グループ|班|team|チーム|section)",
            weak: r"(学年|grade|category|カテゴリ|番号)",
            ultra_clear: &["クラス", "class"],
        },
        Role::PersonName => TierTable {
            primary: r"^(name|名前|氏名|なまえ|お名前|full name|student name)$",
            strong: r"(名前|氏名|なまえ|name|student)",
            medium: r"(生徒|学生|児童|person|author|投稿者)",
            weak: r"(ニックネーム|nickname|user|ユーザー)",
            ultra_clear: &["名前", "氏名", "name"],
        },
    }
}

/// Reaction-style headers ("like!", "はい") that look like a role keyword
/// but hold something else. Only the first matching entry applies.
const NEGATIVE_PATTERNS: &[(&str, f64)] = &[
    (r"^(yes|no|y|n|はい|いいえ)$", 40.0),
    (r"^(いいね|like|good|nice|wow|すごい|なるほど)$", 35.0),
    (r"[!！]$", 30.0),
    (r"(いいね|like)$", 20.0),
];

#[derive(Debug, Clone)]
struct CompiledTiers {
    tiers: [(Regex, f64); 4],
    ultra_clear: &'static [&'static str],
}

/// Scores a column by its normalized header alone.
#[derive(Debug, Clone)]
pub struct HeaderPatternScorer {
    roles: [CompiledTiers; 4],
    negatives: Vec<WeightedPattern>,
}

impl Default for HeaderPatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderPatternScorer {
    pub fn new() -> Self {
        let roles = Role::ALL.map(|role| {
            let table = tier_table(role);
            CompiledTiers {
                tiers: [
                    (compile(table.primary), PRIMARY_SCORE),
                    (compile(table.strong), STRONG_SCORE),
                    (compile(table.medium), MEDIUM_SCORE),
                    (compile(table.weak), WEAK_SCORE),
                ],
                ultra_clear: table.ultra_clear,
            }
        });
        let negatives = NEGATIVE_PATTERNS
            .iter()
            .map(|(pattern, penalty)| WeightedPattern::new(pattern, *penalty))
            .collect();
        Self { roles, negatives }
    }

    /// Scores an already normalized (trimmed, lower-cased) header.
    pub fn score_header(&self, header: &str, role: Role) -> f64 {
        if header.is_empty() {
            return 0.0;
        }
        let compiled = &self.roles[role.slot()];
        let Some((tier, base)) = compiled
            .tiers
            .iter()
            .enumerate()
            .find(|(_, (regex, _))| regex.is_match(header))
            .map(|(tier, (_, score))| (tier, *score))
        else {
            return 0.0;
        };

        let mut score = base;
        if tier == 0
            && compiled
                .ultra_clear
                .iter()
                .any(|keyword| header.contains(keyword))
        {
            score = (score + ULTRA_CLEAR_BONUS).min(100.0);
        }

        if let Some(negative) = self
            .negatives
            .iter()
            .find(|negative| negative.regex.is_match(header))
        {
            score = (score - negative.points).max(0.0);
        }
        score
    }
}

impl FeatureScorer for HeaderPatternScorer {
    fn name(&self) -> &'static str {
        "header"
    }

    fn score(&self, input: &ScoringInput<'_>, role: Role) -> f64 {
        self.score_header(&input.normalized_header, role)
    }
}
