//! Fixed 15-dimensional numeric profile of a column's samples.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::{
    LengthStats,
    patterns::{Script, compile, script_of},
};

pub const FEATURE_NAMES: [&str; 15] = [
    "avg_length",
    "length_std",
    "length_skewness",
    "length_kurtosis",
    "hiragana_ratio",
    "katakana_ratio",
    "kanji_ratio",
    "alphanumeric_ratio",
    "char_entropy",
    "bigram_entropy",
    "mutual_information",
    "question_density",
    "reasoning_density",
    "name_pattern_score",
    "class_pattern_score",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeatureVector {
    pub avg_length: f64,
    pub length_std: f64,
    pub length_skewness: f64,
    pub length_kurtosis: f64,
    pub hiragana_ratio: f64,
    pub katakana_ratio: f64,
    pub kanji_ratio: f64,
    pub alphanumeric_ratio: f64,
    pub char_entropy: f64,
    pub bigram_entropy: f64,
    /// Heuristic per-sample `log2(distinct / (|len - mean| + 1))`, averaged.
    pub mutual_information: f64,
    pub question_density: f64,
    pub reasoning_density: f64,
    pub name_pattern_score: f64,
    pub class_pattern_score: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; 15] {
        [
            self.avg_length,
            self.length_std,
            self.length_skewness,
            self.length_kurtosis,
            self.hiragana_ratio,
            self.katakana_ratio,
            self.kanji_ratio,
            self.alphanumeric_ratio,
            self.char_entropy,
            self.bigram_entropy,
            self.mutual_information,
            self.question_density,
            self.reasoning_density,
            self.name_pattern_score,
            self.class_pattern_score,
        ]
    }

    pub fn japanese_ratio(&self) -> f64 {
        self.hiragana_ratio + self.katakana_ratio + self.kanji_ratio
    }
}

struct VectorPatterns {
    question: Regex,
    reasoning: Regex,
    name: Vec<(Regex, f64)>,
    class: Vec<(Regex, f64)>,
}

fn vector_patterns() -> &'static VectorPatterns {
    static PATTERNS: OnceLock<VectorPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| VectorPatterns {
        question: compile(r"[?？]"),
        reasoning: compile(r"(から|ので|ため|なぜなら|because|since|therefore)"),
        name: vec![
            (compile(r"^[\p{Hiragana}\p{Katakana}\p{Han}]{2,4}$"), 1.0),
            (
                compile(r"^[\p{Hiragana}\p{Katakana}\p{Han}]{1,4}[ \x{3000}][\p{Hiragana}\p{Katakana}\p{Han}]{1,4}$"),
                0.9,
            ),
            (compile(r"^[A-Z][a-z]+ [A-Z][a-z]+$"), 0.8),
        ],
        class: vec![
            (compile(r"^(\d{1,2}[A-Za-zＡ-Ｚ]|\d{1,2}組)$"), 1.0),
            (compile(r"^\d+年[A-Za-zＡ-Ｚ\d]+組?$"), 1.0),
            (compile(r"^\d{1,2}$"), 0.7),
            (compile(r"^[A-Za-z]{1,2}$"), 0.6),
        ],
    })
}

/// Reduces samples to a [`FeatureVector`]. Blank samples are ignored and an
/// empty sample set yields the all-zero vector.
pub fn vectorize(samples: &[String]) -> FeatureVector {
    let samples = samples
        .iter()
        .map(|sample| sample.trim())
        .filter(|sample| !sample.is_empty())
        .collect::<Vec<_>>();
    if samples.is_empty() {
        return FeatureVector::default();
    }
    let patterns = vector_patterns();

    let lengths = samples
        .iter()
        .map(|sample| sample.chars().count() as f64)
        .collect::<Vec<_>>();
    let stats = LengthStats::from_lengths(&lengths);
    let (skewness, kurtosis) = standardized_moments(&lengths, &stats);

    let mut total_chars = 0usize;
    let mut script_counts = [0usize; 4];
    let mut char_counts: HashMap<char, usize> = HashMap::new();
    for sample in &samples {
        for ch in sample.chars() {
            total_chars += 1;
            *char_counts.entry(ch).or_insert(0) += 1;
            match script_of(ch) {
                Script::Hiragana => script_counts[0] += 1,
                Script::Katakana => script_counts[1] += 1,
                Script::Ideograph => script_counts[2] += 1,
                Script::Alphanumeric => script_counts[3] += 1,
                Script::Other => {}
            }
        }
    }
    let ratio = |count: usize| ratio_of(count as f64, total_chars as f64);

    let question_matches = samples
        .iter()
        .map(|sample| patterns.question.find_iter(sample).count())
        .sum::<usize>();
    let reasoning_matches = samples
        .iter()
        .map(|sample| patterns.reasoning.find_iter(&sample.to_lowercase()).count())
        .sum::<usize>();

    FeatureVector {
        avg_length: stats.mean,
        length_std: stats.std_dev(),
        length_skewness: skewness,
        length_kurtosis: kurtosis,
        hiragana_ratio: ratio(script_counts[0]),
        katakana_ratio: ratio(script_counts[1]),
        kanji_ratio: ratio(script_counts[2]),
        alphanumeric_ratio: ratio(script_counts[3]),
        char_entropy: shannon_entropy(&char_counts, total_chars),
        bigram_entropy: bigram_conditional_entropy(&samples),
        mutual_information: mutual_information_proxy(&samples, stats.mean),
        question_density: ratio(question_matches),
        reasoning_density: ratio(reasoning_matches),
        name_pattern_score: pattern_score(&samples, &patterns.name),
        class_pattern_score: pattern_score(&samples, &patterns.class),
    }
}

fn ratio_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Skewness and excess kurtosis of the lengths; both 0 for uniform lengths.
fn standardized_moments(lengths: &[f64], stats: &LengthStats) -> (f64, f64) {
    let std_dev = stats.std_dev();
    if lengths.is_empty() || std_dev == 0.0 {
        return (0.0, 0.0);
    }
    let n = lengths.len() as f64;
    let (third, fourth) = lengths.iter().fold((0.0, 0.0), |(third, fourth), length| {
        let z = (length - stats.mean) / std_dev;
        (third + z.powi(3), fourth + z.powi(4))
    });
    (third / n, fourth / n - 3.0)
}

fn shannon_entropy(counts: &HashMap<char, usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts.values().fold(0.0, |entropy, count| {
        let p = *count as f64 / total;
        entropy - p * p.log2()
    })
}

/// `H(next | current)` over character bigrams counted within each sample.
fn bigram_conditional_entropy(samples: &[&str]) -> f64 {
    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    let mut leading: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for sample in samples {
        let chars = sample.chars().collect::<Vec<_>>();
        for pair in chars.windows(2) {
            *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
            *leading.entry(pair[0]).or_insert(0) += 1;
            total += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    bigrams.iter().fold(0.0, |entropy, ((first, _), count)| {
        let joint = *count as f64 / total as f64;
        let conditional = *count as f64 / leading[first] as f64;
        entropy - joint * conditional.log2()
    })
}

fn mutual_information_proxy(samples: &[&str], mean_length: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total = samples
        .iter()
        .map(|sample| {
            let distinct = sample.chars().collect::<HashSet<_>>().len() as f64;
            let length = sample.chars().count() as f64;
            (distinct / ((length - mean_length).abs() + 1.0)).log2()
        })
        .sum::<f64>();
    total / samples.len() as f64
}

/// Mean over samples of the weight of the first matching pattern.
fn pattern_score(samples: &[&str], patterns: &[(Regex, f64)]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total = samples
        .iter()
        .map(|sample| {
            patterns
                .iter()
                .find(|(regex, _)| regex.is_match(sample))
                .map_or(0.0, |(_, weight)| *weight)
        })
        .sum::<f64>();
    total / samples.len() as f64
}
