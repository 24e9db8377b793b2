use regex::Regex;

/// Compiles a built-in pattern. Built-in tables are literals, so a failure
/// here is a programming error caught by the scorer unit tests.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern:?}: {err}"))
}

/// A pattern with the points it adds when it matches.
#[derive(Debug, Clone)]
pub(crate) struct WeightedPattern {
    pub regex: Regex,
    pub points: f64,
}

impl WeightedPattern {
    pub fn new(pattern: &str, points: f64) -> Self {
        Self {
            regex: compile(pattern),
            points,
        }
    }
}

/// Sums the points of every pattern found in `text`.
pub(crate) fn additive_score(patterns: &[WeightedPattern], text: &str) -> f64 {
    patterns
        .iter()
        .filter(|pattern| pattern.regex.is_match(text))
        .fold(0.0, |total, pattern| total + pattern.points)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Script {
    Hiragana,
    Katakana,
    Ideograph,
    Alphanumeric,
    Other,
}

pub(crate) fn script_of(ch: char) -> Script {
    match ch {
        '\u{3040}'..='\u{309F}' => Script::Hiragana,
        '\u{30A0}'..='\u{30FF}' => Script::Katakana,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => Script::Ideograph,
        c if c.is_ascii_alphanumeric() => Script::Alphanumeric,
        '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => {
            Script::Alphanumeric
        }
        _ => Script::Other,
    }
}

/// Counts how many of `keywords` occur at least once in `text`.
pub(crate) fn keywords_present(keywords: &[&str], text: &str) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(**keyword))
        .count()
}

/// Header keywords that mark a column as carrying a given role, shared by the
/// contextual scorer when it inspects neighbouring headers.
pub(crate) const ANSWER_HEADER_KEYWORDS: &[&str] = &["回答", "答え", "解答", "answer", "response"];
pub(crate) const CLASS_HEADER_KEYWORDS: &[&str] = &["クラス", "学級", "class", "組"];
pub(crate) const NAME_HEADER_KEYWORDS: &[&str] = &["名前", "氏名", "なまえ", "name", "student"];
pub(crate) const FORM_METADATA_KEYWORDS: &[&str] =
    &["timestamp", "タイムスタンプ", "email", "メール", "mail"];
