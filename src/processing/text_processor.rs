//! Text tokenization and pattern detection

use regex::{Regex, RegexSet};
use std::collections::BTreeSet;

/// Set of normalized word tokens derived from a text
pub type TokenSet = BTreeSet<String>;

/// Contact channels recognized in a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    LinkedIn,
    Portfolio,
}

impl ContactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::LinkedIn => "linkedin",
            ContactKind::Portfolio => "portfolio",
        }
    }
}

/// Compiled patterns for tokenizing and scanning resume text.
///
/// Every regex is a literal, so construction cannot fail at runtime.
pub struct TextProcessor {
    token_regex: Regex,
    word_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    url_regex: Regex,
    linkedin_regex: Regex,
    year_regex: Regex,
    metric_patterns: RegexSet,
    achievement_patterns: RegexSet,
    headline_achievement_regexes: Vec<Regex>,
}

/// Metric phrases that earn the structure bonus
const METRIC_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\$\d+",
    r"\d+\+",
    r"increased by",
    r"reduced by",
    r"saved \$\d+",
    r"improved by",
    r"managed \d+",
    r"led \d+",
];

/// Additional phrasings accepted by the achievements analyzer
const EXTRA_ACHIEVEMENT_PATTERNS: &[&str] = &[
    r"achieved \d+",
    r"achieved by \d+",
    r"reduced by \d+",
    r"improved by \d+",
    r"increased from.*to.*\d+",
];

/// Achievement phrases quoted verbatim in headlines
const HEADLINE_ACHIEVEMENT_PATTERNS: &[&str] = &[
    r"increased by \d+%",
    r"reduced by \d+%",
    r"managed \d+",
    r"led \d+",
];

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let token_regex = Regex::new(r"[a-z0-9+#]+").expect("Invalid token regex");
        let word_regex = Regex::new(r"\w+").expect("Invalid word regex");

        let email_regex = Regex::new(r"(?i)\b[\w.-]+@[\w.-]+\.\w+\b")
            .expect("Invalid email regex");
        let phone_regex = Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b")
            .expect("Invalid phone regex");
        let url_regex = Regex::new(r"(?i)\bhttps?://\S+")
            .expect("Invalid URL regex");
        let linkedin_regex = Regex::new(r"(?i)\blinkedin\.com/in/\S+")
            .expect("Invalid LinkedIn regex");
        let year_regex = Regex::new(r"(?:19|20)\d{2}")
            .expect("Invalid year regex");

        let case_insensitive = |patterns: &[&str]| -> Vec<String> {
            patterns.iter().map(|p| format!("(?i){}", p)).collect()
        };

        let metric_patterns = RegexSet::new(case_insensitive(METRIC_PATTERNS))
            .expect("Invalid metric patterns");
        let achievement_patterns = RegexSet::new(
            case_insensitive(METRIC_PATTERNS)
                .into_iter()
                .chain(case_insensitive(EXTRA_ACHIEVEMENT_PATTERNS)),
        )
        .expect("Invalid achievement patterns");
        let headline_achievement_regexes = case_insensitive(HEADLINE_ACHIEVEMENT_PATTERNS)
            .iter()
            .map(|p| Regex::new(p).expect("Invalid headline achievement regex"))
            .collect();

        Self {
            token_regex,
            word_regex,
            email_regex,
            phone_regex,
            url_regex,
            linkedin_regex,
            year_regex,
            metric_patterns,
            achievement_patterns,
            headline_achievement_regexes,
        }
    }

    /// Lowercase `text` and collect its `[a-z0-9+#]+` runs
    pub fn tokenize(&self, text: &str) -> TokenSet {
        let lower = text.to_lowercase();
        self.token_regex
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Number of `\w+` runs in `text`
    pub fn word_count(&self, text: &str) -> usize {
        self.word_regex.find_iter(text).count()
    }

    pub fn has_contact(&self, text: &str, kind: ContactKind) -> bool {
        match kind {
            ContactKind::Email => self.email_regex.is_match(text),
            ContactKind::Phone => self.phone_regex.is_match(text),
            ContactKind::LinkedIn => self.linkedin_regex.is_match(text),
            ContactKind::Portfolio => self
                .url_regex
                .find_iter(text)
                .any(|m| !m.as_str().to_lowercase().contains("linkedin.com")),
        }
    }

    /// Number of contact signals present: email, phone, any URL, LinkedIn profile
    pub fn contact_signal_count(&self, text: &str) -> usize {
        [
            self.email_regex.is_match(text),
            self.phone_regex.is_match(text),
            self.url_regex.is_match(text),
            self.linkedin_regex.is_match(text),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }

    /// Whether any metric phrase (percentages, dollar figures, "managed 5"...) appears
    pub fn has_quantifiable_metrics(&self, text: &str) -> bool {
        self.metric_patterns.is_match(text)
    }

    /// Broader metric check used when advising on achievements
    pub fn has_quantifiable_achievements(&self, text: &str) -> bool {
        self.achievement_patterns.is_match(text)
    }

    /// Achievement phrases worth quoting, at most two per pattern
    pub fn achievement_phrases(&self, text: &str) -> Vec<String> {
        self.headline_achievement_regexes
            .iter()
            .flat_map(|re| re.find_iter(text).take(2).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// Four-digit years between 1900 and 2099, in order of appearance
    pub fn years(&self, text: &str) -> Vec<u32> {
        self.year_regex
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<u32>().ok())
            .filter(|year| (1900..=2099).contains(year))
            .collect()
    }
}
