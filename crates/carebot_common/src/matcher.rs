//! Symptom detection over normalized input.
//!
//! Two tiers:
//! - Tier 1: ordered pattern table of curated symptoms. First key in table
//!   order whose trigger occurs in the message wins, regardless of which
//!   trigger is more specific.
//! - Tier 2: body parts with no curated content plus a pain word. Reported as
//!   a distinct outcome so the router delegates instead of answering from the
//!   knowledge base.
//!
//! Matching is plain substring containment ("cold" also matches "scold").

use serde::{Deserialize, Serialize};

/// Lowercase and trim a raw message
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Substring test of any phrase against an already-normalized message
pub fn contains_any<S: AsRef<str>>(normalized: &str, phrases: &[S]) -> bool {
    phrases
        .iter()
        .any(|phrase| normalized.contains(phrase.as_ref()))
}

/// Symptom key and its trigger phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    pub key: String,
    pub triggers: Vec<String>,
}

impl PatternRule {
    pub fn new(key: &str, triggers: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.triggers)
    }
}

const BUILTIN_PATTERNS: &[(&str, &[&str])] = &[
    ("headache", &["headache", "head pain", "head ache", "head hurts", "migraine"]),
    ("cough", &["cough", "coughing"]),
    ("stomach", &["stomach", "belly", "tummy", "abdominal", "nausea", "vomit"]),
    ("dizzy", &["dizzy", "dizziness", "lightheaded", "vertigo"]),
    ("fever", &["fever", "temperature", "hot", "chills"]),
    ("cold", &["cold", "flu", "runny nose", "sneezing", "congestion"]),
    ("sore throat", &["sore throat", "throat hurt", "throat pain", "swallow hurt"]),
    ("knee", &["knee"]),
    ("tired eyes", &["tired eye", "eye strain", "eyes tired", "eyes feel tired", "eye fatigue"]),
    ("dry eyes", &["dry eye", "eyes dry", "dryness in eye", "keep eyes hydrated", "hydrate eyes"]),
    ("eye pain", &["eye pain", "eye hurt", "pain in eye", "eyes hurt", "hurting eyes"]),
    ("back", &["back pain", "back hurt", "back ache", "lower back", "upper back"]),
];

/// Body parts without curated knowledge base content
pub const UNCURATED_BODY_PARTS: &[&str] = &[
    "hand", "ear", "neck", "shoulder", "ankle", "wrist", "hip", "elbow", "foot",
];

/// Generic discomfort words paired with body parts in tier 2
pub const PAIN_WORDS: &[&str] = &["pain", "hurt", "ache", "sore", "tired", "strain", "stiff"];

/// Ordered tier-1 table. Order is the precedence contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Built-in table over the curated symptoms
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_PATTERNS
                .iter()
                .map(|(key, triggers)| PatternRule::new(key, triggers))
                .collect(),
        )
    }

    /// First rule in table order matching the message
    pub fn first_match(&self, normalized: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Outcome of symptom detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymptomMatch {
    /// Tier 1 hit on a curated key
    Curated(String),
    /// Tier 2: known body part with a pain word, no curated content
    UncuratedBodyPart(&'static str),
    None,
}

impl SymptomMatch {
    /// Curated key, if any. Tier 2 deliberately yields nothing.
    pub fn curated_key(&self) -> Option<&str> {
        match self {
            Self::Curated(key) => Some(key),
            _ => None,
        }
    }
}

/// Two-tier symptom detector
#[derive(Debug, Clone)]
pub struct SymptomMatcher {
    table: PatternTable,
}

impl SymptomMatcher {
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Classify a raw message
    pub fn detect(&self, input: &str) -> SymptomMatch {
        self.detect_normalized(&normalize(input))
    }

    pub fn detect_normalized(&self, normalized: &str) -> SymptomMatch {
        if let Some(rule) = self.table.first_match(normalized) {
            return SymptomMatch::Curated(rule.key.clone());
        }

        if contains_any(normalized, PAIN_WORDS) {
            if let Some(part) = UNCURATED_BODY_PARTS
                .iter()
                .find(|part| normalized.contains(*part))
            {
                return SymptomMatch::UncuratedBodyPart(part);
            }
        }

        SymptomMatch::None
    }

    /// Curated symptom key for a raw message, `None` for tier 2 and misses
    pub fn detect_symptom(&self, input: &str) -> Option<String> {
        match self.detect(input) {
            SymptomMatch::Curated(key) => Some(key),
            _ => None,
        }
    }
}

impl Default for SymptomMatcher {
    fn default() -> Self {
        Self::new(PatternTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(input: &str) -> SymptomMatch {
        SymptomMatcher::default().detect(input)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  My HEAD Hurts \n"), "my head hurts");
    }

    #[test]
    fn test_builtin_table_order() {
        let table = PatternTable::builtin();
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(
            keys,
            vec![
                "headache",
                "cough",
                "stomach",
                "dizzy",
                "fever",
                "cold",
                "sore throat",
                "knee",
                "tired eyes",
                "dry eyes",
                "eye pain",
                "back"
            ]
        );
    }

    #[test]
    fn test_tier1_basic() {
        assert_eq!(detect("I have a migraine"), SymptomMatch::Curated("headache".into()));
        assert_eq!(detect("I have knee pain"), SymptomMatch::Curated("knee".into()));
        assert_eq!(detect("My eyes feel tired"), SymptomMatch::Curated("tired eyes".into()));
        assert_eq!(detect("lower back is killing me"), SymptomMatch::Curated("back".into()));
        assert_eq!(detect("I feel lightheaded"), SymptomMatch::Curated("dizzy".into()));
    }

    #[test]
    fn test_tier1_table_order_beats_specificity() {
        // Both cough and stomach triggers present: cough is declared first
        assert_eq!(
            detect("my stomach hurts when coughing"),
            SymptomMatch::Curated("cough".into())
        );
        // "sore throat" loses to "cold" because cold is declared earlier
        assert_eq!(
            detect("sore throat and a cold"),
            SymptomMatch::Curated("cold".into())
        );
    }

    #[test]
    fn test_substring_matching_is_unguarded() {
        // "hot" inside "shot" hits the fever triggers
        assert_eq!(
            detect("my arm is sore after the shot"),
            SymptomMatch::Curated("fever".into())
        );
    }

    #[test]
    fn test_tier2_uncurated_body_part() {
        assert_eq!(detect("my wrist hurts"), SymptomMatch::UncuratedBodyPart("wrist"));
        assert_eq!(detect("stiff neck since monday"), SymptomMatch::UncuratedBodyPart("neck"));
        assert_eq!(detect("my wrist hurts").curated_key(), None);
    }

    #[test]
    fn test_tier2_needs_pain_word() {
        assert_eq!(detect("I broke a nail on my hand"), SymptomMatch::None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(detect("how do I sleep better"), SymptomMatch::None);
        assert_eq!(SymptomMatcher::default().detect_symptom("hello"), None);
    }

    #[test]
    fn test_custom_table() {
        let matcher = SymptomMatcher::new(PatternTable::new(vec![PatternRule::new(
            "rash",
            &["Rash", "hives"],
        )]));
        assert_eq!(matcher.detect_symptom("I got HIVES"), Some("rash".to_string()));
        assert_eq!(matcher.detect_symptom("I have a rash"), Some("rash".to_string()));
    }
}
