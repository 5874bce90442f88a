//! Topical relevance gate.
//!
//! Broader than the symptom tables: any symptom word, body part, medical or
//! wellness term lets a message through. Everything else is off-topic.

use crate::matcher::{contains_any, normalize};

const SYMPTOM_WORDS: &[&str] = &[
    "pain", "hurt", "ache", "sore", "tired", "fatigue", "dizzy", "nausea", "fever", "cough",
    "cold", "flu", "sick", "ill", "symptom",
];

const BODY_PARTS: &[&str] = &[
    "head", "eye", "eyes", "ear", "nose", "throat", "chest", "stomach", "knee", "back", "hand",
    "foot", "neck", "shoulder", "arm", "leg",
];

const MEDICAL_TERMS: &[&str] = &[
    "medicine",
    "medication",
    "doctor",
    "hospital",
    "health",
    "medical",
    "treatment",
    "diagnosis",
    "disease",
    "condition",
    "injury",
];

const WELLNESS_TERMS: &[&str] = &[
    "sleep",
    "diet",
    "exercise",
    "wellness",
    "nutrition",
    "mental",
    "stress",
    "anxiety",
    "depression",
    "weight",
    "fitness",
];

const SENSATIONS: &[&str] = &[
    "blurred", "vision", "strain", "swelling", "redness", "numbness", "tingling", "burning",
    "itching", "bleeding",
];

/// Health vocabulary membership test
#[derive(Debug, Clone)]
pub struct TopicGate {
    vocabulary: Vec<String>,
}

impl TopicGate {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: vocabulary
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            [SYMPTOM_WORDS, BODY_PARTS, MEDICAL_TERMS, WELLNESS_TERMS, SENSATIONS]
                .into_iter()
                .flatten(),
        )
    }

    pub fn is_health_related(&self, input: &str) -> bool {
        self.is_health_related_normalized(&normalize(input))
    }

    pub fn is_health_related_normalized(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.vocabulary)
    }

    /// Extend the vocabulary, e.g. with knowledge pack triggers
    pub fn with_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            let term = term.as_ref().to_lowercase();
            if !term.is_empty() && !self.vocabulary.contains(&term) {
                self.vocabulary.push(term);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

impl Default for TopicGate {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_messages_pass() {
        let gate = TopicGate::builtin();
        assert!(gate.is_health_related("How can I improve my sleep quality?"));
        assert!(gate.is_health_related("my wrist hurts"));
        assert!(gate.is_health_related("Is this medication safe?"));
    }

    #[test]
    fn test_off_topic_rejected() {
        let gate = TopicGate::builtin();
        assert!(!gate.is_health_related("What's the weather today?"));
        assert!(!gate.is_health_related("tell me a joke"));
    }

    #[test]
    fn test_with_terms_extends() {
        let gate = TopicGate::builtin().with_terms(["Hives", ""]);
        let before = TopicGate::builtin().len();
        assert_eq!(gate.len(), before + 1);
        assert!(gate.is_health_related("I got hives"));
    }
}
