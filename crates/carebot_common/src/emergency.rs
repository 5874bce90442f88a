//! Emergency detection. Always checked first; a hit short-circuits routing.

use crate::matcher::{contains_any, normalize};

const BUILTIN_PHRASES: &[&str] = &[
    "chest pain",
    "heart attack",
    "stroke",
    "unconscious",
    "not conscious",
    "severe bleeding",
    "bleeding heavily",
    "can't breathe",
    "cannot breathe",
    "difficulty breathing",
    "suicide",
    "suicidal",
    "kill myself",
    "overdose",
    "poisoning",
    "poisoned",
    "severe injury",
    "choking",
    "seizure",
    "allergic reaction",
    "anaphylaxis",
    "broken bone",
    "severe burn",
];

/// Flat phrase set, membership only
#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    phrases: Vec<String>,
}

impl EmergencyDetector {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_PHRASES)
    }

    pub fn detect(&self, input: &str) -> bool {
        self.detect_normalized(&normalize(input))
    }

    pub fn detect_normalized(&self, normalized: &str) -> bool {
        contains_any(normalized, &self.phrases)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_phrases_case_insensitive() {
        let detector = EmergencyDetector::builtin();
        assert!(detector.detect("I'm experiencing CHEST PAIN"));
        assert!(detector.detect("i think he had a seizure"));
        assert!(detector.detect("I can't breathe properly"));
    }

    #[test]
    fn test_no_word_guard() {
        // "stroke" inside "heatstroke" still counts
        assert!(EmergencyDetector::builtin().detect("is heatstroke dangerous"));
    }

    #[test]
    fn test_plain_symptoms_are_not_emergencies() {
        let detector = EmergencyDetector::builtin();
        assert!(!detector.detect("I have a mild headache"));
        assert!(!detector.detect("my knee hurts"));
        assert!(!detector.detect(""));
    }
}
