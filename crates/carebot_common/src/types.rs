//! Routing outcomes and feature handler results.

use crate::generator::GenerationError;
use crate::templates;
use serde::{Deserialize, Serialize};

/// Result of one feature handler looking at a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRequest {
    /// Handler computed an answer
    Resolved(String),
    /// Handler recognized the intent but parameters are missing
    NeedsInput(String),
    /// Not for this handler
    NoMatch,
}

/// Tag of a routing decision, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTag {
    EmptyInput,
    Emergency,
    BmiResult,
    BmiPrompt,
    FacilityResult,
    FacilityPrompt,
    KnowledgeBaseAnswer,
    GenericHealthPrompt,
    OffTopic,
    GeneratedAnswer,
    GeneratedError,
}

impl DecisionTag {
    pub const ALL: [DecisionTag; 11] = [
        Self::EmptyInput,
        Self::Emergency,
        Self::BmiResult,
        Self::BmiPrompt,
        Self::FacilityResult,
        Self::FacilityPrompt,
        Self::KnowledgeBaseAnswer,
        Self::GenericHealthPrompt,
        Self::OffTopic,
        Self::GeneratedAnswer,
        Self::GeneratedError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Emergency => "emergency",
            Self::BmiResult => "bmi_result",
            Self::BmiPrompt => "bmi_prompt",
            Self::FacilityResult => "facility_result",
            Self::FacilityPrompt => "facility_prompt",
            Self::KnowledgeBaseAnswer => "knowledge_base_answer",
            Self::GenericHealthPrompt => "generic_health_prompt",
            Self::OffTopic => "off_topic",
            Self::GeneratedAnswer => "generated_answer",
            Self::GeneratedError => "generated_error",
        }
    }

    /// Parse from string (for corpus tests)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl std::fmt::Display for DecisionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single outcome of one dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    EmptyInput,
    Emergency,
    BmiResult(String),
    BmiPrompt(String),
    FacilityResult(String),
    FacilityPrompt(String),
    KnowledgeBaseAnswer { key: String, html: String },
    GenericHealthPrompt,
    OffTopic,
    GeneratedAnswer(String),
    GeneratedError(GenerationError),
}

impl RoutingDecision {
    pub fn tag(&self) -> DecisionTag {
        match self {
            Self::EmptyInput => DecisionTag::EmptyInput,
            Self::Emergency => DecisionTag::Emergency,
            Self::BmiResult(_) => DecisionTag::BmiResult,
            Self::BmiPrompt(_) => DecisionTag::BmiPrompt,
            Self::FacilityResult(_) => DecisionTag::FacilityResult,
            Self::FacilityPrompt(_) => DecisionTag::FacilityPrompt,
            Self::KnowledgeBaseAnswer { .. } => DecisionTag::KnowledgeBaseAnswer,
            Self::GenericHealthPrompt => DecisionTag::GenericHealthPrompt,
            Self::OffTopic => DecisionTag::OffTopic,
            Self::GeneratedAnswer(_) => DecisionTag::GeneratedAnswer,
            Self::GeneratedError(_) => DecisionTag::GeneratedError,
        }
    }

    /// HTML fragment shown to the user
    pub fn render(&self) -> &str {
        match self {
            Self::EmptyInput => templates::EMPTY_INPUT,
            Self::Emergency => templates::EMERGENCY,
            Self::BmiResult(text)
            | Self::BmiPrompt(text)
            | Self::FacilityResult(text)
            | Self::FacilityPrompt(text)
            | Self::GeneratedAnswer(text) => text,
            Self::KnowledgeBaseAnswer { html, .. } => html,
            Self::GenericHealthPrompt => templates::GENERIC_HEALTH_PROMPT,
            Self::OffTopic => templates::OFF_TOPIC,
            Self::GeneratedError(_) => templates::GENERATION_APOLOGY,
        }
    }

    /// Curated symptom key, for knowledge base answers
    pub fn symptom_key(&self) -> Option<&str> {
        match self {
            Self::KnowledgeBaseAnswer { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip_names() {
        for tag in DecisionTag::ALL {
            assert_eq!(DecisionTag::from_str(tag.as_str()), Some(tag));
        }
        assert_eq!(DecisionTag::from_str("  Off_Topic "), Some(DecisionTag::OffTopic));
        assert_eq!(DecisionTag::from_str("nonsense"), None);
    }

    #[test]
    fn test_tag_serializes_snake_case() {
        let json = serde_json::to_string(&DecisionTag::KnowledgeBaseAnswer).unwrap();
        assert_eq!(json, "\"knowledge_base_answer\"");
    }

    #[test]
    fn test_generated_error_renders_apology() {
        let decision = RoutingDecision::GeneratedError(GenerationError::Timeout(20));
        assert_eq!(decision.tag(), DecisionTag::GeneratedError);
        assert_eq!(decision.render(), templates::GENERATION_APOLOGY);
    }

    #[test]
    fn test_fixed_decisions_never_render_empty() {
        for decision in [
            RoutingDecision::EmptyInput,
            RoutingDecision::Emergency,
            RoutingDecision::GenericHealthPrompt,
            RoutingDecision::OffTopic,
        ] {
            assert!(!decision.render().is_empty());
        }
    }
}
