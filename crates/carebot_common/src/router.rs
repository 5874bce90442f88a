//! Response router - the fixed priority pipeline.
//!
//! Order: empty input, emergency, BMI, facility locator, topical gate,
//! curated knowledge base, then the external generator or the generic
//! prompt. The first stage that decides ends routing.
//!
//! `plan` is pure and covers every stage up to the generator call.
//! `dispatch` runs the plan and performs the single, timeout-bounded
//! generator call when the plan delegates.

use crate::emergency::EmergencyDetector;
use crate::features::{builtin_handlers, FeatureHandler, FeatureKind};
use crate::generator::{GenerationError, GenerationParams, TextGenerator};
use crate::knowledge::{KnowledgeBase, KnowledgePack};
use crate::matcher::{normalize, PatternTable, SymptomMatch, SymptomMatcher};
use crate::templates::SYSTEM_PROMPT;
use crate::topic_gate::TopicGate;
use crate::types::{FeatureRequest, RoutingDecision};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on one generator call
pub const DEFAULT_GENERATOR_TIMEOUT: Duration = Duration::from_secs(20);

/// Outcome of the deterministic part of the pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// A stage decided without the generator
    Decided(RoutingDecision),
    /// Nothing curated matched and the generator is available
    Delegate,
}

/// Immutable after construction; safe to share across requests
pub struct Router {
    emergency: EmergencyDetector,
    handlers: Vec<Box<dyn FeatureHandler>>,
    gate: TopicGate,
    matcher: SymptomMatcher,
    knowledge: KnowledgeBase,
    generator: Option<Arc<dyn TextGenerator>>,
    params: GenerationParams,
    timeout: Duration,
}

impl Router {
    /// Router over the built-in knowledge base and tables
    pub fn builtin() -> Self {
        Self::with_parts(KnowledgePack::builtin(), TopicGate::builtin())
    }

    /// Router over a loaded knowledge pack. Pack triggers join the topical
    /// vocabulary so custom symptoms are not refused as off-topic.
    pub fn from_pack(pack: KnowledgePack) -> Self {
        let gate = TopicGate::builtin().with_terms(
            pack.patterns
                .rules()
                .iter()
                .flat_map(|rule| rule.triggers.iter()),
        );
        Self::with_parts(pack, gate)
    }

    fn with_parts(pack: KnowledgePack, gate: TopicGate) -> Self {
        for key in pack.patterns.keys() {
            if !pack.knowledge.contains(key) {
                warn!(
                    "Pattern key '{}' has no knowledge base entry; matches will be treated as unmatched",
                    key
                );
            }
        }

        Self {
            emergency: EmergencyDetector::builtin(),
            handlers: builtin_handlers(),
            gate,
            matcher: SymptomMatcher::new(pack.patterns),
            knowledge: pack.knowledge,
            generator: None,
            params: GenerationParams::default(),
            timeout: DEFAULT_GENERATOR_TIMEOUT,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn patterns(&self) -> &PatternTable {
        self.matcher.table()
    }

    /// Curated topics, in tier-1 precedence order
    pub fn topics(&self) -> Vec<&str> {
        self.patterns()
            .keys()
            .filter(|key| self.knowledge.contains(key))
            .collect()
    }

    /// Run every deterministic stage. Same input and flag, same plan.
    pub fn plan(&self, input: &str, generator_available: bool) -> Plan {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Plan::Decided(RoutingDecision::EmptyInput);
        }

        if self.emergency.detect_normalized(&normalized) {
            return Plan::Decided(RoutingDecision::Emergency);
        }

        for handler in &self.handlers {
            let decision = match (handler.kind(), handler.try_handle(input)) {
                (_, FeatureRequest::NoMatch) => continue,
                (FeatureKind::Bmi, FeatureRequest::Resolved(text)) => RoutingDecision::BmiResult(text),
                (FeatureKind::Bmi, FeatureRequest::NeedsInput(text)) => RoutingDecision::BmiPrompt(text),
                (FeatureKind::Facility, FeatureRequest::Resolved(text)) => {
                    RoutingDecision::FacilityResult(text)
                }
                (FeatureKind::Facility, FeatureRequest::NeedsInput(text)) => {
                    RoutingDecision::FacilityPrompt(text)
                }
            };
            return Plan::Decided(decision);
        }

        if !self.gate.is_health_related_normalized(&normalized) {
            return Plan::Decided(RoutingDecision::OffTopic);
        }

        if let SymptomMatch::Curated(key) = self.matcher.detect_normalized(&normalized) {
            match self.knowledge.render(&key) {
                Ok(html) => return Plan::Decided(RoutingDecision::KnowledgeBaseAnswer { key, html }),
                Err(e) => warn!("Curated match without content: {}", e),
            }
        }

        // Tier 2 and misses land here alike: without a generator there is
        // no content for an uncurated body part
        if generator_available {
            Plan::Delegate
        } else {
            Plan::Decided(RoutingDecision::GenericHealthPrompt)
        }
    }

    /// Route one message to exactly one decision. Never fails.
    pub async fn dispatch(&self, input: &str, generator_available: bool) -> RoutingDecision {
        let decision = match self.plan(input, generator_available) {
            Plan::Decided(decision) => decision,
            Plan::Delegate => self.delegate(input).await,
        };
        debug!("Routed message: {}", decision.tag());
        decision
    }

    async fn delegate(&self, input: &str) -> RoutingDecision {
        let Some(generator) = &self.generator else {
            warn!("Generator marked available but none is configured");
            return RoutingDecision::GeneratedError(GenerationError::Unavailable);
        };

        let call = generator.generate(SYSTEM_PROMPT, input, &self.params);
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout.as_millis() as u64)),
        };

        match result {
            Ok(text) => RoutingDecision::GeneratedAnswer(text),
            Err(e) => {
                warn!("Generator {} failed: {}", generator.name(), e);
                RoutingDecision::GeneratedError(e)
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::builtin()
    }
}
