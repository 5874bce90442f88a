//! Carebot Common - routing core shared by the daemon and the CLI.
//!
//! Every message goes through one deterministic pipeline: emergency check,
//! feature handlers (BMI, facility locator), topical gate, curated knowledge
//! base, and only then the external text generator or a fixed fallback.

pub mod config;
pub mod emergency;
pub mod features;
pub mod generator;
pub mod knowledge;
pub mod matcher;
pub mod router;
pub mod service;
pub mod templates;
pub mod topic_gate;
pub mod types;

pub use config::{Config, ConfigError, GeneratorConfig, Provider};
pub use generator::{GenerationError, GenerationParams, TextGenerator};
pub use knowledge::{KnowledgeBase, KnowledgeError, SymptomEntry};
pub use router::{Plan, Router};
pub use service::HealthService;
pub use types::{DecisionTag, FeatureRequest, RoutingDecision};
