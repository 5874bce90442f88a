//! Structured feature handlers.
//!
//! Each handler recognizes its own intent and either answers, asks for the
//! missing parameters, or passes. The router consults them in a fixed order
//! after the emergency check.

pub mod bmi;
pub mod facility;

use crate::types::FeatureRequest;

pub use bmi::BmiHandler;
pub use facility::FacilityLocator;

/// Which feature produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Bmi,
    Facility,
}

/// Trait abstraction over feature handlers
pub trait FeatureHandler: Send + Sync {
    fn kind(&self) -> FeatureKind;

    /// Inspect a raw message
    fn try_handle(&self, input: &str) -> FeatureRequest;
}

/// Handlers in routing order
pub fn builtin_handlers() -> Vec<Box<dyn FeatureHandler>> {
    vec![Box::new(BmiHandler), Box::new(FacilityLocator::builtin())]
}
