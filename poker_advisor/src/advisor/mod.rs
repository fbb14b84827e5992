//! The decision engine and its input/output records.

pub mod engine;
pub mod models;

pub use engine::DecisionEngine;
pub use models::{DecisionRecord, EvBreakdown, Situation, SituationError, SituationResult};
