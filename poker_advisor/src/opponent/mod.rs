//! Opponent model: per-opponent statistics, archetype classification, and
//! exploit detection.
//!
//! The [`OpponentTracker`] is the single mutable store in the engine. It is
//! created once, handed around by `Arc`, and fed by whatever collaborator
//! observes the table. Classification and exploit queries read snapshots;
//! they never block the producer for long.

pub mod exploits;
pub mod models;
pub mod tracker;

pub use exploits::{DetectionBands, ExploitDetector, ExploitKind, ExploitSignal};
pub use models::{ObservedAction, PlayerArchetype, PlayerStats, StreetCounter};
pub use tracker::{OpponentId, OpponentTracker};
