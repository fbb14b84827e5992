//! # Poker Advisor
//!
//! An opponent-adaptive Texas Hold'em decision engine: it turns one table
//! snapshot (hole cards, board, pot, stack, position, opponent) into a
//! ranked, explainable recommendation with sizing, confidence, and the
//! expected value behind it.
//!
//! ## Architecture
//!
//! Facts flow one way through the engine:
//!
//! - [`cards`]: compact card codec (id ↔ rank/suit notation)
//! - [`range`]: hand labels, the 169-hand matrix, range grammar, charts
//! - [`board`]: board-texture classification and danger cards
//! - [`math`]: pot odds, SPR, EV, and sizing formulas
//! - [`opponent`]: per-opponent stats, archetypes, exploit detection
//! - [`oracle`]: the equity-oracle boundary (Monte Carlo default, bounded
//!   cache, equity-realization adjustment)
//! - [`strategy`]: baseline policy blended with exploit adjustments
//! - [`advisor`]: the orchestrating [`DecisionEngine`]
//!
//! The opponent tracker is the only mutable state; everything else is
//! recomputed per decision.
//!
//! ## Example
//!
//! ```
//! use poker_advisor::{
//!     DecisionEngine, EngineConfig, MonteCarloOracle, OpponentTracker, Position, Situation,
//! };
//! use std::sync::Arc;
//!
//! let engine = DecisionEngine::new(
//!     Arc::new(MonteCarloOracle::seeded(1)),
//!     Arc::new(OpponentTracker::new(30)),
//!     EngineConfig::default().with_iterations(5_000),
//! );
//!
//! let hero = [
//!     "As".parse().expect("valid card"),
//!     "Ks".parse().expect("valid card"),
//! ];
//! let situation = Situation::new(hero, vec![], 100.0, 0.0, 1000.0, Position::Btn, None, 1)
//!     .expect("valid situation");
//!
//! let record = engine.decide(&situation);
//! println!("{} for {:.0} ({:.0}% confident)", record.action, record.size,
//!     record.confidence * 100.0);
//! ```

pub mod advisor;
pub mod board;
pub mod cards;
pub mod config;
pub mod math;
pub mod opponent;
pub mod oracle;
pub mod range;
pub mod strategy;

pub use advisor::{DecisionEngine, DecisionRecord, Situation, SituationError};
pub use cards::{Card, Rank, Street, Suit};
pub use config::EngineConfig;
pub use opponent::{
    ExploitKind, ExploitSignal, ObservedAction, OpponentTracker, PlayerArchetype, PlayerStats,
};
pub use oracle::{CachedOracle, EquityOracle, MonteCarloOracle};
pub use range::{HandLabel, Position, RangeManager, Scenario};
pub use strategy::{ActionDistribution, AdvisedAction, StrategyBlender};
