//! Pot economics: pure pricing and expectation functions.
//!
//! Nothing here holds state; every function is a plain calculation over the
//! amounts in front of it.

pub mod pot;
pub mod spr;

pub use pot::{
    MIN_CALL, PotOdds, combinations, ev_call, ev_raise, fold_equity_value, kelly, mdf,
    optimal_bet_size, pot_odds,
};
pub use spr::{SprAnalysis, SprCategory, analyze, commitment_threshold, spr};
