//! The equity-oracle boundary.
//!
//! The decision engine treats equity estimation as an opaque numeric
//! oracle behind the [`EquityOracle`] trait. The default implementation is
//! a Monte Carlo sampler ([`MonteCarloOracle`]); a bounded cache adapter
//! ([`CachedOracle`]) and the equity-realization adjuster live at the same
//! boundary.

pub mod cache;
pub mod eqr;
pub mod eval;
pub mod monte_carlo;

pub use cache::{CachedOracle, EquityCache};
pub use eqr::EqrContext;
pub use eval::evaluate_seven;
pub use monte_carlo::MonteCarloOracle;

use crate::cards::Card;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// Oracle failures. The engine recovers from these locally by falling back
/// to the range engine's approximate equity.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle cannot serve requests at all
    #[error("equity oracle unavailable: {0}")]
    Unavailable(String),

    /// The request itself is malformed (e.g. duplicate cards)
    #[error("invalid oracle request: {0}")]
    InvalidRequest(String),
}

/// Result type for oracle calls
pub type OracleResult<T> = Result<T, OracleError>;

/// An equity figure together with how it was obtained. `degraded` marks an
/// estimate cut short by the deadline.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EquityEstimate {
    pub equity: f64,
    pub iterations: u32,
    pub degraded: bool,
}

/// The numeric oracle the engine calls for showdown equity.
///
/// Implementations must be deterministic for a fixed iteration count and
/// fixed cards, modulo their own internal sampling scheme.
pub trait EquityOracle: Send + Sync {
    /// All-in equity of the hero hand against `opponents` random hands.
    ///
    /// The call is the engine's only suspension point; a deadline, when
    /// given, bounds it. Implementations degrade to a lower-iteration
    /// estimate on expiry instead of failing.
    fn equity(
        &self,
        hero: [Card; 2],
        board: &[Card],
        opponents: usize,
        iterations: u32,
        deadline: Option<Instant>,
    ) -> OracleResult<EquityEstimate>;

    /// Showdown rank score of a full seven-card holding; higher wins.
    fn evaluate_seven(&self, cards: [Card; 7]) -> u32;

    /// Equity realization: adjust raw all-in equity for position, stacks,
    /// board texture, field size, and opponent skill.
    fn realized_equity(&self, raw_equity: f64, ctx: &EqrContext) -> f64 {
        eqr::adjust(raw_equity, ctx)
    }
}

/// Fan out independent equity requests and fan the results back in.
///
/// Results are correlated to their originating hand by value; the order of
/// completion is irrelevant.
pub fn batch_equity<O: EquityOracle + ?Sized>(
    oracle: &O,
    hands: &[[Card; 2]],
    board: &[Card],
    opponents: usize,
    iterations: u32,
    deadline: Option<Instant>,
) -> Vec<([Card; 2], OracleResult<EquityEstimate>)> {
    hands
        .par_iter()
        .map(|hand| (*hand, oracle.equity(*hand, board, opponents, iterations, deadline)))
        .collect()
}
