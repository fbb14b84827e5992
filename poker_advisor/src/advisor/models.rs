//! The engine's input and output records.

use crate::board::BoardAnalysis;
use crate::cards::{Card, Street};
use crate::math::{PotOdds, SprAnalysis};
use crate::opponent::ExploitSignal;
use crate::range::{HandLabel, Position};
use crate::strategy::{ActionDistribution, AdvisedAction};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// EVs within this margin count as ties and resolve toward the less
/// capital-committing action.
pub const EV_EPSILON: f64 = 1e-6;

/// Situation construction errors. Invariant violations are rejected here
/// so they can never reach the decision engine.
#[derive(Debug, Error, PartialEq)]
pub enum SituationError {
    /// More than five board cards
    #[error("board has {0} cards, at most 5 allowed")]
    TooManyBoardCards(usize),

    /// The same card appears twice across hand and board
    #[error("duplicate card {0}")]
    DuplicateCard(Card),

    /// A chip amount is negative
    #[error("{field} is negative ({value})")]
    NegativeAmount { field: &'static str, value: f64 },

    /// A chip amount is NaN or infinite
    #[error("{field} is not a finite number")]
    NonFiniteAmount { field: &'static str },

    /// A decision needs someone to decide against
    #[error("at least one opponent required")]
    NoOpponents,
}

/// Result type for situation construction
pub type SituationResult<T> = Result<T, SituationError>;

/// One table snapshot to decide on. Immutable after construction; every
/// derived fact comes from here.
#[derive(Clone, Debug, Serialize)]
pub struct Situation {
    hero: [Card; 2],
    board: Vec<Card>,
    pot: f64,
    call_amount: f64,
    stack: f64,
    position: Position,
    opponent_id: Option<String>,
    opponent_count: usize,
}

impl Situation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hero: [Card; 2],
        board: Vec<Card>,
        pot: f64,
        call_amount: f64,
        stack: f64,
        position: Position,
        opponent_id: Option<String>,
        opponent_count: usize,
    ) -> SituationResult<Situation> {
        if board.len() > 5 {
            return Err(SituationError::TooManyBoardCards(board.len()));
        }
        let mut seen = Vec::with_capacity(board.len() + 2);
        for card in hero.iter().chain(&board) {
            if seen.contains(card) {
                return Err(SituationError::DuplicateCard(*card));
            }
            seen.push(*card);
        }
        for (field, value) in [("pot", pot), ("call_amount", call_amount), ("stack", stack)] {
            if !value.is_finite() {
                return Err(SituationError::NonFiniteAmount { field });
            }
            if value < 0.0 {
                return Err(SituationError::NegativeAmount { field, value });
            }
        }
        if opponent_count == 0 {
            return Err(SituationError::NoOpponents);
        }

        Ok(Situation {
            hero,
            board,
            pot,
            call_amount,
            stack,
            position,
            opponent_id,
            opponent_count,
        })
    }

    pub fn hero(&self) -> [Card; 2] {
        self.hero
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn pot(&self) -> f64 {
        self.pot
    }

    pub fn call_amount(&self) -> f64 {
        self.call_amount
    }

    pub fn stack(&self) -> f64 {
        self.stack
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn opponent_id(&self) -> Option<&str> {
        self.opponent_id.as_deref()
    }

    pub fn opponent_count(&self) -> usize {
        self.opponent_count
    }

    pub fn street(&self) -> Street {
        Street::from_board_len(self.board.len())
    }

    /// Canonical label of the hero's holding.
    pub fn hand_label(&self) -> HandLabel {
        HandLabel::from_cards(self.hero[0], self.hero[1])
    }

    /// Whether the hero usually acts last postflop, derived from the seat.
    pub fn in_position(&self) -> bool {
        self.position.is_late()
    }

    /// Call amount actually payable with the remaining stack.
    pub fn effective_call(&self) -> f64 {
        self.call_amount.min(self.stack)
    }
}

/// Expected value per available action. Folding is always worth zero;
/// raising is absent when the stack cannot exceed the call.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EvBreakdown {
    pub fold: f64,
    pub call: f64,
    pub raise: Option<f64>,
}

impl EvBreakdown {
    /// Best action and its EV. Ties inside [`EV_EPSILON`] resolve toward
    /// the earlier (less committing) action: fold, then call, then raise.
    pub fn best(&self) -> (AdvisedAction, f64) {
        let mut best = (AdvisedAction::Fold, self.fold);
        if self.call > best.1 + EV_EPSILON {
            best = (AdvisedAction::Call, self.call);
        }
        if let Some(raise) = self.raise {
            if raise > best.1 + EV_EPSILON {
                best = (AdvisedAction::Raise, raise);
            }
        }
        best
    }

    /// Confidence as the normalized gap between the best and second-best
    /// EV, in [0, 1].
    pub fn confidence(&self) -> f64 {
        let mut evs = vec![self.fold, self.call];
        if let Some(raise) = self.raise {
            evs.push(raise);
        }
        evs.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let (best, second) = (evs[0], evs[1]);
        let gap = best - second;
        if gap <= EV_EPSILON {
            0.0
        } else if best.abs() <= EV_EPSILON {
            1.0
        } else {
            (gap / best.abs()).min(1.0)
        }
    }
}

/// The engine's full output for one situation: the facts it derived, the
/// blended strategy, and the ranked recommendation.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionRecord {
    /// Raw all-in equity from the oracle (or the fallback estimate)
    pub raw_equity: f64,
    /// Iterations behind the raw figure; zero for the fallback path
    pub equity_iterations: u32,
    /// The oracle cut sampling short on its deadline
    pub equity_degraded: bool,
    /// The oracle failed entirely and the range heuristic stood in
    pub oracle_fallback: bool,

    /// Realization-adjusted equity the decision is actually based on
    pub realized_equity: f64,

    pub pot_odds: PotOdds,
    pub spr: SprAnalysis,
    pub board: BoardAnalysis,

    pub action_distribution: ActionDistribution,
    pub ev: EvBreakdown,

    pub action: AdvisedAction,
    /// Chips to put in for the advised action (0 for a fold)
    pub size: f64,
    pub confidence: f64,

    /// Exploit signals that influenced the blend, highest EV gain first
    pub exploits: Vec<ExploitSignal>,

    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn hero() -> [Card; 2] {
        let cards = parse_cards("AsKs").unwrap();
        [cards[0], cards[1]]
    }

    fn situation(board: &str) -> SituationResult<Situation> {
        Situation::new(
            hero(),
            parse_cards(board).unwrap(),
            100.0,
            0.0,
            1000.0,
            Position::Btn,
            None,
            1,
        )
    }

    #[test]
    fn test_valid_situation() {
        let situation = situation("2c7d9h").unwrap();
        assert_eq!(situation.street(), Street::Flop);
        assert_eq!(situation.hand_label().to_string(), "AKs");
        assert!(situation.in_position());
    }

    #[test]
    fn test_board_limit_enforced() {
        let result = situation("2c3c4c5c6c7c");
        assert_eq!(result.unwrap_err(), SituationError::TooManyBoardCards(6));
    }

    #[test]
    fn test_duplicates_rejected() {
        assert!(matches!(
            situation("As2c3c").unwrap_err(),
            SituationError::DuplicateCard(_)
        ));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let result = Situation::new(hero(), vec![], -1.0, 0.0, 100.0, Position::Bb, None, 1);
        assert!(matches!(result, Err(SituationError::NegativeAmount { .. })));
    }

    #[test]
    fn test_nan_amounts_rejected() {
        let result = Situation::new(hero(), vec![], f64::NAN, 0.0, 100.0, Position::Bb, None, 1);
        assert!(matches!(result, Err(SituationError::NonFiniteAmount { .. })));
    }

    #[test]
    fn test_zero_opponents_rejected() {
        let result = Situation::new(hero(), vec![], 100.0, 0.0, 100.0, Position::Bb, None, 0);
        assert_eq!(result.unwrap_err(), SituationError::NoOpponents);
    }

    #[test]
    fn test_effective_call_capped_by_stack() {
        let situation =
            Situation::new(hero(), vec![], 200.0, 150.0, 50.0, Position::Bb, None, 1).unwrap();
        assert_eq!(situation.effective_call(), 50.0);
    }

    #[test]
    fn test_ev_best_prefers_less_committing_on_ties() {
        let evs = EvBreakdown {
            fold: 0.0,
            call: 0.0,
            raise: Some(0.0),
        };
        assert_eq!(evs.best().0, AdvisedAction::Fold);

        let evs = EvBreakdown {
            fold: 0.0,
            call: 5.0,
            raise: Some(5.0),
        };
        assert_eq!(evs.best().0, AdvisedAction::Call);
    }

    #[test]
    fn test_ev_best_picks_max() {
        let evs = EvBreakdown {
            fold: 0.0,
            call: 3.0,
            raise: Some(8.0),
        };
        let (action, value) = evs.best();
        assert_eq!(action, AdvisedAction::Raise);
        assert_eq!(value, 8.0);
    }

    #[test]
    fn test_confidence_zero_on_ties() {
        let evs = EvBreakdown {
            fold: 0.0,
            call: 0.0,
            raise: None,
        };
        assert_eq!(evs.confidence(), 0.0);
    }

    #[test]
    fn test_confidence_full_when_best_is_zero() {
        // Folding for zero against strictly losing alternatives
        let evs = EvBreakdown {
            fold: 0.0,
            call: -30.0,
            raise: None,
        };
        assert_eq!(evs.confidence(), 1.0);
    }

    #[test]
    fn test_confidence_normalized_gap() {
        let evs = EvBreakdown {
            fold: 0.0,
            call: 80.0,
            raise: Some(100.0),
        };
        assert!((evs.confidence() - 0.2).abs() < 1e-9);
    }
}
