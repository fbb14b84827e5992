//! The decision engine: orchestrate one situation end to end.
//!
//! Per call: oracle equity, realization adjustment, board texture, pot
//! economics, opponent exploits, the blended strategy, EV per action, and
//! the final ranked recommendation. The only state across calls lives in
//! the opponent tracker, which is shared by handle.

use super::models::{DecisionRecord, EvBreakdown, Situation};
use crate::board;
use crate::cards::Street;
use crate::config::EngineConfig;
use crate::math;
use crate::opponent::{ExploitDetector, OpponentTracker, PlayerStats};
use crate::oracle::{EqrContext, EquityOracle};
use crate::range::{RangeManager, Scenario};
use crate::strategy::StrategyBlender;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Fold-equity prior against opponents without c-bet history.
const DEFAULT_FOLD_EQUITY: f64 = 0.5;

/// Confidence cap applied when the oracle failed and the range heuristic
/// stood in for real equity.
const FALLBACK_CONFIDENCE_CAP: f64 = 0.25;

/// The orchestrator. Construction wires the oracle and the opponent store
/// in by handle; everything else is rebuilt per call from the situation.
pub struct DecisionEngine {
    oracle: Arc<dyn EquityOracle>,
    tracker: Arc<OpponentTracker>,
    ranges: RangeManager,
    blender: StrategyBlender,
    detector: ExploitDetector,
    config: EngineConfig,
}

impl DecisionEngine {
    pub fn new(
        oracle: Arc<dyn EquityOracle>,
        tracker: Arc<OpponentTracker>,
        config: EngineConfig,
    ) -> DecisionEngine {
        let config = config.clamped();
        DecisionEngine {
            oracle,
            tracker,
            ranges: RangeManager::new(),
            blender: StrategyBlender::new(config.exploitation_level),
            detector: ExploitDetector::new(
                Default::default(),
                config.min_classify_hands,
                config.max_exploits,
            ),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tracker(&self) -> &Arc<OpponentTracker> {
        &self.tracker
    }

    pub fn ranges(&self) -> &RangeManager {
        &self.ranges
    }

    /// Produce the full decision record for one situation.
    pub fn decide(&self, situation: &Situation) -> DecisionRecord {
        let label = situation.hand_label();
        let street = situation.street();

        // 1. Raw equity from the oracle; its failure degrades to the range
        //    engine's heuristic rather than failing the decision.
        let deadline = self.config.oracle_timeout.map(|timeout| Instant::now() + timeout);
        let (raw_equity, equity_iterations, equity_degraded, oracle_fallback) = match self
            .oracle
            .equity(
                situation.hero(),
                situation.board(),
                situation.opponent_count(),
                self.config.default_iterations,
                deadline,
            ) {
            Ok(estimate) => (estimate.equity, estimate.iterations, estimate.degraded, false),
            Err(error) => {
                log::warn!("equity oracle failed ({error}), using range heuristic");
                (self.ranges.equity_vs_random(label), 0, true, true)
            }
        };

        // 2. Board texture and opponent skill feed equity realization.
        let board_analysis = board::analyze(situation.board());
        let opponent_skill = self.tracker.skill_estimate(situation.opponent_id());
        let realized_equity = self.oracle.realized_equity(
            raw_equity,
            &EqrContext {
                position_index: situation.position().seat_index(),
                stack: situation.stack(),
                pot: situation.pot(),
                texture_score: board_analysis.texture_score(),
                opponents: situation.opponent_count(),
                in_position: situation.in_position(),
                opponent_skill,
            },
        );

        // 3. Pot economics.
        let pot_odds = math::pot_odds(
            situation.call_amount(),
            situation.pot(),
            Some(situation.stack()),
        );
        let spr = math::analyze(situation.stack(), situation.pot());

        // 4. Opponent snapshot and exploit signals.
        let snapshot = situation.opponent_id().and_then(|id| self.tracker.snapshot(id));
        let exploits = snapshot
            .as_ref()
            .map(|stats| self.detector.detect(stats))
            .unwrap_or_default();
        let has_history = snapshot
            .as_ref()
            .is_some_and(|stats| stats.hands_played >= self.config.min_classify_hands);

        // 5. Blended strategy.
        let in_opening_range =
            self.ranges
                .is_in_range(label, situation.position(), Scenario::Rfi);
        let baseline = self.blender.baseline(street, in_opening_range, realized_equity);
        let action_distribution =
            self.blender
                .action_distribution(&baseline, &exploits, realized_equity);

        // 6. One raise amount threads through both the EV computation and
        //    the emitted recommendation.
        let effective_call = situation.effective_call();
        let recommended = self
            .blender
            .recommend_size(situation.pot(), realized_equity, &exploits, has_history);
        let raise_amount = recommended
            .max(self.config.raise_multiple * effective_call)
            .min(situation.stack());
        let raise_possible = situation.stack() > effective_call && raise_amount > 0.0;

        let fold_equity = estimate_fold_equity(snapshot.as_ref());

        let ev = EvBreakdown {
            fold: 0.0,
            call: math::ev_call(realized_equity, situation.pot(), effective_call),
            raise: raise_possible.then(|| {
                math::ev_raise(realized_equity, situation.pot(), raise_amount, fold_equity)
            }),
        };

        // 7. Selection and confidence.
        let (action, _) = ev.best();
        let mut confidence = ev.confidence();
        if oracle_fallback {
            confidence = (confidence * 0.5).min(FALLBACK_CONFIDENCE_CAP);
        }

        let size = match action {
            crate::strategy::AdvisedAction::Fold => 0.0,
            crate::strategy::AdvisedAction::Call => effective_call,
            crate::strategy::AdvisedAction::Raise => raise_amount,
        };

        DecisionRecord {
            raw_equity,
            equity_iterations,
            equity_degraded,
            oracle_fallback,
            realized_equity,
            pot_odds,
            spr,
            board: board_analysis,
            action_distribution,
            ev,
            action,
            size,
            confidence,
            exploits,
            generated_at: Utc::now(),
        }
    }
}

/// Fold-equity estimate: the opponent's observed flop fold-to-c-bet when
/// sampled, else the neutral prior.
fn estimate_fold_equity(snapshot: Option<&PlayerStats>) -> f64 {
    match snapshot {
        Some(stats) if stats.faced_cbet.get(Street::Flop) > 0 => stats.fold_to_cbet(Street::Flop),
        _ => DEFAULT_FOLD_EQUITY,
    }
}
