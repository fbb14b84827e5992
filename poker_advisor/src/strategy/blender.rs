//! The strategy blender: fuse the baseline policy with opponent-specific
//! adjustments into one mixed action distribution.
//!
//! The exploitation level scales how far the blend leans on the opponent
//! model: 0 reproduces the baseline exactly, 1 applies the full
//! adjustment. Adjustment deltas are plain data so they can be retuned
//! without touching the orchestration.

use super::models::{ActionDistribution, AdvisedAction, BaselineStrategy, PolicyAction};
use crate::cards::Street;
use crate::opponent::{ExploitKind, ExploitSignal};

/// Equity above which the baseline bets for value postflop.
const VALUE_EQUITY: f64 = 0.65;
/// Equity above which the baseline checks rather than folds.
const SHOWDOWN_EQUITY: f64 = 0.45;

/// Equity above which an over-caller is punished with value raises rather
/// than fewer bluffs.
const VALUE_SPOT_EQUITY: f64 = 0.55;

/// Exploits considered per decision.
const BLENDED_EXPLOITS: usize = 3;

/// Default preflop open size in big blinds.
const OPEN_SIZE_BB: f64 = 2.5;

/// Strategy blender parameterized by exploitation level.
#[derive(Clone, Copy, Debug)]
pub struct StrategyBlender {
    exploitation_level: f64,
}

impl StrategyBlender {
    /// Level is clamped into [0, 1]; the engine must stay decision-capable
    /// on out-of-bounds configuration.
    pub fn new(exploitation_level: f64) -> StrategyBlender {
        StrategyBlender {
            exploitation_level: exploitation_level.clamp(0.0, 1.0),
        }
    }

    pub fn exploitation_level(&self) -> f64 {
        self.exploitation_level
    }

    /// Baseline policy: preflop is binary raise-or-fold on range
    /// membership; postflop a three-way split on equity thresholds.
    pub fn baseline(&self, street: Street, in_opening_range: bool, equity: f64) -> BaselineStrategy {
        if street == Street::Preflop {
            return if in_opening_range {
                BaselineStrategy {
                    action: PolicyAction::Raise,
                    frequency: 1.0,
                    open_size_bb: Some(OPEN_SIZE_BB),
                }
            } else {
                BaselineStrategy {
                    action: PolicyAction::Fold,
                    frequency: 1.0,
                    open_size_bb: None,
                }
            };
        }

        if equity > VALUE_EQUITY {
            BaselineStrategy {
                action: PolicyAction::Bet,
                frequency: 0.85,
                open_size_bb: None,
            }
        } else if equity > SHOWDOWN_EQUITY {
            BaselineStrategy {
                action: PolicyAction::Check,
                frequency: 0.70,
                open_size_bb: None,
            }
        } else {
            BaselineStrategy {
                action: PolicyAction::Fold,
                frequency: 0.60,
                open_size_bb: None,
            }
        }
    }

    /// Shape the baseline into a distribution, blend in the top exploit
    /// adjustments at the exploitation level, and renormalize.
    pub fn action_distribution(
        &self,
        baseline: &BaselineStrategy,
        exploits: &[ExploitSignal],
        equity: f64,
    ) -> ActionDistribution {
        let mut dist = shape_baseline(baseline);

        let level = self.exploitation_level;
        if level > 0.0 {
            for exploit in exploits.iter().take(BLENDED_EXPLOITS) {
                let (d_fold, d_call, d_raise) = adjustment_deltas(exploit.kind, equity);
                dist.fold += d_fold * level;
                dist.call += d_call * level;
                dist.raise += d_raise * level;
            }
        }

        dist.normalize();
        dist
    }

    /// Recommended bet/raise size in chips. Opponent-specific overrides
    /// apply only with enough history; otherwise geometric default sizing
    /// scaled by equity.
    pub fn recommend_size(
        &self,
        pot: f64,
        equity: f64,
        exploits: &[ExploitSignal],
        has_history: bool,
    ) -> f64 {
        if has_history {
            for exploit in exploits {
                match exploit.kind {
                    // Over-folders give up to small bets just the same
                    ExploitKind::OverFolds => return pot * 0.33,
                    // Over-callers pay off big value sizings
                    ExploitKind::OverCalls => return pot * 0.75,
                    _ => {}
                }
            }
        }

        if equity > 0.6 { pot * 0.66 } else { pot * 0.50 }
    }
}

impl Default for StrategyBlender {
    fn default() -> Self {
        StrategyBlender::new(0.7)
    }
}

/// Spread a single-action baseline over the three slots. Aggressive
/// remainders lean toward folding (bets that do not happen are mostly
/// give-ups); passive remainders split evenly.
fn shape_baseline(baseline: &BaselineStrategy) -> ActionDistribution {
    let f = baseline.frequency.clamp(0.0, 1.0);
    let remainder = 1.0 - f;
    let mut dist = match baseline.action.slot() {
        AdvisedAction::Fold => ActionDistribution {
            fold: f,
            call: remainder / 2.0,
            raise: remainder / 2.0,
        },
        AdvisedAction::Call => ActionDistribution {
            fold: remainder / 2.0,
            call: f,
            raise: remainder / 2.0,
        },
        AdvisedAction::Raise => ActionDistribution {
            fold: remainder * 0.7,
            call: remainder * 0.3,
            raise: f,
        },
    };
    dist.normalize();
    dist
}

/// Frequency deltas per exploit category, before exploitation-level
/// scaling. Over-calls are punished differently in value spots and bluff
/// spots.
fn adjustment_deltas(kind: ExploitKind, equity: f64) -> (f64, f64, f64) {
    match kind {
        ExploitKind::OverFolds => (-0.10, 0.0, 0.20),
        ExploitKind::OverCalls => {
            if equity > VALUE_SPOT_EQUITY {
                (0.0, 0.0, 0.15)
            } else {
                (0.10, 0.0, 0.0)
            }
        }
        ExploitKind::HyperAggressive => (-0.15, 0.20, 0.0),
        ExploitKind::Passive => (0.0, 0.0, 0.15),
    }
}
