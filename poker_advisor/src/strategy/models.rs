//! Action distributions and baseline policy outputs.

use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Final advised action over the fold/call/raise axis. Checking collapses
/// into the call slot and betting into the raise slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum AdvisedAction {
    Fold,
    Call,
    Raise,
}

impl fmt::Display for AdvisedAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            AdvisedAction::Fold => "fold",
            AdvisedAction::Call => "call",
            AdvisedAction::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

/// Action named by a baseline policy entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum PolicyAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl PolicyAction {
    /// Which distribution slot the action occupies.
    pub fn slot(self) -> AdvisedAction {
        match self {
            PolicyAction::Fold => AdvisedAction::Fold,
            PolicyAction::Check | PolicyAction::Call => AdvisedAction::Call,
            PolicyAction::Bet | PolicyAction::Raise => AdvisedAction::Raise,
        }
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            PolicyAction::Fold => "fold",
            PolicyAction::Check => "check",
            PolicyAction::Call => "call",
            PolicyAction::Bet => "bet",
            PolicyAction::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

/// One baseline policy entry: the primary action, its frequency, and an
/// optional preflop open size in big blinds.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BaselineStrategy {
    pub action: PolicyAction,
    pub frequency: f64,
    pub open_size_bb: Option<f64>,
}

/// A mixed strategy over fold/call/raise, kept normalized to sum to one.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ActionDistribution {
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
}

impl ActionDistribution {
    pub fn new(fold: f64, call: f64, raise: f64) -> ActionDistribution {
        let mut dist = ActionDistribution { fold, call, raise };
        dist.normalize();
        dist
    }

    /// Clamp negatives to zero and rescale to a unit sum. A degenerate
    /// all-zero distribution becomes a pure fold.
    pub fn normalize(&mut self) {
        self.fold = self.fold.max(0.0);
        self.call = self.call.max(0.0);
        self.raise = self.raise.max(0.0);
        let total = self.fold + self.call + self.raise;
        if total > 0.0 {
            self.fold /= total;
            self.call /= total;
            self.raise /= total;
        } else {
            self.fold = 1.0;
        }
    }

    /// Highest-frequency action.
    pub fn mode(&self) -> AdvisedAction {
        if self.raise >= self.call && self.raise >= self.fold {
            AdvisedAction::Raise
        } else if self.call >= self.fold {
            AdvisedAction::Call
        } else {
            AdvisedAction::Fold
        }
    }

    /// Sample an action from the mixed strategy.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> AdvisedAction {
        let roll: f64 = rng.random();
        if roll < self.fold {
            AdvisedAction::Fold
        } else if roll < self.fold + self.call {
            AdvisedAction::Call
        } else {
            AdvisedAction::Raise
        }
    }

    pub fn sum(&self) -> f64 {
        self.fold + self.call + self.raise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_normalize_scales_to_unit_sum() {
        let dist = ActionDistribution::new(2.0, 1.0, 1.0);
        assert!((dist.sum() - 1.0).abs() < 1e-9);
        assert!((dist.fold - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_clamps_negatives() {
        let dist = ActionDistribution::new(-0.5, 0.5, 0.5);
        assert_eq!(dist.fold, 0.0);
        assert!((dist.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_distribution_folds() {
        let dist = ActionDistribution::new(0.0, 0.0, 0.0);
        assert_eq!(dist.fold, 1.0);
        assert_eq!(dist.mode(), AdvisedAction::Fold);
    }

    #[test]
    fn test_sampling_respects_weights() {
        let dist = ActionDistribution::new(0.0, 0.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..50 {
            assert_eq!(dist.sample(&mut rng), AdvisedAction::Raise);
        }
    }

    #[test]
    fn test_policy_action_slots() {
        assert_eq!(PolicyAction::Check.slot(), AdvisedAction::Call);
        assert_eq!(PolicyAction::Bet.slot(), AdvisedAction::Raise);
        assert_eq!(PolicyAction::Fold.slot(), AdvisedAction::Fold);
    }
}
