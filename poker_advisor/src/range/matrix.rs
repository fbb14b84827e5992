//! The 169-hand matrix: one static descriptor per canonical label.

use super::models::{HandDescriptor, HandLabel, StrengthTier};
use crate::cards::Rank;
use std::collections::HashMap;

/// Immutable lookup table of all 169 starting-hand descriptors, built once
/// at startup.
#[derive(Debug)]
pub struct HandMatrix {
    hands: HashMap<HandLabel, HandDescriptor>,
}

impl HandMatrix {
    pub fn new() -> HandMatrix {
        let mut hands = HashMap::with_capacity(169);

        for rank in Rank::ALL {
            let label = HandLabel::pair(rank);
            hands.insert(label, pair_descriptor(label, rank));
        }

        for (i, low) in Rank::ALL.iter().enumerate() {
            for high in &Rank::ALL[i + 1..] {
                for suited in [true, false] {
                    let label = HandLabel::unpaired(*high, *low, suited);
                    hands.insert(label, unpaired_descriptor(label, *high, *low, suited));
                }
            }
        }

        HandMatrix { hands }
    }

    pub fn get(&self, label: HandLabel) -> Option<&HandDescriptor> {
        self.hands.get(&label)
    }

    /// Descriptor for the label, or the defined "unknown" descriptor when
    /// the label is absent. Decisions must still be producible under
    /// partial information, so this never errors.
    pub fn descriptor(&self, label: HandLabel) -> HandDescriptor {
        self.hands
            .get(&label)
            .copied()
            .unwrap_or_else(|| HandDescriptor::unknown(label))
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

impl Default for HandMatrix {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_descriptor(label: HandLabel, rank: Rank) -> HandDescriptor {
    let idx = rank.index();
    let tier = if idx >= 11 {
        StrengthTier::Premium
    } else if idx >= 8 {
        StrengthTier::Strong
    } else if idx >= 5 {
        StrengthTier::Medium
    } else {
        StrengthTier::Marginal
    };
    HandDescriptor {
        label,
        tier,
        playability: if idx >= 8 { 0.85 } else { 0.7 },
        equity_vs_random: (0.50 + f64::from(idx) * 0.027).min(0.85),
        blocker_value: if idx >= 11 { 0.9 } else { 0.6 },
    }
}

fn unpaired_descriptor(label: HandLabel, high: Rank, low: Rank, suited: bool) -> HandDescriptor {
    let (hi, lo) = (high.index(), low.index());
    let gap = hi - lo;

    let tier = if hi == 12 && lo >= 11 {
        StrengthTier::Strong
    } else if hi == 12 && lo >= 9 {
        StrengthTier::Medium
    } else if gap <= 1 && suited {
        StrengthTier::Medium
    } else {
        StrengthTier::Marginal
    };

    let mut playability: f64 = if suited { 0.8 } else { 0.6 };
    if gap <= 1 {
        // Adjacent ranks play better: more straights available
        playability += 0.1;
    }
    if hi >= 11 {
        playability += 0.05;
    }

    let mut equity = 0.35 + f64::from(hi) * 0.02 + f64::from(lo) * 0.01;
    if suited {
        equity += 0.03;
    }

    HandDescriptor {
        label,
        tier,
        playability: playability.min(1.0),
        equity_vs_random: equity.min(0.70),
        blocker_value: if hi == 12 { 0.8 } else { 0.5 },
    }
}
