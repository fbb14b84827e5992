//! Range engine: hand labels, the 169-hand matrix, the range grammar, and
//! the situational chart book.
//!
//! Everything is built once at startup and immutable afterwards. Strength
//! figures are fast heuristics; exact equity goes through the oracle.

pub mod charts;
pub mod grammar;
pub mod matrix;
pub mod models;

pub use charts::{Position, RangeCharts, Scenario};
pub use grammar::{RangeSet, expand};
pub use matrix::HandMatrix;
pub use models::{HandDescriptor, HandLabel, LabelKind, StrengthTier};

use crate::cards::Card;
use serde::Serialize;

/// Advice for a preflop hand against a chart.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PlayAdvice {
    pub should_play: bool,
    pub tier: StrengthTier,
    pub playability: f64,
    pub equity_vs_random: f64,
}

/// Card-removal effect of the hero's cards on an opponent range.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BlockerEffect {
    pub blocked_combos: f64,
    pub total_combos: u32,
    pub blocked_fraction: f64,
}

/// The range engine facade: matrix plus chart book.
#[derive(Debug, Default)]
pub struct RangeManager {
    matrix: HandMatrix,
    charts: RangeCharts,
}

impl RangeManager {
    pub fn new() -> RangeManager {
        RangeManager {
            matrix: HandMatrix::new(),
            charts: RangeCharts::standard(),
        }
    }

    /// Expand a range expression (see [`grammar`]).
    pub fn expand(&self, expr: &str) -> RangeSet {
        expand(expr)
    }

    /// Whether the label is in the chart for the situation.
    pub fn is_in_range(&self, label: HandLabel, position: Position, scenario: Scenario) -> bool {
        self.charts.contains(label, position, scenario)
    }

    pub fn chart(&self, position: Position, scenario: Scenario) -> Option<&RangeSet> {
        self.charts.get(position, scenario)
    }

    /// Descriptor lookup; absent labels yield the defined unknown
    /// descriptor rather than an error.
    pub fn descriptor(&self, label: HandLabel) -> HandDescriptor {
        self.matrix.descriptor(label)
    }

    /// Heuristic equity against a random hand.
    pub fn equity_vs_random(&self, label: HandLabel) -> f64 {
        self.matrix.descriptor(label).equity_vs_random
    }

    pub fn combinatoric_count(&self, label: HandLabel) -> u32 {
        label.combos()
    }

    /// Play/fold advice for a hand against the situational chart.
    pub fn should_play(&self, label: HandLabel, position: Position, scenario: Scenario) -> PlayAdvice {
        let descriptor = self.matrix.descriptor(label);
        PlayAdvice {
            should_play: self.is_in_range(label, position, scenario),
            tier: descriptor.tier,
            playability: descriptor.playability,
            equity_vs_random: descriptor.equity_vs_random,
        }
    }

    /// Rough range-versus-range equity from descriptor strength ratios,
    /// skipping label pairs that share a rank. Empty or fully overlapping
    /// matchups answer an even split.
    pub fn range_vs_range_equity(&self, hero: &RangeSet, villain: &RangeSet) -> f64 {
        let mut total = 0.0;
        let mut count = 0u32;
        for hero_label in hero {
            for villain_label in villain {
                if hero_label.shares_rank(*villain_label) {
                    continue;
                }
                let mine = self.matrix.descriptor(*hero_label).equity_vs_random;
                let theirs = self.matrix.descriptor(*villain_label).equity_vs_random;
                if mine + theirs > 0.0 {
                    total += mine / (mine + theirs);
                    count += 1;
                }
            }
        }
        if count > 0 { total / f64::from(count) } else { 0.5 }
    }

    /// How much of an opponent range the hero's cards block. Labels that
    /// share a rank with a hero card lose half their combos.
    pub fn blocker_effect(&self, hero: [Card; 2], range: &RangeSet) -> BlockerEffect {
        let hero_ranks = [hero[0].rank(), hero[1].rank()];
        let mut blocked = 0.0;
        let mut total = 0u32;
        for label in range {
            let combos = label.combos();
            total += combos;
            if hero_ranks.contains(&label.high()) || hero_ranks.contains(&label.low()) {
                blocked += f64::from(combos) * 0.5;
            }
        }
        BlockerEffect {
            blocked_combos: blocked,
            total_combos: total,
            blocked_fraction: if total > 0 { blocked / f64::from(total) } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn label(s: &str) -> HandLabel {
        s.parse().unwrap()
    }

    #[test]
    fn test_should_play_in_and_out_of_range() {
        let ranges = RangeManager::new();
        let advice = ranges.should_play(label("AKs"), Position::Utg, Scenario::Rfi);
        assert!(advice.should_play);
        assert_eq!(advice.tier, StrengthTier::Strong);

        let advice = ranges.should_play(label("72o"), Position::Utg, Scenario::Rfi);
        assert!(!advice.should_play);
        assert!(advice.equity_vs_random > 0.0);
    }

    #[test]
    fn test_range_vs_range_favors_stronger_side() {
        let ranges = RangeManager::new();
        let strong = ranges.expand("AA-QQ");
        let weak = ranges.expand("76s,65s,54s");
        let equity = ranges.range_vs_range_equity(&strong, &weak);
        assert!(equity > 0.5, "premium pairs should be favored, got {equity}");
    }

    #[test]
    fn test_range_vs_range_empty_is_even() {
        let ranges = RangeManager::new();
        assert_eq!(ranges.range_vs_range_equity(&RangeSet::new(), &RangeSet::new()), 0.5);
    }

    #[test]
    fn test_blocker_effect_with_ace() {
        let ranges = RangeManager::new();
        let hero = [
            Card::from_parts(Rank::Ace, Suit::Spade),
            Card::from_parts(Rank::King, Suit::Spade),
        ];
        let villain = ranges.expand("AA,AKs,QJs");
        let effect = ranges.blocker_effect(hero, &villain);
        // AA (6) and AKs (4) are rank-blocked at half weight, QJs is clean
        assert_eq!(effect.total_combos, 14);
        assert!((effect.blocked_combos - 5.0).abs() < 1e-9);
        assert!(effect.blocked_fraction > 0.3);
    }

    #[test]
    fn test_combinatoric_count_delegates_to_label() {
        let ranges = RangeManager::new();
        assert_eq!(ranges.combinatoric_count(label("99")), 6);
        assert_eq!(ranges.combinatoric_count(label("98s")), 4);
        assert_eq!(ranges.combinatoric_count(label("98o")), 12);
    }
}
