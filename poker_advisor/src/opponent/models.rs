//! Per-opponent statistics and archetype classification.
//!
//! Records hold raw counts only; every ratio is derived on read so nothing
//! can go stale. Zero denominators always answer 0.0.

use crate::cards::Street;
use crate::range::Position;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Rolling-window length for bet sizes and action latencies.
pub const ROLLING_WINDOW: usize = 100;

/// Latency bands for timing tells, in seconds.
pub const FAST_ACTION_SECS: f64 = 2.0;
pub const SLOW_ACTION_SECS: f64 = 10.0;

/// An action as observed at the table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ObservedAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ObservedAction {
    /// Voluntarily puts money in the pot.
    pub fn is_voluntary(self) -> bool {
        matches!(self, ObservedAction::Call | ObservedAction::Bet | ObservedAction::Raise)
    }

    pub fn is_aggressive(self) -> bool {
        matches!(self, ObservedAction::Bet | ObservedAction::Raise)
    }
}

impl fmt::Display for ObservedAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            ObservedAction::Fold => "fold",
            ObservedAction::Check => "check",
            ObservedAction::Call => "call",
            ObservedAction::Bet => "bet",
            ObservedAction::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

/// Counter bucketed by postflop street.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct StreetCounter {
    pub flop: u32,
    pub turn: u32,
    pub river: u32,
}

impl StreetCounter {
    pub fn get(&self, street: Street) -> u32 {
        match street {
            Street::Preflop => 0,
            Street::Flop => self.flop,
            Street::Turn => self.turn,
            Street::River => self.river,
        }
    }

    pub fn bump(&mut self, street: Street) {
        match street {
            Street::Preflop => log::warn!("ignoring preflop bump on a postflop counter"),
            Street::Flop => self.flop += 1,
            Street::Turn => self.turn += 1,
            Street::River => self.river += 1,
        }
    }
}

/// Per-position voluntary participation counter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct PositionCounter {
    pub opportunities: u32,
    pub voluntary: u32,
}

/// Player archetypes, threshold-classified from derived ratios.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerArchetype {
    /// Below the minimum sample, or between the bands
    Undetermined,
    UltraTight,
    TightAggressive,
    LooseAggressive,
    TightPassive,
    LoosePassive,
    HyperAggressive,
}

impl PlayerArchetype {
    /// Skill prior for the equity-realization adjuster, in [0, 1].
    pub fn skill_estimate(self) -> f64 {
        match self {
            PlayerArchetype::TightAggressive => 0.8,
            PlayerArchetype::LooseAggressive => 0.75,
            PlayerArchetype::TightPassive => 0.4,
            PlayerArchetype::LoosePassive => 0.2,
            PlayerArchetype::HyperAggressive => 0.3,
            PlayerArchetype::UltraTight => 0.35,
            PlayerArchetype::Undetermined => 0.5,
        }
    }
}

impl fmt::Display for PlayerArchetype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            PlayerArchetype::Undetermined => "Undetermined",
            PlayerArchetype::UltraTight => "Ultra-Tight",
            PlayerArchetype::TightAggressive => "Tight-Aggressive",
            PlayerArchetype::LooseAggressive => "Loose-Aggressive",
            PlayerArchetype::TightPassive => "Tight-Passive",
            PlayerArchetype::LoosePassive => "Loose-Passive (Calling Station)",
            PlayerArchetype::HyperAggressive => "Hyper-Aggressive",
        };
        write!(f, "{repr}")
    }
}

/// Accumulated observations for one opponent.
///
/// Lives for the process session; counts only grow. Snapshots are cheap
/// clones handed to the exploit detector and reporting collaborators.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PlayerStats {
    pub hands_played: u32,
    pub vpip_count: u32,
    pub pfr_count: u32,
    pub three_bet_count: u32,
    pub three_bet_opportunities: u32,

    pub preflop_raises: u32,
    pub postflop_bets: u32,
    pub postflop_raises: u32,
    pub postflop_calls: u32,
    pub postflop_folds: u32,

    pub cbet_opportunities: StreetCounter,
    pub cbet_made: StreetCounter,
    pub faced_cbet: StreetCounter,
    pub folded_to_cbet: StreetCounter,

    pub showdowns: u32,
    pub showdowns_won: u32,
    pub went_to_showdown: u32,

    pub fast_actions: u32,
    pub slow_actions: u32,

    pub bet_sizes: VecDeque<f64>,
    pub raise_sizes: VecDeque<f64>,
    pub action_times: VecDeque<f64>,
    pub vpip_by_position: [PositionCounter; 6],
}

impl PlayerStats {
    pub fn vpip(&self) -> f64 {
        ratio(self.vpip_count, self.hands_played)
    }

    pub fn pfr(&self) -> f64 {
        ratio(self.pfr_count, self.hands_played)
    }

    pub fn three_bet_pct(&self) -> f64 {
        ratio(self.three_bet_count, self.three_bet_opportunities)
    }

    /// (bets + raises) / calls; with no calls yet, the raw aggressive count.
    pub fn aggression_factor(&self) -> f64 {
        let aggressive = self.postflop_bets + self.postflop_raises;
        if self.postflop_calls == 0 {
            return f64::from(aggressive);
        }
        f64::from(aggressive) / f64::from(self.postflop_calls)
    }

    pub fn aggression_frequency(&self) -> f64 {
        let aggressive = self.postflop_bets + self.postflop_raises;
        let total = aggressive + self.postflop_calls + self.postflop_folds;
        ratio(aggressive, total)
    }

    pub fn postflop_actions(&self) -> u32 {
        self.postflop_bets + self.postflop_raises + self.postflop_calls + self.postflop_folds
    }

    pub fn cbet_frequency(&self, street: Street) -> f64 {
        ratio(self.cbet_made.get(street), self.cbet_opportunities.get(street))
    }

    pub fn fold_to_cbet(&self, street: Street) -> f64 {
        ratio(self.folded_to_cbet.get(street), self.faced_cbet.get(street))
    }

    /// Went-to-showdown rate over voluntarily played hands.
    pub fn wtsd(&self) -> f64 {
        ratio(self.went_to_showdown, self.vpip_count)
    }

    /// Showdown win rate.
    pub fn wssd(&self) -> f64 {
        ratio(self.showdowns_won, self.showdowns)
    }

    pub fn average_bet_size(&self) -> f64 {
        mean(&self.bet_sizes)
    }

    pub fn average_raise_size(&self) -> f64 {
        mean(&self.raise_sizes)
    }

    pub fn average_action_time(&self) -> f64 {
        mean(&self.action_times)
    }

    pub fn position_vpip(&self, position: Position) -> f64 {
        let counter = self.vpip_by_position[position.table_index()];
        ratio(counter.voluntary, counter.opportunities)
    }

    pub fn note_position(&mut self, position: Position, voluntary: bool) {
        let counter = &mut self.vpip_by_position[position.table_index()];
        counter.opportunities += 1;
        if voluntary {
            counter.voluntary += 1;
        }
    }

    pub fn note_bet_size(&mut self, pot_fraction: f64) {
        push_bounded(&mut self.bet_sizes, pot_fraction);
    }

    pub fn note_raise_size(&mut self, pot_fraction: f64) {
        push_bounded(&mut self.raise_sizes, pot_fraction);
    }

    pub fn note_action_time(&mut self, seconds: f64) {
        push_bounded(&mut self.action_times, seconds);
        if seconds < FAST_ACTION_SECS {
            self.fast_actions += 1;
        } else if seconds > SLOW_ACTION_SECS {
            self.slow_actions += 1;
        }
    }

    /// Threshold classification over VPIP, PFR-to-VPIP ratio, aggression
    /// factor, and volume. Deterministic for identical histories.
    pub fn classify(&self, min_sample: u32) -> PlayerArchetype {
        if self.hands_played < min_sample {
            return PlayerArchetype::Undetermined;
        }

        let vpip = self.vpip();
        let pfr_ratio = if vpip > 0.0 { self.pfr() / vpip } else { 0.0 };
        let af = self.aggression_factor();

        if vpip < 0.15 {
            PlayerArchetype::UltraTight
        } else if vpip < 0.20 && pfr_ratio > 0.7 && af > 2.5 {
            PlayerArchetype::TightAggressive
        } else if vpip > 0.35 && af > 3.5 {
            PlayerArchetype::HyperAggressive
        } else if vpip > 0.35 && af < 1.5 {
            PlayerArchetype::LoosePassive
        } else if vpip > 0.28 && pfr_ratio > 0.65 && af > 2.0 {
            PlayerArchetype::LooseAggressive
        } else if vpip < 0.25 && af < 1.5 {
            PlayerArchetype::TightPassive
        } else {
            PlayerArchetype::Undetermined
        }
    }

    pub fn skill_estimate(&self, min_sample: u32) -> f64 {
        self.classify(min_sample).skill_estimate()
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

fn mean(window: &VecDeque<f64>) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

fn push_bounded(window: &mut VecDeque<f64>, value: f64) {
    if window.len() == ROLLING_WINDOW {
        window.pop_front();
    }
    window.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(vpip: u32, pfr: u32, bets: u32, calls: u32, hands: u32) -> PlayerStats {
        PlayerStats {
            hands_played: hands,
            vpip_count: vpip,
            pfr_count: pfr,
            postflop_bets: bets,
            postflop_calls: calls,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_denominators_answer_zero() {
        let stats = PlayerStats::default();
        assert_eq!(stats.vpip(), 0.0);
        assert_eq!(stats.three_bet_pct(), 0.0);
        assert_eq!(stats.fold_to_cbet(Street::Flop), 0.0);
        assert_eq!(stats.wtsd(), 0.0);
        assert_eq!(stats.average_bet_size(), 0.0);
        assert_eq!(stats.aggression_factor(), 0.0);
    }

    #[test]
    fn test_undetermined_below_minimum_sample() {
        let stats = stats_with(10, 8, 20, 2, 29);
        assert_eq!(stats.classify(30), PlayerArchetype::Undetermined);
    }

    #[test]
    fn test_classify_tag() {
        // 18% VPIP, PFR/VPIP ~0.9, AF 3.0
        let stats = stats_with(18, 16, 30, 10, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::TightAggressive);
    }

    #[test]
    fn test_classify_ultra_tight() {
        let stats = stats_with(10, 8, 5, 5, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::UltraTight);
    }

    #[test]
    fn test_classify_maniac() {
        let stats = stats_with(50, 40, 40, 10, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::HyperAggressive);
    }

    #[test]
    fn test_classify_calling_station() {
        let stats = stats_with(50, 5, 5, 40, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::LoosePassive);
    }

    #[test]
    fn test_classify_rock() {
        let stats = stats_with(22, 5, 5, 10, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::TightPassive);
    }

    #[test]
    fn test_classify_lag() {
        // 32% VPIP, PFR/VPIP ~0.75, AF 2.5
        let stats = stats_with(32, 24, 25, 10, 100);
        assert_eq!(stats.classify(30), PlayerArchetype::LooseAggressive);
    }

    #[test]
    fn test_classification_deterministic() {
        let stats = stats_with(18, 16, 30, 10, 100);
        assert_eq!(stats.classify(30), stats.classify(30));
    }

    #[test]
    fn test_aggression_factor_without_calls() {
        let stats = stats_with(0, 0, 7, 0, 10);
        assert_eq!(stats.aggression_factor(), 7.0);
    }

    #[test]
    fn test_rolling_window_bounded() {
        let mut stats = PlayerStats::default();
        for i in 0..(ROLLING_WINDOW + 50) {
            stats.note_bet_size(i as f64);
        }
        // Early entries evicted, so the mean reflects only the window
        assert!(stats.average_bet_size() >= 50.0);
    }

    #[test]
    fn test_timing_bands() {
        let mut stats = PlayerStats::default();
        stats.note_action_time(1.0);
        stats.note_action_time(5.0);
        stats.note_action_time(12.0);
        assert_eq!(stats.fast_actions, 1);
        assert_eq!(stats.slow_actions, 1);
    }

    #[test]
    fn test_position_vpip() {
        let mut stats = PlayerStats::default();
        stats.note_position(Position::Btn, true);
        stats.note_position(Position::Btn, true);
        stats.note_position(Position::Utg, false);
        assert_eq!(stats.position_vpip(Position::Btn), 1.0);
        assert_eq!(stats.position_vpip(Position::Utg), 0.0);
        assert_eq!(stats.position_vpip(Position::Sb), 0.0);
    }

    #[test]
    fn test_skill_estimates() {
        let tag = stats_with(18, 16, 30, 10, 100);
        assert_eq!(tag.skill_estimate(30), 0.8);
        assert_eq!(PlayerStats::default().skill_estimate(30), 0.5);
    }
}
