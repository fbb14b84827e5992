//! The opponent registry: an explicitly owned store of per-opponent stats.
//!
//! The tracker is shared by handle (`Arc`) between the decision engine and
//! whoever feeds it table observations. Lookups take the outer registry
//! lock briefly; mutation happens under a per-opponent lock, so concurrent
//! classification reads interleave safely with the single producer stream
//! per opponent id.

use super::models::{ObservedAction, PlayerArchetype, PlayerStats};
use crate::cards::Street;
use crate::range::Position;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Opaque opponent identifier supplied by the capture collaborator.
pub type OpponentId = String;

type SharedStats = Arc<RwLock<PlayerStats>>;

/// Session-lifetime store of opponent statistics.
#[derive(Debug)]
pub struct OpponentTracker {
    players: RwLock<HashMap<OpponentId, SharedStats>>,
    min_sample: u32,
}

impl OpponentTracker {
    pub fn new(min_classify_hands: u32) -> OpponentTracker {
        OpponentTracker {
            players: RwLock::new(HashMap::new()),
            min_sample: min_classify_hands,
        }
    }

    pub fn min_sample(&self) -> u32 {
        self.min_sample
    }

    /// Number of opponents observed so far.
    pub fn tracked_count(&self) -> usize {
        read(&self.players).len()
    }

    pub fn hands_seen(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |stats| read(&stats).hands_played)
    }

    /// Record a preflop action. `facing_raise` marks a three-bet
    /// opportunity.
    pub fn record_preflop(
        &self,
        id: &str,
        action: ObservedAction,
        position: Position,
        facing_raise: bool,
    ) {
        let entry = self.entry(id);
        let mut stats = write(&entry);
        stats.hands_played += 1;
        let voluntary = action.is_voluntary();
        if voluntary {
            stats.vpip_count += 1;
        }
        stats.note_position(position, voluntary);
        if action.is_aggressive() {
            stats.pfr_count += 1;
            stats.preflop_raises += 1;
        }
        if facing_raise {
            stats.three_bet_opportunities += 1;
            if action == ObservedAction::Raise {
                stats.three_bet_count += 1;
            }
        }
    }

    /// Record a postflop action with its sizing context.
    pub fn record_postflop(
        &self,
        id: &str,
        action: ObservedAction,
        street: Street,
        amount: f64,
        pot: f64,
    ) {
        log::trace!("postflop {action} on {street} by {id}");
        let entry = self.entry(id);
        let mut stats = write(&entry);
        match action {
            ObservedAction::Bet => {
                stats.postflop_bets += 1;
                if amount > 0.0 && pot > 0.0 {
                    stats.note_bet_size(amount / pot);
                }
            }
            ObservedAction::Raise => {
                stats.postflop_raises += 1;
                if amount > 0.0 && pot > 0.0 {
                    stats.note_raise_size(amount / pot);
                }
            }
            ObservedAction::Call => stats.postflop_calls += 1,
            ObservedAction::Fold => stats.postflop_folds += 1,
            ObservedAction::Check => {}
        }
    }

    /// Record a continuation-bet opportunity and whether it was taken.
    pub fn record_cbet(&self, id: &str, street: Street, made: bool) {
        let entry = self.entry(id);
        let mut stats = write(&entry);
        stats.cbet_opportunities.bump(street);
        if made {
            stats.cbet_made.bump(street);
        }
    }

    /// Record facing a continuation bet and whether the player folded.
    pub fn record_faced_cbet(&self, id: &str, street: Street, folded: bool) {
        let entry = self.entry(id);
        let mut stats = write(&entry);
        stats.faced_cbet.bump(street);
        if folded {
            stats.folded_to_cbet.bump(street);
        }
    }

    pub fn record_showdown(&self, id: &str, won: bool) {
        let entry = self.entry(id);
        let mut stats = write(&entry);
        stats.showdowns += 1;
        stats.went_to_showdown += 1;
        if won {
            stats.showdowns_won += 1;
        }
    }

    pub fn record_action_timing(&self, id: &str, seconds: f64) {
        let entry = self.entry(id);
        write(&entry).note_action_time(seconds);
    }

    /// Point-in-time copy of an opponent's stats, if ever observed.
    pub fn snapshot(&self, id: &str) -> Option<PlayerStats> {
        self.get(id).map(|stats| read(&stats).clone())
    }

    /// Archetype for the opponent; unseen ids are `Undetermined`.
    pub fn classify(&self, id: &str) -> PlayerArchetype {
        self.get(id)
            .map_or(PlayerArchetype::Undetermined, |stats| read(&stats).classify(self.min_sample))
    }

    /// Skill prior in [0, 1]; unknown or unseen opponents sit at the
    /// neutral 0.5.
    pub fn skill_estimate(&self, id: Option<&str>) -> f64 {
        match id.and_then(|id| self.get(id)) {
            Some(stats) => read(&stats).skill_estimate(self.min_sample),
            None => 0.5,
        }
    }

    fn get(&self, id: &str) -> Option<SharedStats> {
        read(&self.players).get(id).cloned()
    }

    fn entry(&self, id: &str) -> SharedStats {
        if let Some(stats) = self.get(id) {
            return stats;
        }
        let mut players = write(&self.players);
        players.entry(id.to_string()).or_default().clone()
    }
}

// Poisoning only happens if a writer panicked; the counters stay usable,
// so recover the guard instead of propagating the panic.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_on_first_observation() {
        let tracker = OpponentTracker::new(30);
        assert_eq!(tracker.tracked_count(), 0);
        tracker.record_preflop("villain", ObservedAction::Call, Position::Bb, false);
        assert_eq!(tracker.tracked_count(), 1);
        assert_eq!(tracker.hands_seen("villain"), 1);
    }

    #[test]
    fn test_unseen_opponent_neutral_defaults() {
        let tracker = OpponentTracker::new(30);
        assert_eq!(tracker.classify("ghost"), PlayerArchetype::Undetermined);
        assert_eq!(tracker.skill_estimate(Some("ghost")), 0.5);
        assert_eq!(tracker.skill_estimate(None), 0.5);
        assert!(tracker.snapshot("ghost").is_none());
    }

    #[test]
    fn test_preflop_counters() {
        let tracker = OpponentTracker::new(30);
        tracker.record_preflop("v", ObservedAction::Raise, Position::Btn, false);
        tracker.record_preflop("v", ObservedAction::Fold, Position::Utg, false);
        tracker.record_preflop("v", ObservedAction::Raise, Position::Co, true);

        let stats = tracker.snapshot("v").unwrap();
        assert_eq!(stats.hands_played, 3);
        assert_eq!(stats.vpip_count, 2);
        assert_eq!(stats.pfr_count, 2);
        assert_eq!(stats.three_bet_opportunities, 1);
        assert_eq!(stats.three_bet_count, 1);
    }

    #[test]
    fn test_postflop_sizing_windows() {
        let tracker = OpponentTracker::new(30);
        tracker.record_postflop("v", ObservedAction::Bet, Street::Flop, 50.0, 100.0);
        tracker.record_postflop("v", ObservedAction::Call, Street::Turn, 0.0, 100.0);

        let stats = tracker.snapshot("v").unwrap();
        assert_eq!(stats.postflop_bets, 1);
        assert_eq!(stats.postflop_calls, 1);
        assert!((stats.average_bet_size() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cbet_ratios_through_tracker() {
        let tracker = OpponentTracker::new(30);
        for i in 0..10 {
            tracker.record_faced_cbet("v", Street::Flop, i < 9);
        }
        let stats = tracker.snapshot("v").unwrap();
        assert!((stats.fold_to_cbet(Street::Flop) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        use std::thread;

        let tracker = Arc::new(OpponentTracker::new(30));
        let writer = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for _ in 0..200 {
                    tracker.record_preflop("v", ObservedAction::Call, Position::Bb, false);
                }
            })
        };
        let reader = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for _ in 0..200 {
                    let _ = tracker.classify("v");
                    let _ = tracker.skill_estimate(Some("v"));
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(tracker.hands_seen("v"), 200);
    }
}
