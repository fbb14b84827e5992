//! Bounded equity cache at the oracle adapter boundary.
//!
//! Keys combine hand, board, opponent count, and iteration budget. The
//! cache is a plain FIFO with a capacity bound; equity requests repeat
//! heavily within a hand, so recency sophistication buys little.

use super::{EquityEstimate, EquityOracle, OracleResult};
use crate::cards::Card;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Instant;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct CacheKey {
    hero: [u8; 2],
    board: Vec<u8>,
    opponents: usize,
    iterations: u32,
}

impl CacheKey {
    fn new(hero: [Card; 2], board: &[Card], opponents: usize, iterations: u32) -> CacheKey {
        // Hole cards are order-insensitive
        let mut ids = [hero[0].id(), hero[1].id()];
        ids.sort_unstable();
        CacheKey {
            hero: ids,
            board: board.iter().map(|c| c.id()).collect(),
            opponents,
            iterations,
        }
    }
}

/// Bounded FIFO map of equity results.
#[derive(Debug)]
pub struct EquityCache {
    capacity: usize,
    entries: HashMap<CacheKey, f64>,
    order: VecDeque<CacheKey>,
}

impl EquityCache {
    pub fn new(capacity: usize) -> EquityCache {
        EquityCache {
            capacity,
            entries: HashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, key: &CacheKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    fn insert(&mut self, key: CacheKey, equity: f64) {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return;
        }
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key.clone(), equity);
        self.order.push_back(key);
    }
}

/// Caching adapter around any equity oracle.
pub struct CachedOracle<O: EquityOracle> {
    inner: O,
    cache: Mutex<EquityCache>,
}

impl<O: EquityOracle> CachedOracle<O> {
    pub fn new(inner: O, capacity: usize) -> CachedOracle<O> {
        CachedOracle {
            inner,
            cache: Mutex::new(EquityCache::new(capacity)),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EquityCache> {
        self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<O: EquityOracle> EquityOracle for CachedOracle<O> {
    fn equity(
        &self,
        hero: [Card; 2],
        board: &[Card],
        opponents: usize,
        iterations: u32,
        deadline: Option<Instant>,
    ) -> OracleResult<EquityEstimate> {
        let key = CacheKey::new(hero, board, opponents, iterations);
        if let Some(equity) = self.lock().get(&key) {
            return Ok(EquityEstimate {
                equity,
                iterations,
                degraded: false,
            });
        }

        let estimate = self.inner.equity(hero, board, opponents, iterations, deadline)?;
        // Deadline-degraded estimates are not representative; keep them out
        if !estimate.degraded {
            self.lock().insert(key, estimate.equity);
        }
        Ok(estimate)
    }

    fn evaluate_seven(&self, cards: [Card; 7]) -> u32 {
        self.inner.evaluate_seven(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::oracle::MonteCarloOracle;

    fn hand(s: &str) -> [Card; 2] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1]]
    }

    #[test]
    fn test_repeat_queries_hit_the_cache() {
        let oracle = CachedOracle::new(MonteCarloOracle::seeded(1), 16);
        let first = oracle.equity(hand("AsKs"), &[], 1, 2_000, None).unwrap();
        assert_eq!(oracle.cached_entries(), 1);
        let second = oracle.equity(hand("AsKs"), &[], 1, 2_000, None).unwrap();
        assert_eq!(first.equity, second.equity);
        assert_eq!(oracle.cached_entries(), 1);
    }

    #[test]
    fn test_hole_card_order_shares_an_entry() {
        let oracle = CachedOracle::new(MonteCarloOracle::seeded(1), 16);
        oracle.equity(hand("AsKs"), &[], 1, 2_000, None).unwrap();
        oracle.equity(hand("KsAs"), &[], 1, 2_000, None).unwrap();
        assert_eq!(oracle.cached_entries(), 1);
    }

    #[test]
    fn test_distinct_requests_get_distinct_entries() {
        let oracle = CachedOracle::new(MonteCarloOracle::seeded(1), 16);
        oracle.equity(hand("AsKs"), &[], 1, 2_000, None).unwrap();
        oracle.equity(hand("AsKs"), &[], 2, 2_000, None).unwrap();
        oracle.equity(hand("AsKs"), &[], 1, 4_000, None).unwrap();
        assert_eq!(oracle.cached_entries(), 3);
    }

    #[test]
    fn test_capacity_bound_enforced() {
        let oracle = CachedOracle::new(MonteCarloOracle::seeded(1), 2);
        oracle.equity(hand("AsKs"), &[], 1, 1_000, None).unwrap();
        oracle.equity(hand("QdQc"), &[], 1, 1_000, None).unwrap();
        oracle.equity(hand("7d2c"), &[], 1, 1_000, None).unwrap();
        assert_eq!(oracle.cached_entries(), 2);
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let oracle = CachedOracle::new(MonteCarloOracle::seeded(1), 0);
        oracle.equity(hand("AsKs"), &[], 1, 1_000, None).unwrap();
        assert_eq!(oracle.cached_entries(), 0);
    }
}
