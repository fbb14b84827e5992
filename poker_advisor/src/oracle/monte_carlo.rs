//! The default equity oracle: Monte Carlo completion sampling.
//!
//! Each iteration deals the missing board cards and every opponent's hole
//! cards from the live deck, scores the showdowns, and tallies wins with
//! ties worth half. Sampling runs in fixed-size chunks so a deadline can
//! cut the estimate short without discarding completed work.

use super::{EquityEstimate, EquityOracle, OracleError, OracleResult, eval};
use crate::cards::{Card, DECK_SIZE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Iterations between deadline checks.
const CHUNK: u32 = 2_048;

/// Most opponents a sample can deal from one deck.
const MAX_OPPONENTS: usize = 9;

/// Monte Carlo equity oracle.
///
/// The base seed is mixed with the request parameters per call, so the
/// oracle is deterministic for a fixed seed and request while staying
/// `Sync` without interior mutability.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloOracle {
    seed: u64,
}

impl MonteCarloOracle {
    /// Oracle with an entropy-derived seed.
    pub fn new() -> MonteCarloOracle {
        MonteCarloOracle {
            seed: rand::rng().random(),
        }
    }

    /// Oracle with a fixed seed for reproducible estimates.
    pub fn seeded(seed: u64) -> MonteCarloOracle {
        MonteCarloOracle { seed }
    }

    fn request_seed(&self, hero: [Card; 2], board: &[Card], opponents: usize, iterations: u32) -> u64 {
        let mut mix = self.seed ^ 0x9e37_79b9_7f4a_7c15;
        for card in [hero[0], hero[1]].iter().chain(board) {
            mix = splitmix(mix ^ u64::from(card.id()));
        }
        splitmix(mix ^ ((opponents as u64) << 32) ^ u64::from(iterations))
    }
}

impl Default for MonteCarloOracle {
    fn default() -> Self {
        MonteCarloOracle::new()
    }
}

impl EquityOracle for MonteCarloOracle {
    fn equity(
        &self,
        hero: [Card; 2],
        board: &[Card],
        opponents: usize,
        iterations: u32,
        deadline: Option<Instant>,
    ) -> OracleResult<EquityEstimate> {
        if board.len() > 5 {
            return Err(OracleError::InvalidRequest(format!(
                "board of {} cards",
                board.len()
            )));
        }
        let mut seen = [false; DECK_SIZE as usize];
        for card in [hero[0], hero[1]].iter().chain(board) {
            if std::mem::replace(&mut seen[card.id() as usize], true) {
                return Err(OracleError::InvalidRequest(format!("duplicate card {card}")));
            }
        }

        let opponents = opponents.clamp(1, MAX_OPPONENTS);
        let iterations = iterations.max(1);

        // The live deck: everything not already dealt
        let mut deck: Vec<Card> = Card::deck().filter(|c| !seen[c.id() as usize]).collect();
        let draws_per_iter = (5 - board.len()) + 2 * opponents;

        let mut rng = SmallRng::seed_from_u64(self.request_seed(hero, board, opponents, iterations));

        let mut wins = 0u64;
        let mut ties = 0u64;
        let mut done = 0u32;
        let mut degraded = false;

        let mut hero_cards = [hero[0]; 7];
        hero_cards[1] = hero[1];
        let mut opp_cards = [hero[0]; 7];

        'outer: while done < iterations {
            let batch = CHUNK.min(iterations - done);
            for _ in 0..batch {
                // Partial Fisher-Yates: only the cards this iteration draws
                for i in 0..draws_per_iter {
                    let j = rng.random_range(i..deck.len());
                    deck.swap(i, j);
                }

                let mut next = 0;
                for (slot, card) in board.iter().enumerate() {
                    hero_cards[2 + slot] = *card;
                }
                for slot in board.len()..5 {
                    hero_cards[2 + slot] = deck[next];
                    next += 1;
                }
                opp_cards[2..7].copy_from_slice(&hero_cards[2..7]);

                let hero_score = eval::evaluate_seven(hero_cards);
                let mut best_opp = 0u32;
                for _ in 0..opponents {
                    opp_cards[0] = deck[next];
                    opp_cards[1] = deck[next + 1];
                    next += 2;
                    best_opp = best_opp.max(eval::evaluate_seven(opp_cards));
                }

                if hero_score > best_opp {
                    wins += 1;
                } else if hero_score == best_opp {
                    ties += 1;
                }
            }
            done += batch;

            if let Some(deadline) = deadline {
                if done < iterations && Instant::now() >= deadline {
                    degraded = true;
                    log::warn!("equity sample cut short at {done}/{iterations} iterations");
                    break 'outer;
                }
            }
        }

        Ok(EquityEstimate {
            equity: (wins as f64 + ties as f64 * 0.5) / f64::from(done),
            iterations: done,
            degraded,
        })
    }

    fn evaluate_seven(&self, cards: [Card; 7]) -> u32 {
        eval::evaluate_seven(cards)
    }
}

fn splitmix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
