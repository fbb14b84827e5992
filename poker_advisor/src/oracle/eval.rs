//! Seven-card showdown scoring.
//!
//! Produces a single `u32` where a higher score always beats a lower one:
//! the hand category occupies the top bits and up to five 4-bit tiebreak
//! values (card ranks, most significant first) fill the rest.

use crate::cards::Card;

const CATEGORY_SHIFT: u32 = 20;

const HIGH_CARD: u32 = 0;
const ONE_PAIR: u32 = 1;
const TWO_PAIR: u32 = 2;
const TRIPS: u32 = 3;
const STRAIGHT: u32 = 4;
const FLUSH: u32 = 5;
const FULL_HOUSE: u32 = 6;
const QUADS: u32 = 7;
const STRAIGHT_FLUSH: u32 = 8;

/// Score the best five-card hand out of five to seven cards.
pub fn evaluate(cards: &[Card]) -> u32 {
    debug_assert!((5..=7).contains(&cards.len()));

    // rank_counts indexed by rank value 2..=14
    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    for card in cards {
        rank_counts[card.rank().value() as usize] += 1;
        suit_counts[card.suit().index() as usize] += 1;
    }

    let flush_suit = suit_counts.iter().position(|n| *n >= 5);

    if let Some(suit) = flush_suit {
        let mut suited_mask = 0u16;
        for card in cards {
            if card.suit().index() as usize == suit {
                suited_mask |= 1 << card.rank().value();
            }
        }
        if let Some(high) = straight_high(suited_mask) {
            return pack(STRAIGHT_FLUSH, &[high]);
        }
    }

    // Group ranks by multiplicity, highest rank first within each group
    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    let mut singles = Vec::new();
    for value in (2..=14u8).rev() {
        match rank_counts[value as usize] {
            4 => quads.push(value),
            3 => trips.push(value),
            2 => pairs.push(value),
            1 => singles.push(value),
            _ => {}
        }
    }

    if let Some(&quad) = quads.first() {
        let kicker = best_kicker(&rank_counts, &[quad]);
        return pack(QUADS, &[quad, kicker]);
    }

    // Two sets of trips make a full house with the lower set as the pair
    if let Some(&three) = trips.first() {
        let pair_rank = trips.get(1).copied().or_else(|| pairs.first().copied());
        if let Some(pair) = pair_rank {
            return pack(FULL_HOUSE, &[three, pair]);
        }
    }

    if let Some(suit) = flush_suit {
        let mut suited: Vec<u8> = cards
            .iter()
            .filter(|c| c.suit().index() as usize == suit)
            .map(|c| c.rank().value())
            .collect();
        suited.sort_unstable_by(|a, b| b.cmp(a));
        return pack(FLUSH, &suited[..5]);
    }

    let mut rank_mask = 0u16;
    for value in 2..=14u8 {
        if rank_counts[value as usize] > 0 {
            rank_mask |= 1 << value;
        }
    }
    if let Some(high) = straight_high(rank_mask) {
        return pack(STRAIGHT, &[high]);
    }

    if let Some(&three) = trips.first() {
        let mut values = vec![three];
        values.extend(singles.iter().take(2));
        return pack(TRIPS, &values);
    }

    if pairs.len() >= 2 {
        let kicker = best_kicker(&rank_counts, &pairs[..2]);
        return pack(TWO_PAIR, &[pairs[0], pairs[1], kicker]);
    }

    if let Some(&pair) = pairs.first() {
        let mut values = vec![pair];
        values.extend(singles.iter().take(3));
        return pack(ONE_PAIR, &values);
    }

    pack(HIGH_CARD, &singles[..5.min(singles.len())])
}

/// Highest straight top card in a rank bitmask, or `None`. The wheel
/// (A-5) counts with a five-high top.
fn straight_high(rank_mask: u16) -> Option<u8> {
    // An ace also plays low
    let mask = if rank_mask & (1 << 14) != 0 {
        rank_mask | (1 << 1)
    } else {
        rank_mask
    };
    for high in (5..=14u8).rev() {
        let window = 0b11111u16 << (high - 4);
        if mask & window == window {
            return Some(high);
        }
    }
    None
}

fn best_kicker(rank_counts: &[u8; 15], exclude: &[u8]) -> u8 {
    (2..=14u8)
        .rev()
        .find(|v| rank_counts[*v as usize] > 0 && !exclude.contains(v))
        .unwrap_or(0)
}

fn pack(category: u32, values: &[u8]) -> u32 {
    let mut score = category << CATEGORY_SHIFT;
    let mut shift = 16i32;
    for value in values.iter().take(5) {
        score |= u32::from(*value) << shift;
        shift -= 4;
    }
    score
}

/// Score exactly seven cards (the oracle trait entry point).
pub fn evaluate_seven(cards: [Card; 7]) -> u32 {
    evaluate(&cards)
}
