//! Board texture analysis: classify community cards and derive draw and
//! danger metadata plus continuation-bet priors.
//!
//! The analysis is a read-only snapshot of the current board. It is cheap
//! to recompute and must be recomputed whenever the board changes.

use crate::cards::{Card, Rank, Suit};
use serde::Serialize;
use std::fmt;

/// Texture classes, ordered driest to wettest.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TextureClass {
    Dry,
    SemiWet,
    Wet,
    UltraWet,
}

impl TextureClass {
    /// Coarse score consumed by the equity-realization adjuster
    /// (0 = dry, 1 = semi-wet, 2 = wet or worse).
    pub fn score(self) -> u8 {
        match self {
            TextureClass::Dry => 0,
            TextureClass::SemiWet => 1,
            TextureClass::Wet | TextureClass::UltraWet => 2,
        }
    }
}

impl fmt::Display for TextureClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            TextureClass::Dry => "dry",
            TextureClass::SemiWet => "semi-wet",
            TextureClass::Wet => "wet",
            TextureClass::UltraWet => "ultra-wet",
        };
        write!(f, "{repr}")
    }
}

/// Draws the board itself offers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DrawKind {
    FlushDraw,
    OpenEnded,
    Gutshot,
    Combo,
}

/// Cards that would shift the nuts on a future street: suits completing a
/// flush and ranks completing a five-card run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DangerCards {
    pub suits: Vec<Suit>,
    pub ranks: Vec<Rank>,
}

impl DangerCards {
    pub fn is_empty(&self) -> bool {
        self.suits.is_empty() && self.ranks.is_empty()
    }
}

/// Full texture snapshot for one board.
#[derive(Clone, Debug, Serialize)]
pub struct BoardAnalysis {
    pub texture: TextureClass,
    pub connectivity: f64,
    pub flush_draw: bool,
    pub straight_draw: bool,
    pub gutshot: bool,
    pub paired: bool,
    pub trips: bool,
    pub high_cards: usize,
    pub draws: Vec<DrawKind>,
    pub dangerous_turns: DangerCards,
    pub dangerous_rivers: DangerCards,
    pub equity_realization_factor: f64,
    pub cbet_frequency: f64,
    pub cbet_size: f64,
}

impl BoardAnalysis {
    /// Canonical neutral analysis for boards under three cards.
    pub fn neutral() -> BoardAnalysis {
        BoardAnalysis {
            texture: TextureClass::Dry,
            connectivity: 0.0,
            flush_draw: false,
            straight_draw: false,
            gutshot: false,
            paired: false,
            trips: false,
            high_cards: 0,
            draws: Vec::new(),
            dangerous_turns: DangerCards::default(),
            dangerous_rivers: DangerCards::default(),
            equity_realization_factor: 1.0,
            cbet_frequency: 0.66,
            cbet_size: 0.5,
        }
    }

    pub fn texture_score(&self) -> u8 {
        self.texture.score()
    }
}

/// Analyze a board of three to five cards. Fewer than three cards returns
/// the canonical neutral analysis.
pub fn analyze(board: &[Card]) -> BoardAnalysis {
    if board.len() < 3 {
        return BoardAnalysis::neutral();
    }

    let values: Vec<u8> = board.iter().map(|c| c.rank().value()).collect();
    let mut distinct: Vec<u8> = values.clone();
    distinct.sort_unstable();
    distinct.dedup();

    let paired = distinct.len() != values.len();
    let trips = Rank::ALL
        .iter()
        .any(|r| values.iter().filter(|v| **v == r.value()).count() >= 3);
    let high_cards = values.iter().filter(|v| **v >= 10).count();

    let mut suit_counts = [0usize; 4];
    for card in board {
        suit_counts[card.suit().index() as usize] += 1;
    }
    let flush_draw = suit_counts.iter().any(|n| *n >= 2);

    let (open_ended, gutshot) = straight_draws(&distinct);
    let straight_draw = open_ended || gutshot;

    let connectivity = connectivity_score(&distinct);
    let texture = classify(connectivity, flush_draw, straight_draw, paired);

    let mut draws = Vec::new();
    if flush_draw {
        draws.push(DrawKind::FlushDraw);
    }
    if open_ended {
        draws.push(DrawKind::OpenEnded);
    }
    if gutshot {
        draws.push(DrawKind::Gutshot);
    }
    if flush_draw && straight_draw {
        draws.push(DrawKind::Combo);
    }

    // The set for the street one card away uses the looser two-suit
    // threshold; the street two cards away needs three of a suit already.
    let dangerous_turns = danger_cards(&suit_counts, &distinct, if board.len() == 3 { 2 } else { 3 });
    let dangerous_rivers = danger_cards(&suit_counts, &distinct, if board.len() == 4 { 2 } else { 3 });

    let (equity_realization_factor, cbet_frequency, cbet_size) = strategy_priors(texture, paired);

    BoardAnalysis {
        texture,
        connectivity,
        flush_draw,
        straight_draw,
        gutshot,
        paired,
        trips,
        high_cards,
        draws,
        dangerous_turns,
        dangerous_rivers,
        equity_realization_factor,
        cbet_frequency,
        cbet_size,
    }
}

/// Inverse of the mean gap between sorted distinct ranks, clamped to [0, 1].
fn connectivity_score(distinct: &[u8]) -> f64 {
    if distinct.len() < 2 {
        return 0.0;
    }
    let gap_sum: u32 = distinct.windows(2).map(|w| u32::from(w[1] - w[0])).sum();
    let mean_gap = f64::from(gap_sum) / (distinct.len() - 1) as f64;
    (1.0 / mean_gap).min(1.0)
}

/// Open draws come from any adjacent gap of two or less; a gap of exactly
/// three leaves a gutshot.
fn straight_draws(distinct: &[u8]) -> (bool, bool) {
    let mut open = false;
    let mut gut = false;
    for w in distinct.windows(2) {
        match w[1] - w[0] {
            0..=2 => open = true,
            3 => gut = true,
            _ => {}
        }
    }
    (open, gut)
}

fn classify(connectivity: f64, flush_draw: bool, straight_draw: bool, paired: bool) -> TextureClass {
    let mut score: i32 = 0;
    if connectivity > 0.7 {
        score += 2;
    } else if connectivity > 0.5 {
        score += 1;
    }
    if flush_draw {
        score += 1;
    }
    if straight_draw {
        score += 1;
    }
    if paired {
        score -= 1;
    }

    match score {
        s if s >= 3 => TextureClass::UltraWet,
        2 => TextureClass::Wet,
        1 => TextureClass::SemiWet,
        _ => TextureClass::Dry,
    }
}

fn danger_cards(suit_counts: &[usize; 4], distinct: &[u8], min_suit_count: usize) -> DangerCards {
    let suits = Suit::ALL
        .into_iter()
        .filter(|s| suit_counts[s.index() as usize] >= min_suit_count)
        .collect();

    let ranks = (2u8..=14)
        .filter(|candidate| completes_run(distinct, *candidate))
        .filter_map(Rank::from_value)
        .collect();

    DangerCards { suits, ranks }
}

/// Whether adding the candidate rank yields five consecutive ranks.
fn completes_run(distinct: &[u8], candidate: u8) -> bool {
    let mut merged: Vec<u8> = distinct.to_vec();
    if !merged.contains(&candidate) {
        merged.push(candidate);
        merged.sort_unstable();
    }
    merged.windows(5).any(|w| w[4] - w[0] == 4)
}

fn strategy_priors(texture: TextureClass, paired: bool) -> (f64, f64, f64) {
    let (mut eqr, mut cbet_freq, size) = match texture {
        TextureClass::Dry => (1.05, 0.75, 0.33),
        TextureClass::SemiWet => (1.00, 0.65, 0.50),
        TextureClass::Wet => (0.95, 0.55, 0.66),
        TextureClass::UltraWet => (0.90, 0.45, 0.75),
    };
    if paired {
        eqr *= 1.02;
        cbet_freq += 0.05;
    }
    (eqr, cbet_freq, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn board(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    #[test]
    fn test_under_three_cards_is_neutral() {
        let analysis = analyze(&board("AsKd"));
        assert_eq!(analysis.texture, TextureClass::Dry);
        assert_eq!(analysis.equity_realization_factor, 1.0);
        assert_eq!(analysis.cbet_frequency, 0.66);
        assert!(analysis.dangerous_turns.is_empty());
    }

    #[test]
    fn test_dry_rainbow_board() {
        let analysis = analyze(&board("Ks8d3c"));
        assert_eq!(analysis.texture, TextureClass::Dry);
        assert!(!analysis.flush_draw);
        assert!(analysis.connectivity < 0.5);
        assert_eq!(analysis.cbet_size, 0.33);
    }

    #[test]
    fn test_connected_two_tone_board_is_wet() {
        let analysis = analyze(&board("9h8h7d"));
        assert!(analysis.texture >= TextureClass::Wet);
        assert!(analysis.flush_draw);
        assert!(analysis.straight_draw);
        assert_eq!(analysis.connectivity, 1.0);
    }

    #[test]
    fn test_paired_board_dampens_texture() {
        let wet = analyze(&board("9h8h7d"));
        let paired = analyze(&board("9h9d7d"));
        assert!(paired.paired);
        assert!(paired.texture < wet.texture);
        assert!(paired.cbet_frequency > 0.0);
    }

    #[test]
    fn test_trips_detected() {
        let analysis = analyze(&board("9h9d9c"));
        assert!(analysis.trips);
        assert!(analysis.paired);
    }

    #[test]
    fn test_two_tone_flop_flags_turn_flush_danger() {
        let analysis = analyze(&board("Ah9h2c"));
        assert!(analysis.dangerous_turns.suits.contains(&Suit::Heart));
        // A river flush needs a third heart first
        assert!(!analysis.dangerous_rivers.suits.contains(&Suit::Heart));
    }

    #[test]
    fn test_monotone_flop_flags_both_streets() {
        let analysis = analyze(&board("Ah9h4h"));
        assert!(analysis.dangerous_turns.suits.contains(&Suit::Heart));
        assert!(analysis.dangerous_rivers.suits.contains(&Suit::Heart));
    }

    #[test]
    fn test_straight_completion_ranks() {
        // JT98 board: a queen or a seven completes a five-card run
        let analysis = analyze(&board("Jh Tc 9d 8s"));
        let ranks = &analysis.dangerous_rivers.ranks;
        assert!(ranks.contains(&Rank::Queen));
        assert!(ranks.contains(&Rank::Seven));
        assert!(!ranks.contains(&Rank::King));
        assert!(!ranks.contains(&Rank::Two));
    }

    #[test]
    fn test_no_run_completion_possible_on_sparse_flop() {
        let analysis = analyze(&board("Ah9h2c"));
        assert!(analysis.dangerous_turns.ranks.is_empty());
    }

    #[test]
    fn test_cbet_priors_monotone_in_texture() {
        let dry = analyze(&board("Ks8d3c"));
        let wet = analyze(&board("9h8h7d"));
        assert!(dry.cbet_frequency > wet.cbet_frequency);
        assert!(dry.cbet_size < wet.cbet_size);
        assert!(dry.equity_realization_factor > wet.equity_realization_factor);
    }

    #[test]
    fn test_high_card_count() {
        let analysis = analyze(&board("AhKdTc"));
        assert_eq!(analysis.high_cards, 3);
    }
}
