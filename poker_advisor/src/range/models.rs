//! Canonical hand labels and their static descriptors.

use crate::cards::{Card, CardError, Rank};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suitedness class of a two-card hand label.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum LabelKind {
    Pair,
    Suited,
    Offsuit,
}

/// One of the 169 canonical starting-hand labels ("AA", "AKs", "T9o").
///
/// Invariant: `high >= low`, and `kind == Pair` exactly when the ranks are
/// equal. Construction canonicalizes rank order so "9Ts" and "T9s" denote
/// the same label.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct HandLabel {
    high: Rank,
    low: Rank,
    kind: LabelKind,
}

impl HandLabel {
    pub fn pair(rank: Rank) -> HandLabel {
        HandLabel {
            high: rank,
            low: rank,
            kind: LabelKind::Pair,
        }
    }

    /// Build a non-pair label from two distinct ranks, canonicalizing order.
    /// Equal ranks collapse to the pair label regardless of `suited`.
    pub fn unpaired(a: Rank, b: Rank, suited: bool) -> HandLabel {
        if a == b {
            return HandLabel::pair(a);
        }
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        HandLabel {
            high,
            low,
            kind: if suited { LabelKind::Suited } else { LabelKind::Offsuit },
        }
    }

    /// Canonical label for a concrete two-card holding.
    pub fn from_cards(a: Card, b: Card) -> HandLabel {
        if a.rank() == b.rank() {
            HandLabel::pair(a.rank())
        } else {
            HandLabel::unpaired(a.rank(), b.rank(), a.suit() == b.suit())
        }
    }

    pub fn high(self) -> Rank {
        self.high
    }

    pub fn low(self) -> Rank {
        self.low
    }

    pub fn kind(self) -> LabelKind {
        self.kind
    }

    /// Number of concrete two-card combinations the label expands to.
    pub fn combos(self) -> u32 {
        match self.kind {
            LabelKind::Pair => 6,
            LabelKind::Suited => 4,
            LabelKind::Offsuit => 12,
        }
    }

    /// Whether the two labels share a rank (used for card-removal effects).
    pub fn shares_rank(self, other: HandLabel) -> bool {
        self.high == other.high
            || self.high == other.low
            || self.low == other.high
            || self.low == other.low
    }
}

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            LabelKind::Pair => write!(f, "{}{}", self.high, self.low),
            LabelKind::Suited => write!(f, "{}{}s", self.high, self.low),
            LabelKind::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

impl FromStr for HandLabel {
    type Err = CardError;

    fn from_str(s: &str) -> Result<HandLabel, CardError> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [a, b] => {
                let (ra, rb) = (Rank::from_code(*a)?, Rank::from_code(*b)?);
                if ra != rb {
                    // Two distinct ranks without a suitedness suffix are ambiguous
                    return Err(CardError::Malformed(s.to_string()));
                }
                Ok(HandLabel::pair(ra))
            }
            [a, b, m] if matches!(m.to_ascii_lowercase(), 's' | 'o') => {
                let (ra, rb) = (Rank::from_code(*a)?, Rank::from_code(*b)?);
                if ra == rb {
                    // A pair cannot be suited or offsuit
                    return Err(CardError::Malformed(s.to_string()));
                }
                Ok(HandLabel::unpaired(ra, rb, m.to_ascii_lowercase() == 's'))
            }
            _ => Err(CardError::Malformed(s.to_string())),
        }
    }
}

// Order labels by (high, low, kind) so range sets iterate deterministically.
impl Ord for HandLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.high, self.low, self.kind).cmp(&(other.high, other.low, other.kind))
    }
}

impl PartialOrd for HandLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Preflop strength tier of a starting hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum StrengthTier {
    /// Placeholder for hands absent from the matrix (malformed queries)
    Unknown,
    Weak,
    Marginal,
    Medium,
    Strong,
    Premium,
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            StrengthTier::Unknown => "unknown",
            StrengthTier::Weak => "weak",
            StrengthTier::Marginal => "marginal",
            StrengthTier::Medium => "medium",
            StrengthTier::Strong => "strong",
            StrengthTier::Premium => "premium",
        };
        write!(f, "{repr}")
    }
}

/// Static description of a starting hand: tier, postflop playability,
/// heuristic equity against a random hand, and blocker value.
///
/// The equity figure is a fast approximation; callers needing exact equity
/// go through the equity oracle instead.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct HandDescriptor {
    pub label: HandLabel,
    pub tier: StrengthTier,
    pub playability: f64,
    pub equity_vs_random: f64,
    pub blocker_value: f64,
}

impl HandDescriptor {
    /// Defined "unknown" descriptor with zero-confidence fields, returned
    /// for queries outside the matrix instead of an error.
    pub fn unknown(label: HandLabel) -> HandDescriptor {
        HandDescriptor {
            label,
            tier: StrengthTier::Unknown,
            playability: 0.0,
            equity_vs_random: 0.0,
            blocker_value: 0.0,
        }
    }
}
