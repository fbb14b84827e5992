//! Card codec: compact card identifiers and their rank/suit notation.
//!
//! A [`Card`] is a single byte in `[0, 52)` laid out as `suit * 13 + rank`,
//! so the codec round-trips with the numeric representation the equity
//! oracle consumes. Everything here is a pure, immutable value type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of cards in a standard deck.
pub const DECK_SIZE: u8 = 52;

/// Card codec errors. Malformed input upstream is normalized by callers;
/// these only surface at explicit parse/construction boundaries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    /// Identifier outside `[0, 52)`
    #[error("card id {0} out of range")]
    InvalidId(u8),

    /// Unrecognized rank character
    #[error("unknown rank character '{0}'")]
    InvalidRank(char),

    /// Unrecognized suit character
    #[error("unknown suit character '{0}'")]
    InvalidSuit(char),

    /// Card string is not a rank char followed by a suit char
    #[error("malformed card string \"{0}\"")]
    Malformed(String),
}

/// Result type for card codec operations
pub type CardResult<T> = Result<T, CardError>;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Suit index in `[0, 4)`, matching the card id layout.
    pub fn index(self) -> u8 {
        match self {
            Suit::Spade => 0,
            Suit::Heart => 1,
            Suit::Diamond => 2,
            Suit::Club => 3,
        }
    }

    pub fn from_index(idx: u8) -> Option<Suit> {
        Suit::ALL.get(idx as usize).copied()
    }

    /// One-letter code used in hand notation ("As", "Kh").
    pub fn code(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
            Suit::Club => 'c',
        }
    }

    pub fn from_code(c: char) -> CardResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spade),
            'h' => Ok(Suit::Heart),
            'd' => Ok(Suit::Diamond),
            'c' => Ok(Suit::Club),
            other => Err(CardError::InvalidSuit(other)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spade => '♠',
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Rank index in `[0, 13)` (deuce = 0, ace = 12).
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(idx: u8) -> Option<Rank> {
        Rank::ALL.get(idx as usize).copied()
    }

    /// Numeric rank value (deuce = 2 ... ace = 14), used by gap analysis
    /// and straight detection.
    pub fn value(self) -> u8 {
        self.index() + 2
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        (2..=14).contains(&value).then(|| Rank::ALL[(value - 2) as usize])
    }

    pub fn code(self) -> char {
        b"23456789TJQKA"[self.index() as usize] as char
    }

    pub fn from_code(c: char) -> CardResult<Rank> {
        let idx = "23456789TJQKA"
            .find(c.to_ascii_uppercase())
            .ok_or(CardError::InvalidRank(c))?;
        Ok(Rank::ALL[idx])
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A card as a compact identifier: `suit * 13 + rank`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(u8);

impl Card {
    pub fn new(id: u8) -> CardResult<Card> {
        if id < DECK_SIZE {
            Ok(Card(id))
        } else {
            Err(CardError::InvalidId(id))
        }
    }

    pub fn from_parts(rank: Rank, suit: Suit) -> Card {
        Card(suit.index() * 13 + rank.index())
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::ALL[(self.0 % 13) as usize]
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[(self.0 / 13) as usize]
    }

    /// Two-letter notation, e.g. "As" or "Kh".
    pub fn code(self) -> String {
        format!("{}{}", self.rank().code(), self.suit().code())
    }

    /// Every card of the deck in id order.
    pub fn deck() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE).map(Card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Card> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => Ok(Card::from_parts(Rank::from_code(r)?, Suit::from_code(u)?)),
            _ => Err(CardError::Malformed(s.to_string())),
        }
    }
}

/// Parse a run of concatenated cards, e.g. "AsKd2c". Commas and whitespace
/// between cards are tolerated.
pub fn parse_cards(s: &str) -> CardResult<Vec<Card>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if cleaned.len() % 2 != 0 {
        return Err(CardError::Malformed(s.to_string()));
    }
    let bytes: Vec<char> = cleaned.chars().collect();
    bytes
        .chunks(2)
        .map(|pair| Ok(Card::from_parts(Rank::from_code(pair[0])?, Suit::from_code(pair[1])?)))
        .collect()
}

/// Betting street, derived from how many community cards are out.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Street implied by the number of board cards. Anything below a full
    /// flop counts as preflop.
    pub fn from_board_len(len: usize) -> Street {
        match len {
            0..=2 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        write!(f, "{repr}")
    }
}
