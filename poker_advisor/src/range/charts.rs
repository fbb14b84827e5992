//! Situational preflop charts keyed by position and scenario.
//!
//! These are strategic priors, not computed optima: they are built once at
//! startup from the range grammar and looked up, never mutated.

use super::grammar::{RangeSet, expand};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Table position. The numeric index feeds the equity-realization
/// position factor table (nine-handed layout).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Position {
    Utg,
    Mp,
    Co,
    Btn,
    Sb,
    Bb,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Utg,
        Position::Mp,
        Position::Co,
        Position::Btn,
        Position::Sb,
        Position::Bb,
    ];

    /// Seat index on a nine-handed layout, used by the EQR adjuster.
    pub fn seat_index(self) -> usize {
        match self {
            Position::Utg => 0,
            Position::Mp => 3,
            Position::Co => 5,
            Position::Btn => 6,
            Position::Sb => 7,
            Position::Bb => 8,
        }
    }

    /// Dense index used for per-position counters.
    pub fn table_index(self) -> usize {
        match self {
            Position::Utg => 0,
            Position::Mp => 1,
            Position::Co => 2,
            Position::Btn => 3,
            Position::Sb => 4,
            Position::Bb => 5,
        }
    }

    /// Whether the seat usually acts last postflop.
    pub fn is_late(self) -> bool {
        matches!(self, Position::Co | Position::Btn)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Position::Utg => "UTG",
            Position::Mp => "MP",
            Position::Co => "CO",
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Position, String> {
        match s.to_ascii_uppercase().as_str() {
            "UTG" => Ok(Position::Utg),
            "MP" => Ok(Position::Mp),
            "CO" => Ok(Position::Co),
            "BTN" => Ok(Position::Btn),
            "SB" => Ok(Position::Sb),
            "BB" => Ok(Position::Bb),
            other => Err(format!("unknown position {other:?}")),
        }
    }
}

/// Preflop scenario a chart applies to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Scenario {
    /// Raise first in (unopened pot)
    Rfi,
    /// Big blind facing a small-blind open
    VsSb,
    /// Facing a three-bet
    Vs3Bet,
    /// Big blind facing a late-position steal
    VsSteal,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Scenario::Rfi => "RFI",
            Scenario::VsSb => "vs SB",
            Scenario::Vs3Bet => "vs 3-bet",
            Scenario::VsSteal => "vs steal",
        };
        write!(f, "{repr}")
    }
}

/// The chart book: `(position, scenario)` to label set.
#[derive(Debug)]
pub struct RangeCharts {
    charts: HashMap<(Position, Scenario), RangeSet>,
}

impl RangeCharts {
    /// Standard chart book.
    pub fn standard() -> RangeCharts {
        let entries: [((Position, Scenario), &str); 8] = [
            ((Position::Utg, Scenario::Rfi), "AA-77,AKs-ATs,AKo-AJo,KQs-KJs"),
            ((Position::Mp, Scenario::Rfi), "AA-66,AKs-A9s,AKo-ATo,KQs-KTs,KQo"),
            (
                (Position::Co, Scenario::Rfi),
                "AA-22,AKs-A5s,AKo-A9o,KQs-K9s,KQo-KTo,QJs-Q9s,QJo,JTs-J9s,T9s-T8s,98s",
            ),
            (
                (Position::Btn, Scenario::Rfi),
                "AA-22,AXs,KXs,QXs,JXs,TXs,9Xs,8Xs,7Xs,6Xs,5Xs,AXo,KXo,QXo",
            ),
            (
                (Position::Sb, Scenario::Rfi),
                "AA-22,AKs-A2s,AKo-A8o,KQs-K7s,KQo-K9o,QJs-Q8s,QJo-QTo,JTs-J9s,T9s-T8s,98s-97s,87s",
            ),
            (
                (Position::Bb, Scenario::VsSb),
                "AA-22,AXs,AXo,KXs,KXo,QXs,QXo,JXs,JXo,TXs,9Xs,8Xs,7Xs,6Xs,5Xs",
            ),
            ((Position::Btn, Scenario::Vs3Bet), "AA-QQ,AKs,AKo"),
            (
                (Position::Bb, Scenario::VsSteal),
                "AA-22,AXs,AXo,KXs,KXo,QXs,Q9o+,JXs,J9o+,TXs,T9o,9Xs,8Xs,7Xs,6Xs,5Xs,4Xs",
            ),
        ];

        let charts = entries
            .into_iter()
            .map(|(key, expr)| (key, expand(expr)))
            .collect();
        RangeCharts { charts }
    }

    pub fn get(&self, position: Position, scenario: Scenario) -> Option<&RangeSet> {
        self.charts.get(&(position, scenario))
    }

    /// Whether the label belongs to the chart for the situation. Missing
    /// charts answer `false` rather than erroring.
    pub fn contains(
        &self,
        label: super::models::HandLabel,
        position: Position,
        scenario: Scenario,
    ) -> bool {
        self.get(position, scenario).is_some_and(|set| set.contains(&label))
    }
}

impl Default for RangeCharts {
    fn default() -> Self {
        Self::standard()
    }
}
