//! Exploit detection: statistically supported deviations from balanced
//! play, ranked by estimated EV gain.
//!
//! Each rule is independent and compares one derived ratio against a
//! calibrated band. The bands live in [`DetectionBands`] so they can be
//! retuned without touching any orchestration code.

use super::models::PlayerStats;
use crate::cards::Street;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Category of a detected deviation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ExploitKind {
    /// Folds to pressure too often; bluff and c-bet more
    OverFolds,
    /// Calls down too light; value bet wider, bluff less
    OverCalls,
    /// Barrels far beyond balance; widen the calling range
    HyperAggressive,
    /// Rarely bets or raises; apply pressure relentlessly
    Passive,
}

impl fmt::Display for ExploitKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            ExploitKind::OverFolds => "over-folds to pressure",
            ExploitKind::OverCalls => "over-calls",
            ExploitKind::HyperAggressive => "hyper-aggressive",
            ExploitKind::Passive => "passive",
        };
        write!(f, "{repr}")
    }
}

/// One actionable deviation with its recommended adjustment and the
/// estimated gain from exploiting it, in big blinds per opportunity.
#[derive(Clone, Debug, Serialize)]
pub struct ExploitSignal {
    pub kind: ExploitKind,
    pub adjustment: &'static str,
    pub ev_gain_bb: f64,
}

/// Calibrated bands for the detection rules. Deviations are measured past
/// the band edge; the EV estimate is the deviation scaled per rule family
/// and capped.
#[derive(Clone, Copy, Debug)]
pub struct DetectionBands {
    /// Flop fold-to-c-bet above this over-folds
    pub over_fold_threshold: f64,
    /// Flop fold-to-c-bet below this over-calls
    pub over_call_threshold: f64,
    /// Aggression factor above this is hyper-aggression
    pub hyper_aggression_threshold: f64,
    /// Aggression factor below this is passivity
    pub passivity_threshold: f64,
    /// bb per unit of fold-band deviation
    pub fold_band_ev_scale: f64,
    /// bb per unit of aggression-band deviation
    pub aggression_ev_scale: f64,
    /// Cap on any single estimate
    pub max_ev_gain: f64,
    /// Faced c-bets needed before the fold bands apply
    pub min_faced_cbets: u32,
    /// Postflop actions needed before the aggression bands apply
    pub min_postflop_actions: u32,
}

impl Default for DetectionBands {
    fn default() -> Self {
        DetectionBands {
            over_fold_threshold: 0.65,
            over_call_threshold: 0.35,
            hyper_aggression_threshold: 3.5,
            passivity_threshold: 1.0,
            fold_band_ev_scale: 12.0,
            aggression_ev_scale: 4.0,
            max_ev_gain: 6.0,
            min_faced_cbets: 5,
            min_postflop_actions: 10,
        }
    }
}

/// Exploit detector over stats snapshots.
#[derive(Clone, Copy, Debug)]
pub struct ExploitDetector {
    bands: DetectionBands,
    min_sample: u32,
    max_signals: usize,
}

impl ExploitDetector {
    pub fn new(bands: DetectionBands, min_sample: u32, max_signals: usize) -> ExploitDetector {
        ExploitDetector {
            bands,
            min_sample,
            max_signals,
        }
    }

    /// Detect deviations in the snapshot, highest estimated EV gain first,
    /// capped at the configured count. Thin samples yield nothing.
    pub fn detect(&self, stats: &PlayerStats) -> Vec<ExploitSignal> {
        if stats.hands_played < self.min_sample {
            return Vec::new();
        }

        let bands = &self.bands;
        let mut signals = Vec::new();

        let faced = stats.faced_cbet.get(Street::Flop);
        if faced >= bands.min_faced_cbets {
            let fold_ratio = stats.fold_to_cbet(Street::Flop);
            if fold_ratio > bands.over_fold_threshold {
                signals.push(ExploitSignal {
                    kind: ExploitKind::OverFolds,
                    adjustment: "Raise continuation-bet and bluff frequency; small sizings buy the same folds",
                    ev_gain_bb: self.fold_band_gain(fold_ratio - bands.over_fold_threshold),
                });
            } else if fold_ratio < bands.over_call_threshold {
                signals.push(ExploitSignal {
                    kind: ExploitKind::OverCalls,
                    adjustment: "Widen value bets and cut bluffs; size up when ahead",
                    ev_gain_bb: self.fold_band_gain(bands.over_call_threshold - fold_ratio),
                });
            }
        }

        if stats.postflop_actions() >= bands.min_postflop_actions {
            let af = stats.aggression_factor();
            if af > bands.hyper_aggression_threshold {
                signals.push(ExploitSignal {
                    kind: ExploitKind::HyperAggressive,
                    adjustment: "Widen the calling range and let them keep barreling",
                    ev_gain_bb: self.aggression_band_gain(af - bands.hyper_aggression_threshold),
                });
            } else if af < bands.passivity_threshold {
                signals.push(ExploitSignal {
                    kind: ExploitKind::Passive,
                    adjustment: "Bet and raise more often; their aggression means strength",
                    ev_gain_bb: self.aggression_band_gain(bands.passivity_threshold - af),
                });
            }
        }

        // Stable sort keeps rule order among equal estimates
        signals.sort_by(|a, b| {
            b.ev_gain_bb.partial_cmp(&a.ev_gain_bb).unwrap_or(Ordering::Equal)
        });
        signals.truncate(self.max_signals);
        signals
    }

    fn fold_band_gain(&self, deviation: f64) -> f64 {
        (deviation * self.bands.fold_band_ev_scale).min(self.bands.max_ev_gain)
    }

    fn aggression_band_gain(&self, deviation: f64) -> f64 {
        (deviation * self.bands.aggression_ev_scale).min(self.bands.max_ev_gain)
    }
}

impl Default for ExploitDetector {
    fn default() -> Self {
        ExploitDetector::new(DetectionBands::default(), 30, 3)
    }
}
