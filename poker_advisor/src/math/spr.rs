//! Stack-to-pot ratio analysis: commitment depth and the strategic posture
//! it implies.

use serde::Serialize;
use std::fmt;

/// Commitment depth bands. A ratio sitting exactly on a boundary belongs
/// to the higher band.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SprCategory {
    Committed,
    Short,
    Medium,
    Deep,
    VeryDeep,
}

impl fmt::Display for SprCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            SprCategory::Committed => "committed",
            SprCategory::Short => "short",
            SprCategory::Medium => "medium",
            SprCategory::Deep => "deep",
            SprCategory::VeryDeep => "very deep",
        };
        write!(f, "{repr}")
    }
}

/// SPR snapshot used to bias the strategy blender.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SprAnalysis {
    pub spr: f64,
    pub category: SprCategory,
    pub strategy_hint: &'static str,
    pub is_committed: bool,
}

/// Raw stack-to-pot ratio. An empty pot reads as effectively bottomless.
pub fn spr(effective_stack: f64, pot: f64) -> f64 {
    if pot <= 0.0 {
        return 100.0;
    }
    effective_stack / pot
}

/// Categorize the ratio and derive the posture hint and commitment flag.
pub fn analyze(effective_stack: f64, pot: f64) -> SprAnalysis {
    let ratio = spr(effective_stack, pot);

    let (category, strategy_hint, is_committed) = if ratio < 1.0 {
        (
            SprCategory::Committed,
            "Push or fold with any decent equity",
            true,
        )
    } else if ratio < 3.0 {
        (
            SprCategory::Short,
            "Play straightforward, value-heavy",
            ratio < 1.5,
        )
    } else if ratio < 7.0 {
        (
            SprCategory::Medium,
            "Standard play, consider implied odds",
            false,
        )
    } else if ratio < 13.0 {
        (
            SprCategory::Deep,
            "Focus on playability and position",
            false,
        )
    } else {
        (
            SprCategory::VeryDeep,
            "Speculative hands gain value, avoid marginal spots",
            false,
        )
    };

    SprAnalysis {
        spr: ratio,
        category,
        strategy_hint,
        is_committed,
    }
}

/// Equity above which stacking off is fine at this depth.
pub fn commitment_threshold(spr: f64) -> f64 {
    if spr < 1.0 {
        0.33
    } else if spr < 2.0 {
        0.40
    } else if spr < 3.0 {
        0.45
    } else {
        0.50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spr_of_equal_stack_and_pot_is_short() {
        let analysis = analyze(100.0, 100.0);
        assert_eq!(analysis.spr, 1.0);
        assert_eq!(analysis.category, SprCategory::Short);
        assert!(analysis.is_committed);
    }

    #[test]
    fn test_boundaries_go_to_higher_band() {
        assert_eq!(analyze(300.0, 100.0).category, SprCategory::Medium);
        assert_eq!(analyze(700.0, 100.0).category, SprCategory::Deep);
        assert_eq!(analyze(1300.0, 100.0).category, SprCategory::VeryDeep);
    }

    #[test]
    fn test_committed_band() {
        let analysis = analyze(50.0, 100.0);
        assert_eq!(analysis.category, SprCategory::Committed);
        assert!(analysis.is_committed);
    }

    #[test]
    fn test_short_commitment_cutoff() {
        assert!(analyze(140.0, 100.0).is_committed);
        assert!(!analyze(160.0, 100.0).is_committed);
    }

    #[test]
    fn test_empty_pot_reads_very_deep() {
        let analysis = analyze(1000.0, 0.0);
        assert_eq!(analysis.spr, 100.0);
        assert_eq!(analysis.category, SprCategory::VeryDeep);
    }

    #[test]
    fn test_commitment_threshold_bands() {
        assert_eq!(commitment_threshold(0.5), 0.33);
        assert_eq!(commitment_threshold(1.5), 0.40);
        assert_eq!(commitment_threshold(2.5), 0.45);
        assert_eq!(commitment_threshold(10.0), 0.50);
    }
}
