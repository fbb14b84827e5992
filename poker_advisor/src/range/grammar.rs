//! Declarative range grammar: comma-delimited tokens expanded to label sets.
//!
//! Supported token forms:
//! - plain labels: `AKs`, `77`, `T9o`
//! - pair spans: `AA-TT` (inclusive both bounds)
//! - anchored spans: `AKs-ATs` (same high rank and suitedness class,
//!   low rank spans inclusive)
//! - plus tokens: `A9s+` (low rank up to, excluding, the anchor rank) and
//!   `TT+` (pairs up to aces inclusive)
//! - wildcards: `AXs`, `KXo` (all twelve other ranks, canonicalized)
//!
//! Tokens are independent and duplicates collapse (set semantics). An
//! unrecognized token is dropped silently so a partially malformed range
//! still yields a usable set.

use super::models::{HandLabel, LabelKind};
use crate::cards::Rank;
use std::collections::BTreeSet;

/// A set of canonical hand labels with deterministic iteration order.
pub type RangeSet = BTreeSet<HandLabel>;

/// Expand a range expression into its label set.
pub fn expand(expr: &str) -> RangeSet {
    let mut out = RangeSet::new();
    for token in expr.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match expand_token(token) {
            Some(labels) => out.extend(labels),
            None => log::debug!("dropping unknown range token: {token:?}"),
        }
    }
    out
}

fn expand_token(token: &str) -> Option<Vec<HandLabel>> {
    if let Some(base) = token.strip_suffix('+') {
        expand_plus(base)
    } else if token.contains('-') {
        expand_span(token)
    } else if token.chars().nth(1).is_some_and(|c| matches!(c, 'X' | 'x')) {
        expand_wildcard(token)
    } else {
        token.parse().ok().map(|label| vec![label])
    }
}

/// `A9s+` walks the low rank from its bound up to (excluding) the anchor;
/// `TT+` walks pairs up to aces.
fn expand_plus(base: &str) -> Option<Vec<HandLabel>> {
    let label: HandLabel = base.parse().ok()?;
    match label.kind() {
        LabelKind::Pair => Some(
            (label.high().index()..=Rank::Ace.index())
                .filter_map(Rank::from_index)
                .map(HandLabel::pair)
                .collect(),
        ),
        kind => {
            let suited = kind == LabelKind::Suited;
            Some(
                (label.low().index()..label.high().index())
                    .filter_map(Rank::from_index)
                    .map(|low| HandLabel::unpaired(label.high(), low, suited))
                    .collect(),
            )
        }
    }
}

/// `AA-TT` and `AKs-ATs` spans. Both endpoints must share the label kind,
/// and anchored spans must share the high rank.
fn expand_span(token: &str) -> Option<Vec<HandLabel>> {
    let (a, b) = token.split_once('-')?;
    let first: HandLabel = a.trim().parse().ok()?;
    let second: HandLabel = b.trim().parse().ok()?;
    if first.kind() != second.kind() {
        return None;
    }
    match first.kind() {
        LabelKind::Pair => {
            let (lo, hi) = ordered(first.high().index(), second.high().index());
            Some((lo..=hi).filter_map(Rank::from_index).map(HandLabel::pair).collect())
        }
        kind => {
            if first.high() != second.high() {
                return None;
            }
            let suited = kind == LabelKind::Suited;
            let (lo, hi) = ordered(first.low().index(), second.low().index());
            Some(
                (lo..=hi)
                    .filter_map(Rank::from_index)
                    .map(|low| HandLabel::unpaired(first.high(), low, suited))
                    .collect(),
            )
        }
    }
}

/// `AXs` fixes the anchor rank and suitedness class and spans every other
/// rank, canonicalizing so the higher rank leads.
fn expand_wildcard(token: &str) -> Option<Vec<HandLabel>> {
    let chars: Vec<char> = token.chars().collect();
    let [anchor_char, _, class_char] = chars.as_slice() else {
        return None;
    };
    let anchor = Rank::from_code(*anchor_char).ok()?;
    let suited = match class_char.to_ascii_lowercase() {
        's' => true,
        'o' => false,
        _ => return None,
    };
    Some(
        Rank::ALL
            .iter()
            .filter(|rank| **rank != anchor)
            .map(|rank| HandLabel::unpaired(anchor, *rank, suited))
            .collect(),
    )
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(expr: &str) -> Vec<String> {
        expand(expr).iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_pair_span_closed_enumeration() {
        let set = expand("AA-TT");
        let expected: RangeSet = ["AA", "KK", "QQ", "JJ", "TT"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_pair_span_order_insensitive() {
        assert_eq!(expand("AA-QQ"), expand("QQ-AA"));
    }

    #[test]
    fn test_plus_token_excludes_anchor() {
        let set = labels("A9s+");
        assert_eq!(set.len(), 5);
        assert!(set.contains(&"A9s".to_string()));
        assert!(set.contains(&"AKs".to_string()));
        assert!(!set.contains(&"AAs".to_string()));
    }

    #[test]
    fn test_plus_token_superset_property() {
        let wider = expand("A9s+");
        let narrower = expand("ATs+");
        assert!(wider.is_superset(&narrower));
        assert_eq!(wider.len(), narrower.len() + 1);
    }

    #[test]
    fn test_pair_plus_token() {
        let set = expand("TT+");
        assert_eq!(set.len(), 5);
        assert!(set.contains(&"AA".parse().unwrap()));
        assert!(set.contains(&"TT".parse().unwrap()));
        assert!(!set.contains(&"99".parse().unwrap()));
    }

    #[test]
    fn test_anchored_span() {
        let set = labels("AKs-ATs");
        assert_eq!(set, vec!["ATs", "AJs", "AQs", "AKs"]);
    }

    #[test]
    fn test_anchored_span_requires_same_anchor() {
        assert!(expand("AKs-KQs").is_empty());
        assert!(expand("AKs-ATo").is_empty());
    }

    #[test]
    fn test_wildcard_expands_twelve_labels() {
        let set = expand("AXs");
        assert_eq!(set.len(), 12);
        assert!(set.contains(&"A2s".parse().unwrap()));
        assert!(set.contains(&"AKs".parse().unwrap()));

        // Canonicalization: the king wildcard includes AKo, not "KAo"
        let set = expand("KXo");
        assert_eq!(set.len(), 12);
        assert!(set.contains(&"AKo".parse().unwrap()));
    }

    #[test]
    fn test_combinatoric_count_sums_for_suited_span() {
        // 4 combos per suited label times the rank span
        let set = expand("A9s+");
        let total: u32 = set.iter().map(|l| l.combos()).sum();
        assert_eq!(total, 4 * set.len() as u32);
    }

    #[test]
    fn test_unknown_tokens_dropped_silently() {
        let set = expand("AA,garbage,KQs,Z9s+");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = expand("AKs,AKs,ATs+");
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_full_chart_expression() {
        let set = expand("AA-77,AKs-ATs,AKo-AJo,KQs-KJs");
        assert!(set.contains(&"88".parse().unwrap()));
        assert!(set.contains(&"AJo".parse().unwrap()));
        assert!(set.contains(&"KJs".parse().unwrap()));
        assert!(!set.contains(&"KTs".parse().unwrap()));
        assert_eq!(set.len(), 8 + 4 + 3 + 2);
    }
}
