//! Pot odds, defense frequencies, and expectation formulas.

use serde::Serialize;

/// Floor applied to a zero or negative call amount. Checking spots are
/// priced as an epsilon call so the ratio math stays singularity-free.
pub const MIN_CALL: f64 = 0.01;

/// Full pot-odds breakdown for a call decision.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PotOdds {
    pub call_amount: f64,
    pub pot_size: f64,
    /// Call as a fraction of the final pot (`call / (pot + call)`)
    pub ratio: f64,
    pub percent: f64,
    /// Break-even equity for a pure call
    pub required_equity: f64,
    /// Potential winnings over the current pot when stacks remain behind
    pub implied_odds_factor: f64,
}

impl PotOdds {
    /// Odds in "x:1" notation; effectively free calls render as "∞:1".
    pub fn format_ratio(&self) -> String {
        if self.ratio < 0.01 {
            return "∞:1".to_string();
        }
        format!("{:.1}:1", 1.0 / self.ratio)
    }
}

/// Pot odds for a call of `call` into `pot`. An effective stack, when
/// known, feeds the implied-odds factor.
pub fn pot_odds(call: f64, pot: f64, effective_stack: Option<f64>) -> PotOdds {
    let call = if call <= 0.0 { MIN_CALL } else { call };
    let total_pot = pot + call;
    let ratio = call / total_pot;

    let mut implied_factor = 1.0;
    if let Some(stack) = effective_stack {
        if stack > call {
            let potential_winnings = total_pot + (stack - call);
            implied_factor = potential_winnings / total_pot;
        }
    }

    PotOdds {
        call_amount: call,
        pot_size: pot,
        ratio,
        percent: ratio * 100.0,
        required_equity: ratio,
        implied_odds_factor: implied_factor,
    }
}

/// Minimum defense frequency against a bet of `bet` into `pot_before_bet`.
pub fn mdf(pot_before_bet: f64, bet: f64) -> f64 {
    let total = pot_before_bet + bet;
    if total <= 0.0 {
        return 0.0;
    }
    pot_before_bet / total
}

/// Geometric bet sizing scaled by equity. Hands below even equity should
/// not be betting for value, so they size to zero; the output is capped at
/// one and a half pots.
pub fn optimal_bet_size(pot: f64, equity: f64, alpha: f64) -> f64 {
    if equity < 0.5 || equity >= 1.0 {
        return if equity >= 1.0 { pot * 1.5 } else { 0.0 };
    }
    let optimal = pot * alpha * (equity / (1.0 - equity)).sqrt();
    optimal.min(pot * 1.5)
}

/// Chips won immediately when the opponent folds at the given frequency.
pub fn fold_equity_value(opponent_fold_percent: f64, pot: f64, bet: f64) -> f64 {
    opponent_fold_percent * (pot + bet)
}

/// Expected value of calling: win the pot at our equity, lose the call the
/// rest of the time.
pub fn ev_call(equity: f64, pot: f64, call: f64) -> f64 {
    equity * pot - (1.0 - equity) * call
}

/// Expected value of raising `raise_amount` with fold probability
/// `fold_prob`: immediate pot when they fold, showdown expectation over the
/// grown pot when they do not, the raise only at risk when called.
pub fn ev_raise(equity: f64, pot: f64, raise_amount: f64, fold_prob: f64) -> f64 {
    let fold_prob = fold_prob.clamp(0.0, 1.0);
    let win_by_fold = fold_prob * pot;
    let showdown = (1.0 - fold_prob) * (equity * (pot + raise_amount) - (1.0 - equity) * raise_amount);
    win_by_fold + showdown
}

/// Kelly fraction for a given edge and odds.
pub fn kelly(edge: f64, odds: f64) -> f64 {
    if odds <= 0.0 {
        return 0.0;
    }
    edge / odds
}

/// n choose r without factorial overflow.
pub fn combinations(n: u64, r: u64) -> u64 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut result = 1u64;
    for i in 0..r {
        result = result * (n - i) / (i + 1);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pot_odds_basic() {
        let odds = pot_odds(50.0, 100.0, None);
        assert!((odds.ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(odds.required_equity, odds.ratio);
        assert_eq!(odds.format_ratio(), "3.0:1");
    }

    #[test]
    fn test_pot_odds_zero_call_uses_epsilon() {
        let odds = pot_odds(0.0, 100.0, None);
        assert_eq!(odds.call_amount, MIN_CALL);
        assert_eq!(odds.format_ratio(), "∞:1");
    }

    #[test]
    fn test_required_equity_strictly_increasing_in_call() {
        let mut previous = pot_odds(1.0, 100.0, None).required_equity;
        for call in [5.0, 25.0, 50.0, 100.0, 400.0] {
            let current = pot_odds(call, 100.0, None).required_equity;
            assert!(current > previous, "required equity must grow with the call");
            previous = current;
        }
    }

    #[test]
    fn test_implied_odds_factor() {
        let shallow = pot_odds(50.0, 100.0, Some(50.0));
        assert_eq!(shallow.implied_odds_factor, 1.0);

        let deep = pot_odds(50.0, 100.0, Some(500.0));
        assert!(deep.implied_odds_factor > 1.0);
    }

    #[test]
    fn test_mdf() {
        // A pot-sized bet leaves a 50% defense requirement
        assert!((mdf(100.0, 100.0) - 0.5).abs() < 1e-9);
        assert!((mdf(100.0, 50.0) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(mdf(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_optimal_bet_size() {
        assert_eq!(optimal_bet_size(100.0, 0.3, 1.0), 0.0);
        let size = optimal_bet_size(100.0, 0.6, 1.0);
        assert!((size - 100.0 * (0.6f64 / 0.4).sqrt()).abs() < 1e-9);
        // Capped at a pot and a half
        assert_eq!(optimal_bet_size(100.0, 0.95, 2.0), 150.0);
    }

    #[test]
    fn test_ev_call_formula() {
        assert!((ev_call(0.4, 100.0, 50.0) - (0.4 * 100.0 - 0.6 * 50.0)).abs() < 1e-9);
        // Free calls are never negative EV
        assert!(ev_call(0.01, 100.0, 0.0) > 0.0);
    }

    #[test]
    fn test_ev_raise_components() {
        // Always-folding opponents hand over the pot regardless of equity
        assert!((ev_raise(0.0, 100.0, 50.0, 1.0) - 100.0).abs() < 1e-9);
        // Never-folding opponents reduce it to showdown value
        let showdown_only = ev_raise(0.6, 100.0, 50.0, 0.0);
        assert!((showdown_only - (0.6 * 150.0 - 0.4 * 50.0)).abs() < 1e-9);
        // More fold equity always helps a bluff
        assert!(ev_raise(0.2, 100.0, 50.0, 0.7) > ev_raise(0.2, 100.0, 50.0, 0.3));
    }

    #[test]
    fn test_kelly() {
        assert!((kelly(0.1, 2.0) - 0.05).abs() < 1e-9);
        assert_eq!(kelly(0.1, 0.0), 0.0);
    }

    #[test]
    fn test_combinations() {
        assert_eq!(combinations(52, 2), 1326);
        assert_eq!(combinations(4, 2), 6);
        assert_eq!(combinations(4, 5), 0);
        assert_eq!(combinations(13, 0), 1);
    }
}
