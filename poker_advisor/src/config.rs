//! Engine configuration.
//!
//! All tunables are clamped into their documented bounds rather than
//! rejected: the engine must stay decision-capable under any supplied
//! configuration. Clamping is logged so a misconfiguration is visible.

use std::time::Duration;

/// Configuration for the decision engine.
///
/// Out-of-bounds values are clamped by [`EngineConfig::clamped`], which
/// every constructor path applies.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// How far to lean on the opponent model.
    ///
    /// **Range**: 0.0-1.0 (0 = pure baseline, 1 = fully opponent-adjusted)
    pub exploitation_level: f64,

    /// Raise sizing floor as a multiple of the call amount.
    ///
    /// **Range**: 1.0-10.0 (typical: 3.0)
    pub raise_multiple: f64,

    /// Hands required before an opponent is classified.
    ///
    /// **Range**: 10-1000 (typical: 30)
    pub min_classify_hands: u32,

    /// Monte Carlo iterations per equity query.
    ///
    /// **Range**: 1,000-10,000,000
    pub default_iterations: u32,

    /// Budget for the oracle call; on expiry the estimate degrades to the
    /// iterations already completed. `None` leaves the call unbounded.
    pub oracle_timeout: Option<Duration>,

    /// Exploit signals surfaced per decision.
    ///
    /// **Range**: 1-8 (typical: 3)
    pub max_exploits: usize,

    /// Entries held by the equity cache; 0 disables caching.
    ///
    /// **Range**: 0-1,000,000
    pub equity_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            exploitation_level: 0.7,
            raise_multiple: 3.0,
            min_classify_hands: 30,
            default_iterations: 100_000,
            oracle_timeout: Some(Duration::from_millis(1_500)),
            max_exploits: 3,
            equity_cache_capacity: 10_000,
        }
    }
}

impl EngineConfig {
    pub fn new() -> EngineConfig {
        EngineConfig::default()
    }

    /// Clamp every field into its documented bounds, logging anything
    /// that had to move.
    pub fn clamped(mut self) -> EngineConfig {
        self.exploitation_level = clamp_f64("exploitation_level", self.exploitation_level, 0.0, 1.0);
        self.raise_multiple = clamp_f64("raise_multiple", self.raise_multiple, 1.0, 10.0);
        self.min_classify_hands = clamp_u32("min_classify_hands", self.min_classify_hands, 10, 1_000);
        self.default_iterations =
            clamp_u32("default_iterations", self.default_iterations, 1_000, 10_000_000);
        self.max_exploits = clamp_usize("max_exploits", self.max_exploits, 1, 8);
        self.equity_cache_capacity =
            clamp_usize("equity_cache_capacity", self.equity_cache_capacity, 0, 1_000_000);
        self
    }

    pub fn with_exploitation_level(mut self, level: f64) -> EngineConfig {
        self.exploitation_level = level;
        self.clamped()
    }

    pub fn with_raise_multiple(mut self, multiple: f64) -> EngineConfig {
        self.raise_multiple = multiple;
        self.clamped()
    }

    pub fn with_iterations(mut self, iterations: u32) -> EngineConfig {
        self.default_iterations = iterations;
        self.clamped()
    }

    pub fn with_oracle_timeout(mut self, timeout: Option<Duration>) -> EngineConfig {
        self.oracle_timeout = timeout;
        self
    }
}

fn clamp_f64(name: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = if value.is_finite() { value.clamp(min, max) } else { min };
    if clamped != value {
        log::warn!("config {name}={value} out of bounds, clamped to {clamped}");
    }
    clamped
}

fn clamp_u32(name: &str, value: u32, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("config {name}={value} out of bounds, clamped to {clamped}");
    }
    clamped
}

fn clamp_usize(name: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("config {name}={value} out of bounds, clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_clamping() {
        let config = EngineConfig::default();
        let clamped = config.clamped();
        assert_eq!(clamped.exploitation_level, config.exploitation_level);
        assert_eq!(clamped.min_classify_hands, 30);
    }

    #[test]
    fn test_out_of_bounds_values_clamped_not_rejected() {
        let config = EngineConfig {
            exploitation_level: 4.2,
            raise_multiple: 0.1,
            min_classify_hands: 2,
            default_iterations: 1,
            max_exploits: 99,
            ..EngineConfig::default()
        }
        .clamped();

        assert_eq!(config.exploitation_level, 1.0);
        assert_eq!(config.raise_multiple, 1.0);
        assert_eq!(config.min_classify_hands, 10);
        assert_eq!(config.default_iterations, 1_000);
        assert_eq!(config.max_exploits, 8);
    }

    #[test]
    fn test_non_finite_level_falls_to_floor() {
        let config = EngineConfig::default().with_exploitation_level(f64::NAN);
        assert_eq!(config.exploitation_level, 0.0);
    }

    #[test]
    fn test_builder_style_setters_clamp() {
        let config = EngineConfig::default().with_raise_multiple(50.0);
        assert_eq!(config.raise_multiple, 10.0);
    }
}
