//! GRASP configuration.
//!
//! [`GraspConfig`] holds all parameters that control the GRASP outer loop,
//! the constructive phase and the local search.

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Neighborhood scan policy for the local search phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearch {
    /// Scan insertions, removals and exchanges completely, apply the single
    /// best improving move, repeat.
    #[default]
    BestImproving,

    /// Apply the first improving move found in the order insertions,
    /// removals, exchanges, then rescan from the start.
    FirstImproving,
}

/// How the constructive phase picks an element from the RCL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// Uniformly random RCL member.
    #[default]
    RandomGreedy,

    /// Deterministic pick of the lowest frequency-perturbed cost.
    ///
    /// Each RCL member's insertion delta is divided by the number of
    /// completed iterations whose local optimum contained it; members never
    /// seen score `-inf` and win outright. Biases later constructions away
    /// from overused elements.
    CostPerturbation,
}

/// Configuration for GRASP.
///
/// # Defaults
///
/// ```
/// use u_combopt::grasp::GraspConfig;
///
/// let config = GraspConfig::default();
/// assert!((config.alpha - 0.2).abs() < 1e-12);
/// assert_eq!(config.time_limit.as_secs(), 30 * 60);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_combopt::grasp::{Construction, GraspConfig, LocalSearch};
///
/// let config = GraspConfig::default()
///     .with_alpha(0.1)
///     .with_local_search(LocalSearch::FirstImproving)
///     .with_construction(Construction::CostPerturbation)
///     .with_time_limit_minutes(5)
///     .with_targets(vec![100, 200])
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Greediness-randomness parameter in `[0, 1]`.
    ///
    /// 0 admits only the cheapest candidates (pure greedy); 1 admits every
    /// candidate (pure random).
    pub alpha: f64,

    /// Local search policy.
    pub local_search: LocalSearch,

    /// RCL selection rule.
    pub construction: Construction,

    /// Wall-clock budget, checked once per iteration.
    pub time_limit: Duration,

    /// Optional cap on the number of construct + local-search iterations.
    pub max_iterations: Option<usize>,

    /// Quality thresholds to report time-to-target for.
    ///
    /// `None` disables tracking. An empty list ends the run before the
    /// first iteration.
    pub targets: Option<Vec<i64>>,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            local_search: LocalSearch::default(),
            construction: Construction::default(),
            time_limit: Duration::from_secs(30 * 60),
            max_iterations: None,
            targets: None,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets alpha. Out-of-range values are rejected by [`validate`](Self::validate).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the local search policy.
    pub fn with_local_search(mut self, local_search: LocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    /// Sets the RCL selection rule.
    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the wall-clock budget in minutes, saturating at `u64::MAX` seconds.
    pub fn with_time_limit_minutes(self, minutes: u64) -> Self {
        self.with_time_limit(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// Caps the number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the target thresholds.
    pub fn with_targets(mut self, targets: Vec<i64>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraspConfig::default();
        assert!((config.alpha - 0.2).abs() < 1e-12);
        assert_eq!(config.local_search, LocalSearch::BestImproving);
        assert_eq!(config.construction, Construction::RandomGreedy);
        assert_eq!(config.time_limit, Duration::from_secs(1800));
        assert!(config.max_iterations.is_none());
        assert!(config.targets.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GraspConfig::default()
            .with_alpha(0.0)
            .with_local_search(LocalSearch::FirstImproving)
            .with_construction(Construction::CostPerturbation)
            .with_time_limit_minutes(2)
            .with_max_iterations(50)
            .with_targets(vec![10, 20])
            .with_seed(42);

        assert_eq!(config.alpha, 0.0);
        assert_eq!(config.local_search, LocalSearch::FirstImproving);
        assert_eq!(config.construction, Construction::CostPerturbation);
        assert_eq!(config.time_limit, Duration::from_secs(120));
        assert_eq!(config.max_iterations, Some(50));
        assert_eq!(config.targets, Some(vec![10, 20]));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_time_limit_minutes_saturates() {
        let config = GraspConfig::default().with_time_limit_minutes(u64::MAX);
        assert_eq!(config.time_limit, Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validate_alpha_bounds() {
        assert!(GraspConfig::default().with_alpha(1.0).validate().is_ok());
        assert_eq!(
            GraspConfig::default().with_alpha(1.01).validate(),
            Err(ConfigError::InvalidAlpha(1.01))
        );
        assert!(GraspConfig::default().with_alpha(-0.1).validate().is_err());
        assert!(GraspConfig::default().with_alpha(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_limits() {
        assert_eq!(
            GraspConfig::default().with_time_limit(Duration::ZERO).validate(),
            Err(ConfigError::ZeroTimeLimit)
        );
        assert_eq!(
            GraspConfig::default().with_max_iterations(0).validate(),
            Err(ConfigError::ZeroIterationLimit)
        );
    }
}
