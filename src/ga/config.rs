//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generation loop.

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Per-locus mutation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationPolicy {
    /// Mutate each locus independently with probability `mutation_rate`.
    #[default]
    FixedRate,

    /// Mutate a locus whenever
    /// [`GenerationHook::mutation_criterion`](super::GenerationHook::mutation_criterion)
    /// says so. `mutation_rate` is ignored.
    Dynamic,
}

/// Recombination operator applied to consecutive parent pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Swap the segment between two random cut points.
    #[default]
    TwoPoint,

    /// Swap each locus with probability 1/2.
    Uniform,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_combopt::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.tournament_size, 2);
/// assert!(config.max_generations.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_combopt::ga::{Crossover, GaConfig, MutationPolicy};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_mutation_rate(0.05)
///     .with_crossover(Crossover::Uniform)
///     .with_mutation(MutationPolicy::FixedRate)
///     .with_max_generations(1000)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes, fixed for the whole run. At least 2.
    pub population_size: usize,

    /// Per-locus mutation probability under [`MutationPolicy::FixedRate`].
    pub mutation_rate: f64,

    /// Mutation policy.
    pub mutation: MutationPolicy,

    /// Crossover operator.
    pub crossover: Crossover,

    /// Contestants per tournament. 2 is binary tournament selection.
    pub tournament_size: usize,

    /// Wall-clock budget, checked once per generation.
    pub time_limit: Duration,

    /// Optional cap on the number of generations.
    pub max_generations: Option<usize>,

    /// Fitness thresholds to report time-to-target for.
    ///
    /// `None` disables tracking. An empty list ends the run before the
    /// first generation.
    pub targets: Option<Vec<i64>>,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.01,
            mutation: MutationPolicy::default(),
            crossover: Crossover::default(),
            tournament_size: 2,
            time_limit: Duration::from_secs(30 * 60),
            max_generations: None,
            targets: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the per-locus mutation rate. Out-of-range values are rejected
    /// by [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the mutation policy.
    pub fn with_mutation(mut self, mutation: MutationPolicy) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
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

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
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
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroIterationLimit);
        }
        Ok(())
    }
}
