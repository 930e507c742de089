//! Configuration errors.
//!
//! Every engine validates its configuration when it is constructed, so a
//! search never starts with parameters it cannot honour. Conditions that
//! arise during a search (empty candidate list, no improving move, budget
//! exhausted) are ordinary termination signals and are not represented here.

use thiserror::Error;

/// An invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// GRASP greediness-randomness parameter outside `[0, 1]`.
    #[error("alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f64),

    /// GA population too small to form parent pairs.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// Per-locus mutation probability outside `[0, 1]`.
    #[error("mutation_rate must lie in [0, 1], got {0}")]
    InvalidMutationRate(f64),

    /// Tournament needs at least one contestant.
    #[error("tournament_size must be at least 1, got {0}")]
    TournamentTooSmall(usize),

    /// A zero wall-clock budget would never run a single iteration.
    #[error("time_limit must be positive")]
    ZeroTimeLimit,

    /// An explicit iteration/generation cap of zero.
    #[error("iteration limit must be positive or None")]
    ZeroIterationLimit,

    /// Codec produces chromosomes of a different length than the ground set.
    #[error("chromosome length {chromosome} does not match domain size {domain}")]
    ChromosomeLength {
        /// Length declared by the codec.
        chromosome: usize,
        /// Ground-set size declared by the objective.
        domain: usize,
    },
}

/// Result alias for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;
