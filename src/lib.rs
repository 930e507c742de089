//! Subset-selection metaheuristics.
//!
//! Two engines search for a good subset of a ground set `{0, .., n-1}`
//! under a caller-supplied [`Objective`](objective::Objective):
//!
//! - **GRASP**: greedy randomized construction with a restricted candidate
//!   list, followed by insertion / removal / exchange local search.
//!   Optional cost-perturbation diversification and candidate filters.
//!   Minimizes.
//! - **Genetic Algorithm (GA)**: fixed-length chromosomes decoded into
//!   subsets, tournament selection, two-point or uniform crossover,
//!   fixed-rate or hook-driven mutation, elitist replacement. Maximizes.
//!
//! Both engines run under a wall-clock budget, an optional iteration cap,
//! an optional cancellation flag, and an optional list of target
//! thresholds whose first crossings are reported (time-to-target).
//!
//! # Architecture
//!
//! The engines own no global state. Randomness is an explicitly passed
//! generator ([`random`]), problem knowledge enters through small traits
//! ([`objective::Objective`], [`objective::CandidateFilter`],
//! [`ga::ChromosomeCodec`]), and every configuration is validated when an
//! engine is built ([`error::ConfigError`]).

pub mod error;
pub mod ga;
pub mod grasp;
pub mod objective;
pub mod random;
pub mod solution;
pub mod target;
pub mod termination;

#[cfg(test)]
mod testing;
