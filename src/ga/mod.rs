//! Genetic Algorithm over subset objectives.
//!
//! Chromosomes are fixed-length gene strings; a [`ChromosomeCodec`] decides
//! how genes are drawn and mutated and how they decode into a ground-set
//! selection. The engine maximizes the objective value of the decoded
//! selection.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, mutation policy, crossover, budgets
//! - [`GaRunner`]: the engine; also exposes each step of a generation on its own
//! - [`GaResult`]: best solution, best chromosome, history and targets
//! - [`GenerationHook`]: optional dynamic mutation and early stop
//!
//! # Submodules
//!
//! - [`operators`]: two-point and uniform crossover on gene slices
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{Crossover, GaConfig, MutationPolicy};
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::{
    BinaryCodec, Chromosome, ChromosomeCodec, GenerationHook, GenerationStats, MutationContext,
    NoHook,
};
