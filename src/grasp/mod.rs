//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! Each iteration builds a solution with a greedy randomized construction
//! and then drives it to a local optimum over insertion, removal and
//! exchange moves. The best local optimum across iterations is returned.
//!
//! # Components
//!
//! - [`GraspConfig`]: alpha, local search policy, construction rule, budgets
//! - [`GraspRunner`]: the engine; also exposes each phase on its own
//! - [`Rcl`], [`FrequencyMap`]: constructive phase building blocks
//! - [`Move`], [`best_move`], [`first_improving_move`]: neighborhood scans
//!
//! # References
//!
//! - Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"
//! - Resende & Ribeiro (2016), *Optimization by GRASP*

mod config;
pub mod construction;
pub mod local_search;
mod runner;

pub use config::{Construction, GraspConfig, LocalSearch};
pub use construction::{candidate_list, restricted_candidate_list, FrequencyMap, Rcl};
pub use local_search::{best_move, first_improving_move, Move, IMPROVEMENT_EPSILON};
pub use runner::{GraspResult, GraspRunner};
