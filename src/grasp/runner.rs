//! GRASP outer loop.
//!
//! [`GraspRunner`] alternates a greedy randomized construction with a local
//! search until the time budget, the iteration cap or the target list runs
//! out, keeping an independent copy of the best local optimum found.

use super::config::{Construction, GraspConfig};
use super::construction::{self, FrequencyMap, Rcl};
use super::local_search;
use crate::error::Result;
use crate::objective::{CandidateFilter, NoFilter, Objective};
use crate::random::rng_from_seed;
use crate::solution::Solution;
use crate::target::{TargetReport, TargetTracker};
use crate::termination::{Budget, StopReason};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Best solution found (lowest cost).
    pub best: Solution,

    /// Cost of the best solution (same as `best.cost()`).
    pub best_cost: f64,

    /// Number of construct + local-search iterations executed.
    pub iterations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Best cost before the loop, then after each iteration.
    pub cost_history: Vec<f64>,

    /// Target crossings and unmet thresholds.
    pub targets: TargetReport,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Greedy Randomized Adaptive Search Procedure over a subset objective.
///
/// Minimizes [`Objective::evaluate`]. Target thresholds are compared with
/// the magnitude of the best cost, so a maximization objective wrapped in
/// [`Negated`](crate::objective::Negated) is tracked in its own units.
///
/// # Usage
///
/// ```ignore
/// let objective = Negated(MyQbf::load("qbf040")?);
/// let config = GraspConfig::default()
///     .with_alpha(0.2)
///     .with_time_limit_minutes(30)
///     .with_targets(vec![100, 200])
///     .with_seed(0);
/// let grasp = GraspRunner::new(&objective, config)?.with_filter(ForbiddenTriples::new(40));
/// let result = grasp.run();
/// println!("{}", result.best);
/// ```
#[derive(Debug, Clone)]
pub struct GraspRunner<'a, O: ?Sized, F = NoFilter> {
    objective: &'a O,
    filter: F,
    config: GraspConfig,
}

impl<'a, O: Objective + ?Sized> GraspRunner<'a, O, NoFilter> {
    /// Creates an engine, rejecting an invalid configuration.
    pub fn new(objective: &'a O, config: GraspConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            objective,
            filter: NoFilter,
            config,
        })
    }
}

impl<'a, O, F> GraspRunner<'a, O, F>
where
    O: Objective + ?Sized,
    F: CandidateFilter,
{
    /// Replaces the candidate filter.
    pub fn with_filter<G: CandidateFilter>(self, filter: G) -> GraspRunner<'a, O, G> {
        GraspRunner {
            objective: self.objective,
            filter,
            config: self.config,
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    /// Candidate list for `incumbent`.
    pub fn candidate_list(&self, incumbent: &Solution) -> Vec<usize> {
        construction::candidate_list(self.objective, &self.filter, incumbent)
    }

    /// Restricted candidate list of `candidates` under the configured alpha.
    pub fn restricted_candidate_list(&self, candidates: &[usize], incumbent: &Solution) -> Rcl {
        construction::restricted_candidate_list(
            self.objective,
            candidates,
            incumbent,
            self.config.alpha,
        )
    }

    /// Builds one solution from scratch.
    ///
    /// `frequencies` is only read in [`Construction::CostPerturbation`] mode.
    pub fn constructive_heuristic<R: Rng>(
        &self,
        frequencies: &FrequencyMap,
        rng: &mut R,
    ) -> Solution {
        construction::construct(
            self.objective,
            &self.filter,
            self.config.alpha,
            self.config.construction,
            frequencies,
            rng,
        )
    }

    /// Drives `incumbent` to a local optimum. Returns the number of moves applied.
    pub fn local_search(&self, incumbent: &mut Solution) -> usize {
        local_search::improve(
            self.objective,
            &self.filter,
            self.config.local_search,
            incumbent,
        )
    }

    /// Runs with a generator seeded from the configuration.
    pub fn run(&self) -> GraspResult {
        self.run_with_cancel(None)
    }

    /// Runs with a configured seed and an optional cancellation flag.
    pub fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> GraspResult {
        let mut rng = rng_from_seed(self.config.seed);
        self.solve_with_cancel(&mut rng, cancel)
    }

    /// Runs on a caller-supplied generator.
    pub fn solve<R: Rng>(&self, rng: &mut R) -> GraspResult {
        self.solve_with_cancel(rng, None)
    }

    /// Runs on a caller-supplied generator with an optional cancellation flag.
    ///
    /// The flag is polled once per iteration, alongside the time budget.
    pub fn solve_with_cancel<R: Rng>(
        &self,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GraspResult {
        let budget = Budget::start(self.config.time_limit, self.config.max_iterations, cancel);
        let mut targets = TargetTracker::new(self.config.targets.clone());
        let mut frequencies = FrequencyMap::new(self.objective.domain_size());

        let mut best = Solution::empty(self.objective);
        let mut cost_history = vec![best.cost()];
        targets.observe(best.cost().abs(), 0, budget.elapsed(), &best);

        let mut iterations = 0usize;
        let stop_reason = loop {
            if let Some(reason) = budget.check(iterations, &targets) {
                break reason;
            }
            iterations += 1;

            let mut incumbent = self.constructive_heuristic(&frequencies, rng);
            self.local_search(&mut incumbent);
            if self.config.construction == Construction::CostPerturbation {
                frequencies.record(&incumbent);
            }

            if incumbent.cost() < best.cost() {
                best = incumbent;
                debug!(
                    iteration = iterations,
                    elapsed_secs = budget.elapsed().as_secs_f64(),
                    best = %best,
                    "new best solution"
                );
            }

            cost_history.push(best.cost());
            targets.observe(best.cost().abs(), iterations, budget.elapsed(), &best);
        };

        let elapsed = budget.elapsed();
        info!(
            ?stop_reason,
            iterations,
            best_cost = best.cost(),
            elapsed_secs = elapsed.as_secs_f64(),
            "grasp finished"
        );

        GraspResult {
            best_cost: best.cost(),
            best,
            iterations,
            stop_reason,
            cost_history,
            targets: targets.finish(),
            elapsed,
        }
    }
}
