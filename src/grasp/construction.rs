//! Greedy randomized construction.
//!
//! Each step rebuilds the candidate list (CL) from scratch, scores every
//! candidate by its insertion delta, keeps the restricted candidate list
//! (RCL) of candidates within `alpha` of the cheapest, and inserts one RCL
//! member into the incumbent.
//!
//! # Stopping rule
//!
//! A snapshot of the incumbent cost is taken at the start of every step.
//! Construction continues while the insertion made by the previous step
//! strictly lowered the cost below that snapshot. The last, non-improving
//! insertion stays in the incumbent; the local search phase removes it if
//! that pays off.
//!
//! # References
//!
//! Feo & Resende (1995), "Greedy Randomized Adaptive Search Procedures"

use super::config::Construction;
use crate::objective::{CandidateFilter, Objective};
use crate::solution::Solution;
use rand::Rng;
use tracing::trace;

/// Elements outside `incumbent` that the filter still allows, ascending.
///
/// Never contains an element of `incumbent`.
pub fn candidate_list<O, F>(objective: &O, filter: &F, incumbent: &Solution) -> Vec<usize>
where
    O: Objective + ?Sized,
    F: CandidateFilter + ?Sized,
{
    let n = objective.domain_size();
    let mut blocked = vec![false; n];
    for &e in incumbent.elements() {
        if e < n {
            blocked[e] = true;
        }
    }
    for e in filter.excluded(incumbent) {
        if e < n {
            blocked[e] = true;
        }
    }
    (0..n).filter(|&e| !blocked[e]).collect()
}

/// Restricted candidate list for one constructive step.
#[derive(Debug, Clone, PartialEq)]
pub struct Rcl {
    members: Vec<usize>,
    deltas: Vec<f64>,
    min_cost: f64,
    max_cost: f64,
    threshold: f64,
}

impl Rcl {
    /// Admitted candidates, in CL order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Insertion delta of each member, aligned with [`members`](Self::members).
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    /// Cheapest insertion delta over the CL.
    pub fn min_cost(&self) -> f64 {
        self.min_cost
    }

    /// Most expensive insertion delta below `+inf` over the CL, or `+inf`
    /// when every delta is `+inf`.
    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }

    /// Admission bound: `min_cost + alpha * (max_cost - min_cost)`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no candidate was admitted.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Uniformly random member. Draws once from `rng` when non-empty.
    pub fn pick_random<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.random_range(0..self.members.len())])
    }

    /// Member with the lowest frequency-perturbed score; first wins ties.
    ///
    /// Members whose score is not below `f64::MAX` are never picked.
    pub fn pick_perturbed(&self, frequencies: &FrequencyMap) -> Option<usize> {
        let mut best = None;
        let mut best_score = f64::MAX;
        for (&e, &delta) in self.members.iter().zip(&self.deltas) {
            let score = frequencies.perturbed_score(e, delta);
            if score < best_score {
                best_score = score;
                best = Some(e);
            }
        }
        best
    }
}

/// Builds the RCL of `candidates` for `incumbent`.
///
/// `max` is taken over the deltas below `+inf`, and a `+inf` candidate is
/// only admitted when every delta is `+inf`. When the spread `max - min` is
/// still infinite the bound degenerates to NaN; it then falls back to `min`,
/// keeping only the cheapest candidates. Candidates with a NaN delta are
/// never admitted.
pub fn restricted_candidate_list<O>(
    objective: &O,
    candidates: &[usize],
    incumbent: &Solution,
    alpha: f64,
) -> Rcl
where
    O: Objective + ?Sized,
{
    let scored: Vec<(usize, f64)> = candidates
        .iter()
        .map(|&c| (c, objective.insertion_cost(c, incumbent)))
        .collect();

    let mut min_cost = f64::INFINITY;
    let mut max_cost = f64::NEG_INFINITY;
    let mut any_below_inf = false;
    for &(_, delta) in &scored {
        if delta < min_cost {
            min_cost = delta;
        }
        if delta < f64::INFINITY {
            any_below_inf = true;
            if delta > max_cost {
                max_cost = delta;
            }
        }
    }
    if !any_below_inf && !scored.is_empty() {
        max_cost = f64::INFINITY;
    }

    let mut threshold = min_cost + alpha * (max_cost - min_cost);
    if threshold.is_nan() {
        threshold = min_cost;
    }

    let (members, deltas): (Vec<usize>, Vec<f64>) = scored
        .into_iter()
        .filter(|&(_, delta)| delta <= threshold && (delta < f64::INFINITY || !any_below_inf))
        .unzip();

    Rcl {
        members,
        deltas,
        min_cost,
        max_cost,
        threshold,
    }
}

/// How many completed iterations ended with each element selected.
///
/// Counts only grow during a run and are never reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: Vec<u32>,
}

impl FrequencyMap {
    /// All elements unset.
    pub fn new(domain_size: usize) -> Self {
        Self {
            counts: vec![0; domain_size],
        }
    }

    /// Count for `element`, `None` while it was never recorded.
    pub fn count(&self, element: usize) -> Option<u32> {
        match self.counts.get(element) {
            Some(&c) if c > 0 => Some(c),
            _ => None,
        }
    }

    /// Increments the count of every element of `solution`.
    pub fn record(&mut self, solution: &Solution) {
        for &e in solution.elements() {
            if let Some(c) = self.counts.get_mut(e) {
                *c = c.saturating_add(1);
            }
        }
    }

    /// `delta / count`, or `-inf` for an element never recorded.
    pub fn perturbed_score(&self, element: usize, delta: f64) -> f64 {
        match self.count(element) {
            Some(c) => delta / c as f64,
            None => f64::NEG_INFINITY,
        }
    }
}

/// Runs one constructive phase from the empty solution.
pub(crate) fn construct<O, F, R>(
    objective: &O,
    filter: &F,
    alpha: f64,
    construction: Construction,
    frequencies: &FrequencyMap,
    rng: &mut R,
) -> Solution
where
    O: Objective + ?Sized,
    F: CandidateFilter + ?Sized,
    R: Rng,
{
    let mut incumbent = Solution::empty(objective);
    let mut snapshot = f64::INFINITY;
    let mut step = 0usize;

    while incumbent.cost() < snapshot {
        snapshot = incumbent.cost();

        let candidates = candidate_list(objective, filter, &incumbent);
        if candidates.is_empty() {
            break;
        }

        let rcl = restricted_candidate_list(objective, &candidates, &incumbent, alpha);
        let chosen = match construction {
            Construction::RandomGreedy => rcl.pick_random(rng),
            Construction::CostPerturbation => rcl.pick_perturbed(frequencies),
        };
        let Some(element) = chosen else {
            break;
        };

        incumbent.insert(element, objective);
        step += 1;
        trace!(
            step,
            element,
            rcl_len = rcl.len(),
            cost = incumbent.cost(),
            "constructive step"
        );
    }

    incumbent
}
