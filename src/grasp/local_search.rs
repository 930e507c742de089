//! Insertion / removal / exchange local search.
//!
//! Three neighborhoods around the incumbent are scored with the
//! objective's incremental deltas:
//!
//! - insertion of one candidate-list element,
//! - removal of one incumbent element,
//! - exchange of one candidate in for one incumbent element out.
//!
//! The candidate list is rebuilt before every scan, so an inserted element
//! leaves it and a removed element rejoins it (unless the filter now
//! excludes it). The search stops when a full scan finds no move with
//! `delta < -IMPROVEMENT_EPSILON`.

use super::config::LocalSearch;
use super::construction::candidate_list;
use crate::objective::{CandidateFilter, Objective};
use crate::solution::Solution;
use tracing::trace;

/// A move must lower the cost by more than this to count as improving.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// A single-element move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Add a candidate.
    Insert(usize),
    /// Drop an incumbent element.
    Remove(usize),
    /// Swap a candidate in for an incumbent element.
    Exchange {
        /// Element entering the solution.
        incoming: usize,
        /// Element leaving the solution.
        outgoing: usize,
    },
}

impl Move {
    /// Incremental cost of this move on `solution`.
    pub fn delta<O: Objective + ?Sized>(&self, solution: &Solution, objective: &O) -> f64 {
        match *self {
            Move::Insert(e) => objective.insertion_cost(e, solution),
            Move::Remove(e) => objective.removal_cost(e, solution),
            Move::Exchange { incoming, outgoing } => {
                objective.exchange_cost(incoming, outgoing, solution)
            }
        }
    }

    /// Applies the move; the solution re-evaluates its cost.
    ///
    /// Returns `false`, leaving `solution` untouched, when the move does not
    /// fit it (inserting a selected element, removing an absent one).
    pub fn apply<O: Objective + ?Sized>(&self, solution: &mut Solution, objective: &O) -> bool {
        match *self {
            Move::Insert(e) => solution.insert(e, objective),
            Move::Remove(e) => solution.remove(e, objective),
            Move::Exchange { incoming, outgoing } => {
                solution.exchange(incoming, outgoing, objective)
            }
        }
    }
}

/// Every move of the three neighborhoods, in scan order.
fn neighborhood<'a>(
    candidates: &'a [usize],
    incumbent: &'a [usize],
) -> impl Iterator<Item = Move> + 'a {
    let insertions = candidates.iter().map(|&e| Move::Insert(e));
    let removals = incumbent.iter().map(|&e| Move::Remove(e));
    let exchanges = candidates.iter().flat_map(move |&incoming| {
        incumbent.iter().map(move |&outgoing| Move::Exchange { incoming, outgoing })
    });
    insertions.chain(removals).chain(exchanges)
}

/// Lowest-delta move of the full neighborhood; earliest wins ties.
pub fn best_move<O>(
    objective: &O,
    candidates: &[usize],
    incumbent: &Solution,
) -> Option<(Move, f64)>
where
    O: Objective + ?Sized,
{
    let mut best = None;
    let mut min_delta = f64::INFINITY;
    for mv in neighborhood(candidates, incumbent.elements()) {
        let delta = mv.delta(incumbent, objective);
        if delta < min_delta {
            min_delta = delta;
            best = Some((mv, delta));
        }
    }
    best
}

/// First move in scan order that improves by more than the epsilon.
pub fn first_improving_move<O>(
    objective: &O,
    candidates: &[usize],
    incumbent: &Solution,
) -> Option<(Move, f64)>
where
    O: Objective + ?Sized,
{
    neighborhood(candidates, incumbent.elements())
        .map(|mv| (mv, mv.delta(incumbent, objective)))
        .find(|&(_, delta)| delta < -IMPROVEMENT_EPSILON)
}

/// Improves `incumbent` to a local optimum. Returns the number of moves applied.
pub(crate) fn improve<O, F>(
    objective: &O,
    filter: &F,
    policy: LocalSearch,
    incumbent: &mut Solution,
) -> usize
where
    O: Objective + ?Sized,
    F: CandidateFilter + ?Sized,
{
    let mut applied = 0usize;
    loop {
        let candidates = candidate_list(objective, filter, incumbent);
        let found = match policy {
            LocalSearch::BestImproving => best_move(objective, &candidates, incumbent),
            LocalSearch::FirstImproving => {
                first_improving_move(objective, &candidates, incumbent)
            }
        };

        match found {
            Some((mv, delta)) if delta < -IMPROVEMENT_EPSILON => {
                let fitted = mv.apply(incumbent, objective);
                debug_assert!(fitted, "scanned move {mv:?} does not fit the incumbent");
                if !fitted {
                    break;
                }
                applied += 1;
                trace!(?mv, delta, cost = incumbent.cost(), "local search move");
            }
            _ => break,
        }
    }
    applied
}
