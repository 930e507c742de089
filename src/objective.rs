//! Problem-side interfaces consumed by the search engines.
//!
//! A problem plugs into both engines by implementing [`Objective`]: an
//! absolute evaluator plus incremental deltas for single-element moves over
//! a ground set `0..domain_size()`. GRASP additionally accepts a
//! [`CandidateFilter`] to keep side-constrained elements out of the
//! candidate list.
//!
//! GRASP minimizes [`Objective::evaluate`]; the GA treats the same value as a
//! fitness to maximize. Wrap a maximization objective in [`Negated`] to hand
//! it to GRASP.

use crate::solution::Solution;

/// Cost model over a finite ground set of elements `0..domain_size()`.
///
/// # Consistency
///
/// Deltas must agree with `evaluate`:
///
/// ```text
/// evaluate(S ∪ {e})           == evaluate(S) + insertion_cost(e, S)
/// evaluate(S \ {e})           == evaluate(S) + removal_cost(e, S)
/// evaluate(S ∪ {i} \ {o})     == evaluate(S) + exchange_cost(i, o, S)
/// ```
///
/// The engines rely on this but never verify it. Infinite deltas are legal
/// and are treated as "never" (`+inf`) or "always" (`-inf`) worth applying.
/// A `+inf` candidate only enters a GRASP RCL when no other candidate is
/// left.
///
/// # Examples
///
/// ```
/// use u_combopt::objective::Objective;
/// use u_combopt::solution::Solution;
///
/// /// Cost is the sum of the selected weights.
/// struct Weights(Vec<f64>);
///
/// impl Objective for Weights {
///     fn domain_size(&self) -> usize { self.0.len() }
///     fn evaluate(&self, s: &Solution) -> f64 {
///         s.elements().iter().map(|&e| self.0[e]).sum()
///     }
///     fn insertion_cost(&self, e: usize, s: &Solution) -> f64 {
///         if s.contains(e) { 0.0 } else { self.0[e] }
///     }
///     fn removal_cost(&self, e: usize, s: &Solution) -> f64 {
///         if s.contains(e) { -self.0[e] } else { 0.0 }
///     }
///     fn exchange_cost(&self, i: usize, o: usize, s: &Solution) -> f64 {
///         self.insertion_cost(i, s) + self.removal_cost(o, s)
///     }
/// }
///
/// let w = Weights(vec![1.0, -2.0, 3.0]);
/// let s = Solution::from_elements([0, 1], &w);
/// assert_eq!(s.cost(), -1.0);
/// ```
pub trait Objective {
    /// Size of the ground set (and of GA chromosomes).
    fn domain_size(&self) -> usize;

    /// Absolute cost of a full solution. Must be side-effect free.
    fn evaluate(&self, solution: &Solution) -> f64;

    /// Cost change of adding `element` to `solution`.
    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change of dropping `element` from `solution`.
    fn removal_cost(&self, element: usize, solution: &Solution) -> f64;

    /// Cost change of adding `element_in` while dropping `element_out`.
    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64;
}

impl<O: Objective + ?Sized> Objective for &O {
    fn domain_size(&self) -> usize {
        (**self).domain_size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        (**self).evaluate(solution)
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        (**self).insertion_cost(element, solution)
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        (**self).removal_cost(element, solution)
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        (**self).exchange_cost(element_in, element_out, solution)
    }
}

/// Sign-flipping adapter: maximizing `O` is minimizing `Negated<O>`.
#[derive(Debug, Clone)]
pub struct Negated<O>(pub O);

impl<O> Negated<O> {
    /// Returns the wrapped objective.
    pub fn into_inner(self) -> O {
        self.0
    }
}

impl<O: Objective> Objective for Negated<O> {
    fn domain_size(&self) -> usize {
        self.0.domain_size()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        -self.0.evaluate(solution)
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        -self.0.insertion_cost(element, solution)
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        -self.0.removal_cost(element, solution)
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        -self.0.exchange_cost(element_in, element_out, solution)
    }
}

/// Removes elements from the GRASP candidate list regardless of their cost.
///
/// Used for side constraints outside the pure cost model, e.g. forbidden
/// combinations of elements: given the incumbent, return every element that
/// may no longer join it. Elements already in the incumbent need not be
/// listed.
pub trait CandidateFilter {
    /// Elements that must stay out of the candidate list for `incumbent`.
    fn excluded(&self, incumbent: &Solution) -> Vec<usize>;
}

/// Filter that excludes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl CandidateFilter for NoFilter {
    fn excluded(&self, _incumbent: &Solution) -> Vec<usize> {
        Vec::new()
    }
}

impl<F> CandidateFilter for F
where
    F: Fn(&Solution) -> Vec<usize>,
{
    fn excluded(&self, incumbent: &Solution) -> Vec<usize> {
        self(incumbent)
    }
}
