//! Subset solution with a cached cost.
//!
//! A [`Solution`] is a duplicate-free selection of ground-set elements. Its
//! cost is recomputed through the [`Objective`] by every mutator before the
//! mutator returns, so a cached cost is never stale outside this module.

use crate::objective::Objective;
use std::fmt;

/// A set of selected elements and its evaluated cost.
///
/// Elements are stored in insertion order, which keeps runs reproducible
/// and lets candidate filters look at the most recent insertion.
///
/// `Clone` produces an independent copy; engines keep their best-known
/// solution as such a copy.
///
/// With the `serde` feature a solution can be serialized for reporting but
/// not deserialized: a stored cost may not match the objective it is read
/// back against. Rebuild it with [`from_elements`](Self::from_elements).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    elements: Vec<usize>,
    cost: f64,
}

impl Solution {
    /// Creates the empty selection, evaluated once.
    pub fn empty<O: Objective + ?Sized>(objective: &O) -> Self {
        let mut solution = Self {
            elements: Vec::new(),
            cost: f64::NAN,
        };
        solution.cost = objective.evaluate(&solution);
        solution
    }

    /// Creates a solution from `elements`, skipping duplicates, and evaluates it.
    pub fn from_elements<O, I>(elements: I, objective: &O) -> Self
    where
        O: Objective + ?Sized,
        I: IntoIterator<Item = usize>,
    {
        let mut unique: Vec<usize> = Vec::new();
        for e in elements {
            if !unique.contains(&e) {
                unique.push(e);
            }
        }
        let mut solution = Self {
            elements: unique,
            cost: f64::NAN,
        };
        solution.cost = objective.evaluate(&solution);
        solution
    }

    /// Selected elements in insertion order.
    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    /// Selected elements in ascending order.
    pub fn sorted_elements(&self) -> Vec<usize> {
        let mut sorted = self.elements.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Cached cost, equal to `objective.evaluate(self)`.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether `element` is selected.
    pub fn contains(&self, element: usize) -> bool {
        self.elements.contains(&element)
    }

    /// Adds `element` and re-evaluates. Returns `false` if already present.
    pub fn insert<O: Objective + ?Sized>(&mut self, element: usize, objective: &O) -> bool {
        if self.contains(element) {
            return false;
        }
        self.elements.push(element);
        self.cost = objective.evaluate(self);
        true
    }

    /// Drops `element` and re-evaluates. Returns `false` if absent.
    pub fn remove<O: Objective + ?Sized>(&mut self, element: usize, objective: &O) -> bool {
        match self.elements.iter().position(|&e| e == element) {
            Some(pos) => {
                self.elements.remove(pos);
                self.cost = objective.evaluate(self);
                true
            }
            None => false,
        }
    }

    /// Swaps `element_out` for `element_in` and re-evaluates.
    ///
    /// Returns `false`, leaving the solution untouched, unless `element_out`
    /// is selected and `element_in` is not.
    pub fn exchange<O: Objective + ?Sized>(
        &mut self,
        element_in: usize,
        element_out: usize,
        objective: &O,
    ) -> bool {
        if self.contains(element_in) {
            return false;
        }
        match self.elements.iter().position(|&e| e == element_out) {
            Some(pos) => {
                self.elements.remove(pos);
                self.elements.push(element_in);
                self.cost = objective.evaluate(self);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Solution: cost=[{}], size=[{}], elements={:?}",
            self.cost,
            self.elements.len(),
            self.sorted_elements()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::QuadraticBinary;

    #[test]
    fn test_empty_is_evaluated() {
        let qbf = QuadraticBinary::scenario();
        let s = Solution::empty(&qbf);
        assert!(s.is_empty());
        assert_eq!(s.cost(), 0.0);
    }

    #[test]
    fn test_from_elements_dedups() {
        let qbf = QuadraticBinary::scenario();
        let s = Solution::from_elements([2, 0, 2], &qbf);
        assert_eq!(s.elements(), &[2, 0]);
        assert_eq!(s.sorted_elements(), vec![0, 2]);
        assert_eq!(s.cost(), 10.0);
    }

    #[test]
    fn test_mutators_refresh_cost() {
        let qbf = QuadraticBinary::scenario();
        let mut s = Solution::empty(&qbf);

        assert!(s.insert(0, &qbf));
        assert!(!s.insert(0, &qbf));
        assert_eq!(s.cost(), qbf.evaluate(&s));

        assert!(s.insert(1, &qbf));
        assert_eq!(s.cost(), qbf.evaluate(&s));

        assert!(s.exchange(2, 1, &qbf));
        assert_eq!(s.sorted_elements(), vec![0, 2]);
        assert_eq!(s.cost(), 10.0);

        assert!(!s.exchange(0, 2, &qbf), "incoming already selected");
        assert!(!s.exchange(3, 1, &qbf), "outgoing not selected");

        assert!(s.remove(0, &qbf));
        assert!(!s.remove(0, &qbf));
        assert_eq!(s.cost(), qbf.evaluate(&s));
    }

    #[test]
    fn test_clone_is_independent() {
        let qbf = QuadraticBinary::scenario();
        let mut s = Solution::from_elements([0], &qbf);
        let best = s.clone();
        s.insert(2, &qbf);
        assert_eq!(best.elements(), &[0]);
        assert_eq!(best.cost(), 3.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializable_for_reports() {
        fn assert_serialize<T: serde::Serialize>() {}
        assert_serialize::<Solution>();
        assert_serialize::<crate::target::TargetReport>();
    }

    #[test]
    fn test_display() {
        let qbf = QuadraticBinary::scenario();
        let s = Solution::from_elements([2, 0], &qbf);
        assert_eq!(s.to_string(), "Solution: cost=[10], size=[2], elements=[0, 2]");
    }
}
