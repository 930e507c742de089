//! Objectives shared by the unit tests.

use crate::objective::Objective;
use crate::random::create_rng;
use crate::solution::Solution;
use rand::Rng;

/// Quadratic binary function `f(x) = Σ_i Σ_j a_ij x_i x_j`.
#[derive(Debug, Clone)]
pub(crate) struct QuadraticBinary {
    a: Vec<Vec<f64>>,
}

impl QuadraticBinary {
    pub(crate) fn new(a: Vec<Vec<f64>>) -> Self {
        Self { a }
    }

    /// Four elements, unique maximum 10 at {0, 2}.
    pub(crate) fn scenario() -> Self {
        Self::new(vec![
            vec![3.0, 0.0, 2.0, 0.0],
            vec![0.0, -5.0, 0.0, 0.0],
            vec![2.0, 0.0, 3.0, 0.0],
            vec![0.0, 0.0, 0.0, -5.0],
        ])
    }

    /// Symmetric matrix with integer entries in `[-10, 10]`.
    pub(crate) fn random(n: usize, seed: u64) -> Self {
        let mut rng = create_rng(seed);
        let mut a = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let v = rng.random_range(-10..=10) as f64;
                a[i][j] = v;
                a[j][i] = v;
            }
        }
        Self::new(a)
    }

    fn interaction(&self, element: usize, solution: &Solution, skip: Option<usize>) -> f64 {
        let mut sum = self.a[element][element];
        for &j in solution.elements() {
            if j == element || Some(j) == skip {
                continue;
            }
            sum += self.a[element][j] + self.a[j][element];
        }
        sum
    }
}

impl Objective for QuadraticBinary {
    fn domain_size(&self) -> usize {
        self.a.len()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        let mut total = 0.0;
        for &i in solution.elements() {
            for &j in solution.elements() {
                total += self.a[i][j];
            }
        }
        total
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            return 0.0;
        }
        self.interaction(element, solution, None)
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        if !solution.contains(element) {
            return 0.0;
        }
        -self.interaction(element, solution, None)
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        if solution.contains(element_in) {
            return self.removal_cost(element_out, solution);
        }
        if !solution.contains(element_out) {
            return self.insertion_cost(element_in, solution);
        }
        self.interaction(element_in, solution, Some(element_out))
            - self.interaction(element_out, solution, None)
    }
}

/// `f(S) = |S|`: the all-ones chromosome is the unique maximum.
#[derive(Debug, Clone)]
pub(crate) struct Cardinality {
    pub(crate) n: usize,
}

impl Objective for Cardinality {
    fn domain_size(&self) -> usize {
        self.n
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        solution.len() as f64
    }

    fn insertion_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            0.0
        } else {
            1.0
        }
    }

    fn removal_cost(&self, element: usize, solution: &Solution) -> f64 {
        if solution.contains(element) {
            -1.0
        } else {
            0.0
        }
    }

    fn exchange_cost(&self, element_in: usize, element_out: usize, solution: &Solution) -> f64 {
        if solution.contains(element_in) {
            return self.removal_cost(element_out, solution);
        }
        if !solution.contains(element_out) {
            return self.insertion_cost(element_in, solution);
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qbf_deltas_match_evaluate() {
        let qbf = QuadraticBinary::random(8, 7);
        let s = Solution::from_elements([1, 4, 6], &qbf);
        let base = qbf.evaluate(&s);

        let plus = Solution::from_elements([1, 4, 6, 3], &qbf);
        assert_eq!(base + qbf.insertion_cost(3, &s), plus.cost());

        let minus = Solution::from_elements([1, 6], &qbf);
        assert_eq!(base + qbf.removal_cost(4, &s), minus.cost());

        let swapped = Solution::from_elements([1, 6, 3], &qbf);
        assert_eq!(base + qbf.exchange_cost(3, 4, &s), swapped.cost());
    }
}
