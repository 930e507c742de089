//! Gene-string crossover operators.
//!
//! Both operators are position-preserving: locus `i` of a child always
//! comes from locus `i` of one of the parents, so children keep the
//! parents' length.
//!
//! - [`two_point_crossover`]: swap the segment `[point1, point2)`
//! - [`uniform_crossover`]: swap each locus on a fair coin
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

/// Swaps `[point1, point2)` between two parents.
///
/// Points past the end are clamped; `point2 < point1` swaps nothing.
///
/// ```
/// use u_combopt::ga::operators::two_point_crossover;
///
/// let (a, b) = two_point_crossover(&[1, 1, 1, 1], &[0, 0, 0, 0], 1, 3);
/// assert_eq!(a, vec![1, 0, 0, 1]);
/// assert_eq!(b, vec![0, 1, 1, 0]);
/// ```
///
/// # Panics
/// Panics if parents have different lengths.
pub fn two_point_crossover<G: Copy>(
    parent1: &[G],
    parent2: &[G],
    point1: usize,
    point2: usize,
) -> (Vec<G>, Vec<G>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    let n = parent1.len();
    let start = point1.min(n);
    let end = point2.min(n).max(start);

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    child1[start..end].copy_from_slice(&parent2[start..end]);
    child2[start..end].copy_from_slice(&parent1[start..end]);
    (child1, child2)
}

/// Draws `p1` uniformly from `[0, n]`, then `p2` uniformly from `[p1, n]`.
pub fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let p1 = rng.random_range(0..=n);
    let p2 = p1 + rng.random_range(0..=n - p1);
    (p1, p2)
}

/// Swaps each locus independently with probability 1/2.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<G: Copy, R: Rng>(
    parent1: &[G],
    parent2: &[G],
    rng: &mut R,
) -> (Vec<G>, Vec<G>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    for i in 0..parent1.len() {
        if rng.random_bool(0.5) {
            child1[i] = parent2[i];
            child2[i] = parent1[i];
        }
    }
    (child1, child2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_two_point_known_points() {
        let (a, b) = two_point_crossover(&[1, 1, 1, 1], &[0, 0, 0, 0], 1, 3);
        assert_eq!(a, vec![1, 0, 0, 1]);
        assert_eq!(b, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_two_point_degenerate_segments() {
        let p1 = [1u8, 2, 3];
        let p2 = [4u8, 5, 6];
        assert_eq!(two_point_crossover(&p1, &p2, 2, 2), (p1.to_vec(), p2.to_vec()));
        assert_eq!(two_point_crossover(&p1, &p2, 0, 3), (p2.to_vec(), p1.to_vec()));
        assert_eq!(two_point_crossover(&p1, &p2, 3, 1), (p1.to_vec(), p2.to_vec()));
        assert_eq!(two_point_crossover(&p1, &p2, 1, 99), (vec![1, 5, 6], vec![4, 2, 3]));
    }

    #[test]
    fn test_random_cut_points_ordered() {
        let mut rng = create_rng(5);
        for _ in 0..500 {
            let (p1, p2) = random_cut_points(6, &mut rng);
            assert!(p1 <= p2 && p2 <= 6);
        }
        assert_eq!(random_cut_points(0, &mut rng), (0, 0));
    }

    #[test]
    fn test_uniform_children_are_complementary() {
        let mut rng = create_rng(8);
        let p1 = vec![1u8; 32];
        let p2 = vec![0u8; 32];
        let (a, b) = uniform_crossover(&p1, &p2, &mut rng);
        for i in 0..32 {
            assert_eq!(a[i] + b[i], 1);
        }
        assert!(a.contains(&0) && a.contains(&1));
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_length_and_loci(
            p1 in prop::collection::vec(0u8..4, 0..40),
            seed in any::<u64>(),
        ) {
            let p2: Vec<u8> = p1.iter().map(|g| g + 10).collect();
            let mut rng = create_rng(seed);
            let (x, y) = random_cut_points(p1.len(), &mut rng);
            for (a, b) in [
                two_point_crossover(&p1, &p2, x, y),
                uniform_crossover(&p1, &p2, &mut rng),
            ] {
                prop_assert_eq!(a.len(), p1.len());
                prop_assert_eq!(b.len(), p1.len());
                for i in 0..p1.len() {
                    prop_assert!(
                        (a[i] == p1[i] && b[i] == p2[i]) || (a[i] == p2[i] && b[i] == p1[i])
                    );
                }
            }
        }
    }
}
