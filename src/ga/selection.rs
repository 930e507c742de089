//! Parent selection.
//!
//! Tournament selection with replacement: a chromosome may meet itself.
//! Higher fitness wins; on a tie the later draw wins.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use rand::Rng;
use std::fmt::Debug;

/// Index of the winner of one `k`-way tournament.
///
/// `k` below 1 is treated as 1.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<G, R>(population: &[Chromosome<G>], k: usize, rng: &mut R) -> usize
where
    G: Copy + PartialEq + Debug,
    R: Rng,
{
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if !(population[best_idx].fitness() > population[idx].fitness()) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Parent pool of the same size as `population`, one tournament per slot.
pub(crate) fn select_parents<G, R>(
    population: &[Chromosome<G>],
    k: usize,
    rng: &mut R,
) -> Vec<Chromosome<G>>
where
    G: Copy + PartialEq + Debug,
    R: Rng,
{
    (0..population.len())
        .map(|_| population[tournament(population, k, rng)].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::BinaryCodec;
    use crate::random::create_rng;
    use crate::testing::Cardinality;

    fn population(genes: &[[u8; 3]]) -> Vec<Chromosome<u8>> {
        let obj = Cardinality { n: 3 };
        let codec = BinaryCodec::new(3);
        genes
            .iter()
            .map(|g| Chromosome::new(g.to_vec(), &codec, &obj))
            .collect()
    }

    #[test]
    fn test_tournament_favors_fitter() {
        let pop = population(&[[0, 0, 0], [1, 0, 0], [1, 1, 0], [1, 1, 1]]);
        let mut rng = create_rng(42);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[tournament(&pop, 2, &mut rng)] += 1;
        }
        // Binary tournament: P(rank i) = (2i + 1) / 16 for i = 0..4.
        assert!(counts[3] > counts[2]);
        assert!(counts[2] > counts[1]);
        assert!(counts[1] > counts[0]);
    }

    #[test]
    fn test_tournament_size_one_is_uniform_draw() {
        let pop = population(&[[0, 0, 0], [1, 1, 1]]);
        let mut rng = create_rng(7);
        let picks: Vec<usize> = (0..200).map(|_| tournament(&pop, 1, &mut rng)).collect();
        assert!(picks.contains(&0));
        assert!(picks.contains(&1));
    }

    #[test]
    fn test_large_tournament_returns_best() {
        let pop = population(&[[0, 0, 0], [1, 1, 1], [1, 0, 0]]);
        let mut rng = create_rng(3);
        for _ in 0..20 {
            assert_eq!(tournament(&pop, 200, &mut rng), 1);
        }
    }

    #[test]
    fn test_ties_go_to_later_draw() {
        let pop = population(&[[1, 0, 0], [0, 1, 0]]);
        let mut a = create_rng(9);
        let mut b = create_rng(9);
        let _first = b.random_range(0..2usize);
        let second = b.random_range(0..2usize);
        assert_eq!(tournament(&pop, 2, &mut a), second);
    }

    #[test]
    fn test_parent_pool_size() {
        let pop = population(&[[0, 0, 0], [1, 0, 1], [1, 1, 1]]);
        let mut rng = create_rng(0);
        let parents = select_parents(&pop, 2, &mut rng);
        assert_eq!(parents.len(), pop.len());
        assert!(parents.iter().all(|p| pop.contains(p)));
    }
}
