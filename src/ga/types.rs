//! Core types for the GA.
//!
//! [`ChromosomeCodec`] is the contract between the generic engine and a
//! problem's genotype: how genes are drawn, how one gene mutates, and how a
//! gene string decodes into a ground-set selection. [`GenerationHook`]
//! carries the optional, caller-supplied policies (dynamic mutation and
//! early stop).

use crate::objective::Objective;
use crate::solution::Solution;
use rand::Rng;
use std::fmt::Debug;
use std::ops::ControlFlow;
use std::time::Duration;

/// Problem-specific genotype encoding.
///
/// # Implementing
///
/// ```ignore
/// struct Bits(usize);
///
/// impl ChromosomeCodec for Bits {
///     type Gene = bool;
///     fn chromosome_len(&self) -> usize { self.0 }
///     fn random_gene<R: Rng>(&self, _locus: usize, rng: &mut R) -> bool { rng.random_bool(0.5) }
///     fn mutate_gene(&self, gene: bool, _locus: usize) -> bool { !gene }
///     fn decode(&self, genes: &[bool]) -> Vec<usize> {
///         genes.iter().enumerate().filter(|&(_, &g)| g).map(|(i, _)| i).collect()
///     }
/// }
/// ```
pub trait ChromosomeCodec {
    /// One locus value.
    type Gene: Copy + PartialEq + Debug;

    /// Number of loci. Must equal the objective's domain size.
    fn chromosome_len(&self) -> usize;

    /// Draws a random value for `locus`.
    fn random_gene<R: Rng>(&self, locus: usize, rng: &mut R) -> Self::Gene;

    /// Returns the mutated value of `gene` at `locus`.
    fn mutate_gene(&self, gene: Self::Gene, locus: usize) -> Self::Gene;

    /// Ground-set elements selected by `genes`.
    fn decode(&self, genes: &[Self::Gene]) -> Vec<usize>;

    /// Decodes `genes` and evaluates the resulting solution.
    fn to_solution<O: Objective + ?Sized>(&self, genes: &[Self::Gene], objective: &O) -> Solution {
        Solution::from_elements(self.decode(genes), objective)
    }
}

/// 0/1 genes; locus `i` set to 1 selects element `i`. Mutation flips the bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryCodec {
    len: usize,
}

impl BinaryCodec {
    /// A codec for `len` loci.
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ChromosomeCodec for BinaryCodec {
    type Gene = u8;

    fn chromosome_len(&self) -> usize {
        self.len
    }

    fn random_gene<R: Rng>(&self, _locus: usize, rng: &mut R) -> u8 {
        rng.random_range(0..2)
    }

    fn mutate_gene(&self, gene: u8, _locus: usize) -> u8 {
        1 - gene.min(1)
    }

    fn decode(&self, genes: &[u8]) -> Vec<usize> {
        genes
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

/// A gene string with its fitness.
///
/// Fitness is `objective.evaluate(decode(genes))`, higher is better. It is
/// computed when the chromosome is built and never goes stale: there is no
/// way to change the genes without building a new chromosome.
/// For the same reason it is only `Serialize` under the `serde` feature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chromosome<G> {
    genes: Vec<G>,
    fitness: f64,
}

impl<G: Copy + PartialEq + Debug> Chromosome<G> {
    /// Builds and evaluates a chromosome.
    pub fn new<C, O>(genes: Vec<G>, codec: &C, objective: &O) -> Self
    where
        C: ChromosomeCodec<Gene = G> + ?Sized,
        O: Objective + ?Sized,
    {
        let fitness = codec.to_solution(&genes, objective).cost();
        Self { genes, fitness }
    }

    /// The genes.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// Cached fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of loci.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no loci.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Gives the genes back, dropping the fitness.
    pub fn into_genes(self) -> Vec<G> {
        self.genes
    }
}

/// What a dynamic mutation criterion sees for one locus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationContext {
    /// Current generation, starting at 1.
    pub generation: usize,
    /// Generations since the best fitness last improved.
    pub generations_without_improvement: usize,
    /// Locus about to be considered.
    pub locus: usize,
    /// Chromosome length.
    pub chromosome_len: usize,
}

/// Snapshot handed to [`GenerationHook::end_generation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation just completed.
    pub generation: usize,
    /// Best fitness seen so far.
    pub best_fitness: f64,
    /// Best fitness in the current population.
    pub population_best_fitness: f64,
    /// Generations since the best fitness last improved.
    pub generations_without_improvement: usize,
    /// Time since the run started.
    pub elapsed: Duration,
}

/// Caller-supplied policies plugged into the generation loop.
///
/// Both methods have neutral defaults, so implementors override only what
/// they need.
pub trait GenerationHook {
    /// Whether to mutate the locus described by `ctx`.
    ///
    /// Consulted only under [`MutationPolicy::Dynamic`](super::MutationPolicy::Dynamic).
    fn mutation_criterion<R: Rng>(&mut self, _ctx: &MutationContext, _rng: &mut R) -> bool {
        false
    }

    /// Called after every generation. `Break` ends the run with
    /// [`StopReason::Requested`](crate::termination::StopReason::Requested).
    fn end_generation(&mut self, _stats: &GenerationStats) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Hook that never mutates dynamically and never stops the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHook;

impl GenerationHook for NoHook {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::testing::Cardinality;

    #[test]
    fn test_binary_codec() {
        let codec = BinaryCodec::new(5);
        assert_eq!(codec.chromosome_len(), 5);
        assert_eq!(codec.mutate_gene(0, 0), 1);
        assert_eq!(codec.mutate_gene(1, 3), 0);
        assert_eq!(codec.decode(&[1, 0, 1, 1, 0]), vec![0, 2, 3]);

        let mut rng = create_rng(1);
        for locus in 0..50 {
            assert!(codec.random_gene(locus % 5, &mut rng) <= 1);
        }
    }

    #[test]
    fn test_chromosome_fitness_is_decoded_cost() {
        let obj = Cardinality { n: 5 };
        let codec = BinaryCodec::new(5);
        let c = Chromosome::new(vec![1, 1, 0, 1, 0], &codec, &obj);
        assert_eq!(c.fitness(), 3.0);
        assert_eq!(c.len(), 5);
        assert_eq!(codec.to_solution(c.genes(), &obj).sorted_elements(), vec![0, 1, 3]);
        assert_eq!(c.into_genes(), vec![1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_no_hook_is_neutral() {
        let mut hook = NoHook;
        let mut rng = create_rng(0);
        let ctx = MutationContext {
            generation: 1,
            generations_without_improvement: 0,
            locus: 0,
            chromosome_len: 3,
        };
        assert!(!hook.mutation_criterion(&ctx, &mut rng));
        let stats = GenerationStats {
            generation: 1,
            best_fitness: 0.0,
            population_best_fitness: 0.0,
            generations_without_improvement: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(hook.end_generation(&stats), ControlFlow::Continue(()));
    }
}
