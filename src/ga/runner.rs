//! GA generation loop.
//!
//! [`GaRunner`] runs the classic steady cycle
//! selection → crossover → mutation → elitist replacement
//! until the time budget, the generation cap, the target list or the hook
//! ends the run.

use super::config::{Crossover, GaConfig, MutationPolicy};
use super::operators::{random_cut_points, two_point_crossover, uniform_crossover};
use super::selection;
use super::types::{
    Chromosome, ChromosomeCodec, GenerationHook, GenerationStats, MutationContext, NoHook,
};
use crate::error::{ConfigError, Result};
use crate::objective::Objective;
use crate::random::rng_from_seed;
use crate::solution::Solution;
use crate::target::{TargetReport, TargetTracker};
use crate::termination::{Budget, StopReason};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// Best decoded solution found during the entire run.
    pub best: Solution,

    /// Chromosome that decoded to `best`.
    pub best_chromosome: Chromosome<G>,

    /// Best fitness value (same as `best.cost()`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Population best fitness at each generation, starting with the
    /// initial population. Non-decreasing.
    pub fitness_history: Vec<f64>,

    /// Target crossings and unmet thresholds.
    pub targets: TargetReport,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Genetic Algorithm over a subset objective.
///
/// Maximizes fitness, where a chromosome's fitness is the objective value
/// of its decoded solution. Target thresholds are compared with the raw
/// fitness.
///
/// # Usage
///
/// ```ignore
/// let objective = MyQbf::load("qbf060")?;
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_mutation_rate(1.0 / 60.0)
///     .with_targets(vec![500, 1000])
///     .with_seed(0);
/// let mut ga = GaRunner::new(&objective, BinaryCodec::new(60), config)?;
/// let result = ga.run();
/// println!("{}", result.best);
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner<'a, O: ?Sized, C, H = NoHook> {
    objective: &'a O,
    codec: C,
    config: GaConfig,
    hook: H,
}

impl<'a, O, C> GaRunner<'a, O, C, NoHook>
where
    O: Objective + ?Sized,
    C: ChromosomeCodec,
{
    /// Creates an engine, rejecting an invalid configuration or a codec
    /// whose chromosome length differs from the objective's domain size.
    pub fn new(objective: &'a O, codec: C, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let chromosome = codec.chromosome_len();
        let domain = objective.domain_size();
        if chromosome != domain {
            return Err(ConfigError::ChromosomeLength { chromosome, domain });
        }
        Ok(Self {
            objective,
            codec,
            config,
            hook: NoHook,
        })
    }
}

impl<'a, O, C, H> GaRunner<'a, O, C, H>
where
    O: Objective + ?Sized,
    C: ChromosomeCodec,
    H: GenerationHook,
{
    /// Replaces the generation hook.
    pub fn with_hook<K: GenerationHook>(self, hook: K) -> GaRunner<'a, O, C, K> {
        GaRunner {
            objective: self.objective,
            codec: self.codec,
            config: self.config,
            hook,
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The generation hook.
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Builds and evaluates a chromosome from `genes`.
    pub fn chromosome(&self, genes: Vec<C::Gene>) -> Chromosome<C::Gene> {
        Chromosome::new(genes, &self.codec, self.objective)
    }

    /// One chromosome with every locus drawn independently.
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome<C::Gene> {
        let genes = (0..self.codec.chromosome_len())
            .map(|locus| self.codec.random_gene(locus, rng))
            .collect();
        self.chromosome(genes)
    }

    /// `population_size` random chromosomes, each evaluated.
    pub fn initialize_population<R: Rng>(&self, rng: &mut R) -> Vec<Chromosome<C::Gene>> {
        (0..self.config.population_size)
            .map(|_| self.random_chromosome(rng))
            .collect()
    }

    /// Tournament parent pool of the same size as `population`.
    pub fn select_parents<R: Rng>(
        &self,
        population: &[Chromosome<C::Gene>],
        rng: &mut R,
    ) -> Vec<Chromosome<C::Gene>> {
        selection::select_parents(population, self.config.tournament_size, rng)
    }

    /// Recombines consecutive parent pairs into evaluated offspring.
    ///
    /// With an odd pool the last parent is carried over unchanged.
    pub fn crossover<R: Rng>(
        &self,
        parents: &[Chromosome<C::Gene>],
        rng: &mut R,
    ) -> Vec<Chromosome<C::Gene>> {
        let mut offspring = Vec::with_capacity(parents.len());
        let mut pairs = parents.chunks_exact(2);
        for pair in &mut pairs {
            let (a, b) = (pair[0].genes(), pair[1].genes());
            let (child1, child2) = match self.config.crossover {
                Crossover::TwoPoint => {
                    let (p1, p2) = random_cut_points(a.len(), rng);
                    two_point_crossover(a, b, p1, p2)
                }
                Crossover::Uniform => uniform_crossover(a, b, rng),
            };
            offspring.push(self.chromosome(child1));
            offspring.push(self.chromosome(child2));
        }
        offspring.extend(pairs.remainder().iter().cloned());
        offspring
    }

    /// Mutates offspring locus by locus under the configured policy.
    ///
    /// A chromosome is re-evaluated once if any of its loci changed.
    /// Returns the number of chromosomes touched.
    pub fn mutate<R: Rng>(
        &mut self,
        offspring: &mut [Chromosome<C::Gene>],
        generation: usize,
        generations_without_improvement: usize,
        rng: &mut R,
    ) -> usize {
        let len = self.codec.chromosome_len();
        let mut touched = 0usize;
        for chromosome in offspring.iter_mut() {
            let mut genes = chromosome.genes().to_vec();
            let mut changed = false;
            for (locus, gene) in genes.iter_mut().enumerate() {
                let fire = match self.config.mutation {
                    MutationPolicy::FixedRate => rng.random::<f64>() < self.config.mutation_rate,
                    MutationPolicy::Dynamic => {
                        let ctx = MutationContext {
                            generation,
                            generations_without_improvement,
                            locus,
                            chromosome_len: len,
                        };
                        self.hook.mutation_criterion(&ctx, rng)
                    }
                };
                if fire {
                    *gene = self.codec.mutate_gene(*gene, locus);
                    changed = true;
                }
            }
            if changed {
                *chromosome = self.chromosome(genes);
                touched += 1;
            }
        }
        touched
    }

    /// Elitist replacement: the first worst offspring is overwritten by
    /// `previous_best` when strictly worse than it.
    ///
    /// Returns whether a replacement happened.
    pub fn select_population(
        &self,
        offspring: &mut [Chromosome<C::Gene>],
        previous_best: &Chromosome<C::Gene>,
    ) -> bool {
        let Some(worst) = weakest_index(offspring) else {
            return false;
        };
        if offspring[worst].fitness() < previous_best.fitness() {
            offspring[worst] = previous_best.clone();
            true
        } else {
            false
        }
    }

    /// Runs with a generator seeded from the configuration.
    pub fn run(&mut self) -> GaResult<C::Gene> {
        self.run_with_cancel(None)
    }

    /// Runs with a configured seed and an optional cancellation flag.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> GaResult<C::Gene> {
        let mut rng = rng_from_seed(self.config.seed);
        self.solve_with_cancel(&mut rng, cancel)
    }

    /// Runs on a caller-supplied generator.
    pub fn solve<R: Rng>(&mut self, rng: &mut R) -> GaResult<C::Gene> {
        self.solve_with_cancel(rng, None)
    }

    /// Runs on a caller-supplied generator with an optional cancellation flag.
    ///
    /// The flag is polled once per generation, alongside the time budget.
    pub fn solve_with_cancel<R: Rng>(
        &mut self,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> GaResult<C::Gene> {
        let budget = Budget::start(self.config.time_limit, self.config.max_generations, cancel);
        let mut targets = TargetTracker::new(self.config.targets.clone());

        let mut population = self.initialize_population(rng);
        let mut best_chromosome = population[fittest_index(&population)].clone();
        let mut best = self.codec.to_solution(best_chromosome.genes(), self.objective);
        let mut fitness_history = vec![best_chromosome.fitness()];
        targets.observe(best_chromosome.fitness(), 0, budget.elapsed(), &best);

        let mut generations = 0usize;
        let mut stalled = 0usize;
        let stop_reason = loop {
            if let Some(reason) = budget.check(generations, &targets) {
                break reason;
            }
            generations += 1;

            let parents = self.select_parents(&population, rng);
            let mut offspring = self.crossover(&parents, rng);
            self.mutate(&mut offspring, generations, stalled, rng);
            self.select_population(&mut offspring, &best_chromosome);
            population = offspring;

            best_chromosome = population[fittest_index(&population)].clone();
            if best_chromosome.fitness() > best.cost() {
                best = self.codec.to_solution(best_chromosome.genes(), self.objective);
                stalled = 0;
                debug!(
                    generation = generations,
                    elapsed_secs = budget.elapsed().as_secs_f64(),
                    best = %best,
                    "new best solution"
                );
            } else {
                stalled += 1;
            }

            fitness_history.push(best_chromosome.fitness());
            targets.observe(best_chromosome.fitness(), generations, budget.elapsed(), &best);

            let stats = GenerationStats {
                generation: generations,
                best_fitness: best.cost(),
                population_best_fitness: best_chromosome.fitness(),
                generations_without_improvement: stalled,
                elapsed: budget.elapsed(),
            };
            if self.hook.end_generation(&stats).is_break() {
                break StopReason::Requested;
            }
        };

        let elapsed = budget.elapsed();
        info!(
            ?stop_reason,
            generations,
            best_fitness = best.cost(),
            elapsed_secs = elapsed.as_secs_f64(),
            "ga finished"
        );

        GaResult {
            best_fitness: best.cost(),
            best,
            best_chromosome,
            generations,
            stop_reason,
            fitness_history,
            targets: targets.finish(),
            elapsed,
        }
    }
}

/// First chromosome with the strictly highest fitness; 0 if none compares.
fn fittest_index<G: Copy + PartialEq + std::fmt::Debug>(population: &[Chromosome<G>]) -> usize {
    let mut best_idx = 0;
    let mut best_fitness = f64::NEG_INFINITY;
    for (i, c) in population.iter().enumerate() {
        if c.fitness() > best_fitness {
            best_fitness = c.fitness();
            best_idx = i;
        }
    }
    best_idx
}

/// First chromosome with the strictly lowest fitness.
fn weakest_index<G: Copy + PartialEq + std::fmt::Debug>(
    population: &[Chromosome<G>],
) -> Option<usize> {
    if population.is_empty() {
        return None;
    }
    let mut worst_idx = 0;
    let mut worst_fitness = f64::INFINITY;
    for (i, c) in population.iter().enumerate() {
        if c.fitness() < worst_fitness {
            worst_fitness = c.fitness();
            worst_idx = i;
        }
    }
    Some(worst_idx)
}
