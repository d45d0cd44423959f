//! Evolutionary loop execution.
//!
//! [`EvolutionEngine`] orchestrates the complete process:
//! validation → distance matrix → initialization → (evaluate → record →
//! elitism → selection → crossover → mutation → replacement) × generations.

use log::{debug, info, trace};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::Params;
use super::crossover::CrossoverKind;
use super::distance::DistanceMatrix;
use super::fitness::{best_index, evaluate_population};
use super::initialize::generate_population;
use super::mutation::mutate_population;
use super::selection::tournament_select;
use super::types::{City, GenerationRecord, Population, Tour};
use crate::error::TspResult;
use crate::random::rng_from_option;

/// Result of a run.
///
/// `fitness_history[g]` and `tour_history[g]` describe the population at
/// the start of generation `g`, before it evolved. `best_tour` and
/// `best_fitness` come from the population left after the final
/// generation, so they need not appear in the history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunResult {
    /// Best tour of the final population.
    pub best_tour: Tour,

    /// Fitness of `best_tour`.
    pub best_fitness: f64,

    /// Best fitness of each generation, `generations` entries.
    pub fitness_history: Vec<f64>,

    /// Best tour of each generation, `generations` entries.
    pub tour_history: Vec<Tour>,
}

impl RunResult {
    /// Length of `best_tour`, recovered from its fitness.
    pub fn best_length(&self) -> u64 {
        if self.best_fitness.is_infinite() {
            0
        } else {
            (1.0 / self.best_fitness).round() as u64
        }
    }

    /// Per-generation records, in generation order.
    pub fn history(&self) -> impl Iterator<Item = GenerationRecord> + '_ {
        self.fitness_history
            .iter()
            .zip(&self.tour_history)
            .map(|(&best_fitness, best_tour)| GenerationRecord {
                best_fitness,
                best_tour: best_tour.clone(),
            })
    }
}

/// Executes the TSP evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp_evolve::ga::{City, EvolutionEngine, Params};
///
/// let cities = vec![
///     City::new(0, 0.0, 0.0),
///     City::new(1, 0.0, 10.0),
///     City::new(2, 10.0, 10.0),
///     City::new(3, 10.0, 0.0),
/// ];
/// let params = Params::default()
///     .with_population_size(20)
///     .with_generations(10)
///     .with_elite_size(2)
///     .with_seed(42);
/// let result = EvolutionEngine::run(&cities, &params)?;
/// assert_eq!(result.fitness_history.len(), 10);
/// assert_eq!(result.best_tour.len(), 5);
/// # Ok::<(), u_tsp_evolve::TspError>(())
/// ```
pub struct EvolutionEngine;

impl EvolutionEngine {
    /// Runs the solver, seeding the random source from `params.seed`.
    ///
    /// # Errors
    /// Returns a validation error for a malformed city table and a
    /// configuration error for invalid parameters. Both are detected before
    /// any evolution happens.
    pub fn run(cities: &[City], params: &Params) -> TspResult<RunResult> {
        let mut rng = rng_from_option(params.seed);
        Self::run_with_rng(cities, params, &mut rng)
    }

    /// Runs the solver with a caller-supplied random source.
    ///
    /// `params.seed` is ignored. Use this to give concurrent runs
    /// independent streams.
    pub fn run_with_rng<R: Rng>(
        cities: &[City],
        params: &Params,
        rng: &mut R,
    ) -> TspResult<RunResult> {
        params.validate()?;
        let dists = DistanceMatrix::build(cities)?;

        info!(
            "starting run: {} cities, population {}, {} generations, crossover {}, mutation {}",
            dists.len(),
            params.population_size,
            params.generations,
            params.crossover_type,
            params.mutation_type
        );

        let mut population = generate_population(
            params.initial_population,
            params.population_size,
            &dists,
            rng,
        );

        let mut fitness_history = Vec::with_capacity(params.generations);
        let mut tour_history = Vec::with_capacity(params.generations);

        for generation in 0..params.generations {
            let fitness = evaluate_population(&population, &dists);

            let best = best_index(&fitness).unwrap_or(0);
            fitness_history.push(fitness[best]);
            tour_history.push(population[best].clone());
            debug!("generation {generation}: best fitness {:.6e}", fitness[best]);

            population = Self::evolve(&population, &fitness, params, rng);
        }

        let fitness = evaluate_population(&population, &dists);
        let best = best_index(&fitness).unwrap_or(0);
        let result = RunResult {
            best_tour: population[best].clone(),
            best_fitness: fitness[best],
            fitness_history,
            tour_history,
        };

        info!(
            "run finished: best length {} (fitness {:.6e})",
            result.best_length(),
            result.best_fitness
        );
        Ok(result)
    }

    /// Produces the next generation from a scored population.
    ///
    /// The returned population holds the `elite_size` best input tours
    /// first (highest fitness first), followed by `population_size -
    /// elite_size` mutated offspring.
    ///
    /// # Panics
    /// Panics if `fitness` and `population` differ in length, or if
    /// offspring are requested from an empty population.
    pub fn evolve<R: Rng>(
        population: &[Tour],
        fitness: &[f64],
        params: &Params,
        rng: &mut R,
    ) -> Population {
        let elites = elite_indices(fitness, params.elite_size);
        trace!("elites: {elites:?}");

        let num_parents = params.offspring_count();
        let parents = tournament_select(
            population,
            fitness,
            params.tournament_size,
            num_parents,
            rng,
        );

        let offspring = breed(&parents, params.crossover_type, rng);
        let offspring = mutate_population(
            offspring,
            params.mutation_type,
            params.mutation_rate,
            rng,
        );

        let mut next_gen: Population = Vec::with_capacity(elites.len() + offspring.len());
        next_gen.extend(elites.into_iter().map(|i| population[i].clone()));
        next_gen.extend(offspring);
        next_gen
    }
}

/// Indices of the `elite_size` highest-fitness individuals, best first.
///
/// Ranks by a stable ascending sort and reads it backwards, so among equal
/// fitness the later index comes first.
pub fn elite_indices(fitness: &[f64], elite_size: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
    order.into_iter().rev().take(elite_size).collect()
}

/// Crosses parents in consecutive pairs, two children per pair.
///
/// With an odd parent count the last parent is mated with the first one and
/// only its first child is kept, so exactly `parents.len()` offspring come
/// back.
pub fn breed<R: Rng>(parents: &[Tour], kind: CrossoverKind, rng: &mut R) -> Vec<Tour> {
    let count = parents.len();
    let mut offspring = Vec::with_capacity(count);
    for i in (0..count).step_by(2) {
        let parent1 = &parents[i];
        let parent2 = parents.get(i + 1).unwrap_or(&parents[0]);
        let (child1, child2) = kind.apply(parent1, parent2, rng);
        offspring.push(child1);
        if i + 1 < count {
            offspring.push(child2);
        }
    }
    offspring
}

// ============================================================================
// Tests
// ============================================================================
