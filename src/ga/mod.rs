//! Genetic algorithm for the circular Traveling Salesman Problem.
//!
//! Tours are closed permutations (see [`Tour`]). Each generation keeps an
//! elite, picks parents by tournament, recombines them pairwise, mutates
//! the offspring, and replaces the rest of the population.
//!
//! # Key Types
//!
//! - [`Params`]: Run parameters (sizes, rates, operator choice, seed)
//! - [`EvolutionEngine`]: Executes the evolutionary loop
//! - [`RunResult`]: Best tour plus per-generation history
//! - [`DistanceMatrix`]: Precomputed integer distances
//!
//! # Submodules
//!
//! - [`crossover`]: OX, PMX, CX and PBX recombination
//! - [`mutation`]: swap, inversion, scramble, insert, displacement and 2-opt
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling
//!   Salesman Problem: A Review of Representations and Operators"

mod config;
pub mod crossover;
mod distance;
mod fitness;
mod initialize;
pub mod mutation;
mod runner;
mod selection;
mod types;

pub use config::Params;
pub use crossover::CrossoverKind;
pub use distance::DistanceMatrix;
pub use fitness::{best_index, evaluate_population, fitness_from_length, tour_fitness};
pub use initialize::{generate_population, nearest_neighbor_tour, random_tour, InitialPopulation};
pub use mutation::{mutate_population, MutationKind};
pub use runner::{breed, elite_indices, EvolutionEngine, RunResult};
pub use selection::{tournament, tournament_select};
pub use types::{validate_cities, City, GenerationRecord, Population, Tour};
