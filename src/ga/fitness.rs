//! Fitness evaluation.
//!
//! Fitness is the reciprocal of the closed tour length, so higher is
//! better. A zero-length tour scores `+inf`.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::distance::DistanceMatrix;
use super::types::Tour;

/// Fitness of a tour with the given total length.
#[inline]
pub fn fitness_from_length(length: u64) -> f64 {
    if length == 0 {
        f64::INFINITY
    } else {
        1.0 / length as f64
    }
}

/// Fitness of a single tour.
pub fn tour_fitness(tour: &Tour, dists: &DistanceMatrix) -> f64 {
    fitness_from_length(dists.tour_length(tour))
}

/// Scores every tour in the population, in order.
///
/// With the `parallel` feature the population is scored on the rayon pool.
/// Scoring draws no randomness, so both paths give identical results.
pub fn evaluate_population(population: &[Tour], dists: &DistanceMatrix) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        population
            .par_iter()
            .map(|tour| tour_fitness(tour, dists))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        population
            .iter()
            .map(|tour| tour_fitness(tour, dists))
            .collect()
    }
}

/// Index of the highest fitness; the first one wins on ties.
///
/// Returns `None` for an empty slice.
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &f) in fitness.iter().enumerate() {
        match best {
            Some(b) if f <= fitness[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
