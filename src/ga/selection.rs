//! Tournament selection of parents.
//!
//! Each tournament samples `k` individuals uniformly **with replacement**
//! and keeps the fittest. Higher `k` means stronger selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::types::Tour;

/// Runs one tournament and returns the winning index.
///
/// Draws `k` indices from `0..fitness.len()`; the highest fitness wins and
/// the earliest draw wins ties.
///
/// # Complexity
/// O(k)
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    assert!(!fitness.is_empty(), "cannot select from empty population");
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Selects `num_parents` parents by repeated tournaments.
///
/// Parents come back in draw order; the caller pairs consecutive entries.
///
/// # Panics
/// Panics if `population` is empty or `fitness` has a different length.
pub fn tournament_select<R: Rng>(
    population: &[Tour],
    fitness: &[f64],
    tournament_size: usize,
    num_parents: usize,
    rng: &mut R,
) -> Vec<Tour> {
    assert_eq!(
        population.len(),
        fitness.len(),
        "every tour needs a fitness score"
    );
    (0..num_parents)
        .map(|_| population[tournament(fitness, tournament_size, rng)].clone())
        .collect()
}
