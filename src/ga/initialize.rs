//! Initial population construction.
//!
//! Tours are either nearest-neighbor constructions or uniformly random
//! permutations. In [`InitialPopulation::NearestNeighbor`] mode only a few
//! individuals are seeded heuristically so the population stays diverse.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::distance::DistanceMatrix;
use super::types::{Population, Tour};
use crate::error::TspError;
use crate::random::shuffle;

/// How the first generation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitialPopulation {
    /// Mix of nearest-neighbor tours and random tours.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "nn"))]
    NearestNeighbor,
    /// Random tours only.
    #[cfg_attr(feature = "serde", serde(rename = "random"))]
    Random,
}

impl InitialPopulation {
    /// Short name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nn",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for InitialPopulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitialPopulation {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nn" => Ok(Self::NearestNeighbor),
            "random" => Ok(Self::Random),
            other => Err(TspError::UnknownInitialPopulation(other.to_string())),
        }
    }
}

/// Builds `size` tours over the cities of `dists`, then shuffles their order.
///
/// In nearest-neighbor mode, slot `i` gets a nearest-neighbor tour starting
/// at city `i` when `i` is odd and `i < n / 2`; every other slot gets a
/// random permutation.
pub fn generate_population<R: Rng>(
    mode: InitialPopulation,
    size: usize,
    dists: &DistanceMatrix,
    rng: &mut R,
) -> Population {
    let n = dists.len();

    let mut population: Population = (0..size)
        .map(|i| {
            if mode == InitialPopulation::NearestNeighbor && i % 2 == 1 && 2 * i < n {
                nearest_neighbor_tour(i, dists)
            } else {
                random_tour(n, rng)
            }
        })
        .collect();

    shuffle(&mut population, rng);
    population
}

/// Nearest-neighbor construction from `start`.
///
/// At each step moves to the closest unvisited city; on equal distances the
/// lowest city index wins.
///
/// # Complexity
/// O(n²)
pub fn nearest_neighbor_tour(start: usize, dists: &DistanceMatrix) -> Tour {
    let n = dists.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n + 1);

    let mut current = start;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let mut next = None;
        let mut min_dist = u64::MAX;
        for (city, &d) in dists.row(current).iter().enumerate() {
            if !visited[city] && (next.is_none() || d < min_dist) {
                min_dist = d;
                next = Some(city);
            }
        }
        let Some(next) = next else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::from_permutation(order)
}

/// Uniformly random closed tour over `n` cities.
pub fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Tour {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, rng);
    Tour::from_permutation(order)
}
