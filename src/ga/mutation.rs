//! Permutation mutation operators for closed tours.
//!
//! Each operator takes a tour by reference and returns a new tour over the
//! same cities. Segment operators work on the open permutation (the first
//! `n` genes) and re-close the result, so the closing duplicate always
//! tracks whichever city ends up first.
//!
//! [`swap_mutation`] is the exception: it walks the interior slots of the
//! closed sequence with its own per-slot probability and never touches the
//! first or last slot.
//!
//! # References
//!
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::Tour;
use crate::error::TspError;
use crate::random::distinct_pair;

/// Mutation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MutationKind {
    /// Per-slot random swaps.
    #[default]
    Swap,
    /// Reverse a random segment.
    Inversion,
    /// Shuffle a random segment.
    Scramble,
    /// Move one city.
    Insert,
    /// Move a whole segment.
    Displacement,
    /// Reverse a random segment (same move as inversion).
    TwoOpt,
}

impl MutationKind {
    /// All variants, in configuration order.
    pub const ALL: [MutationKind; 6] = [
        Self::Swap,
        Self::Inversion,
        Self::Scramble,
        Self::Insert,
        Self::Displacement,
        Self::TwoOpt,
    ];

    /// Short name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Inversion => "inversion",
            Self::Scramble => "scramble",
            Self::Insert => "insert",
            Self::Displacement => "displacement",
            Self::TwoOpt => "two_opt",
        }
    }

    /// Applies this operator once to `tour`.
    ///
    /// `rate` is only read by [`MutationKind::Swap`], which gates each slot
    /// on it.
    pub fn apply<R: Rng>(self, tour: &Tour, rate: f64, rng: &mut R) -> Tour {
        match self {
            Self::Swap => swap_mutation(tour, rate, rng),
            Self::Inversion => inversion_mutation(tour, rng),
            Self::Scramble => scramble_mutation(tour, rng),
            Self::Insert => insert_mutation(tour, rng),
            Self::Displacement => displacement_mutation(tour, rng),
            Self::TwoOpt => two_opt_mutation(tour, rng),
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationKind {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TspError::UnknownMutation(s.to_string()))
    }
}

/// Mutates each tour with probability `rate`, applying `kind` once.
///
/// Tours that are not picked are passed through unchanged. For
/// [`MutationKind::Swap`] the per-slot gate applies on top of this one.
pub fn mutate_population<R: Rng>(
    offspring: Vec<Tour>,
    kind: MutationKind,
    rate: f64,
    rng: &mut R,
) -> Vec<Tour> {
    offspring
        .into_iter()
        .map(|tour| {
            if rng.random_range(0.0..1.0) < rate {
                kind.apply(&tour, rate, rng)
            } else {
                tour
            }
        })
        .collect()
}

// ============================================================================
// Operators
// ============================================================================

/// Swap mutation: each interior slot, with probability `rate`, swaps with a
/// uniformly random interior slot.
///
/// Interior means every slot except the first and the closing one, so the
/// start city stays fixed.
///
/// # Complexity
/// O(n)
pub fn swap_mutation<R: Rng>(tour: &Tour, rate: f64, rng: &mut R) -> Tour {
    let mut cities = tour.cities().to_vec();
    let last = cities.len().saturating_sub(1);
    for i in 1..last {
        if rng.random_range(0.0..1.0) < rate {
            let j = rng.random_range(1..last);
            cities.swap(i, j);
        }
    }
    Tour::from_closed_unchecked(cities)
}

/// Inversion mutation: reverse `[i..=j]` for random `i < j`.
///
/// # Complexity
/// O(n)
pub fn inversion_mutation<R: Rng>(tour: &Tour, rng: &mut R) -> Tour {
    let mut order = tour.open().to_vec();
    if order.len() < 2 {
        return tour.clone();
    }
    let (i, j) = distinct_pair(0, order.len(), rng);
    order[i..=j].reverse();
    Tour::from_permutation(order)
}

/// Scramble mutation: shuffle `[i..=j]` for random `i < j`.
///
/// # Complexity
/// O(n)
pub fn scramble_mutation<R: Rng>(tour: &Tour, rng: &mut R) -> Tour {
    let mut order = tour.open().to_vec();
    if order.len() < 2 {
        return tour.clone();
    }
    let (i, j) = distinct_pair(0, order.len(), rng);
    order[i..=j].shuffle(rng);
    Tour::from_permutation(order)
}

/// Insert mutation: remove one city and reinsert it at a random position,
/// the end included.
///
/// # Complexity
/// O(n) due to shifting
pub fn insert_mutation<R: Rng>(tour: &Tour, rng: &mut R) -> Tour {
    let mut order = tour.open().to_vec();
    let n = order.len();
    if n < 2 {
        return tour.clone();
    }
    let from = rng.random_range(0..n);
    let city = order.remove(from);
    let to = rng.random_range(0..=order.len());
    order.insert(to, city);
    Tour::from_permutation(order)
}

/// Displacement mutation: cut out `[i..=j]` and reinsert the whole segment
/// at a random position of what remains, the end included.
///
/// # Complexity
/// O(n)
pub fn displacement_mutation<R: Rng>(tour: &Tour, rng: &mut R) -> Tour {
    let mut order = tour.open().to_vec();
    if order.len() < 2 {
        return tour.clone();
    }
    let (i, j) = distinct_pair(0, order.len(), rng);
    let segment: Vec<usize> = order.drain(i..=j).collect();
    let at = rng.random_range(0..=order.len());
    order.splice(at..at, segment);
    Tour::from_permutation(order)
}

/// 2-opt move: reverse `[i..=j]` for random `i < j`.
pub fn two_opt_mutation<R: Rng>(tour: &Tour, rng: &mut R) -> Tour {
    inversion_mutation(tour, rng)
}

// ============================================================================
// Tests
// ============================================================================
