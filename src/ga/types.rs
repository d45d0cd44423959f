//! Core data types: cities, closed tours, and per-generation records.
//!
//! A [`Tour`] over `n` cities is stored closed: `n + 1` indices where the
//! first `n` form a permutation of `0..n` and the last repeats the first.
//! Every constructor and operator in this crate preserves that shape.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// A city in the input table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// City ID, also its index into the distance matrix.
    pub id: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Checks that city IDs are unique and exactly cover `[0, n)`.
///
/// Uniqueness is checked before range, so a table with both a duplicate and
/// an out-of-range ID reports the duplicate.
pub fn validate_cities(cities: &[City]) -> TspResult<()> {
    let n = cities.len();
    if n == 0 {
        return Err(TspError::EmptyCityTable);
    }

    let mut seen = std::collections::HashSet::with_capacity(n);
    for city in cities {
        if !seen.insert(city.id) {
            return Err(TspError::DuplicateCityId { id: city.id });
        }
    }

    if let Some(city) = cities.iter().find(|c| c.id >= n) {
        return Err(TspError::CityIdOutOfRange { id: city.id, count: n });
    }

    Ok(())
}

/// A closed tour: `n` distinct city indices followed by the first one again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Closes a permutation of `0..n` into a tour.
    ///
    /// The permutation is not checked; use [`Tour::from_closed`] for
    /// untrusted input.
    ///
    /// # Panics
    /// Panics if `order` is empty.
    pub fn from_permutation(mut order: Vec<usize>) -> Self {
        let first = *order.first().expect("tour must visit at least one city");
        order.push(first);
        Self(order)
    }

    /// Wraps an already closed sequence after checking it is a valid tour
    /// over `0..n` where `n = cities.len() - 1`.
    pub fn from_closed(cities: Vec<usize>) -> TspResult<Self> {
        let tour = Self(cities);
        tour.validate()?;
        Ok(tour)
    }

    /// Wraps a closed sequence without checking it.
    pub(crate) fn from_closed_unchecked(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    /// Checks the closed-tour invariant.
    pub fn validate(&self) -> TspResult<()> {
        if self.0.len() < 2 {
            return Err(TspError::tour(format!(
                "expected at least 2 entries, got {}",
                self.0.len()
            )));
        }
        let n = self.num_cities();
        if self.0[0] != self.0[n] {
            return Err(TspError::tour(format!(
                "last entry {} does not close the cycle back to {}",
                self.0[n], self.0[0]
            )));
        }
        let mut seen = vec![false; n];
        for &city in self.open() {
            if city >= n {
                return Err(TspError::tour(format!("city {city} out of range [0, {n})")));
            }
            if seen[city] {
                return Err(TspError::tour(format!("city {city} visited twice")));
            }
            seen[city] = true;
        }
        Ok(())
    }

    /// Returns `true` if the tour satisfies the closed-tour invariant.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Number of distinct cities visited (`len() - 1`).
    pub fn num_cities(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Length of the closed sequence, `n + 1`.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sequence holds no indices at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The full closed sequence.
    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    /// The first `n` genes, without the closing duplicate.
    pub fn open(&self) -> &[usize] {
        &self.0[..self.num_cities()]
    }
}

/// A population of tours. Order carries no meaning except that crossover
/// pairs parents in list order.
pub type Population = Vec<Tour>;

/// Best individual of one generation, recorded before that generation evolves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationRecord {
    /// Highest fitness in the population.
    pub best_fitness: f64,
    /// Tour achieving it (first one on ties).
    pub best_tour: Tour,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        vec![
            City::new(0, 0.0, 0.0),
            City::new(1, 0.0, 1.0),
            City::new(2, 1.0, 1.0),
            City::new(3, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_validate_cities_ok() {
        assert!(validate_cities(&square()).is_ok());
    }

    #[test]
    fn test_validate_cities_unordered_ok() {
        let mut cities = square();
        cities.reverse();
        assert!(validate_cities(&cities).is_ok());
    }

    #[test]
    fn test_validate_cities_empty() {
        assert_eq!(validate_cities(&[]), Err(TspError::EmptyCityTable));
    }

    #[test]
    fn test_validate_cities_duplicate() {
        let mut cities = square();
        cities[3].id = 1;
        assert_eq!(
            validate_cities(&cities),
            Err(TspError::DuplicateCityId { id: 1 })
        );
    }

    #[test]
    fn test_validate_cities_out_of_range() {
        let mut cities = square();
        cities[2].id = 4;
        assert_eq!(
            validate_cities(&cities),
            Err(TspError::CityIdOutOfRange { id: 4, count: 4 })
        );
    }

    #[test]
    fn test_validate_cities_duplicate_reported_first() {
        let cities = vec![
            City::new(7, 0.0, 0.0),
            City::new(0, 1.0, 0.0),
            City::new(0, 2.0, 0.0),
        ];
        assert_eq!(
            validate_cities(&cities),
            Err(TspError::DuplicateCityId { id: 0 })
        );
    }

    #[test]
    fn test_tour_from_permutation() {
        let tour = Tour::from_permutation(vec![2, 0, 1]);
        assert_eq!(tour.cities(), &[2, 0, 1, 2]);
        assert_eq!(tour.open(), &[2, 0, 1]);
        assert_eq!(tour.num_cities(), 3);
        assert_eq!(tour.len(), 4);
        assert!(tour.is_valid());
    }

    #[test]
    fn test_tour_from_closed_rejects_open_cycle() {
        assert!(Tour::from_closed(vec![0, 1, 2, 1]).is_err());
    }

    #[test]
    fn test_tour_from_closed_rejects_repeat() {
        assert!(Tour::from_closed(vec![0, 1, 1, 0]).is_err());
    }

    #[test]
    fn test_tour_from_closed_rejects_out_of_range() {
        assert!(Tour::from_closed(vec![0, 5, 1, 0]).is_err());
    }

    #[test]
    fn test_tour_from_closed_rejects_short() {
        assert!(Tour::from_closed(vec![0]).is_err());
    }

    #[test]
    fn test_single_city_tour() {
        let tour = Tour::from_permutation(vec![0]);
        assert_eq!(tour.cities(), &[0, 0]);
        assert!(tour.is_valid());
    }
}
