//! Precomputed pairwise city distances.

use super::types::{validate_cities, City, Tour};
use crate::error::TspResult;

/// Square table of integer inter-city distances.
///
/// `get(i, j)` is the Euclidean distance between cities `i` and `j`,
/// truncated toward zero. Built once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<u64>,
}

impl DistanceMatrix {
    /// Builds the matrix for a city table.
    ///
    /// Cities are placed by ID, so the table may arrive in any order. The
    /// table is validated first.
    ///
    /// # Complexity
    /// O(n²) time and space
    pub fn build(cities: &[City]) -> TspResult<Self> {
        validate_cities(cities)?;

        let n = cities.len();
        let mut coords = vec![(0.0_f64, 0.0_f64); n];
        for city in cities {
            coords[city.id] = (city.x, city.y);
        }

        let mut data = vec![0u64; n * n];
        for i in 0..n {
            let (xi, yi) = coords[i];
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (xj, yj) = coords[j];
                data[i * n + j] = (xj - xi).hypot(yj - yi).trunc() as u64;
            }
        }

        Ok(Self { n, data })
    }

    /// Builds a matrix from explicit rows. Intended for tests and callers
    /// that already hold distances.
    ///
    /// # Panics
    /// Panics if the rows do not form a square table.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Self {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            assert_eq!(row.len(), n, "distance matrix must be square");
            data.extend(row);
        }
        Self { n, data }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for a matrix over zero cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance from city `from` to city `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.n + to]
    }

    /// Row of distances out of city `from`.
    pub fn row(&self, from: usize) -> &[u64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// Total length of a closed tour, including the edge back to the start.
    pub fn tour_length(&self, tour: &Tour) -> u64 {
        tour.cities()
            .windows(2)
            .map(|edge| self.get(edge[0], edge[1]))
            .sum()
    }
}
