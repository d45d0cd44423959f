//! Seeded random sources.
//!
//! Every operator in the engine takes its random source explicitly, so a
//! run is reproducible from a single seed and independent runs can use
//! independent streams.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic random source from a seed.
///
/// The same seed always yields the same stream on the same platform.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a random source seeded from `seed`, or from fresh entropy when
/// `seed` is `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Fisher-Yates shuffle of a slice in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Picks two distinct indices from `range_start..range_end`, returned in
/// ascending order.
///
/// # Panics
/// Panics if the range holds fewer than two indices.
pub fn distinct_pair<R: Rng + ?Sized>(
    range_start: usize,
    range_end: usize,
    rng: &mut R,
) -> (usize, usize) {
    assert!(
        range_end >= range_start + 2,
        "need at least two indices to pick a distinct pair"
    );
    let picked = rand::seq::index::sample(rng, range_end - range_start, 2);
    let a = range_start + picked.index(0);
    let b = range_start + picked.index(1);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..100 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_rng_from_option_seeded() {
        let mut a = rng_from_option(Some(11));
        let mut b = create_rng(11);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = create_rng(42);
        let mut v: Vec<usize> = (0..20).collect();
        shuffle(&mut v, &mut rng);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_distinct_pair_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (a, b) = distinct_pair(1, 6, &mut rng);
            assert!(a < b);
            assert!(a >= 1);
            assert!(b < 6);
        }
    }

    #[test]
    #[should_panic(expected = "at least two indices")]
    fn test_distinct_pair_too_small() {
        let mut rng = create_rng(42);
        distinct_pair(3, 4, &mut rng);
    }
}
