//! Permutation crossover operators for closed tours.
//!
//! Every operator takes two parents over the same `n` cities and returns two
//! children, each again a closed tour over the same city set. For PMX, CX
//! and PBX child one inherits its fixed material from parent one; OX returns
//! the child built on parent two's segment first.
//!
//! # Operators
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), position-exact cycle
//! - [`position_based_crossover`] (PBX): Syswerda (1991), random position subset
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"
//! - Syswerda (1991), "Schedule Optimization Using Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::Tour;
use crate::error::TspError;
use crate::random::distinct_pair;

const EMPTY: usize = usize::MAX;

/// Crossover variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CrossoverKind {
    /// Order crossover.
    #[default]
    Ox,
    /// Partially mapped crossover.
    Pmx,
    /// Cycle crossover.
    Cx,
    /// Position-based crossover.
    Pbx,
}

impl CrossoverKind {
    /// All variants, in configuration order.
    pub const ALL: [CrossoverKind; 4] = [Self::Ox, Self::Pmx, Self::Cx, Self::Pbx];

    /// Short name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ox => "ox",
            Self::Pmx => "pmx",
            Self::Cx => "cx",
            Self::Pbx => "pbx",
        }
    }

    /// Recombines two parents into two children.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn apply<R: Rng>(self, parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
        match self {
            Self::Ox => order_crossover(parent1, parent2, rng),
            Self::Pmx => pmx_crossover(parent1, parent2, rng),
            Self::Cx => cycle_crossover(parent1, parent2),
            Self::Pbx => position_based_crossover(parent1, parent2, rng),
        }
    }
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrossoverKind {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TspError::UnknownCrossover(s.to_string()))
    }
}

fn check_parents(parent1: &Tour, parent2: &Tour) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
}

// ============================================================================
// OX
// ============================================================================

/// Order Crossover (OX) on the closed sequence.
///
/// Two distinct cuts `start < end` are drawn from `[1, n-2]`. Each child
/// keeps one parent's `[start..=end]` in place, then takes the remaining
/// cities in the other parent's order, writing from `end + 1` onwards and
/// wrapping to slot 1 instead of slot 0. Slot 0 is filled last by copying
/// the final slot, which keeps the tour closed.
///
/// The first child carries `parent2`'s segment and the second `parent1`'s.
///
/// With fewer than four cities no valid cut pair exists and the parents are
/// returned unchanged.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn order_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
    check_parents(parent1, parent2);
    let n = parent1.num_cities();
    if n < 4 {
        return (parent1.clone(), parent2.clone());
    }

    let (start, end) = distinct_pair(1, n - 1, rng);

    let child1 = ox_build_child(parent2.cities(), parent1.cities(), start, end);
    let child2 = ox_build_child(parent1.cities(), parent2.cities(), start, end);

    (
        Tour::from_closed_unchecked(child1),
        Tour::from_closed_unchecked(child2),
    )
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let size = template.len();
    let mut child = vec![EMPTY; size];
    let mut placed = vec![false; size - 1];

    child[start..=end].copy_from_slice(&template[start..=end]);
    for &city in &template[start..=end] {
        placed[city] = true;
    }

    let mut pos = (end + 1) % size;
    for &city in donor {
        if placed[city] {
            continue;
        }
        child[pos] = city;
        placed[city] = true;
        pos += 1;
        if pos == size {
            pos = 1;
        }
    }

    if child[0] == EMPTY {
        child[0] = child[size - 1];
    }
    child
}

// ============================================================================
// PMX
// ============================================================================

/// Partially Mapped Crossover (PMX) on the open permutation.
///
/// Cuts `a < b` are drawn from `[0, n)`. The child keeps `parent1[a..b]`;
/// every other slot takes `parent2`'s city there, following the mapping
/// `parent1[i] -> parent2[i]` (for `i` in `a..b`) until the city is no
/// longer a key.
///
/// # Complexity
/// O(n) expected; chain following is bounded by the segment length
pub fn pmx_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> (Tour, Tour) {
    check_parents(parent1, parent2);
    let n = parent1.num_cities();
    if n < 2 {
        return (parent1.clone(), parent2.clone());
    }

    let (a, b) = distinct_pair(0, n, rng);

    let child1 = pmx_build_child(parent1.open(), parent2.open(), a, b);
    let child2 = pmx_build_child(parent2.open(), parent1.open(), a, b);

    (Tour::from_permutation(child1), Tour::from_permutation(child2))
}

/// Build one PMX child: copy `template[a..b]`, resolve the rest from `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], a: usize, b: usize) -> Vec<usize> {
    let n = template.len();
    let mut mapping: Vec<Option<usize>> = vec![None; n];
    for i in a..b {
        mapping[template[i]] = Some(donor[i]);
    }

    (0..n)
        .map(|i| {
            if (a..b).contains(&i) {
                return template[i];
            }
            let mut city = donor[i];
            while let Some(mapped) = mapping[city] {
                city = mapped;
            }
            city
        })
        .collect()
}

// ============================================================================
// CX
// ============================================================================

/// Cycle Crossover (CX) on the open permutation.
///
/// From the first unfilled slot, follows the cycle `i -> position of
/// parent1[i] in parent2` back to its start and gives every slot on it
/// `parent1`'s city. Tracing restarts from the next unfilled slot until
/// none remain, so every slot lies on a traced cycle and each child
/// reproduces the order of the parent it was traced over. Deterministic.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn cycle_crossover(parent1: &Tour, parent2: &Tour) -> (Tour, Tour) {
    check_parents(parent1, parent2);
    let child1 = cx_build_child(parent1.open(), parent2.open());
    let child2 = cx_build_child(parent2.open(), parent1.open());
    (Tour::from_permutation(child1), Tour::from_permutation(child2))
}

/// Build one CX child: trace every cycle of `template` against `donor`.
fn cx_build_child(template: &[usize], donor: &[usize]) -> Vec<usize> {
    let n = template.len();
    let mut donor_pos = vec![0usize; n];
    for (i, &city) in donor.iter().enumerate() {
        donor_pos[city] = i;
    }

    let mut child = vec![EMPTY; n];
    for start in 0..n {
        if child[start] != EMPTY {
            continue;
        }
        let mut idx = start;
        loop {
            child[idx] = template[idx];
            idx = donor_pos[template[idx]];
            if idx == start {
                break;
            }
        }
    }
    child
}

// ============================================================================
// PBX
// ============================================================================

/// Position-Based Crossover (PBX) on the open permutation.
///
/// `n / 2` distinct positions are drawn once and shared by both children.
/// The child keeps `parent1`'s cities at those positions and fills the
/// empty slots left to right with `parent2`'s remaining cities in order.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn position_based_crossover<R: Rng>(
    parent1: &Tour,
    parent2: &Tour,
    rng: &mut R,
) -> (Tour, Tour) {
    check_parents(parent1, parent2);
    let n = parent1.num_cities();
    if n == 0 {
        return (parent1.clone(), parent2.clone());
    }

    let positions = rand::seq::index::sample(rng, n, n / 2).into_vec();

    let child1 = pbx_build_child(parent1.open(), parent2.open(), &positions);
    let child2 = pbx_build_child(parent2.open(), parent1.open(), &positions);

    (Tour::from_permutation(child1), Tour::from_permutation(child2))
}

/// Build one PBX child: keep `template` at `positions`, fill from `donor`.
fn pbx_build_child(template: &[usize], donor: &[usize], positions: &[usize]) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![EMPTY; n];
    let mut present = vec![false; n];
    for &pos in positions {
        child[pos] = template[pos];
        present[template[pos]] = true;
    }

    let mut cursor = 0;
    for &city in donor {
        if present[city] {
            continue;
        }
        while child[cursor] != EMPTY {
            cursor += 1;
        }
        child[cursor] = city;
        present[city] = true;
    }
    child
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn tour(order: &[usize]) -> Tour {
        Tour::from_permutation(order.to_vec())
    }

    fn same_city_set(child: &Tour, parent: &Tour) -> bool {
        let a: HashSet<usize> = child.open().iter().copied().collect();
        let b: HashSet<usize> = parent.open().iter().copied().collect();
        a.len() == child.num_cities() && a == b
    }

    // ---- Dispatch ----

    #[test]
    fn test_parse_kinds() {
        for kind in CrossoverKind::ALL {
            assert_eq!(kind.name().parse::<CrossoverKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
        assert_eq!(
            "erx".parse::<CrossoverKind>(),
            Err(TspError::UnknownCrossover("erx".into()))
        );
        assert!("OX".parse::<CrossoverKind>().is_err());
    }

    // ---- OX ----

    #[test]
    fn test_ox_fill_order_skips_slot_zero() {
        // n = 6, size = 7, cut [2, 3]
        let p1 = [0, 1, 2, 3, 4, 5, 0];
        let p2 = [5, 4, 3, 2, 1, 0, 5];
        let child = ox_build_child(&p1, &p2, 2, 3);
        // Segment keeps 2, 3 at slots 2..=3. Donor order minus {2, 3}:
        // 5, 4, 1, 0 go to slots 4, 5, 6, then wrap to 1. Slot 0 copies slot 6.
        assert_eq!(child, vec![1, 0, 2, 3, 5, 4, 1]);
        assert!(Tour::from_closed(child).is_ok());
    }

    #[test]
    fn test_ox_keeps_segment() {
        let p1 = [0, 1, 2, 3, 4, 5, 6, 7, 0];
        let p2 = [3, 7, 5, 1, 6, 0, 2, 4, 3];
        let child = ox_build_child(&p1, &p2, 1, 5);
        assert_eq!(&child[1..=5], &p1[1..=5]);
        assert_eq!(child[0], child[8]);
    }

    #[test]
    fn test_ox_produces_valid_tours() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = tour(&[7, 6, 5, 4, 3, 2, 1, 0]);

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(c1.is_valid(), "OX child1 not valid: {c1:?}");
            assert!(c2.is_valid(), "OX child2 not valid: {c2:?}");
            assert_eq!(c1.len(), p1.len());
        }
    }

    #[test]
    fn test_ox_minimum_size() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2, 3]);
        let p2 = tour(&[3, 1, 0, 2]);
        for _ in 0..50 {
            // Only cut pair available is (1, 2). Child one carries p2's segment.
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.cities(), &[3, 1, 0, 2, 3]);
            assert_eq!(c2.cities(), &[0, 1, 2, 3, 0]);
            assert!(c1.is_valid() && c2.is_valid());
        }
    }

    #[test]
    fn test_ox_small_tours_pass_through() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2]);
        let p2 = tour(&[2, 1, 0]);
        let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    // ---- PMX ----

    #[test]
    fn test_pmx_follows_mapping_chain() {
        let p1 = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let p2 = [4, 5, 2, 1, 8, 7, 6, 0, 3];
        // Segment [3, 6): p1 keeps 4, 5, 6; map 4->1, 5->8, 6->7.
        let child = pmx_build_child(&p1, &p2, 3, 6);
        // slot 0: 4 -> 1; slot 1: 5 -> 8; slot 2: 2; slot 6: 6 -> 7;
        // slot 7: 0; slot 8: 3
        assert_eq!(child, vec![1, 8, 2, 4, 5, 6, 7, 0, 3]);
    }

    #[test]
    fn test_pmx_produces_valid_tours() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = tour(&[3, 7, 5, 1, 6, 0, 2, 4]);

        for _ in 0..100 {
            let (c1, c2) = pmx_crossover(&p1, &p2, &mut rng);
            assert!(c1.is_valid(), "PMX child1 not valid: {c1:?}");
            assert!(c2.is_valid(), "PMX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = create_rng(42);
        let p = tour(&[0, 1, 2, 3, 4]);
        let (c1, c2) = pmx_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_pmx_single_city() {
        let mut rng = create_rng(42);
        let p = tour(&[0]);
        let (c1, c2) = pmx_crossover(&p, &p, &mut rng);
        assert_eq!(c1.cities(), &[0, 0]);
        assert_eq!(c2.cities(), &[0, 0]);
    }

    // ---- CX ----

    #[test]
    fn test_cx_traces_every_cycle() {
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = tour(&[7, 2, 6, 1, 3, 5, 4, 0]);
        // Cycles by slot: {0, 7}, {1, 3, 4, 6, 2}, {5}. All of them get traced.
        let (c1, c2) = cycle_crossover(&p1, &p2);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_cx_two_cycles_keep_template() {
        let p1 = tour(&[0, 1, 2, 3]);
        let p2 = tour(&[1, 0, 3, 2]);
        let (c1, c2) = cycle_crossover(&p1, &p2);
        assert_eq!(c1.cities(), &[0, 1, 2, 3, 0]);
        assert_eq!(c2.cities(), &[1, 0, 3, 2, 1]);
    }

    #[test]
    fn test_cx_build_child_fills_every_slot() {
        let template = [4, 0, 3, 1, 2, 5];
        let donor = [0, 4, 1, 3, 5, 2];
        let child = cx_build_child(&template, &donor);
        assert_eq!(child, template.to_vec());
    }

    #[test]
    fn test_cx_full_cycle_copies_template() {
        let p1 = tour(&[0, 1, 2, 3]);
        let p2 = tour(&[1, 2, 3, 0]);
        let (c1, c2) = cycle_crossover(&p1, &p2);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_cx_identical_parents() {
        let p = tour(&[2, 0, 3, 1]);
        let (c1, c2) = cycle_crossover(&p, &p);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    // ---- PBX ----

    #[test]
    fn test_pbx_fill() {
        let p1 = [0, 1, 2, 3, 4, 5];
        let p2 = [5, 3, 1, 4, 0, 2];
        let child = pbx_build_child(&p1, &p2, &[1, 4, 5]);
        // Kept: slot 1 = 1, slot 4 = 4, slot 5 = 5. Remaining p2 order: 3, 0, 2.
        assert_eq!(child, vec![3, 1, 0, 2, 4, 5]);
    }

    #[test]
    fn test_pbx_produces_valid_tours() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let p2 = tour(&[8, 3, 6, 0, 2, 7, 1, 5, 4]);
        for _ in 0..100 {
            let (c1, c2) = position_based_crossover(&p1, &p2, &mut rng);
            assert!(c1.is_valid(), "PBX child1 not valid: {c1:?}");
            assert!(c2.is_valid(), "PBX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_pbx_keeps_half_of_parent() {
        let mut rng = create_rng(5);
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let p2 = tour(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        let (c1, _) = position_based_crossover(&p1, &p2, &mut rng);
        let kept = c1
            .open()
            .iter()
            .zip(p1.open())
            .filter(|(a, b)| a == b)
            .count();
        assert!(kept >= 5, "expected at least n/2 slots from parent1, got {kept}");
    }

    // ---- All variants ----

    #[test]
    fn test_apply_dispatches_every_kind() {
        let mut rng = create_rng(42);
        let p1 = tour(&[0, 1, 2, 3, 4, 5, 6]);
        let p2 = tour(&[6, 4, 2, 0, 5, 3, 1]);
        for kind in CrossoverKind::ALL {
            for _ in 0..20 {
                let (c1, c2) = kind.apply(&p1, &p2, &mut rng);
                assert!(same_city_set(&c1, &p1), "{kind}: {c1:?}");
                assert!(same_city_set(&c2, &p1), "{kind}: {c2:?}");
                assert!(c1.is_valid() && c2.is_valid());
            }
        }
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_mismatched_parents_panic() {
        let mut rng = create_rng(42);
        order_crossover(&tour(&[0, 1, 2, 3, 4]), &tour(&[0, 1, 2, 3]), &mut rng);
    }

    fn arb_parents() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (1usize..40).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_children_are_valid_tours(
            (p1, p2) in arb_parents(),
            seed in any::<u64>(),
        ) {
            let p1 = Tour::from_permutation(p1);
            let p2 = Tour::from_permutation(p2);
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            for kind in CrossoverKind::ALL {
                let (c1, c2) = kind.apply(&p1, &p2, &mut rng);
                prop_assert_eq!(c1.len(), p1.len());
                prop_assert_eq!(c2.len(), p1.len());
                prop_assert!(c1.is_valid(), "{} child1 invalid: {:?}", kind, c1);
                prop_assert!(c2.is_valid(), "{} child2 invalid: {:?}", kind, c2);
                prop_assert!(same_city_set(&c1, &p1));
                prop_assert!(same_city_set(&c2, &p2));
            }
        }
    }
}
