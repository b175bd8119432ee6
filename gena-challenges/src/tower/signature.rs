//! Visited-state keys that ignore the order of the non-target rods.
//!
//! Rods 2..=n are interchangeable: swapping the contents of two of them never
//! changes how many moves remain. Keying states by [`Signature`] folds all
//! `(n - 1)!` such arrangements onto a single entry.

use super::{Disc, Tower};

const ROD_SEPARATOR: Disc = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<Disc>);

impl Signature {
    /// Canonical key: rod 1 first, then the other rods in sorted order.
    pub fn of(tower: &Tower) -> Self {
        let rods = tower.rods();
        let mut others: Vec<&[Disc]> = rods[1..].iter().map(Vec::as_slice).collect();
        others.sort_unstable();
        Self::serialize(std::iter::once(rods[0].as_slice()).chain(others), tower)
    }

    /// Key of the exact arrangement, rods in their given order.
    pub fn exact(tower: &Tower) -> Self {
        Self::serialize(tower.rods().iter().map(Vec::as_slice), tower)
    }

    fn serialize<'a>(rods: impl Iterator<Item = &'a [Disc]>, tower: &Tower) -> Self {
        let mut key = Vec::with_capacity(tower.num_discs() + tower.num_rods());
        for rod in rods {
            key.extend_from_slice(rod);
            key.push(ROD_SEPARATOR);
        }
        Signature(key)
    }
}

/// Every ordering of rods `2..=num_rods`, generated with Heap's algorithm.
/// The identity ordering comes first.
pub fn rod_permutations(num_rods: usize) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (2..=num_rods).collect();
    let n = order.len();
    let mut result = vec![order.clone()];
    let mut counters = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                order.swap(0, i);
            } else {
                order.swap(counters[i], i);
            }
            result.push(order.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    result
}

/// All arrangements of `tower` that differ only in the order of the non-target
/// rods. Each shares the signature of `tower`.
pub fn aliases(tower: &Tower) -> Vec<Tower> {
    rod_permutations(tower.num_rods())
        .iter()
        .map(|order| tower.permuted(order))
        .collect()
}
