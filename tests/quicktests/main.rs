//! Randomized tests of the public API, checking every tree against a
//! `BTreeMap` that counts how often each key was inserted.

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

mod avl;
mod plain;
mod red_black;

use std::collections::BTreeMap;

use balanced_bst::SearchTree;
use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Delete one occurrence of the K from the data structure
    Delete(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(K::arbitrary(g))
        } else {
            Op::Delete(K::arbitrary(g))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k) => Box::new(k.shrink().map(Op::Insert)),
            Op::Delete(k) => Box::new(k.shrink().map(Op::Delete)),
        }
    }
}

/// Applies a set of operations to a tree and a counting map, validating the
/// tree after every step. Returns `false` as soon as validation fails.
pub fn do_ops<K, T>(ops: &[Op<K>], tree: &mut T, map: &mut BTreeMap<K, usize>) -> bool
where
    K: Ord + Clone,
    T: SearchTree<K>,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                *map.entry(k.clone()).or_default() += 1;
            }
            Op::Delete(k) => {
                tree.delete(k);
                if let Some(count) = map.get_mut(k) {
                    *count -= 1;
                    if *count == 0 {
                        map.remove(k);
                    }
                }
            }
        }
        if tree.validate().is_err() {
            return false;
        }
    }
    true
}

/// Checks that the tree holds exactly the keys of `map`, each as many times as
/// it is counted.
pub fn same_keys<K, T>(tree: &T, map: &BTreeMap<K, usize>) -> bool
where
    K: Ord,
    T: SearchTree<K>,
{
    let expected = map
        .iter()
        .flat_map(|(k, &count)| std::iter::repeat(k).take(count));

    tree.len() == map.values().sum::<usize>() && tree.keys().into_iter().eq(expected)
}

/// Inserts all of `xs`, then deletes one occurrence of each of `deletes`, and
/// checks the survivors against the same edits made to a sorted `Vec`.
pub fn with_deletions<T>(xs: Vec<i8>, deletes: &[i8]) -> bool
where
    T: SearchTree<i8> + Default,
{
    let mut tree = T::default();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in deletes {
        // Each delete removes a single occurrence.
        if let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }
    still_present.sort_unstable();

    tree.validate().is_ok() && tree.keys().into_iter().eq(still_present.iter())
}
