use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen};

use crate::SearchTree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Delete one occurrence of the K from the data structure
    Delete(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are
    /// weighted up so trees actually grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[true, true, false]) {
            Some(false) => Op::Delete(K::arbitrary(g)),
            _ => Op::Insert(K::arbitrary(g)),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Op::Insert(k) => Box::new(k.shrink().map(Op::Insert)),
            Op::Delete(k) => Box::new(k.shrink().map(Op::Delete)),
        }
    }
}

/// Applies `op` to both the tree and a multiset model of it, mapping each
/// key to its number of occurrences.
pub(crate) fn apply<K, T>(op: &Op<K>, tree: &mut T, model: &mut BTreeMap<K, usize>)
where
    K: Ord + Clone,
    T: SearchTree<K>,
{
    match op {
        Op::Insert(k) => {
            tree.insert(k.clone());
            *model.entry(k.clone()).or_insert(0) += 1;
        }
        Op::Delete(k) => {
            tree.delete(k);
            if let Some(count) = model.get_mut(k) {
                *count -= 1;
                if *count == 0 {
                    model.remove(k);
                }
            }
        }
    }
}

/// Checks that the tree holds exactly the keys of the model, in order.
pub(crate) fn matches<K, T>(tree: &T, model: &BTreeMap<K, usize>) -> bool
where
    K: Ord,
    T: SearchTree<K>,
{
    let expected = model
        .iter()
        .flat_map(|(k, &count)| std::iter::repeat(k).take(count));

    tree.len() == model.values().sum::<usize>()
        && tree.keys().into_iter().eq(expected)
        && model.keys().all(|k| tree.contains(k))
}
