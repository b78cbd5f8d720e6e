use balanced_bst::avl::AvlTree;

use std::collections::{BTreeMap, HashSet};

use crate::{do_ops, same_keys, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = AvlTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map) && same_keys(&tree, &map)
}

#[quickcheck]
fn fuzz_multiple_operations_u16(ops: Vec<Op<u16>>) -> bool {
    let mut tree = AvlTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map) && same_keys(&tree, &map)
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    crate::with_deletions::<AvlTree<_>>(xs, &deletes)
}

#[quickcheck]
fn sorted_input_stays_shallow(n: u16) -> bool {
    let n = n % 2048;
    let tree: AvlTree<_> = (0..n).collect();
    let bound = 1.44 * (f64::from(n) + 2.0).log2();

    tree.len() == usize::from(n) && tree.height() as f64 <= bound
}

#[quickcheck]
fn clones_are_independent(xs: Vec<i8>, extra: i8) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let mut copy = tree.clone();
    copy.insert(extra);

    tree.len() + 1 == copy.len() && tree.iter().eq(xs_sorted(&xs).iter())
}

fn xs_sorted(xs: &[i8]) -> Vec<i8> {
    let mut xs = xs.to_vec();
    xs.sort_unstable();
    xs
}
