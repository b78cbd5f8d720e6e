use balanced_bst::plain::PlainTree;

use std::collections::{BTreeMap, HashSet};

use crate::{do_ops, same_keys, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = PlainTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map) && same_keys(&tree, &map)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: PlainTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: PlainTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    crate::with_deletions::<PlainTree<_>>(xs, &deletes)
}
