use balanced_bst::red_black::{Color, RedBlackTree};

use std::collections::{BTreeMap, HashSet};

use crate::{do_ops, same_keys, Op};

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = RedBlackTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map)
        && same_keys(&tree, &map)
        && tree.root_color() != Some(Color::Red)
}

#[quickcheck]
fn fuzz_multiple_operations_u16(ops: Vec<Op<u16>>) -> bool {
    let mut tree = RedBlackTree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map) && same_keys(&tree, &map)
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: RedBlackTree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    crate::with_deletions::<RedBlackTree<_>>(xs, &deletes)
}

#[quickcheck]
fn height_is_bounded_by_black_height(xs: Vec<u16>) -> bool {
    let tree: RedBlackTree<_> = xs.iter().copied().collect();

    tree.height() <= 2 * tree.black_height()
}

#[quickcheck]
fn inorder_colors_match_keys(xs: Vec<i8>) -> bool {
    let tree: RedBlackTree<_> = xs.iter().copied().collect();
    let keys: Vec<_> = tree.inorder().into_iter().map(|(key, _)| key).collect();

    keys == tree.iter().collect::<Vec<_>>()
}
