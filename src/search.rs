use core::borrow::Borrow;
use core::cmp::Ordering;

use crate::node::{Link, NodeId, RawTree, Side};

use self::SearchResult::*;

pub enum SearchResult {
    Found(NodeId),
    /// The key is absent; it would hang under the given parent on the given side.
    GoDown(Link, Side),
}

pub fn search_tree<K, V, Q: ?Sized>(tree: &RawTree<K, V>, key: &Q) -> SearchResult
where
    K: Borrow<Q>,
    Q: Ord,
{
    let mut parent = None;
    let mut side = Side::Left;
    let mut cur = tree.root;

    while let Some(id) = cur {
        side = match key.cmp(tree[id].key.borrow()) {
            Ordering::Less => Side::Left,
            Ordering::Equal => return Found(id),
            Ordering::Greater => Side::Right,
        };
        parent = cur;
        cur = tree[id].child(side);
    }

    GoDown(parent, side)
}

pub fn find<K, V, Q: ?Sized>(tree: &RawTree<K, V>, key: &Q) -> Option<NodeId>
where
    K: Borrow<Q>,
    Q: Ord,
{
    match search_tree(tree, key) {
        Found(id) => Some(id),
        GoDown(..) => None,
    }
}

/// Where a new node with `key` goes. An equal key already in the tree does not stop the
/// descent: ties go to the right, so equal keys keep their insertion order.
pub fn insertion_point<K: Ord, V>(tree: &RawTree<K, V>, key: &K) -> (Link, Side) {
    let mut parent = match search_tree(tree, key) {
        GoDown(parent, side) => return (parent, side),
        Found(id) => id,
    };
    let mut side = Side::Right;

    while let Some(id) = tree[parent].child(side) {
        parent = id;
        side = if *key < tree[id].key { Side::Left } else { Side::Right };
    }

    (Some(parent), side)
}
