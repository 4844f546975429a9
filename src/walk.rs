use core::iter::FusedIterator;

use crate::node::{Link, NodeId, RawTree};

/// An in-order iterator over a `RedBlackTree`'s entries.
///
/// The pending path is kept on an explicit stack, so the tree itself is never touched while
/// iterating and dropping the iterator part-way is always fine.
pub struct Iter<'a, K: 'a, V: 'a> {
    tree: &'a RawTree<K, V>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K: 'a, V: 'a> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        let mut iter = Iter {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.tree[id].left;
        }
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        self.push_left_spine(tree[id].right);
        self.remaining -= 1;
        let node = &tree[id];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for Iter<'a, K, V> {}

impl<'a, K: 'a, V: 'a> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

// The recursive walks. Depth is bounded by the tree height, which the red-black rules keep
// logarithmic.

pub fn pre_order<K, V, F: FnMut(&K, &V)>(tree: &RawTree<K, V>, link: Link, visit: &mut F) {
    if let Some(id) = link {
        let node = &tree[id];
        visit(&node.key, &node.value);
        pre_order(tree, node.left, visit);
        pre_order(tree, node.right, visit);
    }
}

pub fn in_order<K, V, F: FnMut(&K, &V)>(tree: &RawTree<K, V>, link: Link, visit: &mut F) {
    if let Some(id) = link {
        let node = &tree[id];
        in_order(tree, node.left, visit);
        visit(&node.key, &node.value);
        in_order(tree, node.right, visit);
    }
}

pub fn post_order<K, V, F: FnMut(&K, &V)>(tree: &RawTree<K, V>, link: Link, visit: &mut F) {
    if let Some(id) = link {
        let node = &tree[id];
        post_order(tree, node.left, visit);
        post_order(tree, node.right, visit);
        visit(&node.key, &node.value);
    }
}
