use std::error::Error;
use std::fmt;

use crate::node::Color::Red;
use crate::node::{Link, RawTree};

/// A broken red-black rule, as reported by `RedBlackTree::validate`.
///
/// Nodes are identified by their position in in-order traversal, so reporting a violation never
/// requires the key type to be printable.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedChildOfRed { rank: usize },
    /// The two subtrees of a node contain different numbers of black nodes on their paths
    /// down to the leaves.
    BlackHeightMismatch { rank: usize, left: usize, right: usize },
    /// A key is smaller than the key visited before it.
    OutOfOrder { rank: usize },
    /// A node's parent link does not point at the node it hangs from.
    BrokenParentLink { rank: usize },
    /// The stored length disagrees with the number of reachable nodes.
    LengthMismatch { len: usize, reachable: usize },
    /// The tree is taller than `2 * floor(log2(len + 1))`.
    TooTall { height: usize, len: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::InvariantViolation::*;

        match *self {
            RedRoot => write!(f, "root is red"),
            RedChildOfRed { rank } => write!(f, "red node #{} has a red child", rank),
            BlackHeightMismatch { rank, left, right } => write!(
                f,
                "node #{} has black-height {} on the left but {} on the right",
                rank, left, right
            ),
            OutOfOrder { rank } => write!(f, "node #{} is smaller than its predecessor", rank),
            BrokenParentLink { rank } => write!(f, "node #{} has a stale parent link", rank),
            LengthMismatch { len, reachable } => write!(
                f,
                "length is {} but {} nodes are reachable from the root",
                len, reachable
            ),
            TooTall { height, len } => write!(f, "height {} is too large for {} nodes", height, len),
        }
    }
}

impl Error for InvariantViolation {}

struct Checker<'a, K: 'a, V: 'a> {
    tree: &'a RawTree<K, V>,
    prev: Option<&'a K>,
    rank: usize,
}

impl<'a, K: Ord + 'a, V: 'a> Checker<'a, K, V> {
    /// Returns the number of black nodes on every path from `link` down to a leaf.
    fn check(&mut self, link: Link, parent: Link) -> Result<usize, InvariantViolation> {
        let id = match link {
            Some(id) => id,
            None => return Ok(0),
        };
        let tree = self.tree;
        let node = &tree[id];

        let left = self.check(node.left, link)?;

        let rank = self.rank;
        self.rank += 1;
        if node.parent != parent {
            return Err(InvariantViolation::BrokenParentLink { rank });
        }
        if self.prev.map_or(false, |prev| node.key < *prev) {
            return Err(InvariantViolation::OutOfOrder { rank });
        }
        self.prev = Some(&node.key);
        if node.color == Red && (tree.is_red(node.left) || tree.is_red(node.right)) {
            return Err(InvariantViolation::RedChildOfRed { rank });
        }

        let right = self.check(node.right, link)?;

        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { rank, left, right });
        }
        Ok(left + if node.color == Red { 0 } else { 1 })
    }
}

/// Checks every red-black rule and returns the black-height of the root.
pub fn validate<K: Ord, V>(tree: &RawTree<K, V>) -> Result<usize, InvariantViolation> {
    if tree.is_red(tree.root) {
        return Err(InvariantViolation::RedRoot);
    }

    let mut checker = Checker {
        tree,
        prev: None,
        rank: 0,
    };
    let black_height = checker.check(tree.root, None)?;

    if checker.rank != tree.len() {
        return Err(InvariantViolation::LengthMismatch {
            len: tree.len(),
            reachable: checker.rank,
        });
    }

    let height = tree.height(tree.root);
    let bound = 2 * floor_log2(tree.len() + 1);
    if height > bound {
        return Err(InvariantViolation::TooTall {
            height,
            len: tree.len(),
        });
    }

    Ok(black_height)
}

fn floor_log2(n: usize) -> usize {
    (usize::BITS - 1 - n.leading_zeros()) as usize
}
