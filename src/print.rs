use std::fmt::{self, Debug, Display};

use crate::node::Color::Black;
use crate::node::{Link, RawTree};

/// Renders the shape of a tree, one node per line, indented by depth:
///
/// ```text
/// 6 -> "six" (B)
///   5 -> "five" (B)
///     1 -> "one" (R)
///   9 -> "nine" (B)
/// ```
///
/// Nodes are listed in pre-order, left subtree first. Returned by `RedBlackTree::pretty`.
pub struct Pretty<'a, K: 'a, V: 'a> {
    pub(crate) tree: &'a RawTree<K, V>,
}

impl<'a, K: Debug + 'a, V: Debug + 'a> Pretty<'a, K, V> {
    fn write_node(&self, f: &mut fmt::Formatter, link: Link, depth: usize) -> fmt::Result {
        if let Some(id) = link {
            let node = &self.tree[id];
            let tag = if node.color == Black { "B" } else { "R" };
            writeln!(f, "{:indent$}{:?} -> {:?} ({})", "", node.key, node.value, tag, indent = depth * 2)?;
            self.write_node(f, node.left, depth + 1)?;
            self.write_node(f, node.right, depth + 1)?;
        }
        Ok(())
    }
}

impl<'a, K: Debug + 'a, V: Debug + 'a> Display for Pretty<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_node(f, self.tree.root, 0)
    }
}
