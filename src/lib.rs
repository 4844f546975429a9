// An ordered map built on a red-black tree whose nodes live in an arena:
//
// ```
// struct RedBlackTree<K, V> {
//     nodes: Vec<Node<K, V>>,
//     root: Option<NodeId>,
// }
// ```
//
// `node` holds the arena and the shape-only primitives (rotation, transplant, descent),
// `rebalance` the insertion and removal fixups built on them, `search` the key-comparing
// descents, and `map` the public interface tying them together.

mod node;
mod print;
mod rebalance;
mod search;
mod validate;
mod walk;
pub mod map;

pub use map::RedBlackTree;
pub use print::Pretty;
pub use validate::InvariantViolation;
pub use walk::Iter;
