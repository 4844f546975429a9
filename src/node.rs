// Nodes live in an arena owned by the tree and refer to each other by index:
//
// ```
// struct Node<K, V> {
//     key: K,
//     value: V,
//     color: Color,
//     left: Option<NodeId>,
//     right: Option<NodeId>,
//     parent: Option<NodeId>,
// }
// ```
//
// The child links describe the tree shape; the parent link is only ever followed upwards during
// rotation and fixup. Freed slots are chained into a free list and reused by later insertions,
// so a `NodeId` is stable for as long as its node stays in the tree.

use core::mem;
use core::ops::{Index, IndexMut};

use log::trace;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Which child of a node. Every mirrored pair of operations (the two rotations, the two halves
/// of each fixup) is written once in terms of a `Side` and its opposite.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

pub type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Link,
    pub right: Link,
    pub parent: Link,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_child(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant(Option<usize>),
}

/// The arena plus the root link. Everything in here is shape-only: no method compares keys.
#[derive(Clone, Debug)]
pub struct RawTree<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Option<usize>,
    pub root: Link,
    len: usize,
}

impl<K, V> RawTree<K, V> {
    pub fn new() -> Self {
        RawTree {
            slots: Vec::new(),
            free: None,
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Drops every node at once. The arena is flat, so this never recurses.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.root = None;
        self.len = 0;
    }

    /// Allocates a detached red node.
    pub fn alloc(&mut self, key: K, value: V) -> NodeId {
        let node = Slot::Occupied(Node::new(key, value));
        self.len += 1;
        match self.free {
            Some(idx) => {
                self.free = match mem::replace(&mut self.slots[idx], node) {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                NodeId(idx)
            }
            None => {
                self.slots.push(node);
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases a node that has already been unlinked from the tree.
    pub fn free(&mut self, id: NodeId) -> Node<K, V> {
        let slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free));
        self.free = Some(id.0);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("double free of {:?}", id),
        }
    }

    pub fn color(&self, link: Link) -> Color {
        match link {
            Some(id) => self[id].color,
            None => Color::Black,
        }
    }

    pub fn is_red(&self, link: Link) -> bool {
        self.color(link) == Color::Red
    }

    /// The side of `parent` that `child` hangs from.
    pub fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self[parent].left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self[parent].right, Some(child));
            Side::Right
        }
    }

    /// Hangs `id` under `parent` on `side`, or makes it the root when `parent` is nil.
    pub fn attach(&mut self, parent: Link, side: Side, id: NodeId) {
        match parent {
            Some(parent) => {
                debug_assert!(self[parent].child(side).is_none());
                self[parent].set_child(side, Some(id));
            }
            None => self.root = Some(id),
        }
        self[id].parent = parent;
    }

    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            Some(parent) => {
                let side = self.side_of(old, parent);
                self[parent].set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Puts the subtree `new` where `old` used to hang. `old`'s own links are left untouched.
    pub fn transplant(&mut self, old: NodeId, new: Link) {
        let parent = self[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self[new].parent = parent;
        }
    }

    // Rotation toward `side`. With `side == Left`:
    //
    //     x                y
    //    / \              / \
    //   a   y     -->    x   c
    //      / \          / \
    //     b   c        a   b
    //
    // `Right` is the mirror image. In-order sequence and colors are unchanged.
    pub fn rotate(&mut self, x: NodeId, side: Side) {
        trace!("rotate {:?} at {:?}", side, x);
        let rising = side.opposite();
        let y = self[x].child(rising).expect("rotation needs a child on the rising side");

        let inner = self[y].child(side);
        self[x].set_child(rising, inner);
        if let Some(inner) = inner {
            self[inner].parent = Some(x);
        }

        self.transplant(x, Some(y));

        self[y].set_child(side, Some(x));
        self[x].parent = Some(y);
    }

    /// Follows `side` links from `id` as far as they go.
    pub fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self[id].child(side) {
            id = next;
        }
        id
    }

    pub fn extreme_recursive(&self, id: NodeId, side: Side) -> NodeId {
        match self[id].child(side) {
            Some(next) => self.extreme_recursive(next, side),
            None => id,
        }
    }

    /// Number of nodes on the longest root-to-leaf path below `link`.
    pub fn height(&self, link: Link) -> usize {
        match link {
            Some(id) => 1 + self.height(self[id].left).max(self.height(self[id].right)),
            None => 0,
        }
    }
}

impl<K, V> Index<NodeId> for RawTree<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling {:?}", id),
        }
    }
}

impl<K, V> IndexMut<NodeId> for RawTree<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("dangling {:?}", id),
        }
    }
}
