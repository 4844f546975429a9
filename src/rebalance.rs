// Red-black insertion and removal on the raw arena tree. Both fixups are written once against a
// `Side` (the side the violation sits on) instead of as two mirrored branches.

use log::trace;

use crate::node::Color::{Black, Red};
use crate::node::{Link, NodeId, RawTree, Side};

impl<K, V> RawTree<K, V> {
    /// Links a new red leaf at a position found by `search::insertion_point` and rebalances.
    pub fn insert_at(&mut self, parent: Link, side: Side, key: K, value: V) -> NodeId {
        let id = self.alloc(key, value);
        self.attach(parent, side, id);
        self.fixup_after_insert(id);
        id
    }

    fn fixup_after_insert(&mut self, mut z: NodeId) {
        while let Some(mut parent) = self[z].parent {
            if self[parent].color == Black {
                break;
            }
            // The root is black, so a red parent always has a parent of its own.
            let grandparent = self[parent].parent.expect("red node at the root");
            let side = self.side_of(parent, grandparent);
            let uncle = self[grandparent].child(side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self[u].color == Red) {
                trace!("insert fixup at {:?}: red uncle, recolor", z);
                self[parent].color = Black;
                self[uncle].color = Black;
                self[grandparent].color = Red;
                z = grandparent;
                continue;
            }

            if self.side_of(z, parent) != side {
                trace!("insert fixup at {:?}: inner child, rotate {:?} at parent", z, side);
                z = parent;
                self.rotate(z, side);
                parent = self[z].parent.expect("rotation lifted a child above z");
            }

            trace!("insert fixup at {:?}: outer child, rotate {:?} at grandparent", z, side.opposite());
            self[parent].color = Black;
            self[grandparent].color = Red;
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self[root].color = Black;
        }
    }

    /// Unlinks `z`, rebalances, and hands back its contents.
    pub fn remove(&mut self, z: NodeId) -> (K, V) {
        let mut removed_color = self[z].color;
        // `x` is whatever moves into the vacated position; it may be nil, so its parent is
        // tracked separately.
        let x;
        let x_parent;

        match (self[z].left, self[z].right) {
            (None, child) | (child, None) => {
                x = child;
                x_parent = self[z].parent;
                self.transplant(z, child);
            }
            (Some(left), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                removed_color = self[successor].color;
                x = self[successor].right;

                if successor == right {
                    x_parent = Some(successor);
                } else {
                    x_parent = self[successor].parent;
                    self.transplant(successor, x);
                    self[successor].right = Some(right);
                    self[right].parent = Some(successor);
                }

                self.transplant(z, Some(successor));
                self[successor].left = Some(left);
                self[left].parent = Some(successor);
                let color = self[z].color;
                self[successor].color = color;
            }
        }

        if removed_color == Black {
            self.fixup_after_delete(x, x_parent);
        }

        let node = self.free(z);
        (node.key, node.value)
    }

    fn fixup_after_delete(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && !self.is_red(x) {
            let p = parent.expect("double-black node below the root without a parent");
            // A nil `x` is still told apart from its sibling: the sibling of a double-black
            // position always exists.
            let side = if self[p].left == x { Side::Left } else { Side::Right };
            let far_side = side.opposite();
            let mut sibling = self[p].child(far_side).expect("double-black node without a sibling");

            if self[sibling].color == Red {
                trace!("delete fixup under {:?}: red sibling, rotate {:?}", p, side);
                self[sibling].color = Black;
                self[p].color = Red;
                self.rotate(p, side);
                sibling = self[p].child(far_side).expect("rotation left no sibling");
            }

            let near = self[sibling].child(side);
            let far = self[sibling].child(far_side);

            if !self.is_red(near) && !self.is_red(far) {
                trace!("delete fixup under {:?}: black nephews, push up", p);
                self[sibling].color = Red;
                x = Some(p);
                parent = self[p].parent;
                continue;
            }

            if !self.is_red(far) {
                trace!("delete fixup under {:?}: red near nephew, rotate {:?} at sibling", p, far_side);
                if let Some(near) = near {
                    self[near].color = Black;
                }
                self[sibling].color = Red;
                self.rotate(sibling, far_side);
                sibling = self[p].child(far_side).expect("rotation left no sibling");
            }

            trace!("delete fixup under {:?}: red far nephew, rotate {:?}", p, side);
            let color = self[p].color;
            self[sibling].color = color;
            self[p].color = Black;
            if let Some(far) = self[sibling].child(far_side) {
                self[far].color = Black;
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self[x].color = Black;
        }
    }
}
