use core::borrow::Borrow;
use core::ops::Index;
use std::fmt::{self, Debug};

use log::debug;

use crate::node::{RawTree, Side};
use crate::print::Pretty;
use crate::search;
use crate::validate::{self, InvariantViolation};
use crate::walk::{self, Iter};

/// An ordered map based on a red-black tree.
///
/// Every node carries a color, and after each insertion or deletion the tree is recolored and
/// rotated until the red-black rules hold again: the root is black, no red node has a red child,
/// and every path from a node down to a leaf passes the same number of black nodes. Together
/// these keep the height within `2 * log2(n + 1)`, so lookups, insertions, and deletions are all
/// O(log n) and every recursive walk is only logarithmically deep.
///
/// Nodes are stored in an arena owned by the map and refer to their children and parent by
/// index. Clearing or dropping the map frees the arena in one go.
///
/// Keys are not required to be unique. Inserting a key that is already present adds a second
/// entry after the existing ones; lookups and deletions act on one matching entry at a time.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the `Ord` trait, changes while it is in the map. Use
/// `change_key` to move an entry to a new key.
pub struct RedBlackTree<K, V> {
    tree: RawTree<K, V>,
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Makes a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        RedBlackTree {
            tree: RawTree::new(),
        }
    }

    /// Inserts a key-value pair into the map. This always adds a new entry, even when `key` is
    /// already present; the new entry is ordered after all entries with an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// map.insert(37, "a");
    /// map.insert(37, "b");
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&37, &"a"), (&37, &"b")]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        let (parent, side) = search::insertion_point(&self.tree, &key);
        self.tree.insert_at(parent, side, key, value);
        self.check();
    }

    /// Removes an entry with the given key and returns its value, or does nothing and returns
    /// `None` if the key is absent.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.delete(&1), Some("a"));
    /// assert_eq!(map.delete(&1), None);
    /// ```
    pub fn delete<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let id = search::find(&self.tree, key)?;
        let (_, value) = self.tree.remove(id);
        self.check();
        Some(value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.search(&1), Some(&"a"));
    /// assert_eq!(map.search(&2), None);
    /// ```
    pub fn search<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        search::find(&self.tree, key).map(|id| &self.tree[id].value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn search_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let id = search::find(&self.tree, key)?;
        Some(&mut self.tree[id].value)
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.search(key).is_some()
    }

    /// Moves the entry stored under `old` to `new`, keeping its value. Returns false, leaving the
    /// map untouched, if `old` is absent.
    ///
    /// The entry is deleted and inserted again rather than rekeyed in place, so the tree is
    /// rebalanced around its new position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert!(map.change_key(&1, 3));
    /// assert!(!map.change_key(&1, 4));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&2, &"b"), (&3, &"a")]);
    /// ```
    pub fn change_key<Q: ?Sized>(&mut self, old: &Q, new: K) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let id = match search::find(&self.tree, old) {
            Some(id) => id,
            None => return false,
        };
        debug!("rekeying entry {:?}", id);
        let (_, value) = self.tree.remove(id);
        self.insert(new, value);
        true
    }

    /// Checks every red-black rule, the key order, the parent links, and the stored length.
    /// Returns the black-height of the tree: the number of black nodes on every path from the
    /// root down to a leaf.
    ///
    /// A map built only through this API always validates; an error means a bug in the
    /// rebalancing code.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        validate::validate(&self.tree)
    }

    #[inline]
    fn check(&self) {
        #[cfg(feature = "check-invariants")]
        {
            if let Err(violation) = self.validate() {
                panic!("red-black invariant violated: {}", violation);
            }
        }
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut a = RedBlackTree::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.tree.len());
        self.tree.clear();
    }

    /// Returns the value stored under the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// assert_eq!(map.find_min(), None);
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.find_min(), Some(&"a"));
    /// ```
    pub fn find_min(&self) -> Option<&V> {
        self.first_key_value().map(|(_, v)| v)
    }

    /// Returns the value stored under the largest key.
    pub fn find_max(&self) -> Option<&V> {
        self.last_key_value().map(|(_, v)| v)
    }

    /// Same as `find_min`, descending by recursion instead of a loop.
    pub fn find_min_recursive(&self) -> Option<&V> {
        let id = self.tree.extreme_recursive(self.tree.root?, Side::Left);
        Some(&self.tree[id].value)
    }

    /// Same as `find_max`, descending by recursion instead of a loop.
    pub fn find_max_recursive(&self) -> Option<&V> {
        let id = self.tree.extreme_recursive(self.tree.root?, Side::Right);
        Some(&self.tree[id].value)
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.tree[self.tree.extreme(self.tree.root?, Side::Left)];
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = &self.tree[self.tree.extreme(self.tree.root?, Side::Right)];
        Some((&node.key, &node.value))
    }

    /// Returns the value stored at the root node.
    pub fn root_value(&self) -> Option<&V> {
        self.tree.root.map(|root| &self.tree[root].value)
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 for an
    /// empty map.
    pub fn height(&self) -> usize {
        self.tree.height(self.tree.root)
    }

    /// Gets an iterator over the entries of the map, in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut map = RedBlackTree::new();
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<K, V> {
        Iter::new(&self.tree)
    }

    /// Calls `visit` on every entry, each node before its subtrees.
    pub fn walk_pre_order<F: FnMut(&K, &V)>(&self, mut visit: F) {
        walk::pre_order(&self.tree, self.tree.root, &mut visit);
    }

    /// Calls `visit` on every entry in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let map: RedBlackTree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let mut seen = String::new();
    /// map.walk_in_order(|_, &c| seen.push(c));
    /// assert_eq!(seen, "abc");
    /// ```
    pub fn walk_in_order<F: FnMut(&K, &V)>(&self, mut visit: F) {
        walk::in_order(&self.tree, self.tree.root, &mut visit);
    }

    /// Calls `visit` on every entry, each node after its subtrees.
    pub fn walk_post_order<F: FnMut(&K, &V)>(&self, mut visit: F) {
        walk::post_order(&self.tree, self.tree.root, &mut visit);
    }

    /// Calls `visit` on every entry in key order without recursing. The path back up the tree
    /// is kept on an explicit stack, so the tree is never modified during the walk.
    pub fn walk_in_order_iterative<F: FnMut(&K, &V)>(&self, mut visit: F) {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let mut a = RedBlackTree::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Debug, V: Debug> RedBlackTree<K, V> {
    /// Returns a `Display`able rendering of the tree's shape and colors.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_map::RedBlackTree;
    ///
    /// let map: RedBlackTree<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// assert_eq!(map.pretty().to_string(), "2 -> 'b' (B)\n  1 -> 'a' (R)\n  3 -> 'c' (R)\n");
    /// ```
    pub fn pretty(&self) -> Pretty<K, V> {
        Pretty { tree: &self.tree }
    }

    /// Writes `pretty()` to stderr.
    pub fn dump(&self) {
        eprint!("{}", self.pretty());
    }
}

impl<K: Ord, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<K: Clone, V: Clone> Clone for RedBlackTree<K, V> {
    fn clone(&self) -> Self {
        RedBlackTree {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Debug, V: Debug> Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RedBlackTree::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for RedBlackTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: 'a, V: 'a> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, Q: ?Sized, V> Index<&Q> for RedBlackTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.search(key).expect("no entry found for key")
    }
}
