use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use crate::error::TreeError;
use crate::rbtree::{NodeId, RawTree};

use super::{Direction, Forward, Reverse};

/// A position inside a tree.
///
/// A cursor on the sentinel is the "end" of its direction (`end()` for
/// [`Forward`], `rend()` for [`Reverse`]). Stepping off either end wraps
/// around through the sentinel, just like the tree's own `next`/`prev`.
///
/// The cursor borrows the tree, so it can't outlive it and the tree can't be
/// mutated while it exists. To erase the node under a cursor, take its
/// [`node`](Self::node) handle first.
///
/// ```ignore
/// let mut it = map.lower_bound(&0);
/// let to = map.upper_bound(&50);
/// while !it.equals(&to)? {
///     println!("{:?}", it.key());
///     it.next();
/// }
/// ```
pub struct Cursor<'a, K, V, D: Direction = Forward> {
    node: NodeId,
    tree: &'a RawTree<K, V>,
    _direction: PhantomData<D>,
}

// the derives would want `K: Clone, V: Clone`
impl<K, V, D: Direction> Copy for Cursor<'_, K, V, D> {}
impl<K, V, D: Direction> Clone for Cursor<'_, K, V, D> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K, V, D: Direction> Cursor<'a, K, V, D> {
    pub(crate) fn new(tree: &'a RawTree<K, V>, node: NodeId) -> Self {
        Self { node, tree, _direction: PhantomData }
    }

    /// The handle of the node this cursor sits on.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_end(&self) -> bool {
        self.node.is_sentinel()
    }

    /// The key under the cursor, `None` at the end.
    pub fn key(&self) -> Option<&'a K> {
        self.tree.node(self.node).map(|n| n.key())
    }

    /// The value under the cursor, `None` at the end.
    pub fn value(&self) -> Option<&'a V> {
        self.tree.node(self.node).map(|n| n.value())
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.tree.node(self.node).map(|n| (n.key(), n.value()))
    }

    /// Moves one step in this cursor's direction.
    pub fn next(&mut self) {
        self.node = D::advance(self.tree, self.node);
    }

    /// Moves one step against this cursor's direction.
    pub fn prev(&mut self) {
        self.node = D::retreat(self.tree, self.node);
    }

    /// Whether both cursors sit on the same node.
    ///
    /// Comparing cursors of different trees is a usage error. (Cursors of
    /// different directions don't even typecheck.)
    pub fn equals(&self, other: &Self) -> Result<bool, TreeError> {
        if !ptr::eq(self.tree, other.tree) {
            return Err(TreeError::InvalidIteratorOperation("cursors belong to different trees"))
        }
        Ok(self.node == other.node)
    }

    /// The same position seen from the other direction.
    ///
    /// A forward cursor at `n` becomes a reverse cursor at `prev(n)` and vice
    /// versa, so `[begin, end)` maps onto `[rbegin, rend)`.
    pub fn reversed(self) -> Cursor<'a, K, V, D::Opposite> {
        Cursor::new(self.tree, D::retreat(self.tree, self.node))
    }
}

impl<'a, K, V> From<Cursor<'a, K, V, Forward>> for Cursor<'a, K, V, Reverse> {
    fn from(it: Cursor<'a, K, V, Forward>) -> Self {
        it.reversed()
    }
}

impl<'a, K, V> From<Cursor<'a, K, V, Reverse>> for Cursor<'a, K, V, Forward> {
    fn from(it: Cursor<'a, K, V, Reverse>) -> Self {
        it.reversed()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, D: Direction> fmt::Debug for Cursor<'_, K, V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.node)
            .field("entry", &self.entry())
            .finish()
    }
}
