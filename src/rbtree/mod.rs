//! The red-black tree engine behind every container in this crate.
//!
//! Nodes live in an arena and point at each other through [`NodeId`]s. One
//! reserved handle, [`NodeId::SENTINEL`], plays the part of the head: it is
//! the root's parent, every leaf, and the end position of every walk. The
//! head's bookkeeping (root, extremal nodes, size) lives in [`Head`].

use std::cmp::Ordering;
use std::fmt;

use log::debug;

use crate::compare::{Comparator, NaturalOrder};
use crate::iter::{Cursor, Forward, Reverse, Sequence};
use crate::policy::{KeyOnly, KeyValue, ValueOnly, ValuePolicy};

mod erase;
mod head;
mod insert;
mod node;
mod raw;
mod validate;

pub use head::Head;
pub use insert::{InsertMode, InsertionResult};
pub use node::{Color, Node, NodeId};
pub use raw::RawTree;

/// A red-black tree ordered by `C`, handing out payloads shaped by `P`.
pub struct Tree<K, V, P = KeyValue, C = NaturalOrder> {
    raw: RawTree<K, V>,
    compare: C,
    policy: P,
}

impl<K, V, P: Default, C: Default> Tree<K, V, P, C> {
    pub fn new() -> Self {
        Self::with_parts(P::default(), C::default())
    }
}

impl<K, V, P: Default, C: Default> Default for Tree<K, V, P, C> {
    fn default() -> Self {
        Self::new()
    }
}

// Things that don't need to compare keys
impl<K, V, P, C> Tree<K, V, P, C> {
    pub fn with_parts(policy: P, compare: C) -> Self {
        Self { raw: RawTree::new(), compare, policy }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Drops every node and starts over with a fresh head.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len());
        self.raw.reset();
    }

    pub fn head(&self) -> &Head {
        self.raw.head()
    }

    pub fn root(&self) -> NodeId {
        self.raw.head().root()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.raw.node(id)
    }

    pub fn raw(&self) -> &RawTree<K, V> {
        &self.raw
    }

    pub fn comparator(&self) -> &C {
        &self.compare
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn next(&self, id: NodeId) -> NodeId {
        self.raw.next(id)
    }

    pub fn prev(&self, id: NodeId) -> NodeId {
        self.raw.prev(id)
    }

    /// A forward cursor on an arbitrary node (the sentinel gives `end()`).
    pub fn cursor_at(&self, id: NodeId) -> Cursor<'_, K, V, Forward> {
        Cursor::new(&self.raw, id)
    }

    /// Cursor on the node with the smallest key.
    pub fn begin(&self) -> Cursor<'_, K, V, Forward> {
        Cursor::new(&self.raw, self.raw.head().leftmost())
    }

    /// Cursor one past the node with the largest key.
    pub fn end(&self) -> Cursor<'_, K, V, Forward> {
        Cursor::new(&self.raw, NodeId::SENTINEL)
    }

    /// Reverse cursor on the node with the largest key.
    pub fn rbegin(&self) -> Cursor<'_, K, V, Reverse> {
        Cursor::new(&self.raw, self.raw.head().rightmost())
    }

    /// Reverse cursor one before the node with the smallest key.
    pub fn rend(&self) -> Cursor<'_, K, V, Reverse> {
        Cursor::new(&self.raw, NodeId::SENTINEL)
    }

    /// Walks the tree in ascending order yielding whatever `policy` picks.
    pub fn sequence<Q>(&self, policy: Q) -> Sequence<'_, K, V, Q, Forward> {
        Sequence::new(&self.raw, policy)
    }

    /// Walks the tree in ascending order, yielding what the tree's own policy picks.
    pub fn entries(&self) -> Sequence<'_, K, V, P, Forward>
    where
        P: Clone,
    {
        Sequence::new(&self.raw, self.policy.clone())
    }

    /// Same as [`entries`](Self::entries), but from the largest key down.
    pub fn backward(&self) -> Sequence<'_, K, V, P, Reverse>
    where
        P: Clone,
    {
        Sequence::new(&self.raw, self.policy.clone())
    }

    pub fn keys(&self) -> Sequence<'_, K, V, KeyOnly, Forward> {
        Sequence::new(&self.raw, KeyOnly)
    }

    pub fn values(&self) -> Sequence<'_, K, V, ValueOnly, Forward> {
        Sequence::new(&self.raw, ValueOnly)
    }
}

impl<K, V, P: ValuePolicy<K, V>, C> Tree<K, V, P, C> {
    /// The payload of the smallest node, `None` if the tree is empty.
    pub fn first(&self) -> Option<P::Item<'_>> {
        self.raw.node(self.raw.head().leftmost()).map(|n| self.policy.fetch(n))
    }

    /// The payload of the largest node, `None` if the tree is empty.
    pub fn last(&self) -> Option<P::Item<'_>> {
        self.raw.node(self.raw.head().rightmost()).map(|n| self.policy.fetch(n))
    }
}

// Searching
impl<K, V, P, C: Comparator<K>> Tree<K, V, P, C> {
    /// A cursor on a node with an equal key, or `end()`.
    ///
    /// With duplicate keys, any one of them may be found. Use
    /// [`lower_bound`](Self::lower_bound) to get the first one.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, Forward> {
        let mut x = self.raw.head().root();
        while !x.is_sentinel() {
            match self.compare.compare(self.raw.key(x), key) {
                Ordering::Greater => x = self.raw.left(x),
                Ordering::Less => x = self.raw.right(x),
                Ordering::Equal => return Cursor::new(&self.raw, x),
            }
        }
        self.end()
    }

    /// A cursor on the first node whose key is not less than `key`, or `end()`.
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, Forward> {
        let mut y = NodeId::SENTINEL;
        let mut x = self.raw.head().root();
        while !x.is_sentinel() {
            if self.compare.compare(self.raw.key(x), key) != Ordering::Less {
                y = x;
                x = self.raw.left(x);
            } else {
                x = self.raw.right(x);
            }
        }
        Cursor::new(&self.raw, y)
    }

    /// A cursor on the first node whose key is greater than `key`, or `end()`.
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, Forward> {
        let mut y = NodeId::SENTINEL;
        let mut x = self.raw.head().root();
        while !x.is_sentinel() {
            if self.compare.compare(self.raw.key(x), key) == Ordering::Greater {
                y = x;
                x = self.raw.left(x);
            } else {
                x = self.raw.right(x);
            }
        }
        Cursor::new(&self.raw, y)
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.find(key).is_end()
    }

    /// Swaps the comparator out.
    ///
    /// The existing nodes were ordered by the old comparator, so the tree is
    /// cleared first.
    pub fn set_comparator(&mut self, compare: C) {
        if !self.is_empty() {
            debug!("replacing the comparator of a non-empty tree, dropping {} nodes", self.len());
        }
        self.clear();
        self.compare = compare;
    }
}

// Formatting
impl<K, V, P: ValuePolicy<K, V>, C> Tree<K, V, P, C> {
    /// Writes `{k:v,k:v}` for maps and `{k,k}` for sets, rendering keys
    /// with `key` and values with `value`.
    pub fn fmt_with<FK, FV>(&self, f: &mut fmt::Formatter<'_>, key: FK, value: FV) -> fmt::Result
    where
        FK: Fn(&K, &mut fmt::Formatter<'_>) -> fmt::Result,
        FV: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        f.write_str("{")?;
        let mut it = self.raw.head().leftmost();
        let mut first = true;
        while let Some(node) = self.raw.node(it) {
            if !first { f.write_str(",")? }
            first = false;
            self.policy.fmt_node(node, f, &key, &value)?;
            it = self.raw.next(it);
        }
        f.write_str("}")
    }
}

impl<K, V, P, C> fmt::Debug for Tree<K, V, P, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: ValuePolicy<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |k, out| fmt::Debug::fmt(k, out), |v, out| fmt::Debug::fmt(v, out))
    }
}
