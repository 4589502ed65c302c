use log::{error, trace};
use slab::Slab;

use crate::error::TreeError;

use super::head::Head;
use super::node::{Color, Node, NodeId};

/// The structural half of a tree: the node arena plus the head.
///
/// Nothing in here knows how keys compare, so it is shared by cursors and
/// sequences, which only ever need to walk the links.
pub struct RawTree<K, V> {
    pub(crate) nodes: Slab<Node<K, V>>,
    pub(crate) head: Head,
}

// Link accessors. Reading through the sentinel yields the sentinel again, and
// writes to it are dropped, so callers don't have to special-case leaves.
impl<K, V> RawTree<K, V> {
    pub(crate) fn new() -> Self {
        Self { nodes: Slab::new(), head: Head::new() }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn len(&self) -> usize {
        self.head.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.head = Head::new();
    }

    /// Read-only access to a live node. `None` for the sentinel or a free slot.
    pub fn node(&self, id: NodeId) -> Option<&Node<K, V>> {
        if id.is_sentinel() { return None }
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        if id.is_sentinel() { return None }
        self.nodes.get_mut(id.0)
    }

    /// Whether `id` names a node that is currently linked into this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    // NOTE: only call these with handles you got from the tree itself.
    pub(crate) fn get(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.get(id).key
    }

    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).map_or(NodeId::SENTINEL, |n| n.parent)
    }

    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.node(id).map_or(NodeId::SENTINEL, |n| n.left)
    }

    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.node(id).map_or(NodeId::SENTINEL, |n| n.right)
    }

    /// Leaves are black.
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.node(id).map_or(Color::Black, |n| n.color)
    }

    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    pub(crate) fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        if let Some(n) = self.node_mut(id) { n.color = color }
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(n) = self.node_mut(id) { n.parent = parent }
    }

    pub(crate) fn set_left(&mut self, id: NodeId, left: NodeId) {
        if let Some(n) = self.node_mut(id) { n.left = left }
    }

    pub(crate) fn set_right(&mut self, id: NodeId, right: NodeId) {
        if let Some(n) = self.node_mut(id) { n.right = right }
    }

    pub(crate) fn grandparent(&self, id: NodeId) -> NodeId {
        self.parent(self.parent(id))
    }

    /// The other child of the same parent.
    pub(crate) fn sibling(&self, id: NodeId) -> NodeId {
        let p = self.parent(id);
        if p.is_sentinel() { return NodeId::SENTINEL }
        if id == self.left(p) { self.right(p) } else { self.left(p) }
    }

    pub(crate) fn uncle(&self, id: NodeId) -> NodeId {
        let p = self.parent(id);
        if self.parent(p).is_sentinel() { return NodeId::SENTINEL }
        self.sibling(p)
    }
}

// Navigation
impl<K, V> RawTree<K, V> {
    /// The node with the smallest key in the subtree rooted at `id`.
    pub fn minimum(&self, mut id: NodeId) -> NodeId {
        while !self.left(id).is_sentinel() {
            id = self.left(id);
        }
        id
    }

    /// The node with the largest key in the subtree rooted at `id`.
    pub fn maximum(&self, mut id: NodeId) -> NodeId {
        while !self.right(id).is_sentinel() {
            id = self.right(id);
        }
        id
    }

    /// In-order successor. Stepping forward from the sentinel wraps around to
    /// the first node, stepping past the last node lands on the sentinel.
    pub fn next(&self, id: NodeId) -> NodeId {
        if id.is_sentinel() { return self.head.leftmost }

        let right = self.right(id);
        if !right.is_sentinel() { return self.minimum(right) }

        // climb until we arrive from a left subtree
        let mut n = id;
        let mut p = self.parent(n);
        while !p.is_sentinel() && n == self.right(p) {
            n = p;
            p = self.parent(p);
        }
        p
    }

    /// In-order predecessor, the mirror image of [`next`](Self::next).
    pub fn prev(&self, id: NodeId) -> NodeId {
        if id.is_sentinel() { return self.head.rightmost }

        let left = self.left(id);
        if !left.is_sentinel() { return self.maximum(left) }

        let mut n = id;
        let mut p = self.parent(n);
        while !p.is_sentinel() && n == self.left(p) {
            n = p;
            p = self.parent(p);
        }
        p
    }
}

// Restructuring
impl<K, V> RawTree<K, V> {
    /// Puts `new` where `old` hangs in the tree. `old`'s own links are left alone.
    pub(crate) fn replace_node(&mut self, old: NodeId, new: NodeId) {
        if old == new { return }

        let parent = self.parent(old);
        if parent.is_sentinel() {
            self.head.root = new;
        } else if old == self.left(parent) {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
        self.set_parent(new, parent);
    }

    /// ```text
    ///          X                                           Y
    ///         / \                                         / \
    ///        Y   c         right rotate -->              a   X
    ///       / \            <--  left rotate                 / \
    ///      a   b                                           b   c
    /// ```
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> Result<(), TreeError> {
        let y = self.right(x);
        if y.is_sentinel() {
            error!("rotate_left({x:?}): right child is the sentinel");
            return Err(TreeError::StructuralCorruption("rotate_left on a node without a right child"))
        }
        trace!("rotate_left({x:?}), pivot {y:?}");

        self.replace_node(x, y);

        let b = self.left(y);
        self.set_right(x, b);
        self.set_parent(b, x);

        self.set_left(y, x);
        self.set_parent(x, y);
        Ok(())
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    pub(crate) fn rotate_right(&mut self, x: NodeId) -> Result<(), TreeError> {
        let y = self.left(x);
        if y.is_sentinel() {
            error!("rotate_right({x:?}): left child is the sentinel");
            return Err(TreeError::StructuralCorruption("rotate_right on a node without a left child"))
        }
        trace!("rotate_right({x:?}), pivot {y:?}");

        self.replace_node(x, y);

        let b = self.right(y);
        self.set_left(x, b);
        self.set_parent(b, x);

        self.set_right(y, x);
        self.set_parent(x, y);
        Ok(())
    }
}
