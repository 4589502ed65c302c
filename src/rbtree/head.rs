use super::node::NodeId;

/// The tree's sentinel.
///
/// There is exactly one per tree. It is the parent of the root, it stands in
/// for every missing child, cursors sitting on it are "end" (or "rend"), and
/// it caches the extremal nodes so `begin`/`rbegin` are O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub(crate) root: NodeId,
    pub(crate) leftmost: NodeId,
    pub(crate) rightmost: NodeId,
    pub(crate) size: usize,
}

impl Head {
    pub const fn new() -> Self {
        Self {
            root: NodeId::SENTINEL,
            leftmost: NodeId::SENTINEL,
            rightmost: NodeId::SENTINEL,
            size: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node with the smallest key, or the sentinel when empty.
    pub fn leftmost(&self) -> NodeId {
        self.leftmost
    }

    /// The node with the largest key, or the sentinel when empty.
    pub fn rightmost(&self) -> NodeId {
        self.rightmost
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the head points back at itself everywhere, i.e. the tree is empty.
    pub fn is_reset(&self) -> bool {
        *self == Head::new()
    }
}

impl Default for Head {
    fn default() -> Self {
        Head::new()
    }
}
