use std::fmt;

/// Everything that can go wrong inside the tree engine.
///
/// Not finding a key is *not* an error: lookups hand back the end cursor
/// (or `None`) for that.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The node links no longer describe a valid red-black tree.
    ///
    /// Raised when a rotation finds the sentinel where its pivot child should
    /// be, or when [`Tree::validate`] finds a broken invariant. There is no
    /// way to recover from this, the tree was already broken before the call.
    ///
    /// [`Tree::validate`]: crate::rbtree::Tree::validate
    StructuralCorruption(&'static str),
    /// Two cursors that belong to different trees were compared.
    InvalidIteratorOperation(&'static str),
    /// A bulk load was handed input it can't build a tree from.
    InvalidConstructionInput(&'static str),
}

impl TreeError {
    pub fn is_corruption(&self) -> bool {
        matches!(self, TreeError::StructuralCorruption(_))
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::StructuralCorruption(why) => write!(f, "the tree is corrupted: {why}"),
            TreeError::InvalidIteratorOperation(why) => write!(f, "invalid iterator operation: {why}"),
            TreeError::InvalidConstructionInput(why) => write!(f, "invalid construction input: {why}"),
        }
    }
}

impl std::error::Error for TreeError {}
