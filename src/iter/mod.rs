//! The two ways of walking a tree.
//!
//! [`Cursor`]s are STL-style positions: they can be stepped both ways,
//! compared, and converted between directions, which makes them the tool for
//! working with arbitrary `[from, to)` ranges. [`Sequence`]s are plain Rust
//! iterators over the whole container.
//!
//! Both are thin layers over [`RawTree::next`] and [`RawTree::prev`], picked
//! apart by a direction marker.

use crate::rbtree::{NodeId, RawTree};

mod cursor;
mod sequence;

pub use cursor::Cursor;
pub use sequence::Sequence;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Forward {}
    impl Sealed for super::Reverse {}
}

/// Which way "next" goes.
pub trait Direction: sealed::Sealed {
    type Opposite: Direction<Opposite = Self>;

    /// Where a walk in this direction starts.
    fn first<K, V>(tree: &RawTree<K, V>) -> NodeId;

    fn advance<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId;

    fn retreat<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId;
}

/// Ascending key order.
#[derive(Debug)]
pub enum Forward {}

/// Descending key order.
#[derive(Debug)]
pub enum Reverse {}

impl Direction for Forward {
    type Opposite = Reverse;

    fn first<K, V>(tree: &RawTree<K, V>) -> NodeId {
        tree.head().leftmost()
    }

    fn advance<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId {
        tree.next(id)
    }

    fn retreat<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId {
        tree.prev(id)
    }
}

impl Direction for Reverse {
    type Opposite = Forward;

    fn first<K, V>(tree: &RawTree<K, V>) -> NodeId {
        tree.head().rightmost()
    }

    fn advance<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId {
        tree.prev(id)
    }

    fn retreat<K, V>(tree: &RawTree<K, V>, id: NodeId) -> NodeId {
        tree.next(id)
    }
}
