//! Ordered containers on top of one red-black tree engine.
//!
//! [`TreeMap`], [`TreeMultiMap`], [`TreeSet`] and [`TreeMultiSet`] all wrap a
//! [`Tree`], which does the actual work: sorted insertion in three modes,
//! erasure, ordered search and in-order traversal. What a container hands out
//! (keys, values or pairs) is decided by a [value policy](policy), how keys
//! are ordered by a [`Comparator`].
//!
//! ```ignore
//! let mut m = TreeMap::new();
//! m.set(2, "two")?;
//! m.set(1, "one")?;
//! assert_eq!(m.keys().collect::<Vec<_>>(), [&1, &2]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod compare;
pub mod policy;

// the engine
pub mod rbtree;
pub mod iter;

pub mod containers;

pub mod logging;

pub use compare::{Comparator, NaturalOrder, Reversed};
pub use containers::{TreeMap, TreeMultiMap, TreeMultiSet, TreeSet};
pub use error::TreeError;
pub use iter::{Cursor, Forward, Reverse, Sequence};
pub use rbtree::{InsertMode, InsertionResult, NodeId, Tree};
