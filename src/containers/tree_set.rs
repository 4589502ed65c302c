use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::policy::KeyOnly;
use crate::rbtree::{InsertionResult, NodeId, Tree};

/// A sorted set.
pub struct TreeSet<K, C = NaturalOrder> {
    tree: Tree<K, (), KeyOnly, C>,
}

shared_surface!(TreeSet<K>, (), KeyOnly);

impl<K> TreeSet<K> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, C> TreeSet<K, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self { tree: Tree::with_parts(KeyOnly, compare) }
    }

    /// Removes the node behind a handle and returns its key. See
    /// [`Tree::erase`] for what a handle from elsewhere does.
    pub fn erase(&mut self, node: NodeId) -> Result<Option<K>, TreeError> {
        Ok(self.tree.erase(node)?.map(|(k, ())| k))
    }
}

impl<K, C: Comparator<K>> TreeSet<K, C> {
    pub fn from_keys<I>(keys: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = K>,
        C: Default,
    {
        let mut set = Self::default();
        for key in keys {
            set.add(key)?;
        }
        Ok(set)
    }

    /// Adds `key` unless an equal one is already there, in which case the
    /// stored key stays and `key` is dropped.
    pub fn add(&mut self, key: K) -> Result<(), TreeError> {
        self.tree.insert_unique(key, ())?;
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes `key`, handing back the stored one.
    pub fn delete(&mut self, key: &K) -> Result<Option<K>, TreeError> {
        let node = self.tree.find(key).node();
        self.erase(node)
    }

    pub fn insert_unique(&mut self, key: K) -> Result<InsertionResult<'_, K, ()>, TreeError> {
        self.tree.insert_unique(key, ())
    }

    pub fn insert_or_replace(&mut self, key: K) -> Result<InsertionResult<'_, K, ()>, TreeError> {
        self.tree.insert_or_replace(key, ())
    }
}

impl<K: fmt::Display, C> fmt::Display for TreeSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt_with(f, |k, out| fmt::Display::fmt(k, out), |_, _| Ok(()))
    }
}
