use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::policy::KeyOnly;
use crate::rbtree::{InsertionResult, NodeId, Tree};

/// A sorted bag: a set that counts duplicates.
pub struct TreeMultiSet<K, C = NaturalOrder> {
    tree: Tree<K, (), KeyOnly, C>,
}

shared_surface!(TreeMultiSet<K>, (), KeyOnly);

impl<K> TreeMultiSet<K> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, C> TreeMultiSet<K, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self { tree: Tree::with_parts(KeyOnly, compare) }
    }

    /// Removes one copy through a handle. See [`Tree::erase`] for what a
    /// handle from elsewhere does.
    pub fn erase(&mut self, node: NodeId) -> Result<Option<K>, TreeError> {
        Ok(self.tree.erase(node)?.map(|(k, ())| k))
    }
}

impl<K, C: Comparator<K>> TreeMultiSet<K, C> {
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

    /// Adds another copy of `key`.
    pub fn add(&mut self, key: K) -> Result<(), TreeError> {
        self.tree.insert_multi(key, ())?;
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// How many copies of `key` there are.
    pub fn count(&self, key: &K) -> usize {
        let mut it = self.tree.lower_bound(key);
        let end = self.tree.upper_bound(key).node();
        let mut n = 0;
        while it.node() != end {
            n += 1;
            it.next();
        }
        n
    }

    /// Removes a single copy of `key`.
    pub fn delete(&mut self, key: &K) -> Result<Option<K>, TreeError> {
        let node = self.tree.find(key).node();
        self.erase(node)
    }

    pub fn insert_multi(&mut self, key: K) -> Result<InsertionResult<'_, K, ()>, TreeError> {
        self.tree.insert_multi(key, ())
    }

    pub fn insert_unique(&mut self, key: K) -> Result<InsertionResult<'_, K, ()>, TreeError> {
        self.tree.insert_unique(key, ())
    }

    pub fn insert_or_replace(&mut self, key: K) -> Result<InsertionResult<'_, K, ()>, TreeError> {
        self.tree.insert_or_replace(key, ())
    }
}

impl<K: fmt::Display, C> fmt::Display for TreeMultiSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt_with(f, |k, out| fmt::Display::fmt(k, out), |_, _| Ok(()))
    }
}
