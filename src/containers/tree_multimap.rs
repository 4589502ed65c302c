use std::cmp::Ordering;
use std::fmt;
use std::iter;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::iter::{Forward, Sequence};
use crate::policy::{KeyValue, ValueOnly};
use crate::rbtree::{InsertionResult, NodeId, Tree};

/// A sorted map that can hold the same key more than once.
///
/// Entries with equal keys are kept in the order they were added.
pub struct TreeMultiMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V, KeyValue, C>,
}

shared_surface!(TreeMultiMap<K, V>, V, KeyValue);

impl<K, V> TreeMultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V, C> TreeMultiMap<K, V, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self { tree: Tree::with_parts(KeyValue, compare) }
    }

    pub fn values(&self) -> Sequence<'_, K, V, ValueOnly, Forward> {
        self.tree.values()
    }

    /// Removes the node behind a handle taken from this multimap's cursors.
    /// Handles aren't checked against the tree they came from.
    pub fn erase(&mut self, node: NodeId) -> Result<Option<(K, V)>, TreeError> {
        self.tree.erase(node)
    }
}

impl<K, V, C: Comparator<K>> TreeMultiMap<K, V, C> {
    /// Builds a multimap out of entries in any order, keeping every one of them.
    pub fn from_entries<I>(entries: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
        C: Default,
    {
        let mut map = Self::default();
        for (key, value) in entries {
            map.set(key, value)?;
        }
        Ok(map)
    }

    /// Adds another entry for `key`.
    pub fn set(&mut self, key: K, value: V) -> Result<(), TreeError> {
        self.tree.insert_multi(key, value)?;
        Ok(())
    }

    /// The first value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let it = self.tree.lower_bound(key);
        let found = it.key().is_some_and(|k| self.tree.comparator().compare(k, key) == Ordering::Equal);
        if found { it.value() } else { None }
    }

    /// Every value stored for `key`, oldest first.
    pub fn get_all<'a>(&'a self, key: &K) -> impl Iterator<Item = &'a V> + use<'a, K, V, C> {
        let mut it = self.tree.lower_bound(key);
        let end = self.tree.upper_bound(key).node();
        iter::from_fn(move || {
            if it.node() == end { return None }
            let value = it.value();
            it.next();
            value
        })
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes one entry for `key` and returns its value.
    ///
    /// With several entries for the key, which one goes is unspecified.
    pub fn delete(&mut self, key: &K) -> Result<Option<V>, TreeError> {
        let node = self.tree.find(key).node();
        Ok(self.tree.erase(node)?.map(|(_, v)| v))
    }

    pub fn insert_multi(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.tree.insert_multi(key, value)
    }

    pub fn insert_unique(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.tree.insert_unique(key, value)
    }

    pub fn insert_or_replace(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.tree.insert_or_replace(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMultiMap<K, V, C> {
    /// `{1:A,2:B}`, with keys and values written through `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt_with(f, |k, out| fmt::Display::fmt(k, out), |v, out| fmt::Display::fmt(v, out))
    }
}
