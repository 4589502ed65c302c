use std::fmt;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::iter::{Forward, Sequence};
use crate::policy::{KeyValue, ValueOnly};
use crate::rbtree::{InsertionResult, NodeId, Tree};

/// A sorted map with unique keys.
pub struct TreeMap<K, V, C = NaturalOrder> {
    tree: Tree<K, V, KeyValue, C>,
}

shared_surface!(TreeMap<K, V>, V, KeyValue);

impl<K, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    pub fn with_comparator(compare: C) -> Self {
        Self { tree: Tree::with_parts(KeyValue, compare) }
    }

    pub fn values(&self) -> Sequence<'_, K, V, ValueOnly, Forward> {
        self.tree.values()
    }

    /// Removes the node under a cursor (see [`Cursor::node`]) and returns its entry.
    ///
    /// The handle must come from this map. A foreign or stale one is taken at
    /// face value and removes whatever entry sits in that slot.
    ///
    /// [`Cursor::node`]: crate::iter::Cursor::node
    pub fn erase(&mut self, node: NodeId) -> Result<Option<(K, V)>, TreeError> {
        self.tree.erase(node)
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Builds a map out of entries in any order. Later duplicates win.
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

    /// Sets the value for `key`, replacing any previous one.
    pub fn set(&mut self, key: K, value: V) -> Result<(), TreeError> {
        self.tree.insert_or_replace(key, value)?;
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).value()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Removes `key` and returns its value, if it was there.
    pub fn delete(&mut self, key: &K) -> Result<Option<V>, TreeError> {
        let node = self.tree.find(key).node();
        Ok(self.tree.erase(node)?.map(|(_, v)| v))
    }

    pub fn insert_unique(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.tree.insert_unique(key, value)
    }

    pub fn insert_or_replace(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.tree.insert_or_replace(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
    /// `{1:A,2:B}`, with keys and values written through `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt_with(f, |k, out| fmt::Display::fmt(k, out), |v, out| fmt::Display::fmt(v, out))
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::compare::Reversed;

    use super::*;

    fn sample() -> TreeMap<i32, &'static str> {
        TreeMap::from_entries([(3, "C"), (1, "A"), (2, "B")]).unwrap()
    }

    #[test]
    fn set_and_get() {
        let mut m = TreeMap::new();
        m.set(1, "one").unwrap();
        m.set(2, "two").unwrap();
        assert_eq!(m.get(&1), Some(&"one"));
        assert_eq!(m.get(&3), None);
        assert!(m.contains_key(&2));

        m.set(1, "uno").unwrap();
        assert_eq!(m.get(&1), Some(&"uno"));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn from_entries_last_wins() {
        let m: TreeMap<_, _> = TreeMap::from_entries([(1, 'a'), (2, 'b'), (1, 'c')]).unwrap();
        assert_eq!(m.entries().collect::<Vec<_>>(), [(&1, &'c'), (&2, &'b')]);
    }

    #[test]
    fn delete() {
        let mut m = sample();
        assert_eq!(m.delete(&2).unwrap(), Some("B"));
        assert_eq!(m.delete(&2).unwrap(), None);
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), [1, 3]);
        m.tree().validate().unwrap();
    }

    #[test]
    fn insert_unique_leaves_existing_value() {
        let mut m = sample();
        let res = m.insert_unique(1, "a").unwrap();
        assert!(!res.was_added);
        assert_eq!(m.get(&1), Some(&"A"));

        let res = m.insert_or_replace(1, "a").unwrap();
        assert!(res.was_replaced);
        assert_eq!(m.get(&1), Some(&"a"));
    }

    #[test]
    fn traversal() {
        let m = sample();
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(m.values().copied().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(m.backward().map(|(k, _)| *k).collect::<Vec<_>>(), [3, 2, 1]);
        assert_eq!((&m).into_iter().count(), 3);

        let mut seen = vec![];
        for (k, v) in &m {
            seen.push((*k, *v));
        }
        assert_eq!(seen, [(1, "A"), (2, "B"), (3, "C")]);

        let mut joined = String::new();
        m.for_each(|(_, v)| joined.push_str(v));
        assert_eq!(joined, "ABC");
    }

    #[test]
    fn first_and_last() {
        let m = sample();
        assert_eq!(m.first(), Some((&1, &"A")));
        assert_eq!(m.last(), Some((&3, &"C")));
        assert_eq!(TreeMap::<i32, i32>::new().first(), None);
    }

    #[test]
    fn cursors() {
        let m = sample();
        assert_eq!(m.begin().entry(), Some((&1, &"A")));
        assert!(m.end().is_end());
        assert_eq!(m.rbegin().key(), Some(&3));
        assert!(m.rend().is_end());
        assert_eq!(m.lower_bound(&2).value(), Some(&"B"));
        assert_eq!(m.upper_bound(&2).value(), Some(&"C"));
        assert!(m.find(&4).is_end());
    }

    #[test]
    fn erase_through_a_cursor() {
        let mut m = sample();
        let node = m.find(&1).node();
        assert_eq!(m.erase(node).unwrap(), Some((1, "A")));
        assert_eq!(m.erase(m.end().node()).unwrap(), None);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn handles_are_plain_slot_indices() {
        let mut m = sample();
        let other: TreeMap<_, _> = TreeMap::from_entries([(10, "x"), (20, "y")]).unwrap();
        // 20 sits in the second slot of `other`, 1 in the second slot of `m`
        let foreign = other.find(&20).node();
        assert_eq!(m.erase(foreign).unwrap(), Some((1, "A")));
        assert_eq!(other.len(), 2);
        m.tree().validate().unwrap();
    }

    #[test]
    fn display_skips_the_quotes() {
        let m = sample();
        assert_eq!(m.to_string(), "{1:A,2:B,3:C}");
        assert_eq!(format!("{m:?}"), "{1:\"A\",2:\"B\",3:\"C\"}");
        assert_eq!(TreeMap::<i32, i32>::new().to_string(), "{}");
    }

    #[test]
    fn custom_comparator() {
        let mut m = TreeMap::with_comparator(Reversed(NaturalOrder));
        for k in [1, 3, 2] {
            m.set(k, k * 10).unwrap();
        }
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);

        fn by_len(a: &String, b: &String) -> Ordering {
            a.len().cmp(&b.len())
        }
        let mut m: TreeMap<String, u32, fn(&String, &String) -> Ordering> = TreeMap::with_comparator(by_len);
        m.set("ccc".into(), 3).unwrap();
        m.set("a".into(), 1).unwrap();
        // same length, same key as far as the map is concerned
        m.set("b".into(), 2).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&"z".to_string()), Some(&2));
    }

    #[test]
    fn set_comparator_clears() {
        let mut m = sample();
        m.set_comparator(NaturalOrder);
        assert!(m.is_empty());
    }

    #[test]
    fn debug_and_clear() {
        let mut m = sample();
        assert_eq!(format!("{m:?}"), "{1:\"A\",2:\"B\",3:\"C\"}");
        m.clear();
        assert_eq!(format!("{m:?}"), "{}");
        assert!(m.is_empty());
    }
}
