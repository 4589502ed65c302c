//! The four public containers.
//!
//! Each one owns a single [`Tree`](crate::rbtree::Tree) and only decides
//! which insertion mode its mutators use and what its lookups return. The
//! part of the surface they all share is generated by `shared_surface!`.

/// Size, traversal, search, formatting and `Default` for a container that
/// keeps its tree in a `tree` field.
macro_rules! shared_surface {
    ($name:ident<$($g:ident),+>, $v:ty, $policy:ty) => {
        impl<$($g,)+ C> $name<$($g,)+ C> {
            pub fn len(&self) -> usize {
                self.tree.len()
            }

            pub fn is_empty(&self) -> bool {
                self.tree.is_empty()
            }

            pub fn clear(&mut self) {
                self.tree.clear()
            }

            pub fn begin(&self) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Forward> {
                self.tree.begin()
            }

            pub fn end(&self) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Forward> {
                self.tree.end()
            }

            pub fn rbegin(&self) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Reverse> {
                self.tree.rbegin()
            }

            pub fn rend(&self) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Reverse> {
                self.tree.rend()
            }

            /// Everything in ascending order.
            pub fn iter(&self) -> $crate::iter::Sequence<'_, K, $v, $policy, $crate::iter::Forward> {
                self.tree.entries()
            }

            pub fn entries(&self) -> $crate::iter::Sequence<'_, K, $v, $policy, $crate::iter::Forward> {
                self.tree.entries()
            }

            pub fn keys(&self) -> $crate::iter::Sequence<'_, K, $v, $crate::policy::KeyOnly, $crate::iter::Forward> {
                self.tree.keys()
            }

            /// Everything in descending order.
            pub fn backward(&self) -> $crate::iter::Sequence<'_, K, $v, $policy, $crate::iter::Reverse> {
                self.tree.backward()
            }

            pub fn first(&self) -> Option<<$policy as $crate::policy::ValuePolicy<K, $v>>::Item<'_>> {
                self.tree.first()
            }

            pub fn last(&self) -> Option<<$policy as $crate::policy::ValuePolicy<K, $v>>::Item<'_>> {
                self.tree.last()
            }

            /// Calls `f` on everything, in ascending order.
            pub fn for_each<'a, F>(&'a self, f: F)
            where
                F: FnMut(<$policy as $crate::policy::ValuePolicy<K, $v>>::Item<'a>),
            {
                self.tree.entries().for_each(f)
            }

            /// The underlying tree, for node-level inspection.
            pub fn tree(&self) -> &$crate::rbtree::Tree<K, $v, $policy, C> {
                &self.tree
            }
        }

        impl<$($g,)+ C: $crate::compare::Comparator<K>> $name<$($g,)+ C> {
            pub fn find(&self, key: &K) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Forward> {
                self.tree.find(key)
            }

            pub fn lower_bound(&self, key: &K) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Forward> {
                self.tree.lower_bound(key)
            }

            pub fn upper_bound(&self, key: &K) -> $crate::iter::Cursor<'_, K, $v, $crate::iter::Forward> {
                self.tree.upper_bound(key)
            }

            /// Drops every element and orders whatever comes next by `compare`.
            pub fn set_comparator(&mut self, compare: C) {
                self.tree.set_comparator(compare)
            }
        }

        impl<$($g,)+ C: Default> Default for $name<$($g,)+ C> {
            fn default() -> Self {
                Self { tree: $crate::rbtree::Tree::with_parts(<$policy>::default(), C::default()) }
            }
        }

        impl<$($g: std::fmt::Debug,)+ C> std::fmt::Debug for $name<$($g,)+ C> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.tree, f)
            }
        }

        impl<'a, $($g,)+ C> IntoIterator for &'a $name<$($g,)+ C> {
            type Item = <$policy as $crate::policy::ValuePolicy<K, $v>>::Item<'a>;
            type IntoIter = $crate::iter::Sequence<'a, K, $v, $policy, $crate::iter::Forward>;

            fn into_iter(self) -> Self::IntoIter {
                self.tree.entries()
            }
        }
    };
}

mod tree_map;
mod tree_multimap;
mod tree_multiset;
mod tree_set;

pub use tree_map::TreeMap;
pub use tree_multimap::TreeMultiMap;
pub use tree_multiset::TreeMultiSet;
pub use tree_set::TreeSet;
