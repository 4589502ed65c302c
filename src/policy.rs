//! Value policies decide which part of a node an operation works on.
//!
//! The tree engine doesn't know whether it is backing a map or a set. Whenever
//! it has to hand out, move, or print a node's payload it asks its policy:
//! sets use [`KeyOnly`], maps use [`KeyValue`], and [`ValueOnly`] exists so a
//! map can be walked value by value.

use std::fmt;
use std::mem;

use crate::rbtree::Node;

pub trait ValuePolicy<K, V> {
    /// What a traversal yields for each node.
    type Item<'a> where K: 'a, V: 'a;

    fn fetch<'a>(&self, node: &'a Node<K, V>) -> Self::Item<'a>;

    /// Moves the payload this policy covers from `src` into `dst`.
    ///
    /// `src` is left holding `dst`'s old payload.
    fn transfer(&self, dst: &mut Node<K, V>, src: &mut Node<K, V>);

    /// Writes the payload this policy covers, keys through `key` and values
    /// through `value`.
    fn fmt_node<FK, FV>(&self, node: &Node<K, V>, f: &mut fmt::Formatter<'_>, key: FK, value: FV) -> fmt::Result
    where
        FK: Fn(&K, &mut fmt::Formatter<'_>) -> fmt::Result,
        FV: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Used by sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOnly;

/// Used by maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyValue;

/// Used to walk the values of a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueOnly;

impl<K, V> ValuePolicy<K, V> for KeyOnly {
    type Item<'a> = &'a K where K: 'a, V: 'a;

    fn fetch<'a>(&self, node: &'a Node<K, V>) -> &'a K {
        &node.key
    }

    fn transfer(&self, dst: &mut Node<K, V>, src: &mut Node<K, V>) {
        mem::swap(&mut dst.key, &mut src.key);
    }

    fn fmt_node<FK, FV>(&self, node: &Node<K, V>, f: &mut fmt::Formatter<'_>, key: FK, _value: FV) -> fmt::Result
    where
        FK: Fn(&K, &mut fmt::Formatter<'_>) -> fmt::Result,
        FV: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        key(&node.key, f)
    }
}

impl<K, V> ValuePolicy<K, V> for KeyValue {
    type Item<'a> = (&'a K, &'a V) where K: 'a, V: 'a;

    fn fetch<'a>(&self, node: &'a Node<K, V>) -> (&'a K, &'a V) {
        (&node.key, &node.value)
    }

    fn transfer(&self, dst: &mut Node<K, V>, src: &mut Node<K, V>) {
        mem::swap(&mut dst.key, &mut src.key);
        mem::swap(&mut dst.value, &mut src.value);
    }

    fn fmt_node<FK, FV>(&self, node: &Node<K, V>, f: &mut fmt::Formatter<'_>, key: FK, value: FV) -> fmt::Result
    where
        FK: Fn(&K, &mut fmt::Formatter<'_>) -> fmt::Result,
        FV: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        key(&node.key, f)?;
        f.write_str(":")?;
        value(&node.value, f)
    }
}

impl<K, V> ValuePolicy<K, V> for ValueOnly {
    type Item<'a> = &'a V where K: 'a, V: 'a;

    fn fetch<'a>(&self, node: &'a Node<K, V>) -> &'a V {
        &node.value
    }

    fn transfer(&self, dst: &mut Node<K, V>, src: &mut Node<K, V>) {
        mem::swap(&mut dst.value, &mut src.value);
    }

    fn fmt_node<FK, FV>(&self, node: &Node<K, V>, f: &mut fmt::Formatter<'_>, _key: FK, value: FV) -> fmt::Result
    where
        FK: Fn(&K, &mut fmt::Formatter<'_>) -> fmt::Result,
        FV: Fn(&V, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        value(&node.value, f)
    }
}
