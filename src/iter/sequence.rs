use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::policy::ValuePolicy;
use crate::rbtree::{NodeId, RawTree};

use super::{Direction, Forward};

/// A single pass over a whole tree.
///
/// What it yields is picked by the value policy it was made with: keys,
/// values, or `(key, value)` pairs. Each container accessor builds a fresh
/// one; once it runs dry it stays dry.
pub struct Sequence<'a, K, V, P, D: Direction = Forward> {
    tree: &'a RawTree<K, V>,
    policy: P,
    front: NodeId,
    back: NodeId,
    remaining: usize,
    _direction: PhantomData<D>,
}

impl<'a, K, V, P, D: Direction> Sequence<'a, K, V, P, D> {
    pub(crate) fn new(tree: &'a RawTree<K, V>, policy: P) -> Self {
        Self {
            tree,
            policy,
            front: D::first(tree),
            back: D::Opposite::first(tree),
            remaining: tree.len(),
            _direction: PhantomData,
        }
    }

    /// A fresh sequence over the same tree in the opposite order, yielding the
    /// same kind of items.
    pub fn backward(self) -> Sequence<'a, K, V, P, D::Opposite> {
        Sequence::new(self.tree, self.policy)
    }
}

impl<'a, K, V, P, D> Iterator for Sequence<'a, K, V, P, D>
where
    K: 'a,
    V: 'a,
    P: ValuePolicy<K, V>,
    D: Direction,
{
    type Item = P::Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.front.is_sentinel() { return None }

        let node = self.tree.get(self.front);
        self.front = D::advance(self.tree, self.front);
        self.remaining -= 1;
        Some(self.policy.fetch(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, P, D> DoubleEndedIterator for Sequence<'a, K, V, P, D>
where
    K: 'a,
    V: 'a,
    P: ValuePolicy<K, V>,
    D: Direction,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.back.is_sentinel() { return None }

        let node = self.tree.get(self.back);
        self.back = D::retreat(self.tree, self.back);
        self.remaining -= 1;
        Some(self.policy.fetch(node))
    }
}

impl<'a, K: 'a, V: 'a, P: ValuePolicy<K, V>, D: Direction> ExactSizeIterator for Sequence<'a, K, V, P, D> {}
impl<'a, K: 'a, V: 'a, P: ValuePolicy<K, V>, D: Direction> FusedIterator for Sequence<'a, K, V, P, D> {}
