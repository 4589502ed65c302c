use std::cmp::Ordering;

use log::{debug, trace, warn};

use crate::compare::Comparator;
use crate::error::TreeError;
use crate::iter::{Cursor, Forward};
use crate::policy::ValuePolicy;

use super::node::{Color, Node, NodeId};
use super::Tree;

/// What to do when the key being inserted is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Keep both. The new node goes after every equal key.
    Multi,
    /// Keep the old one and drop the new one.
    Unique,
    /// Move the new payload into the existing node.
    Replace,
}

#[derive(Debug)]
pub struct InsertionResult<'a, K, V> {
    pub was_added: bool,
    pub was_replaced: bool,
    /// Where the payload ended up. `None` when nothing was stored.
    pub cursor: Option<Cursor<'a, K, V, Forward>>,
}

impl<K, V> InsertionResult<'_, K, V> {
    fn rejected() -> Self {
        Self { was_added: false, was_replaced: false, cursor: None }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.cursor.as_ref().map(Cursor::node)
    }
}

impl<K, V, P, C> Tree<K, V, P, C>
where
    P: ValuePolicy<K, V>,
    C: Comparator<K>,
{
    pub fn insert(&mut self, key: K, value: V, mode: InsertMode) -> Result<InsertionResult<'_, K, V>, TreeError> {
        let mut y = NodeId::SENTINEL;
        let mut x = self.raw.head.root;
        let mut went_left = false;
        while !x.is_sentinel() {
            y = x;
            match (self.compare.compare(&key, self.raw.key(x)), mode) {
                (Ordering::Less, _) => {
                    went_left = true;
                    x = self.raw.left(x);
                }
                (Ordering::Equal, InsertMode::Unique) => return Ok(InsertionResult::rejected()),
                (Ordering::Equal, InsertMode::Replace) => {
                    let mut incoming = Node::new(key, value);
                    if let Some(existing) = self.raw.node_mut(x) {
                        self.policy.transfer(existing, &mut incoming);
                    }
                    return Ok(InsertionResult {
                        was_added: false,
                        was_replaced: true,
                        cursor: Some(Cursor::new(&self.raw, x)),
                    })
                }
                // NOTE: equal keys in multi mode go right, which keeps them in insertion order
                _ => {
                    went_left = false;
                    x = self.raw.right(x);
                }
            }
        }

        let mut node = Node::new(key, value);
        node.parent = y;
        let z = NodeId(self.raw.nodes.insert(node));

        let head = &mut self.raw.head;
        if y.is_sentinel() {
            head.root = z;
            head.leftmost = z;
            head.rightmost = z;
        } else if went_left {
            if head.leftmost == y { head.leftmost = z }
            self.raw.set_left(y, z);
        } else {
            if head.rightmost == y { head.rightmost = z }
            self.raw.set_right(y, z);
        }
        self.raw.head.size += 1;

        self.insert_repair(z)?;

        Ok(InsertionResult { was_added: true, was_replaced: false, cursor: Some(Cursor::new(&self.raw, z)) })
    }

    /// Adds the entry unless an equal key is already present.
    pub fn insert_unique(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.insert(key, value, InsertMode::Unique)
    }

    /// Always adds the entry, after any entries with an equal key.
    pub fn insert_multi(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.insert(key, value, InsertMode::Multi)
    }

    /// Adds the entry, or overwrites the payload of an equal key.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Result<InsertionResult<'_, K, V>, TreeError> {
        self.insert(key, value, InsertMode::Replace)
    }

    fn insert_repair(&mut self, mut n: NodeId) -> Result<(), TreeError> {
        loop {
            let p = self.raw.parent(n);
            if p.is_sentinel() {
                trace!("insert case 1 at {n:?}");
                self.raw.set_color(n, Color::Black);
                return Ok(())
            }
            if self.raw.is_black(p) {
                trace!("insert case 2 at {n:?}");
                return Ok(())
            }

            // the parent is red, so it isn't the root
            let g = self.raw.grandparent(n);
            let u = self.raw.uncle(n);
            if self.raw.is_red(u) {
                trace!("insert case 3 at {n:?}");
                self.raw.set_color(p, Color::Black);
                self.raw.set_color(u, Color::Black);
                self.raw.set_color(g, Color::Red);
                n = g;
                continue
            }

            trace!("insert case 4 at {n:?}");
            if n == self.raw.right(self.raw.left(g)) {
                self.raw.rotate_left(p)?;
                n = self.raw.left(n);
            } else if n == self.raw.left(self.raw.right(g)) {
                self.raw.rotate_right(p)?;
                n = self.raw.right(n);
            }

            let p = self.raw.parent(n);
            let g = self.raw.parent(p);
            if n == self.raw.left(p) {
                self.raw.rotate_right(g)?;
            } else {
                self.raw.rotate_left(g)?;
            }
            self.raw.set_color(p, Color::Black);
            self.raw.set_color(g, Color::Red);
            return Ok(())
        }
    }
}

// Bulk loading
impl<K, V, P, C> Tree<K, V, P, C>
where
    P: ValuePolicy<K, V>,
    C: Comparator<K>,
{
    /// Builds a tree out of entries that are already sorted.
    ///
    /// Fails if any key compares less than the one before it; the partly
    /// built tree is dropped in that case.
    pub fn from_ordered<I>(entries: I, mode: InsertMode) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
        P: Default,
        C: Default,
    {
        Self::from_ordered_with(P::default(), C::default(), entries, mode)
    }

    pub fn from_ordered_with<I>(policy: P, compare: C, entries: I, mode: InsertMode) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::with_parts(policy, compare);
        for (key, value) in entries {
            if let Some(last) = tree.raw.node(tree.raw.head.rightmost) {
                if tree.compare.compare(&key, &last.key) == Ordering::Less {
                    warn!("bulk load input is out of order after {} entries", tree.len());
                    return Err(TreeError::InvalidConstructionInput("entries are not in ascending order"))
                }
            }
            tree.insert(key, value, mode)?;
        }
        debug!("bulk loaded {} nodes", tree.len());
        Ok(tree)
    }
}
