use std::cmp::Ordering;

use log::error;

use crate::compare::Comparator;
use crate::error::TreeError;

use super::node::NodeId;
use super::Tree;

fn corrupt(why: &'static str) -> TreeError {
    error!("tree validation failed: {why}");
    TreeError::StructuralCorruption(why)
}

impl<K, V, P, C: Comparator<K>> Tree<K, V, P, C> {
    /// Walks the whole tree and checks every red-black invariant, plus the
    /// head's cached root, extremal nodes and size.
    ///
    /// Returns the black height of the tree (not counting the leaves).
    /// This is O(n), it is meant for tests and debugging.
    pub fn validate(&self) -> Result<usize, TreeError> {
        let raw = &self.raw;
        let head = raw.head();
        let root = head.root();

        if root.is_sentinel() {
            if !head.is_reset() { return Err(corrupt("an empty tree has a non-empty head")) }
            if !raw.nodes.is_empty() { return Err(corrupt("an empty tree still owns nodes")) }
            return Ok(0)
        }

        if !raw.contains(root) { return Err(corrupt("the root is not a live node")) }
        if !raw.parent(root).is_sentinel() { return Err(corrupt("the root has a parent")) }
        if raw.is_red(root) { return Err(corrupt("the root is red")) }
        if head.leftmost() != raw.minimum(root) { return Err(corrupt("leftmost is not the minimum")) }
        if head.rightmost() != raw.maximum(root) { return Err(corrupt("rightmost is not the maximum")) }

        let mut count = 0;
        let height = self.validate_subtree(root, &mut count)?;
        if count != head.size() { return Err(corrupt("the head size doesn't match the node count")) }
        if count != raw.nodes.len() { return Err(corrupt("the arena holds unlinked nodes")) }

        // in-order keys never go down
        let mut it = head.leftmost();
        let mut next = raw.next(it);
        while !next.is_sentinel() {
            if self.compare.compare(raw.key(it), raw.key(next)) == Ordering::Greater {
                return Err(corrupt("keys are out of order"))
            }
            it = next;
            next = raw.next(next);
        }

        Ok(height)
    }

    /// Black height of the subtree at `n`, counting its nodes into `count`.
    fn validate_subtree(&self, n: NodeId, count: &mut usize) -> Result<usize, TreeError> {
        let raw = &self.raw;
        if n.is_sentinel() { return Ok(0) }
        if !raw.contains(n) { return Err(corrupt("a link points at a free slot")) }
        *count += 1;

        let (left, right) = (raw.left(n), raw.right(n));
        if !left.is_sentinel() && raw.parent(left) != n { return Err(corrupt("a left child doesn't point back at its parent")) }
        if !right.is_sentinel() && raw.parent(right) != n { return Err(corrupt("a right child doesn't point back at its parent")) }
        if !left.is_sentinel() && left == right { return Err(corrupt("both children are the same node")) }
        if raw.is_red(n) && (raw.is_red(left) || raw.is_red(right)) { return Err(corrupt("a red node has a red child")) }

        let lh = self.validate_subtree(left, count)?;
        let rh = self.validate_subtree(right, count)?;
        // Equal black heights plus no red-red edge mean a path is at most twice
        // as long as its black height, so `n` nodes sit at most 2*log2(n+1) deep.
        if lh != rh { return Err(corrupt("black heights of two subtrees differ")) }

        Ok(lh + raw.is_black(n) as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::rbtree::Color;

    use super::*;

    fn build(keys: impl IntoIterator<Item = i32>) -> Tree<i32, ()> {
        let mut t = Tree::new();
        for k in keys {
            t.insert_multi(k, ()).unwrap();
        }
        t
    }

    #[test]
    fn black_heights() {
        assert_eq!(build([]).validate(), Ok(0));
        assert_eq!(build([1]).validate(), Ok(1));
        // 2 black at the root, 4 red, everything else black
        assert_eq!(build(1..=6).validate(), Ok(2));
    }

    #[test]
    fn height_stays_logarithmic() {
        let t = build(0..1024);
        let bh = t.validate().unwrap();
        // a red-black tree of n nodes is at most 2*log2(n+1) deep
        assert!(bh <= 11);
        let depth = |mut id: NodeId| {
            let mut d = 0;
            while !id.is_sentinel() {
                d += 1;
                id = t.raw().parent(id);
            }
            d
        };
        let deepest = (0..1024).map(|k| depth(t.find(&k).node())).max().unwrap();
        assert!(deepest <= 20, "depth {deepest}");
    }

    #[test]
    fn red_violation() {
        let mut t = build([2, 1, 3]);
        let root = t.root();
        t.raw.set_color(root, Color::Red);
        assert!(matches!(t.validate(), Err(TreeError::StructuralCorruption(_))));

        let mut t = build([1, 2, 3, 4]);
        let three = t.find(&3).node();
        t.raw.set_color(three, Color::Red);
        assert!(matches!(t.validate(), Err(TreeError::StructuralCorruption("a red node has a red child"))));
    }

    #[test]
    fn black_height_violation() {
        let mut t = build([2, 1, 3]);
        let one = t.find(&1).node();
        t.raw.set_color(one, Color::Black);
        assert!(matches!(t.validate(), Err(TreeError::StructuralCorruption("black heights of two subtrees differ"))));
    }

    #[test]
    fn stale_head() {
        let mut t = build([2, 1, 3]);
        t.raw.head.size = 5;
        assert!(t.validate().unwrap_err().is_corruption());

        let mut t = build([2, 1, 3]);
        t.raw.head.leftmost = t.root();
        assert!(matches!(t.validate(), Err(TreeError::StructuralCorruption("leftmost is not the minimum"))));
    }

    #[test]
    fn out_of_order_keys() {
        let mut t = build([2, 1, 3]);
        let one = t.find(&1).node();
        if let Some(n) = t.raw.node_mut(one) {
            n.key = 9;
        }
        assert!(matches!(t.validate(), Err(TreeError::StructuralCorruption("keys are out of order"))));
    }

    #[test]
    fn broken_back_link() {
        let mut t = build([2, 1, 3]);
        let (one, three) = (t.find(&1).node(), t.find(&3).node());
        t.raw.set_parent(one, three);
        assert!(t.validate().unwrap_err().is_corruption());
    }
}
