use log::{error, trace};

use crate::error::TreeError;
use crate::policy::ValuePolicy;

use super::node::{Color, NodeId};
use super::Tree;

impl<K, V, P: ValuePolicy<K, V>, C> Tree<K, V, P, C> {
    /// Unlinks a node and hands back its payload.
    ///
    /// Erasing the sentinel, or a handle that doesn't name a live node, does
    /// nothing and returns `Ok(None)`.
    ///
    /// NOTE: when the node has two children, the payload of its in-order
    /// predecessor is moved into it and the predecessor's slot is the one that
    /// gets freed. Any [`NodeId`] other than `id` stays valid, but the one
    /// pointing at the predecessor now names nothing.
    ///
    /// A [`NodeId`] is a bare slot index. One taken from another tree, or kept
    /// across an insert that reuses a freed slot, isn't detected: it erases
    /// whatever node sits in that slot now. Take handles from this tree's own
    /// cursors and re-`find` after mutating.
    pub fn erase(&mut self, id: NodeId) -> Result<Option<(K, V)>, TreeError> {
        if !self.raw.contains(id) { return Ok(None) }

        let mut node = id;
        let left = self.raw.left(node);
        if !left.is_sentinel() && !self.raw.right(node).is_sentinel() {
            let pred = self.raw.maximum(left);
            let Some((dst, src)) = self.raw.nodes.get2_mut(node.0, pred.0) else {
                error!("erase({id:?}): predecessor {pred:?} is not a live node");
                return Err(TreeError::StructuralCorruption("predecessor of an inner node is missing"))
            };
            self.policy.transfer(dst, src);
            node = pred;
        }

        let child = if self.raw.right(node).is_sentinel() { self.raw.left(node) } else { self.raw.right(node) };
        if self.raw.is_black(node) {
            self.erase_repair(node)?;
        }
        self.raw.replace_node(node, child);

        let root = self.raw.head.root;
        self.raw.set_color(root, Color::Black);

        // `node` still remembers its parent, which is where the extremal node moves
        if self.raw.head.leftmost == node {
            self.raw.head.leftmost = if child.is_sentinel() { self.raw.parent(node) } else { self.raw.minimum(child) };
        }
        if self.raw.head.rightmost == node {
            self.raw.head.rightmost = if child.is_sentinel() { self.raw.parent(node) } else { self.raw.maximum(child) };
        }

        self.raw.head.size -= 1;
        trace!("erased {node:?}, {} nodes left", self.raw.head.size);
        Ok(Some(self.raw.nodes.remove(node.0).into_entry()))
    }

    /// Restores the black height around `n`, which is black and about to be
    /// unlinked.
    fn erase_repair(&mut self, mut n: NodeId) -> Result<(), TreeError> {
        loop {
            let p = self.raw.parent(n);
            if p.is_sentinel() {
                trace!("erase case 1 at {n:?}");
                return Ok(())
            }

            let s = self.raw.sibling(n);
            if self.raw.is_red(s) {
                trace!("erase case 2 at {n:?}");
                self.raw.set_color(p, Color::Red);
                self.raw.set_color(s, Color::Black);
                if n == self.raw.left(p) {
                    self.raw.rotate_left(p)?;
                } else {
                    self.raw.rotate_right(p)?;
                }
            }

            let p = self.raw.parent(n);
            let s = self.raw.sibling(n);
            let nephews_black = self.raw.is_black(self.raw.left(s)) && self.raw.is_black(self.raw.right(s));
            if self.raw.is_black(p) && self.raw.is_black(s) && nephews_black {
                trace!("erase case 3 at {n:?}");
                self.raw.set_color(s, Color::Red);
                n = p;
                continue
            }

            if self.raw.is_red(p) && self.raw.is_black(s) && nephews_black {
                trace!("erase case 4 at {n:?}");
                self.raw.set_color(s, Color::Red);
                self.raw.set_color(p, Color::Black);
                return Ok(())
            }

            // the sibling is black here, case 2 made sure of it
            let (sl, sr) = (self.raw.left(s), self.raw.right(s));
            if n == self.raw.left(p) && self.raw.is_red(sl) && self.raw.is_black(sr) {
                trace!("erase case 5 at {n:?}");
                self.raw.set_color(s, Color::Red);
                self.raw.set_color(sl, Color::Black);
                self.raw.rotate_right(s)?;
            } else if n == self.raw.right(p) && self.raw.is_black(sl) && self.raw.is_red(sr) {
                trace!("erase case 5 at {n:?}");
                self.raw.set_color(s, Color::Red);
                self.raw.set_color(sr, Color::Black);
                self.raw.rotate_left(s)?;
            }

            trace!("erase case 6 at {n:?}");
            let s = self.raw.sibling(n);
            self.raw.set_color(s, self.raw.color(p));
            self.raw.set_color(p, Color::Black);
            if n == self.raw.left(p) {
                self.raw.set_color(self.raw.right(s), Color::Black);
                self.raw.rotate_left(p)?;
            } else {
                self.raw.set_color(self.raw.left(s), Color::Black);
                self.raw.rotate_right(p)?;
            }
            return Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::KeyOnly;
    use crate::rbtree::InsertMode;

    use super::*;

    type Keys = Tree<i32, (), KeyOnly>;

    use Color::{Black, Red};

    fn key_of(t: &Keys, id: NodeId) -> Option<i32> {
        t.node(id).map(|n| *n.key())
    }

    fn check(t: &Keys, key: i32, parent: Option<i32>, left: Option<i32>, right: Option<i32>, color: Color) {
        let id = t.find(&key).node();
        let n = t.node(id).unwrap_or_else(|| panic!("{key} is not in the tree"));
        assert_eq!(key_of(t, n.parent()), parent, "parent of {key}");
        assert_eq!(key_of(t, n.left()), left, "left child of {key}");
        assert_eq!(key_of(t, n.right()), right, "right child of {key}");
        assert_eq!(n.color(), color, "color of {key}");
    }

    fn check_head(t: &Keys, root: Option<i32>, leftmost: Option<i32>, rightmost: Option<i32>, size: usize) {
        let h = t.head();
        assert_eq!(key_of(t, h.root()), root, "root");
        assert_eq!(key_of(t, h.leftmost()), leftmost, "leftmost");
        assert_eq!(key_of(t, h.rightmost()), rightmost, "rightmost");
        assert_eq!(h.size(), size, "size");
    }

    fn add(t: &mut Keys, keys: &[i32]) {
        for &k in keys {
            t.insert(k, (), InsertMode::Multi).unwrap();
        }
    }

    fn build(keys: &[i32]) -> Keys {
        let mut t = Tree::new();
        add(&mut t, keys);
        t
    }

    fn remove(t: &mut Keys, key: i32) {
        let id = t.find(&key).node();
        assert_eq!(t.erase(id).unwrap(), Some((key, ())));
        t.validate().unwrap();
    }

    #[test]
    fn sentinel_and_stale_ids() {
        let mut t = Keys::new();
        assert_eq!(t.erase(NodeId::SENTINEL).unwrap(), None);
        assert!(t.head().is_reset());

        let mut t = build(&[1]);
        let id = t.find(&1).node();
        remove(&mut t, 1);
        // the slot is gone now
        assert_eq!(t.erase(id).unwrap(), None);
    }

    #[test]
    fn only_node() {
        let mut t = build(&[2]);
        remove(&mut t, 2);
        assert!(t.head().is_reset());
    }

    #[test]
    fn root_is_replaced_by_its_predecessor() {
        let mut t = build(&[2, 1, 3]);
        let root = t.root();
        let removed = t.erase(root).unwrap();
        assert_eq!(removed, Some((2, ())));

        // the root slot survives, carrying the predecessor's key
        assert_eq!(t.root(), root);
        check_head(&t, Some(1), Some(1), Some(3), 2);
        check(&t, 1, None, None, Some(3), Black);
        check(&t, 3, Some(1), None, None, Red);
    }

    #[test]
    fn leftmost() {
        let mut t = build(&[2, 1, 3]);
        remove(&mut t, 1);
        check_head(&t, Some(2), Some(2), Some(3), 2);
        check(&t, 2, None, None, Some(3), Black);
        check(&t, 3, Some(2), None, None, Red);

        let mut t = build(&[10, 8, 12, 6, 14]);
        remove(&mut t, 6);
        check_head(&t, Some(10), Some(8), Some(14), 4);
        check(&t, 8, Some(10), None, None, Black);
        check(&t, 10, None, Some(8), Some(12), Black);
        check(&t, 12, Some(10), None, Some(14), Black);
        check(&t, 14, Some(12), None, None, Red);
    }

    #[test]
    fn rightmost() {
        let mut t = build(&[2, 1, 3]);
        remove(&mut t, 3);
        check_head(&t, Some(2), Some(1), Some(2), 2);
        check(&t, 1, Some(2), None, None, Red);
        check(&t, 2, None, Some(1), None, Black);

        let mut t = build(&[10, 8, 12, 6, 14]);
        remove(&mut t, 14);
        check_head(&t, Some(10), Some(6), Some(12), 4);
        check(&t, 6, Some(8), None, None, Red);
        check(&t, 8, Some(10), Some(6), None, Black);
        check(&t, 10, None, Some(8), Some(12), Black);
        check(&t, 12, Some(10), None, None, Black);
    }

    #[test]
    fn single_left_child() {
        let mut t = build(&[20, 10, 30, 25, 35, 22]);
        remove(&mut t, 25);
        check_head(&t, Some(20), Some(10), Some(35), 5);
        check(&t, 10, Some(20), None, None, Black);
        check(&t, 20, None, Some(10), Some(30), Black);
        check(&t, 22, Some(30), None, None, Red);
        check(&t, 30, Some(20), Some(22), Some(35), Black);
        check(&t, 35, Some(30), None, None, Red);
    }

    #[test]
    fn single_right_child() {
        let mut t = build(&[20, 10, 30, 25, 35, 27]);
        remove(&mut t, 25);
        check_head(&t, Some(20), Some(10), Some(35), 5);
        check(&t, 27, Some(30), None, None, Red);
        check(&t, 30, Some(20), Some(27), Some(35), Black);
        check(&t, 35, Some(30), None, None, Red);
    }

    #[test]
    fn red_sibling_then_red_parent_on_the_left() {
        let mut t = build(&[20, 10, 30, 5, 25, 35, 40]);
        remove(&mut t, 5);
        remove(&mut t, 40);
        check_head(&t, Some(20), Some(10), Some(35), 5);
        check(&t, 10, Some(20), None, None, Black);
        check(&t, 20, None, Some(10), Some(30), Black);
        check(&t, 25, Some(30), None, None, Black);
        check(&t, 30, Some(20), Some(25), Some(35), Red);
        check(&t, 35, Some(30), None, None, Black);

        // case 2, which then becomes case 4
        remove(&mut t, 10);
        check_head(&t, Some(30), Some(20), Some(35), 4);
        check(&t, 20, Some(30), None, Some(25), Black);
        check(&t, 25, Some(20), None, None, Red);
        check(&t, 30, None, Some(20), Some(35), Black);
        check(&t, 35, Some(30), None, None, Black);
    }

    #[test]
    fn red_sibling_then_red_parent_on_the_right() {
        let mut t = build(&[20, 10, 30, 5, 15, 18]);
        remove(&mut t, 18);
        check_head(&t, Some(20), Some(5), Some(30), 5);
        check(&t, 5, Some(10), None, None, Black);
        check(&t, 10, Some(20), Some(5), Some(15), Red);
        check(&t, 15, Some(10), None, None, Black);
        check(&t, 20, None, Some(10), Some(30), Black);
        check(&t, 30, Some(20), None, None, Black);

        remove(&mut t, 30);
        check_head(&t, Some(10), Some(5), Some(20), 4);
        check(&t, 5, Some(10), None, None, Black);
        check(&t, 10, None, Some(5), Some(20), Black);
        check(&t, 15, Some(20), None, None, Red);
        check(&t, 20, Some(10), Some(15), None, Black);
    }

    /// 20, 10, 30, 5, 15, 25, 35 and 12, 16, 17 with 15 red in the middle.
    fn ten() -> Keys {
        let mut t = build(&[20, 10, 30, 5, 15, 25, 35, 40]);
        remove(&mut t, 40);
        add(&mut t, &[12, 17, 16]);

        check_head(&t, Some(20), Some(5), Some(35), 10);
        check(&t, 5, Some(10), None, None, Black);
        check(&t, 10, Some(20), Some(5), Some(15), Black);
        check(&t, 12, Some(15), None, None, Black);
        check(&t, 15, Some(10), Some(12), Some(17), Red);
        check(&t, 16, Some(17), None, None, Red);
        check(&t, 17, Some(15), Some(16), None, Black);
        check(&t, 20, None, Some(10), Some(30), Black);
        check(&t, 25, Some(30), None, None, Black);
        check(&t, 30, Some(20), Some(25), Some(35), Black);
        check(&t, 35, Some(30), None, None, Black);
        t
    }

    #[test]
    fn black_cascade_on_the_left() {
        let mut t = ten();
        remove(&mut t, 25);
        check_head(&t, Some(15), Some(5), Some(35), 9);
        check(&t, 10, Some(15), Some(5), Some(12), Black);
        check(&t, 12, Some(10), None, None, Black);
        check(&t, 15, None, Some(10), Some(20), Black);
        check(&t, 16, Some(17), None, None, Red);
        check(&t, 17, Some(20), Some(16), None, Black);
        check(&t, 20, Some(15), Some(17), Some(30), Black);
        check(&t, 30, Some(20), None, Some(35), Black);
        check(&t, 35, Some(30), None, None, Red);
    }

    #[test]
    fn black_cascade_on_the_right() {
        let mut t = ten();
        remove(&mut t, 35);
        check_head(&t, Some(15), Some(5), Some(30), 9);
        check(&t, 10, Some(15), Some(5), Some(12), Black);
        check(&t, 15, None, Some(10), Some(20), Black);
        check(&t, 17, Some(20), Some(16), None, Black);
        check(&t, 20, Some(15), Some(17), Some(30), Black);
        check(&t, 25, Some(30), None, None, Red);
        check(&t, 30, Some(20), Some(25), None, Black);
    }

    #[test]
    fn near_nephew_is_red() {
        let mut t = ten();
        remove(&mut t, 35);
        remove(&mut t, 16);
        check_head(&t, Some(15), Some(5), Some(30), 8);
        check(&t, 17, Some(20), None, None, Black);
        check(&t, 20, Some(15), Some(17), Some(30), Black);
        check(&t, 25, Some(30), None, None, Red);
        check(&t, 30, Some(20), Some(25), None, Black);

        // case 5, then case 6
        remove(&mut t, 17);
        check_head(&t, Some(15), Some(5), Some(30), 7);
        check(&t, 15, None, Some(10), Some(25), Black);
        check(&t, 20, Some(25), None, None, Black);
        check(&t, 25, Some(15), Some(20), Some(30), Black);
        check(&t, 30, Some(25), None, None, Black);
    }

    #[test]
    fn near_nephew_is_red_mirrored() {
        let mut t = ten();
        remove(&mut t, 35);
        remove(&mut t, 25);
        check_head(&t, Some(15), Some(5), Some(30), 8);
        check(&t, 16, Some(17), None, None, Red);
        check(&t, 17, Some(20), Some(16), None, Black);
        check(&t, 20, Some(15), Some(17), Some(30), Black);
        check(&t, 30, Some(20), None, None, Black);

        remove(&mut t, 30);
        check_head(&t, Some(15), Some(5), Some(20), 7);
        check(&t, 15, None, Some(10), Some(17), Black);
        check(&t, 16, Some(17), None, None, Black);
        check(&t, 17, Some(15), Some(16), Some(20), Black);
        check(&t, 20, Some(17), None, None, Black);
    }

    #[test]
    fn maps_keep_keys_and_values_together() {
        let mut t: Tree<i32, &str> = Tree::new();
        for (k, v) in [(20, "twenty"), (10, "ten"), (30, "thirty"), (5, "five"), (15, "fifteen")] {
            t.insert_unique(k, v).unwrap();
        }
        let id = t.find(&10).node();
        assert_eq!(t.erase(id).unwrap(), Some((10, "ten")));
        assert_eq!(t.entries().collect::<Vec<_>>(), [(&5, &"five"), (&15, &"fifteen"), (&20, &"twenty"), (&30, &"thirty")]);
        t.validate().unwrap();
    }

    #[test]
    fn insert_then_erase_everything() {
        let mut t = build(&(0..64).map(|i| (i * 37) % 64).collect::<Vec<_>>());
        for k in 0..64 {
            remove(&mut t, k);
        }
        assert!(t.head().is_reset());
        assert!(t.is_empty());
    }
}
