//! Structure-changing operators on trees. Each one either rewrites its
//! input in place or leaves it untouched and reports `false`.

use gp_expressions::Tree;
use rand::Rng;

use crate::init::{Grow, Initializer, OperatorFactory};
use crate::picker::Picker;

/// Exchanges a subtree of `a` (never its root) with a subtree of `b` (possibly its root).
#[derive(Copy, Clone, Debug, Default)]
pub struct SubtreeCrossover {
    pub picker: Picker,
}

impl SubtreeCrossover {
    pub fn apply<R: Rng + ?Sized>(&self, a: &mut Tree, b: &mut Tree, rng: &mut R) -> bool {
        let h1 = a.height();
        if h1 == 0 {
            return false;
        }
        let Some(pa) = self.picker.pick(a, 0, h1 - 1, rng) else {
            return false;
        };
        let Some(pb) = self.picker.pick(b, 0, b.height(), rng) else {
            return false;
        };
        a.swap_subtrees(pa, b, pb);
        true
    }
}

/// Replaces each operator with probability `rate` by a fresh one of the same role.
#[derive(Copy, Clone, Debug)]
pub struct PointMutation {
    pub rate: f64,
}

impl PointMutation {
    pub fn apply<R: Rng + ?Sized>(&self, tree: &mut Tree, factory: &OperatorFactory, rng: &mut R) -> bool {
        let mut changed = false;
        for pos in tree.preorder() {
            if rng.random_bool(self.rate) {
                let op = factory.same_role(tree.op(pos), rng);
                tree.set_op(pos, op);
                changed = true;
            }
        }
        changed
    }
}

/// Replaces a subtree with one of its own proper subtrees.
#[derive(Copy, Clone, Debug, Default)]
pub struct HoistMutation {
    pub picker: Picker,
}

impl HoistMutation {
    pub fn apply<R: Rng + ?Sized>(&self, tree: &mut Tree, rng: &mut R) -> bool {
        let h = tree.height();
        if h < 1 {
            return false;
        }
        let Some(outer) = self.picker.pick(tree, 1, h, rng) else {
            return false;
        };
        let outer_tree = tree.subtree(outer);
        let Some(inner) = self.picker.pick(&outer_tree, 0, outer_tree.height() - 1, rng) else {
            return false;
        };
        tree.replace_subtree(outer, outer_tree.subtree(inner));
        true
    }
}

/// Swaps a subtree for a freshly grown tree no taller than the one it replaces.
#[derive(Copy, Clone, Debug)]
pub struct SubtreeMutation {
    pub picker: Picker,
    pub p_leaf: f64,
}

impl SubtreeMutation {
    pub fn apply<R: Rng + ?Sized>(&self, tree: &mut Tree, factory: &OperatorFactory, rng: &mut R) -> bool {
        let Some(pos) = self.picker.pick(tree, 0, tree.height(), rng) else {
            return false;
        };
        let picked_height = tree.subtree_heights()[pos];
        let mut fresh = Grow {
            min_height: 0,
            max_height: picked_height,
            p_leaf: self.p_leaf,
        }
        .new_tree(factory, rng);
        let root = fresh.root_index();
        tree.swap_subtrees(pos, &mut fresh, root);
        true
    }
}
