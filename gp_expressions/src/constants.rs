use crate::operator::Operator;
use crate::tree::Tree;

/// Positions of every constant leaf of a tree, in pre-order left-to-right.
///
/// The view is tied to the tree structure it was built from; reading and
/// writing back use the same ordering, so `values` followed by `write_back`
/// leaves the tree unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantView {
    positions: Vec<usize>,
}

impl ConstantView {
    pub fn new(tree: &Tree) -> Self {
        let mut positions = Vec::with_capacity(tree.n_constants());
        tree.walk(|pos, op, _| {
            if op.is_const() {
                positions.push(pos);
            }
            true
        });
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn values(&self, tree: &Tree) -> Vec<f64> {
        self.positions
            .iter()
            .map(|&pos| tree.op(pos).as_const().unwrap_or(f64::NAN))
            .collect()
    }

    /// Writes `values` into the constant leaves. Panics if the length differs
    /// from the view's length.
    pub fn write_back(&self, tree: &mut Tree, values: &[f64]) {
        assert_eq!(
            values.len(),
            self.positions.len(),
            "constant count mismatch: view has {}, got {}",
            self.positions.len(),
            values.len()
        );
        for (&pos, &v) in self.positions.iter().zip(values) {
            debug_assert!(tree.op(pos).is_const(), "position {pos} is not a constant");
            tree.set_op(pos, Operator::Const(v));
        }
    }
}

pub fn get_constants(tree: &Tree) -> Vec<f64> {
    ConstantView::new(tree).values(tree)
}

pub fn set_constants(tree: &mut Tree, values: &[f64]) {
    ConstantView::new(tree).write_back(tree, values);
}
