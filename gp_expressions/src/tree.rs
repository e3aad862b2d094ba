use std::collections::BTreeSet;
use std::ops::Range;

use crate::error::ExprError;
use crate::node_utils::{
    child_roots, count_constant_nodes, count_function_nodes, count_variable_nodes, is_valid_postfix,
    subtree_heights, subtree_range, subtree_sizes,
};
use crate::operator::{Function, Operator};

/// An expression tree stored as a postfix arena.
///
/// The root is the last operator. The subtree rooted at position `i` occupies
/// the contiguous slice `[i + 1 - size(i), i + 1)`, so cloning is a deep copy
/// and moving a subtree between trees is a `drain`/`splice` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    ops: Vec<Operator>,
}

impl Tree {
    /// A single-node tree. Panics if `op` is a function.
    pub fn leaf(op: Operator) -> Self {
        assert!(op.is_leaf(), "'{op}' is not a leaf operator");
        Self { ops: vec![op] }
    }

    pub fn constant(value: f64) -> Self {
        Self::leaf(Operator::Const(value))
    }

    pub fn variable(feature: usize) -> Self {
        Self::leaf(Operator::Var(feature))
    }

    /// Applies `f` to `branches`. Panics if the branch count differs from the arity.
    pub fn new(f: Function, branches: Vec<Tree>) -> Self {
        assert_eq!(
            branches.len(),
            f.arity(),
            "'{f}' expects {} branch(es), got {}",
            f.arity(),
            branches.len()
        );
        let size = 1 + branches.iter().map(Tree::size).sum::<usize>();
        let mut ops = Vec::with_capacity(size);
        for b in branches {
            ops.extend(b.ops);
        }
        ops.push(Operator::Func(f));
        Self { ops }
    }

    pub fn from_postfix(ops: Vec<Operator>) -> Result<Self, ExprError> {
        if !is_valid_postfix(&ops) {
            return Err(ExprError::InvalidPostfix);
        }
        Ok(Self { ops })
    }

    pub fn ops(&self) -> &[Operator] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<Operator> {
        self.ops
    }

    pub fn root_index(&self) -> usize {
        self.ops.len() - 1
    }

    pub fn root(&self) -> &Operator {
        &self.ops[self.root_index()]
    }

    pub fn op(&self, pos: usize) -> &Operator {
        &self.ops[pos]
    }

    /// Replaces the operator at `pos`. Panics if the arity would change.
    pub fn set_op(&mut self, pos: usize, op: Operator) {
        assert_eq!(
            self.ops[pos].arity(),
            op.arity(),
            "cannot replace '{}' with '{op}': arity differs",
            self.ops[pos]
        );
        self.ops[pos] = op;
    }

    pub fn size(&self) -> usize {
        self.ops.len()
    }

    pub fn height(&self) -> usize {
        subtree_heights(&self.ops)[self.root_index()]
    }

    pub fn is_leaf(&self) -> bool {
        self.ops.len() == 1
    }

    pub fn subtree_sizes(&self) -> Vec<usize> {
        subtree_sizes(&self.ops)
    }

    pub fn subtree_heights(&self) -> Vec<usize> {
        subtree_heights(&self.ops)
    }

    pub fn subtree_range(&self, pos: usize) -> Range<usize> {
        subtree_range(&self.subtree_sizes(), pos)
    }

    /// Child positions of the node at `pos`, first operand first.
    pub fn children(&self, pos: usize) -> Vec<usize> {
        child_roots(&self.subtree_sizes(), pos, self.ops[pos].arity())
    }

    pub fn subtree(&self, pos: usize) -> Tree {
        Tree {
            ops: self.ops[self.subtree_range(pos)].to_vec(),
        }
    }

    /// Copy of the root's `i`-th operand. Panics if `i` is not below the root's arity.
    pub fn branch(&self, i: usize) -> Tree {
        let pos = self.branch_position(i);
        self.subtree(pos)
    }

    /// Replaces the root's `i`-th operand. Panics if `i` is not below the root's arity.
    pub fn set_branch(&mut self, i: usize, branch: Tree) {
        let pos = self.branch_position(i);
        self.replace_subtree(pos, branch);
    }

    fn branch_position(&self, i: usize) -> usize {
        let root = self.root_index();
        let arity = self.ops[root].arity();
        assert!(
            i < arity,
            "branch index {i} out of range for '{}' (arity {arity})",
            self.ops[root]
        );
        self.children(root)[i]
    }

    /// Moves `replacement` in at `pos` and returns the detached subtree.
    pub fn replace_subtree(&mut self, pos: usize, replacement: Tree) -> Tree {
        let range = self.subtree_range(pos);
        let old: Vec<Operator> = self.ops.splice(range, replacement.ops).collect();
        Tree { ops: old }
    }

    /// Exchanges the subtree at `pos` with the subtree at `other_pos` in `other`.
    pub fn swap_subtrees(&mut self, pos: usize, other: &mut Tree, other_pos: usize) {
        let mine = self.subtree_range(pos);
        let theirs = other.subtree_range(other_pos);
        let detached: Vec<Operator> = self.ops.drain(mine.clone()).collect();
        let incoming: Vec<Operator> = other.ops.splice(theirs, detached).collect();
        self.ops.splice(mine.start..mine.start, incoming);
    }

    /// Pre-order, left-to-right traversal from the root. The visitor receives
    /// the node position, its operator and its depth; returning `false` stops
    /// the walk.
    pub fn walk(&self, mut visit: impl FnMut(usize, &Operator, usize) -> bool) {
        let sizes = self.subtree_sizes();
        let mut stack = vec![(self.root_index(), 0usize)];
        while let Some((pos, depth)) = stack.pop() {
            let op = &self.ops[pos];
            if !visit(pos, op, depth) {
                return;
            }
            for child in child_roots(&sizes, pos, op.arity()).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    /// Node positions in pre-order.
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.ops.len());
        self.walk(|pos, _, _| {
            out.push(pos);
            true
        });
        out
    }

    pub fn n_constants(&self) -> usize {
        count_constant_nodes(&self.ops)
    }

    pub fn n_variables(&self) -> usize {
        count_variable_nodes(&self.ops)
    }

    pub fn n_functions(&self) -> usize {
        count_function_nodes(&self.ops)
    }

    pub fn features_used(&self) -> BTreeSet<usize> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                Operator::Var(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    /// Checks that every node has exactly as many children as its arity.
    pub fn is_consistent(&self) -> bool {
        is_valid_postfix(&self.ops)
    }
}
