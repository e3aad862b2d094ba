use std::ops::Range;

use crate::operator::{Function, Operator};

/// Bottom-up fold over a postfix sequence. `f_branch` receives the node's
/// position, its function and the already-reduced children in order.
pub fn tree_mapreduce<R>(
    ops: &[Operator],
    mut f_leaf: impl FnMut(usize, &Operator) -> R,
    mut f_branch: impl FnMut(usize, Function, Vec<R>) -> R,
) -> R {
    let mut stack: Vec<R> = Vec::with_capacity(ops.len());
    for (pos, op) in ops.iter().enumerate() {
        match *op {
            Operator::Const(_) | Operator::Var(_) => stack.push(f_leaf(pos, op)),
            Operator::Func(f) => {
                let start = stack
                    .len()
                    .checked_sub(f.arity())
                    .expect("invalid postfix (stack underflow)");
                let children = stack.split_off(start);
                stack.push(f_branch(pos, f, children));
            }
        }
    }
    assert_eq!(stack.len(), 1, "invalid postfix (did not reduce to one root)");
    stack.pop().expect("non-empty stack")
}

pub fn is_valid_postfix(ops: &[Operator]) -> bool {
    let mut depth: usize = 0;
    for op in ops {
        let a = op.arity();
        if depth < a {
            return false;
        }
        depth = depth - a + 1;
    }
    depth == 1
}

pub fn subtree_sizes(ops: &[Operator]) -> Vec<usize> {
    let mut sizes = vec![0usize; ops.len()];
    let mut stack: Vec<usize> = Vec::with_capacity(ops.len());
    for (i, op) in ops.iter().enumerate() {
        let a = op.arity();
        let start = stack.len() - a;
        let size = 1 + stack[start..].iter().sum::<usize>();
        stack.truncate(start);
        stack.push(size);
        sizes[i] = size;
    }
    sizes
}

/// Per-node height: edges on the longest path from that node down to a leaf.
pub fn subtree_heights(ops: &[Operator]) -> Vec<usize> {
    let mut heights = vec![0usize; ops.len()];
    let mut stack: Vec<usize> = Vec::with_capacity(ops.len());
    for (i, op) in ops.iter().enumerate() {
        let a = op.arity();
        let start = stack.len() - a;
        let h = stack[start..].iter().copied().max().map_or(0, |m| m + 1);
        stack.truncate(start);
        stack.push(h);
        heights[i] = h;
    }
    heights
}

pub fn subtree_range(sizes: &[usize], root_idx: usize) -> Range<usize> {
    let end = root_idx + 1;
    end - sizes[root_idx]..end
}

/// Positions of the children of `root_idx`, first operand first.
pub fn child_roots(sizes: &[usize], root_idx: usize, arity: usize) -> Vec<usize> {
    let mut roots = vec![0usize; arity];
    let mut end = root_idx;
    for slot in roots.iter_mut().rev() {
        let child = end - 1;
        *slot = child;
        end = child + 1 - sizes[child];
    }
    roots
}

pub fn count_depth(ops: &[Operator]) -> usize {
    tree_mapreduce(
        ops,
        |_, _| 0usize,
        |_, _, children| children.into_iter().max().unwrap_or(0) + 1,
    )
}

pub fn count_constant_nodes(ops: &[Operator]) -> usize {
    ops.iter().filter(|op| op.is_const()).count()
}

pub fn count_variable_nodes(ops: &[Operator]) -> usize {
    ops.iter().filter(|op| op.is_var()).count()
}

pub fn count_function_nodes(ops: &[Operator]) -> usize {
    ops.iter().filter(|op| !op.is_leaf()).count()
}
