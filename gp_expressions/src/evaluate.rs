use ndarray::{Array1, ArrayView2, Zip};

use crate::error::ExprError;
use crate::math;
use crate::operator::{Function, Operator};
use crate::tree::Tree;

/// Evaluates `tree` over every row of `x`, which has shape `(n_rows, n_features)`.
///
/// Evaluation is total: non-finite values are returned as-is and left for the
/// caller to score.
pub fn eval_tree_array(tree: &Tree, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ExprError> {
    let (n_rows, n_features) = x.dim();
    check_features(tree, n_features)?;

    let mut stack: Vec<Array1<f64>> = Vec::with_capacity(tree.size());
    for op in tree.ops() {
        match *op {
            Operator::Const(v) => stack.push(Array1::from_elem(n_rows, v)),
            Operator::Var(i) => stack.push(x.column(i).to_owned()),
            Operator::Func(f) => {
                let start = stack
                    .len()
                    .checked_sub(f.arity())
                    .ok_or(ExprError::InvalidPostfix)?;
                let args = stack.split_off(start);
                stack.push(apply_columns(f, args)?);
            }
        }
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(out), true) => Ok(out),
        _ => Err(ExprError::InvalidPostfix),
    }
}

/// Evaluates `tree` on a single row of feature values.
pub fn eval_row(tree: &Tree, row: &[f64]) -> Result<f64, ExprError> {
    check_features(tree, row.len())?;

    let mut stack: Vec<f64> = Vec::with_capacity(tree.size());
    for op in tree.ops() {
        match *op {
            Operator::Const(v) => stack.push(v),
            Operator::Var(i) => stack.push(row[i]),
            Operator::Func(f) => {
                let start = stack
                    .len()
                    .checked_sub(f.arity())
                    .ok_or(ExprError::InvalidPostfix)?;
                let out = f.apply(&stack[start..]);
                stack.truncate(start);
                stack.push(out);
            }
        }
    }
    match (stack.pop(), stack.is_empty()) {
        (Some(out), true) => Ok(out),
        _ => Err(ExprError::InvalidPostfix),
    }
}

fn check_features(tree: &Tree, n_features: usize) -> Result<(), ExprError> {
    match tree.features_used().last() {
        Some(&feature) if feature >= n_features => Err(ExprError::FeatureOutOfRange { feature, n_features }),
        _ => Ok(()),
    }
}

fn apply_columns(f: Function, mut args: Vec<Array1<f64>>) -> Result<Array1<f64>, ExprError> {
    match args.as_mut_slice() {
        [u] => {
            let k = f.unary_kernel().ok_or(ExprError::InvalidPostfix)?;
            u.mapv_inplace(k);
        }
        [u, v] => {
            let k = f.binary_kernel().ok_or(ExprError::InvalidPostfix)?;
            Zip::from(u.view_mut())
                .and(v.view())
                .for_each(|a, &b| *a = k(*a, b));
        }
        [c, lo, hi] if f == Function::If => {
            Zip::from(c.view_mut())
                .and(lo.view())
                .and(hi.view())
                .for_each(|c, &lo, &hi| *c = math::select(*c, lo, hi));
        }
        _ => return Err(ExprError::InvalidPostfix),
    }
    Ok(args.swap_remove(0))
}

impl Tree {
    /// See [`eval_tree_array`].
    pub fn evaluate(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, ExprError> {
        eval_tree_array(self, x)
    }

    /// See [`eval_row`].
    pub fn evaluate_row(&self, row: &[f64]) -> Result<f64, ExprError> {
        eval_row(self, row)
    }
}
