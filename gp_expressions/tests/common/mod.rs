use std::collections::BTreeMap;

use approx::assert_relative_eq;
use gp_expressions::{Function, Operator, Tree};
use ndarray::Array2;
use proptest::prelude::*;

#[allow(dead_code)]
pub const N_FEATURES: usize = 3;

#[allow(dead_code)]
pub fn var(feature: usize) -> Tree {
    Tree::variable(feature)
}

#[allow(dead_code)]
pub fn c(value: f64) -> Tree {
    Tree::constant(value)
}

/// `(n_rows, n_features)` matrix with distinct, non-zero entries.
#[allow(dead_code)]
pub fn make_x(n_rows: usize, n_features: usize) -> Array2<f64> {
    Array2::from_shape_fn((n_rows, n_features), |(row, feature)| {
        (row as f64 + 1.0) * 0.25 - (feature as f64 + 1.0) * 0.1
    })
}

#[allow(dead_code)]
pub fn assert_close_vec(a: &[f64], b: &[f64], tol: f64) {
    assert_eq!(a.len(), b.len());
    for (&av, &bv) in a.iter().zip(b.iter()) {
        assert_relative_eq!(av, bv, epsilon = tol, max_relative = tol);
    }
}

#[allow(dead_code)]
#[derive(Clone, Debug)]
pub enum GenTree {
    Var(usize),
    Const(f64),
    Op { func: Function, children: Vec<GenTree> },
}

#[allow(dead_code)]
impl GenTree {
    pub fn to_postfix(&self, out: &mut Vec<Operator>) {
        match self {
            GenTree::Var(feature) => out.push(Operator::Var(*feature)),
            GenTree::Const(v) => out.push(Operator::Const(*v)),
            GenTree::Op { func, children } => {
                for c in children {
                    c.to_postfix(out);
                }
                out.push(Operator::Func(*func));
            }
        }
    }

    pub fn to_tree(&self) -> Tree {
        let mut ops = Vec::new();
        self.to_postfix(&mut ops);
        Tree::from_postfix(ops).expect("generated tree is valid postfix")
    }
}

#[allow(dead_code)]
/// Random trees over `funcs`. Constants are drawn from values that trigger
/// simplification rules as well as generic ones.
pub fn arb_tree(funcs: &'static [Function], depth: u32) -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        (0..N_FEATURES).prop_map(GenTree::Var),
        prop::sample::select(vec![0.0, 1.0, -1.0, 2.0, 0.5, -1.5]).prop_map(GenTree::Const),
        (-2.0f64..2.0).prop_map(GenTree::Const),
    ];

    leaf.prop_recursive(depth, 48, 3, move |inner| {
        (prop::sample::select(funcs.to_vec()), prop::collection::vec(inner, 3)).prop_map(
            |(func, mut children)| {
                children.truncate(func.arity());
                GenTree::Op { func, children }
            },
        )
    })
    .prop_map(|g| g.to_tree())
}

#[allow(dead_code)]
pub fn node_multiset(trees: &[&Tree]) -> BTreeMap<String, usize> {
    let mut m = BTreeMap::new();
    for t in trees {
        for op in t.ops() {
            *m.entry(format!("{op:?}")).or_insert(0) += 1;
        }
    }
    m
}
