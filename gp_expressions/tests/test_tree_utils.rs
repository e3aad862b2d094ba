mod common;

use common::{arb_tree, c, node_multiset, var};
use gp_expressions::expression_algebra::{cos, if_then_else, sin};
use gp_expressions::node_utils::{child_roots, count_depth, is_valid_postfix};
use gp_expressions::{ExprError, Function, Operator, Tree};
use proptest::prelude::*;

fn sample() -> Tree {
    // cos(x0 + 42) * x1
    cos(var(0) + c(42.0)) * var(1)
}

#[test]
fn size_and_height() {
    assert_eq!(var(0).size(), 1);
    assert_eq!(var(0).height(), 0);
    let t = sample();
    assert_eq!(t.size(), 6);
    assert_eq!(t.height(), 3);
    assert_eq!(count_depth(t.ops()), 3);
}

#[test]
fn walk_is_preorder_with_depths() {
    let t = sample();
    let mut seen = Vec::new();
    t.walk(|_, op, depth| {
        seen.push((op.to_string(), depth));
        true
    });
    let expected = [("mul", 0), ("cos", 1), ("add", 2), ("x0", 3), ("42", 3), ("x1", 1)];
    let expected: Vec<(String, usize)> = expected.iter().map(|(s, d)| (s.to_string(), *d)).collect();
    assert_eq!(seen, expected);
}

#[test]
fn walk_stops_when_visitor_returns_false() {
    let t = sample();
    let mut visited = 0;
    t.walk(|_, op, _| {
        visited += 1;
        !matches!(op, Operator::Func(Function::Add))
    });
    assert_eq!(visited, 3);
}

#[test]
fn branch_access_and_replacement() {
    let mut t = sample();
    assert_eq!(t.branch(0), cos(var(0) + c(42.0)));
    assert_eq!(t.branch(1), var(1));

    t.set_branch(1, sin(var(2)));
    assert_eq!(t, cos(var(0) + c(42.0)) * sin(var(2)));
    assert!(t.is_consistent());
}

#[test]
#[should_panic(expected = "out of range")]
fn branch_beyond_arity_panics() {
    let t = cos(var(0));
    let _ = t.branch(1);
}

#[test]
#[should_panic(expected = "out of range")]
fn set_branch_on_leaf_panics() {
    let mut t = var(0);
    t.set_branch(0, var(1));
}

#[test]
fn children_of_ternary_node() {
    let t = if_then_else(var(0), c(1.0) + var(1), var(2));
    let root = t.root_index();
    let kids = t.children(root);
    assert_eq!(kids.len(), 3);
    assert_eq!(t.subtree(kids[0]), var(0));
    assert_eq!(t.subtree(kids[1]), c(1.0) + var(1));
    assert_eq!(t.subtree(kids[2]), var(2));
    assert_eq!(child_roots(&t.subtree_sizes(), root, 3), kids);
}

#[test]
fn replace_subtree_moves_ownership() {
    let mut t = sample();
    let pos = t.children(t.root_index())[0];
    let old = t.replace_subtree(pos, var(5));
    assert_eq!(old, cos(var(0) + c(42.0)));
    assert_eq!(t, var(5) * var(1));
}

#[test]
fn swap_subtrees_between_trees() {
    let mut a = sample();
    let mut b = sin(var(3)) - c(1.0);
    let a_pos = a.children(a.root_index())[1];
    let b_pos = b.children(b.root_index())[0];
    a.swap_subtrees(a_pos, &mut b, b_pos);
    assert_eq!(a, cos(var(0) + c(42.0)) * sin(var(3)));
    assert_eq!(b, var(1) - c(1.0));
}

#[test]
fn from_postfix_rejects_malformed_sequences() {
    let bad = vec![Operator::Var(0), Operator::Func(Function::Add)];
    assert!(matches!(Tree::from_postfix(bad), Err(ExprError::InvalidPostfix)));
    let two_roots = vec![Operator::Var(0), Operator::Var(1)];
    assert!(!is_valid_postfix(&two_roots));
    assert!(Tree::from_postfix(Vec::new()).is_err());
}

#[test]
fn counts_and_features() {
    let t = sample();
    assert_eq!(t.n_constants(), 1);
    assert_eq!(t.n_variables(), 2);
    assert_eq!(t.n_functions(), 3);
    assert_eq!(t.features_used().into_iter().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn clone_is_independent() {
    let original = sample();
    let mut copy = original.clone();
    copy.set_op(copy.root_index(), Operator::Func(Function::Add));
    assert_ne!(copy, original);
    assert_eq!(original, sample());
}

const BINARY_UNARY: &[Function] = &[Function::Add, Function::Mul, Function::Sin, Function::If];

proptest! {
    #[test]
    fn swapping_subtrees_relocates_nodes(
        a in arb_tree(BINARY_UNARY, 4),
        b in arb_tree(BINARY_UNARY, 4),
        i in any::<prop::sample::Index>(),
        j in any::<prop::sample::Index>(),
    ) {
        let before = node_multiset(&[&a, &b]);
        let (mut a2, mut b2) = (a.clone(), b.clone());
        let pi = i.index(a2.size());
        let pj = j.index(b2.size());
        a2.swap_subtrees(pi, &mut b2, pj);
        prop_assert!(a2.is_consistent());
        prop_assert!(b2.is_consistent());
        prop_assert_eq!(a2.size() + b2.size(), a.size() + b.size());
        prop_assert_eq!(node_multiset(&[&a2, &b2]), before);
    }

    #[test]
    fn walk_visits_every_node_once(t in arb_tree(BINARY_UNARY, 5)) {
        let mut order = t.preorder();
        prop_assert_eq!(order.len(), t.size());
        order.sort_unstable();
        order.dedup();
        prop_assert_eq!(order.len(), t.size());
        prop_assert_eq!(t.height(), count_depth(t.ops()));
    }
}
