mod common;

use approx::assert_relative_eq;
use common::{arb_tree, c, var};
use gp_expressions::expression_algebra::{abs, cos, exp, if_then_else, inv, log, max, min, pow, sin, square};
use gp_expressions::{Function, Tree};
use proptest::prelude::*;

fn numeric_partial(t: &Tree, row: &[f64], feature: usize, eps: f64) -> f64 {
    let mut plus = row.to_vec();
    let mut minus = row.to_vec();
    plus[feature] += eps;
    minus[feature] -= eps;
    (t.evaluate_row(&plus).unwrap() - t.evaluate_row(&minus).unwrap()) / (2.0 * eps)
}

fn assert_diff_matches(t: &Tree, row: &[f64], feature: usize) {
    let symbolic = t.diff(feature).evaluate_row(row).unwrap();
    let numeric = numeric_partial(t, row, feature, 1e-6);
    assert_relative_eq!(symbolic, numeric, epsilon = 1e-5, max_relative = 1e-5);
}

#[test]
fn product_plus_sine() {
    let z = var(0) * var(1) + sin(var(0));
    assert_eq!(z.diff(0).simplify(), var(1) + cos(var(0)));
    assert_eq!(z.diff(1).simplify(), var(0));
}

#[test]
fn leaves() {
    assert_eq!(c(3.0).diff(0), c(0.0));
    assert_eq!(var(0).diff(0), c(1.0));
    assert_eq!(var(1).diff(0), c(0.0));
}

#[test]
fn derivative_of_unrelated_feature_simplifies_to_zero() {
    let z = square(var(1)) * cos(var(2)) - var(1) * var(2);
    assert_eq!(z.diff(0).simplify(), c(0.0));
}

#[test]
fn square_and_sum_rules() {
    let z = square(var(0)) + var(0);
    // 2 * x0 * 1 + 1
    assert_eq!(z.diff(0).simplify(), (c(2.0) * var(0)) + c(1.0));
}

#[test]
fn each_builtin_matches_central_differences() {
    let row = [0.7, -1.3, 2.1];
    let cases = vec![
        abs(var(0) - c(2.0)),
        cos(var(0) * var(1)),
        exp(var(0)),
        inv(var(1)),
        log(var(2)),
        -(var(0) * var(2)),
        sin(square(var(0))),
        square(var(1) + var(2)),
        var(0) + var(1),
        var(0) - var(1),
        var(0) * var(1),
        var(2) / var(1),
        max(var(0), var(1)),
        min(var(0), var(1)),
        pow(var(2), var(0)),
        if_then_else(var(1), var(0) * c(3.0), square(var(0))),
    ];
    for t in &cases {
        for feature in 0..3 {
            assert_diff_matches(t, &row, feature);
        }
    }
}

const SMOOTH: &[Function] = &[
    Function::Add,
    Function::Sub,
    Function::Mul,
    Function::Neg,
    Function::Sin,
    Function::Cos,
    Function::Square,
];

/// Largest magnitude over every subtree value at `row`.
fn max_subtree_magnitude(t: &Tree, row: &[f64]) -> f64 {
    (0..t.size())
        .map(|pos| t.subtree(pos).evaluate_row(row).unwrap().abs())
        .fold(0.0, f64::max)
}

proptest! {
    #[test]
    fn symbolic_derivative_matches_finite_differences(
        t in arb_tree(SMOOTH, 3),
        row in prop::collection::vec(-1.0f64..1.0, 3),
        feature in 0usize..3,
    ) {
        prop_assume!(max_subtree_magnitude(&t, &row) <= 4.0);
        let symbolic = t.diff(feature).evaluate_row(&row).unwrap();
        let simplified = t.diff(feature).simplify().evaluate_row(&row).unwrap();
        let numeric = numeric_partial(&t, &row, feature, 1e-6);
        prop_assert!(
            (symbolic - numeric).abs() <= 1e-4 * (1.0 + numeric.abs()),
            "{t}: symbolic {symbolic} vs numeric {numeric}"
        );
        prop_assert!((symbolic - simplified).abs() <= 1e-9 * (1.0 + symbolic.abs()));
    }
}
