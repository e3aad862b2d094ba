mod common;

use approx::assert_relative_eq;
use common::{arb_tree, assert_close_vec, c, make_x, var};
use gp_expressions::expression_algebra::{cos, if_then_else, inv, log, max, min};
use gp_expressions::{ExprError, Function, Tree};
use ndarray::{array, Array2};
use proptest::prelude::*;

#[test]
fn evaluates_columns_row_by_row() {
    // two features, three rows: x0 = [1, 2, 3], x1 = [4, 5, 6]
    let x = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
    let t = var(0) + var(1);
    let y = t.evaluate(x.view()).unwrap();
    assert_eq!(y.to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(t.evaluate_row(&[4.0, 7.0]).unwrap(), 11.0);
}

#[test]
fn constants_broadcast_to_every_row() {
    let x = make_x(4, 1);
    let y = c(2.5).evaluate(x.view()).unwrap();
    assert_eq!(y.to_vec(), vec![2.5; 4]);
}

#[test]
fn readme_like_expression() {
    let x = make_x(5, 2);
    let t = var(0) * cos(var(1) - 3.2);
    let y = t.evaluate(x.view()).unwrap();
    let expected: Vec<f64> = x
        .rows()
        .into_iter()
        .map(|r| r[0] * (r[1] - 3.2).cos())
        .collect();
    assert_close_vec(y.as_slice().unwrap(), &expected, 1e-12);
}

#[test]
fn protected_operators_are_total() {
    let x = array![[0.0], [1e-12], [2.0]];
    let div = (c(3.0) / var(0)).evaluate(x.view()).unwrap();
    assert_eq!(div.to_vec(), vec![1.0, 1.0, 1.5]);

    let inv = inv(var(0)).evaluate(x.view()).unwrap();
    assert_eq!(inv.to_vec(), vec![1.0, 1.0, 0.5]);

    let log = log(var(0)).evaluate(x.view()).unwrap();
    assert_eq!(log[0], 0.0);
    assert_eq!(log[1], 0.0);
    assert_relative_eq!(log[2], 2f64.ln());
}

#[test]
fn conditional_and_extrema() {
    let x = array![[-1.0, 10.0], [0.0, 20.0], [1.0, 30.0]];
    let t = if_then_else(var(0), var(1), -var(1));
    assert_eq!(t.evaluate(x.view()).unwrap().to_vec(), vec![10.0, 20.0, -30.0]);

    assert_eq!(
        max(var(0), c(0.5)).evaluate(x.view()).unwrap().to_vec(),
        vec![0.5, 0.5, 1.0]
    );
    assert_eq!(
        min(var(0), c(0.5)).evaluate(x.view()).unwrap().to_vec(),
        vec![-1.0, 0.0, 0.5]
    );
}

#[test]
fn missing_feature_is_an_error() {
    let x = make_x(3, 2);
    let err = (var(0) + var(2)).evaluate(x.view()).unwrap_err();
    assert!(matches!(
        err,
        ExprError::FeatureOutOfRange {
            feature: 2,
            n_features: 2
        }
    ));
    assert!(var(3).evaluate_row(&[1.0]).is_err());
}

#[test]
fn zero_rows_evaluate_to_empty_column() {
    let x = Array2::<f64>::zeros((0, 2));
    let y = (var(0) * var(1)).evaluate(x.view()).unwrap();
    assert!(y.is_empty());
}

const ALL: &[Function] = &Function::ALL;

proptest! {
    #[test]
    fn column_and_row_evaluation_agree(t in arb_tree(ALL, 4)) {
        let x = make_x(6, 3);
        let cols = t.evaluate(x.view()).unwrap();
        for (row, &got) in x.rows().into_iter().zip(cols.iter()) {
            let want = t.evaluate_row(row.as_slice().unwrap()).unwrap();
            prop_assert!(got == want || (got.is_nan() && want.is_nan()), "{t}: {got} vs {want}");
        }
    }
}

#[test]
fn evaluating_from_postfix_matches_builder() {
    let built = var(0) * c(2.0);
    let from_ops = Tree::from_postfix(built.ops().to_vec()).unwrap();
    let x = make_x(3, 1);
    assert_eq!(
        built.evaluate(x.view()).unwrap(),
        from_ops.evaluate(x.view()).unwrap()
    );
}
