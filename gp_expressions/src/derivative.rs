use crate::node_utils::tree_mapreduce;
use crate::operator::{Function, Operator};
use crate::tree::Tree;

/// Symbolic derivative of `tree` with respect to feature `feature`.
///
/// The result is not simplified; call [`Tree::simplify`] on it.
pub fn diff_tree(tree: &Tree, feature: usize) -> Tree {
    let (_, d) = tree_mapreduce(
        tree.ops(),
        |_, op| {
            let d = match *op {
                Operator::Var(i) if i == feature => 1.0,
                _ => 0.0,
            };
            (Tree::leaf(*op), Tree::constant(d))
        },
        |_, f, children| {
            let (values, derivs): (Vec<Tree>, Vec<Tree>) = children.into_iter().unzip();
            let d = diff_node(f, &values, derivs);
            (Tree::new(f, values), d)
        },
    );
    d
}

impl Tree {
    pub fn diff(&self, feature: usize) -> Tree {
        diff_tree(self, feature)
    }
}

fn call(f: Function, args: Vec<Tree>) -> Tree {
    Tree::new(f, args)
}

fn diff_node(f: Function, values: &[Tree], derivs: Vec<Tree>) -> Tree {
    use Function::*;

    let u = || values[0].clone();
    let v = || values[1].clone();
    let mut derivs = derivs.into_iter();
    let du = derivs.next();
    let dv = derivs.next();
    let dw = derivs.next();

    match (f, du, dv, dw) {
        (Abs, Some(du), None, None) => call(Div, vec![call(Mul, vec![u(), du]), call(Abs, vec![u()])]),
        (Cos, Some(du), None, None) => call(Neg, vec![call(Mul, vec![du, call(Sin, vec![u()])])]),
        (Exp, Some(du), None, None) => call(Mul, vec![du, call(Exp, vec![u()])]),
        (Inv, Some(du), None, None) => call(Neg, vec![call(Div, vec![du, call(Square, vec![u()])])]),
        (Log, Some(du), None, None) => call(Div, vec![du, u()]),
        (Neg, Some(du), None, None) => call(Neg, vec![du]),
        (Sin, Some(du), None, None) => call(Mul, vec![du, call(Cos, vec![u()])]),
        (Square, Some(du), None, None) => call(Mul, vec![call(Mul, vec![Tree::constant(2.0), u()]), du]),
        (Add, Some(du), Some(dv), None) => call(Add, vec![du, dv]),
        (Sub, Some(du), Some(dv), None) => call(Sub, vec![du, dv]),
        (Mul, Some(du), Some(dv), None) => call(Add, vec![call(Mul, vec![du, v()]), call(Mul, vec![u(), dv])]),
        (Div, Some(du), Some(dv), None) => call(
            Div,
            vec![
                call(Sub, vec![call(Mul, vec![du, v()]), call(Mul, vec![u(), dv])]),
                call(Square, vec![v()]),
            ],
        ),
        // max picks u when u - v > 0
        (Max, Some(du), Some(dv), None) => call(If, vec![call(Sub, vec![u(), v()]), dv, du]),
        (Min, Some(du), Some(dv), None) => call(If, vec![call(Sub, vec![u(), v()]), du, dv]),
        (Pow, Some(du), Some(dv), None) => call(
            Mul,
            vec![
                call(Pow, vec![u(), v()]),
                call(
                    Add,
                    vec![
                        call(Mul, vec![dv, call(Log, vec![u()])]),
                        call(Div, vec![call(Mul, vec![v(), du]), u()]),
                    ],
                ),
            ],
        ),
        (If, Some(_), Some(dlo), Some(dhi)) => call(If, vec![values[0].clone(), dlo, dhi]),
        (f, ..) => unreachable!("'{f}' received a derivative list that does not match its arity"),
    }
}
