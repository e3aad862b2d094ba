//! Bottom-up algebraic simplification.
//!
//! Children are simplified first, then a fixed rule set is applied at each
//! node. Every rule strictly reduces the node count and any node it builds is
//! simplified again, so the output is a fixed point of [`simplify_tree`].

use crate::node_utils::tree_mapreduce;
use crate::operator::{Function, Operator};
use crate::tree::Tree;

pub fn simplify_tree(tree: &Tree) -> Tree {
    tree_mapreduce(
        tree.ops(),
        |_, op| Tree::leaf(*op),
        |_, f, children| simplify_node(f, children),
    )
}

/// Simplifies in place and reports whether anything changed.
pub fn simplify_in_place(tree: &mut Tree) -> bool {
    let simplified = simplify_tree(tree);
    if simplified == *tree {
        return false;
    }
    *tree = simplified;
    true
}

impl Tree {
    pub fn simplify(&self) -> Tree {
        simplify_tree(self)
    }

    pub fn simplify_in_place(&mut self) -> bool {
        simplify_in_place(self)
    }
}

enum Rewrite {
    /// An already simplified tree.
    Done(Tree),
    /// A freshly built node whose root still has to be checked.
    Again(Function, Vec<Tree>),
}

fn simplify_node(f: Function, children: Vec<Tree>) -> Tree {
    if let Some(folded) = fold_constants(f, &children) {
        return folded;
    }
    match rewrite(f, children) {
        Rewrite::Done(t) => t,
        Rewrite::Again(f, children) => simplify_node(f, children),
    }
}

fn fold_constants(f: Function, children: &[Tree]) -> Option<Tree> {
    let values = children
        .iter()
        .map(const_value)
        .collect::<Option<Vec<f64>>>()?;
    let v = f.apply(&values);
    if !v.is_finite() {
        return None;
    }
    Some(Tree::constant(if v == 0.0 { 0.0 } else { v }))
}

fn const_value(t: &Tree) -> Option<f64> {
    if t.is_leaf() {
        t.root().as_const()
    } else {
        None
    }
}

fn is_const(t: &Tree, value: f64) -> bool {
    const_value(t) == Some(value)
}

/// The operand of a root `neg`, if any.
fn negated(t: &Tree) -> Option<Tree> {
    match t.root() {
        Operator::Func(Function::Neg) => Some(t.branch(0)),
        _ => None,
    }
}

fn root_is(t: &Tree, f: Function) -> bool {
    *t.root() == Operator::Func(f)
}

fn unary(f: Function, u: Tree) -> Rewrite {
    Rewrite::Again(f, vec![u])
}

fn binary(f: Function, u: Tree, v: Tree) -> Rewrite {
    Rewrite::Again(f, vec![u, v])
}

fn rewrite(f: Function, children: Vec<Tree>) -> Rewrite {
    let mut it = children.into_iter();
    let (a, b, c) = (it.next(), it.next(), it.next());
    match (f, a, b, c) {
        (Function::Add, Some(u), Some(v), None) => rewrite_add(u, v),
        (Function::Sub, Some(u), Some(v), None) => rewrite_sub(u, v),
        (Function::Mul, Some(u), Some(v), None) => rewrite_mul(u, v),
        (Function::Div, Some(u), Some(v), None) => rewrite_div(u, v),
        (Function::Max | Function::Min, Some(u), Some(v), None) if u == v => Rewrite::Done(u),
        (Function::Pow, Some(u), Some(v), None) => {
            if is_const(&v, 1.0) {
                Rewrite::Done(u)
            } else if is_const(&v, 0.0) {
                Rewrite::Done(Tree::constant(1.0))
            } else {
                Rewrite::Done(Tree::new(Function::Pow, vec![u, v]))
            }
        }
        (Function::Neg, Some(u), None, None) => match negated(&u) {
            Some(inner) => Rewrite::Done(inner),
            None => Rewrite::Done(Tree::new(Function::Neg, vec![u])),
        },
        (Function::Inv, Some(u), None, None) => {
            if root_is(&u, Function::Inv) {
                Rewrite::Done(u.branch(0))
            } else {
                Rewrite::Done(Tree::new(Function::Inv, vec![u]))
            }
        }
        (Function::Square, Some(u), None, None) => match negated(&u) {
            Some(inner) => unary(Function::Square, inner),
            None => Rewrite::Done(Tree::new(Function::Square, vec![u])),
        },
        (Function::Abs, Some(u), None, None) => {
            if root_is(&u, Function::Abs) {
                Rewrite::Done(u)
            } else if let Some(inner) = negated(&u) {
                unary(Function::Abs, inner)
            } else {
                Rewrite::Done(Tree::new(Function::Abs, vec![u]))
            }
        }
        (Function::If, Some(cond), Some(lo), Some(hi)) => match const_value(&cond) {
            Some(c) if c > 0.0 => Rewrite::Done(hi),
            Some(_) => Rewrite::Done(lo),
            None if lo == hi => Rewrite::Done(lo),
            None => Rewrite::Done(Tree::new(Function::If, vec![cond, lo, hi])),
        },
        (f, a, b, c) => Rewrite::Done(Tree::new(f, [a, b, c].into_iter().flatten().collect())),
    }
}

fn rewrite_add(u: Tree, v: Tree) -> Rewrite {
    if is_const(&v, 0.0) {
        return Rewrite::Done(u);
    }
    if is_const(&u, 0.0) {
        return Rewrite::Done(v);
    }
    if let Some(w) = negated(&v) {
        return binary(Function::Sub, u, w);
    }
    if let Some(w) = negated(&u) {
        return binary(Function::Sub, v, w);
    }
    Rewrite::Done(Tree::new(Function::Add, vec![u, v]))
}

fn rewrite_sub(u: Tree, v: Tree) -> Rewrite {
    if is_const(&v, 0.0) {
        return Rewrite::Done(u);
    }
    if is_const(&u, 0.0) {
        return unary(Function::Neg, v);
    }
    if u == v {
        return Rewrite::Done(Tree::constant(0.0));
    }
    if let Some(w) = negated(&v) {
        return binary(Function::Add, u, w);
    }
    Rewrite::Done(Tree::new(Function::Sub, vec![u, v]))
}

fn rewrite_mul(u: Tree, v: Tree) -> Rewrite {
    if is_const(&u, 0.0) || is_const(&v, 0.0) {
        return Rewrite::Done(Tree::constant(0.0));
    }
    if is_const(&v, 1.0) {
        return Rewrite::Done(u);
    }
    if is_const(&u, 1.0) {
        return Rewrite::Done(v);
    }
    if is_const(&v, -1.0) {
        return unary(Function::Neg, u);
    }
    if is_const(&u, -1.0) {
        return unary(Function::Neg, v);
    }
    if let (Some(x), Some(y)) = (negated(&u), negated(&v)) {
        return binary(Function::Mul, x, y);
    }
    Rewrite::Done(Tree::new(Function::Mul, vec![u, v]))
}

fn rewrite_div(u: Tree, v: Tree) -> Rewrite {
    if is_const(&v, 1.0) {
        return Rewrite::Done(u);
    }
    if is_const(&v, -1.0) {
        return unary(Function::Neg, u);
    }
    if is_const(&u, 1.0) {
        return unary(Function::Inv, v);
    }
    if u == v {
        return Rewrite::Done(Tree::constant(1.0));
    }
    Rewrite::Done(Tree::new(Function::Div, vec![u, v]))
}
