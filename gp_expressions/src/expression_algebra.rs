//! Operator overloading and builder functions for assembling trees by hand.
//!
//! ```
//! use gp_expressions::expression_algebra::{cos, var};
//! let t = var(0) * cos(var(1) - 3.2);
//! assert_eq!(t.to_string(), "mul(x0, cos(sub(x1, 3.2)))");
//! ```

use crate::operator::Function;
use crate::tree::Tree;

pub fn var(feature: usize) -> Tree {
    Tree::variable(feature)
}

pub fn constant(value: f64) -> Tree {
    Tree::constant(value)
}

macro_rules! impl_tree_binop {
    ($Trait:ident, $method:ident, $func:expr) => {
        impl core::ops::$Trait for Tree {
            type Output = Tree;

            fn $method(self, rhs: Tree) -> Tree {
                Tree::new($func, vec![self, rhs])
            }
        }

        impl core::ops::$Trait<f64> for Tree {
            type Output = Tree;

            fn $method(self, rhs: f64) -> Tree {
                Tree::new($func, vec![self, Tree::constant(rhs)])
            }
        }

        impl core::ops::$Trait<Tree> for f64 {
            type Output = Tree;

            fn $method(self, rhs: Tree) -> Tree {
                Tree::new($func, vec![Tree::constant(self), rhs])
            }
        }
    };
}

impl_tree_binop!(Add, add, Function::Add);
impl_tree_binop!(Sub, sub, Function::Sub);
impl_tree_binop!(Mul, mul, Function::Mul);
impl_tree_binop!(Div, div, Function::Div);

impl core::ops::Neg for Tree {
    type Output = Tree;

    fn neg(self) -> Tree {
        Tree::new(Function::Neg, vec![self])
    }
}

macro_rules! unary_builders {
    ($($name:ident => $func:expr),* $(,)?) => {
        $(
            pub fn $name(x: Tree) -> Tree {
                Tree::new($func, vec![x])
            }
        )*
    };
}

macro_rules! binary_builders {
    ($($name:ident => $func:expr),* $(,)?) => {
        $(
            pub fn $name(a: Tree, b: Tree) -> Tree {
                Tree::new($func, vec![a, b])
            }
        )*
    };
}

unary_builders! {
    abs => Function::Abs,
    cos => Function::Cos,
    exp => Function::Exp,
    inv => Function::Inv,
    log => Function::Log,
    sin => Function::Sin,
    square => Function::Square,
}

binary_builders! {
    max => Function::Max,
    min => Function::Min,
    pow => Function::Pow,
}

/// `if(cond, lo, hi)`: `hi` where `cond > 0`, else `lo`.
pub fn if_then_else(cond: Tree, lo: Tree, hi: Tree) -> Tree {
    Tree::new(Function::If, vec![cond, lo, hi])
}
