use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExprError;
use crate::math;

/// The closed catalog of built-in functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Abs,
    Add,
    Cos,
    Div,
    Exp,
    If,
    Inv,
    Log,
    Max,
    Min,
    Mul,
    Neg,
    Pow,
    Sin,
    Square,
    Sub,
}

pub type UnaryKernel = fn(f64) -> f64;
pub type BinaryKernel = fn(f64, f64) -> f64;

impl Function {
    pub const ALL: [Function; 16] = [
        Function::Abs,
        Function::Add,
        Function::Cos,
        Function::Div,
        Function::Exp,
        Function::If,
        Function::Inv,
        Function::Log,
        Function::Max,
        Function::Min,
        Function::Mul,
        Function::Neg,
        Function::Pow,
        Function::Sin,
        Function::Square,
        Function::Sub,
    ];

    pub const fn arity(self) -> usize {
        match self {
            Function::Abs
            | Function::Cos
            | Function::Exp
            | Function::Inv
            | Function::Log
            | Function::Neg
            | Function::Sin
            | Function::Square => 1,
            Function::Add
            | Function::Div
            | Function::Max
            | Function::Min
            | Function::Mul
            | Function::Pow
            | Function::Sub => 2,
            Function::If => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Add => "add",
            Function::Cos => "cos",
            Function::Div => "div",
            Function::Exp => "exp",
            Function::If => "if",
            Function::Inv => "inv",
            Function::Log => "log",
            Function::Max => "max",
            Function::Min => "min",
            Function::Mul => "mul",
            Function::Neg => "neg",
            Function::Pow => "pow",
            Function::Sin => "sin",
            Function::Square => "square",
            Function::Sub => "sub",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ExprError> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))
    }

    /// Symbol used by the infix printer, for the four arithmetic operators.
    pub const fn infix_symbol(self) -> Option<&'static str> {
        match self {
            Function::Add => Some("+"),
            Function::Sub => Some("-"),
            Function::Mul => Some("*"),
            Function::Div => Some("/"),
            _ => None,
        }
    }

    pub fn unary_kernel(self) -> Option<UnaryKernel> {
        let k: UnaryKernel = match self {
            Function::Abs => math::abs,
            Function::Cos => math::cos,
            Function::Exp => math::exp,
            Function::Inv => math::inv,
            Function::Log => math::log,
            Function::Neg => math::neg,
            Function::Sin => math::sin,
            Function::Square => math::square,
            _ => return None,
        };
        Some(k)
    }

    pub fn binary_kernel(self) -> Option<BinaryKernel> {
        let k: BinaryKernel = match self {
            Function::Add => math::add,
            Function::Div => math::div,
            Function::Max => math::max,
            Function::Min => math::min,
            Function::Mul => math::mul,
            Function::Pow => math::pow,
            Function::Sub => math::sub,
            _ => return None,
        };
        Some(k)
    }

    /// Scalar application. Returns NaN when `args.len()` does not match the arity.
    pub fn apply(self, args: &[f64]) -> f64 {
        match *args {
            [x] => self.unary_kernel().map_or(f64::NAN, |k| k(x)),
            [a, b] => self.binary_kernel().map_or(f64::NAN, |k| k(a, b)),
            [c, lo, hi] if self == Function::If => math::select(c, lo, hi),
            _ => f64::NAN,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// One node of an expression tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Operator {
    Const(f64),
    Var(usize),
    Func(Function),
}

impl Operator {
    pub fn arity(&self) -> usize {
        match self {
            Operator::Const(_) | Operator::Var(_) => 0,
            Operator::Func(f) => f.arity(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Operator::Func(_))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Operator::Const(_))
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Operator::Var(_))
    }

    pub fn as_const(&self) -> Option<f64> {
        match *self {
            Operator::Const(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<Function> {
        match *self {
            Operator::Func(f) => Some(f),
            _ => None,
        }
    }

    /// Display label: the value for constants, `x{i}` for variables, the name for functions.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Const(v) => write!(f, "{v}"),
            Operator::Var(i) => write!(f, "x{i}"),
            Operator::Func(func) => write!(f, "{func}"),
        }
    }
}

impl From<Function> for Operator {
    fn from(f: Function) -> Self {
        Operator::Func(f)
    }
}
