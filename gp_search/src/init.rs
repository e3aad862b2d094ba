//! Random tree construction.

use gp_expressions::{Function, FunctionSet, Operator, Tree};
use rand::Rng;

use crate::config::GpConfig;

/// Source of fresh operators for initializers and mutations.
#[derive(Clone, Debug)]
pub struct OperatorFactory {
    functions: FunctionSet,
    n_features: usize,
    const_min: f64,
    const_max: f64,
    p_constant: f64,
}

impl OperatorFactory {
    pub fn new(functions: FunctionSet, n_features: usize, const_min: f64, const_max: f64, p_constant: f64) -> Self {
        Self {
            functions,
            n_features,
            const_min,
            const_max,
            p_constant,
        }
    }

    pub fn from_config(config: &GpConfig, functions: FunctionSet, n_features: usize) -> Self {
        Self::new(
            functions,
            n_features,
            config.const_min,
            config.const_max,
            config.p_constant,
        )
    }

    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn new_constant<R: Rng + ?Sized>(&self, rng: &mut R) -> Operator {
        Operator::Const(rng.random_range(self.const_min..=self.const_max))
    }

    /// A uniformly drawn feature; falls back to a constant without features.
    pub fn new_variable<R: Rng + ?Sized>(&self, rng: &mut R) -> Operator {
        if self.n_features == 0 {
            return self.new_constant(rng);
        }
        Operator::Var(rng.random_range(0..self.n_features))
    }

    pub fn new_leaf<R: Rng + ?Sized>(&self, rng: &mut R) -> Operator {
        if rng.random_bool(self.p_constant) {
            self.new_constant(rng)
        } else {
            self.new_variable(rng)
        }
    }

    /// A function drawn uniformly from the whole set.
    pub fn new_function<R: Rng + ?Sized>(&self, rng: &mut R) -> Function {
        let all = self.functions.functions();
        all[rng.random_range(0..all.len())]
    }

    pub fn function_of_arity<R: Rng + ?Sized>(&self, arity: usize, rng: &mut R) -> Option<Function> {
        let choices = self.functions.of_arity(arity);
        if choices.is_empty() {
            return None;
        }
        Some(choices[rng.random_range(0..choices.len())])
    }

    /// A fresh operator of the same role as `op`: constant for constant,
    /// variable for variable, same-arity function for function. Functions
    /// with no same-arity alternative in the set are returned unchanged.
    pub fn same_role<R: Rng + ?Sized>(&self, op: &Operator, rng: &mut R) -> Operator {
        match *op {
            Operator::Const(_) => self.new_constant(rng),
            Operator::Var(_) => self.new_variable(rng),
            Operator::Func(f) => self
                .function_of_arity(f.arity(), rng)
                .map_or(*op, Operator::Func),
        }
    }
}

pub trait Initializer {
    fn new_tree<R: Rng + ?Sized>(&self, factory: &OperatorFactory, rng: &mut R) -> Tree;
}

/// Every leaf at depth exactly `height`.
#[derive(Copy, Clone, Debug)]
pub struct Full {
    pub height: usize,
}

impl Initializer for Full {
    fn new_tree<R: Rng + ?Sized>(&self, factory: &OperatorFactory, rng: &mut R) -> Tree {
        if self.height == 0 {
            return Tree::leaf(factory.new_leaf(rng));
        }
        let f = factory.new_function(rng);
        let child = Full {
            height: self.height - 1,
        };
        let branches = (0..f.arity()).map(|_| child.new_tree(factory, rng)).collect();
        Tree::new(f, branches)
    }
}

/// Leaves anywhere between `min_height` and `max_height`.
#[derive(Copy, Clone, Debug)]
pub struct Grow {
    pub min_height: usize,
    pub max_height: usize,
    pub p_leaf: f64,
}

impl Initializer for Grow {
    fn new_tree<R: Rng + ?Sized>(&self, factory: &OperatorFactory, rng: &mut R) -> Tree {
        if self.max_height == 0 || (self.min_height == 0 && rng.random_bool(self.p_leaf)) {
            return Tree::leaf(factory.new_leaf(rng));
        }
        let f = factory.new_function(rng);
        let child = Grow {
            min_height: self.min_height.saturating_sub(1),
            max_height: self.max_height - 1,
            p_leaf: self.p_leaf,
        };
        let branches = (0..f.arity()).map(|_| child.new_tree(factory, rng)).collect();
        Tree::new(f, branches)
    }
}

/// Full with probability `p_full` (height drawn from `[min_height, max_height]`), Grow otherwise.
#[derive(Copy, Clone, Debug)]
pub struct RampedHalfAndHalf {
    pub min_height: usize,
    pub max_height: usize,
    pub p_full: f64,
    pub p_leaf: f64,
}

impl RampedHalfAndHalf {
    pub fn from_config(config: &GpConfig) -> Self {
        Self {
            min_height: config.min_height,
            max_height: config.max_height,
            p_full: config.p_full,
            p_leaf: config.p_leaf,
        }
    }
}

impl Initializer for RampedHalfAndHalf {
    fn new_tree<R: Rng + ?Sized>(&self, factory: &OperatorFactory, rng: &mut R) -> Tree {
        if rng.random_bool(self.p_full) {
            let height = rng.random_range(self.min_height..=self.max_height);
            Full { height }.new_tree(factory, rng)
        } else {
            Grow {
                min_height: self.min_height,
                max_height: self.max_height,
                p_leaf: self.p_leaf,
            }
            .new_tree(factory, rng)
        }
    }
}
