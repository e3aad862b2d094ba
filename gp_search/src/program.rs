use core::fmt;
use std::sync::Arc;

use gp_expressions::{ExprError, Tree};
use ndarray::{Array1, ArrayView2};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GpConfig;
use crate::dataset::Dataset;
use crate::error::GpError;
use crate::genetic_operators::{HoistMutation, PointMutation, SubtreeCrossover, SubtreeMutation};
use crate::genome::Genome;
use crate::init::OperatorFactory;
use crate::metric::MetricObject;
use crate::picker::{Picker, Weighting};
use crate::transform::Transform;

/// A fitted formula: an expression tree and the mapping applied to its output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub tree: Tree,
    #[serde(default)]
    pub transform: Transform,
}

impl Program {
    pub fn new(tree: Tree, transform: Transform) -> Self {
        Self { tree, transform }
    }

    /// Predictions for the rows of `x`, shape `(n_rows, n_features)`.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, GpError> {
        let mut y = self.tree.evaluate(x)?;
        self.transform.apply_in_place(&mut y);
        Ok(y)
    }

    pub fn predict_row(&self, row: &[f64]) -> Result<f64, GpError> {
        Ok(self.transform.apply(self.tree.evaluate_row(row)?))
    }

    /// `{"tree": ..., "transform": "identity"}`.
    pub fn to_json(&self) -> Result<String, GpError> {
        Ok(serde_json::to_string(self).map_err(ExprError::from)?)
    }

    pub fn from_json(s: &str) -> Result<Self, GpError> {
        Ok(serde_json::from_str(s).map_err(ExprError::from)?)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transform {
            Transform::Identity => write!(f, "{}", self.tree),
            t => write!(f, "{t}({})", self.tree),
        }
    }
}

/// Read-only state shared by every program of a run.
#[derive(Debug)]
pub struct RunContext {
    pub dataset: Dataset,
    pub metric: MetricObject,
    pub transform: Transform,
    pub parsimony_coeff: f64,
    pub factory: OperatorFactory,
    pub crossover: SubtreeCrossover,
    pub hoist: HoistMutation,
    pub subtree: SubtreeMutation,
    pub point: PointMutation,
    /// Relative weights of hoist, subtree and point mutation; `None` when all are zero.
    pub mutation_choice: Option<WeightedIndex<f64>>,
}

impl RunContext {
    pub fn new(config: &GpConfig, dataset: Dataset, metric: MetricObject, factory: OperatorFactory) -> Self {
        let picker = Picker::new(Weighting::from_config(config));
        let transform = Transform::for_metric(metric.as_ref());
        let mutation_choice = WeightedIndex::new([
            config.p_hoist_mutation,
            config.p_subtree_mutation,
            config.p_point_mutation,
        ])
        .ok();
        Self {
            dataset,
            metric,
            transform,
            parsimony_coeff: config.parsimony_coeff,
            factory,
            crossover: SubtreeCrossover { picker },
            hoist: HoistMutation { picker },
            subtree: SubtreeMutation {
                picker,
                p_leaf: config.p_leaf,
            },
            point: PointMutation {
                rate: config.point_mutation_rate,
            },
            mutation_choice,
        }
    }

    /// Raw metric score of `program` on `dataset`, without parsimony.
    pub fn score_on(&self, program: &Program, dataset: &Dataset) -> Result<f64, GpError> {
        let y_pred = program.predict(dataset.x.view())?.to_vec();
        Ok(self
            .metric
            .apply(dataset.y_slice(), &y_pred, dataset.weights_slice())?)
    }

    /// Training fitness: metric score plus the size penalty, `+inf` for NaN scores.
    pub fn fitness(&self, program: &Program) -> Result<f64, GpError> {
        let raw = self.score_on(program, &self.dataset)?;
        if raw.is_nan() {
            return Ok(f64::INFINITY);
        }
        Ok(raw + self.parsimony_coeff * program.tree.size() as f64)
    }
}

/// A [`Program`] bound to its run context so that the driver can evolve it.
#[derive(Clone, Debug)]
pub struct ProgramGenome {
    pub program: Program,
    pub ctx: Arc<RunContext>,
}

impl ProgramGenome {
    pub fn new(tree: Tree, ctx: Arc<RunContext>) -> Self {
        let program = Program::new(tree, ctx.transform);
        Self { program, ctx }
    }

    pub fn tree(&self) -> &Tree {
        &self.program.tree
    }
}

impl Genome for ProgramGenome {
    fn evaluate(&mut self) -> Result<f64, GpError> {
        self.program.tree.simplify_in_place();
        self.ctx.fitness(&self.program)
    }

    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let ctx = &self.ctx;
        let Some(choice) = &ctx.mutation_choice else {
            return;
        };
        let tree = &mut self.program.tree;
        match choice.sample(rng) {
            0 => ctx.hoist.apply(tree, rng),
            1 => ctx.subtree.apply(tree, &ctx.factory, rng),
            _ => ctx.point.apply(tree, &ctx.factory, rng),
        };
    }

    fn crossover<R: Rng + ?Sized>(&mut self, other: &mut Self, rng: &mut R) {
        self.ctx
            .crossover
            .apply(&mut self.program.tree, &mut other.program.tree, rng);
    }

    fn complexity(&self) -> usize {
        self.program.tree.size()
    }
}
