use std::collections::BTreeMap;
use std::sync::Arc;

use gp_expressions::{Function, FunctionSet, Tree};
use ndarray::array;

use crate::config::GpConfig;
use crate::dataset::Dataset;
use crate::init::OperatorFactory;
use crate::metric::{MetricObject, Mse};
use crate::program::RunContext;

pub(crate) const N_FEATURES: usize = 3;

pub(crate) fn arity2_functions() -> FunctionSet {
    FunctionSet::new([Function::Add, Function::Sub, Function::Mul, Function::Div]).unwrap()
}

pub(crate) fn mixed_functions() -> FunctionSet {
    FunctionSet::new([Function::Add, Function::Mul, Function::Sin, Function::If]).unwrap()
}

pub(crate) fn factory(functions: FunctionSet) -> OperatorFactory {
    OperatorFactory::new(functions, N_FEATURES, -5.0, 5.0, 0.5)
}

/// Rows `[x0, x1]` with `x0 = [1, 2, 3]`, `x1 = [4, 5, 6]`, targets `x0 + x1`.
pub(crate) fn sum_dataset() -> Dataset {
    let x = array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]];
    let y = array![5.0, 7.0, 9.0];
    Dataset::new(x.view(), y.view()).unwrap()
}

pub(crate) fn small_config() -> GpConfig {
    GpConfig {
        n_individuals: 40,
        n_generations: 8,
        min_height: 1,
        max_height: 3,
        parallel_eval: false,
        polish_best: false,
        seed: 7,
        ..Default::default()
    }
}

pub(crate) fn run_context(config: &GpConfig, dataset: Dataset) -> Arc<RunContext> {
    run_context_with_metric(config, dataset, Arc::new(Mse))
}

pub(crate) fn run_context_with_metric(config: &GpConfig, dataset: Dataset, metric: MetricObject) -> Arc<RunContext> {
    let functions = config.function_set().unwrap();
    let factory = OperatorFactory::from_config(config, functions, dataset.n_features());
    Arc::new(RunContext::new(config, dataset, metric, factory))
}

pub(crate) fn node_multiset(trees: &[&Tree]) -> BTreeMap<String, usize> {
    let mut m = BTreeMap::new();
    for t in trees {
        for op in t.ops() {
            *m.entry(format!("{op:?}")).or_insert(0) += 1;
        }
    }
    m
}
