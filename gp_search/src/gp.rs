use std::sync::Arc;

use gp_expressions::FunctionSet;
use log::info;
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GpConfig;
use crate::dataset::Dataset;
use crate::error::GpError;
use crate::evolution::{evolve, EvolutionSettings, GenerationStats};
use crate::genome::Genome;
use crate::init::{Initializer, OperatorFactory, RampedHalfAndHalf};
use crate::metric::{minimizing, MetricObject, Mse};
use crate::polish::polish;
use crate::program::{Program, ProgramGenome, RunContext};

/// Genetic-programming estimator: fit on a table, then predict with the best program.
pub struct Gp {
    config: GpConfig,
    functions: FunctionSet,
    metric: MetricObject,
    eval_metric: Option<MetricObject>,
    best: Option<Program>,
    best_fitness: Option<f64>,
    history: Vec<GenerationStats>,
}

impl Gp {
    /// Validates `config` and parses its function list. The metric defaults to [`Mse`].
    pub fn new(config: GpConfig) -> Result<Self, GpError> {
        config.validate()?;
        let functions = config.function_set()?;
        Ok(Self {
            config,
            functions,
            metric: Arc::new(Mse),
            eval_metric: None,
            best: None,
            best_fitness: None,
            history: Vec::new(),
        })
    }

    /// Training metric. Bigger-is-better metrics are negated internally.
    pub fn with_metric(mut self, metric: MetricObject) -> Self {
        self.metric = metric;
        self
    }

    /// Metric reported on validation data; defaults to the training metric.
    pub fn with_eval_metric(mut self, metric: MetricObject) -> Self {
        self.eval_metric = Some(metric);
        self
    }

    pub fn config(&self) -> &GpConfig {
        &self.config
    }

    pub fn functions(&self) -> &FunctionSet {
        &self.functions
    }

    /// Fits on `x` with shape `(n_rows, n_features)` and targets `y`.
    pub fn fit(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        weights: Option<ArrayView1<'_, f64>>,
    ) -> Result<(), GpError> {
        let train = Dataset::with_weights(x, y, weights)?;
        self.fit_dataset(train, None)
    }

    /// Like [`Gp::fit`], additionally scoring the best program on `(x_val, y_val)`
    /// after every generation.
    pub fn fit_with_validation(
        &mut self,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        weights: Option<ArrayView1<'_, f64>>,
        x_val: ArrayView2<'_, f64>,
        y_val: ArrayView1<'_, f64>,
    ) -> Result<(), GpError> {
        let train = Dataset::with_weights(x, y, weights)?;
        let validation = Dataset::new(x_val, y_val)?;
        if validation.n_features() != train.n_features() {
            return Err(GpError::Dataset(format!(
                "validation data has {} feature(s), training data has {}",
                validation.n_features(),
                train.n_features()
            )));
        }
        self.fit_dataset(train, Some(validation))
    }

    pub fn fit_dataset(&mut self, train: Dataset, validation: Option<Dataset>) -> Result<(), GpError> {
        if self.metric.classification() {
            let n_classes = train.n_classes();
            if n_classes > 2 {
                return Err(GpError::MultiClass(n_classes));
            }
        }

        let config = &self.config;
        let seed = config.resolved_seed();
        info!(
            "fitting {} on {} row(s) x {} feature(s), seed {seed}",
            self.metric.name(),
            train.n_rows(),
            train.n_features()
        );
        info!("configuration: {config}");
        let mut rng = StdRng::seed_from_u64(seed);

        let factory = OperatorFactory::from_config(config, self.functions.clone(), train.n_features());
        let ctx = Arc::new(RunContext::new(config, train, minimizing(self.metric.clone()), factory));
        let init = RampedHalfAndHalf::from_config(config);
        let settings = EvolutionSettings::from_config(config);
        let eval_metric = self.eval_metric.clone().unwrap_or_else(|| self.metric.clone());

        let outcome = evolve(
            &settings,
            &mut rng,
            |_, rng| ProgramGenome::new(init.new_tree(&ctx.factory, rng), Arc::clone(&ctx)),
            |best: &ProgramGenome, stats| {
                if let Some(val) = &validation {
                    let y_pred = best.program.predict(val.x.view())?.to_vec();
                    stats.validation_score =
                        Some(eval_metric.apply(val.y_slice(), &y_pred, val.weights_slice())?);
                }
                Ok(())
            },
        )?;

        let mut program = outcome.best.genome.program.clone();
        let mut fitness = outcome.best.fitness;
        info!(
            "search finished after {} generation(s): {program} (fitness {fitness:.6e}, size {})",
            outcome.generations_run,
            outcome.best.genome.complexity()
        );

        if config.polish_best {
            let polished = polish(&outcome.best.genome, fitness, config, &mut rng)?;
            if polished.improved {
                program = polished.program;
                fitness = polished.fitness;
                info!("polished program: {program}");
            }
        }

        self.best = Some(program);
        self.best_fitness = Some(fitness);
        self.history = outcome.history;
        Ok(())
    }

    pub fn best_program(&self) -> Option<&Program> {
        self.best.as_ref()
    }

    /// Training fitness of the best program (metric plus parsimony, minimized).
    pub fn best_fitness(&self) -> Option<f64> {
        self.best_fitness
    }

    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>, GpError> {
        self.best.as_ref().ok_or(GpError::NotFitted)?.predict(x)
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }
}
