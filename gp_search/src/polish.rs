//! Post-search tuning of the numeric constants of a program.
//!
//! The tree structure is frozen; only the values behind its [`ConstantView`]
//! evolve, using the same generational driver as the structural search.

use std::sync::Arc;

use gp_expressions::ConstantView;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::GpConfig;
use crate::error::GpError;
use crate::evolution::{evolve, EvolutionSettings};
use crate::genome::Genome;
use crate::program::{Program, ProgramGenome};

pub const POLISH_P_CROSSOVER: f64 = 0.5;
pub const POLISH_P_MUTATE: f64 = 0.5;
const UNIFORM_SWAP_PROBABILITY: f64 = 0.5;

#[derive(Debug)]
struct PolishContext {
    template: ProgramGenome,
    view: ConstantView,
    mutation_rate: f64,
}

/// A vector of constant values for a fixed tree.
#[derive(Clone, Debug)]
pub struct ConstantGenome {
    values: Vec<f64>,
    ctx: Arc<PolishContext>,
}

impl ConstantGenome {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn program(&self) -> Program {
        let mut program = self.ctx.template.program.clone();
        self.ctx.view.write_back(&mut program.tree, &self.values);
        program
    }
}

impl Genome for ConstantGenome {
    fn evaluate(&mut self) -> Result<f64, GpError> {
        self.ctx.template.ctx.fitness(&self.program())
    }

    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for v in &mut self.values {
            if rng.random_bool(self.ctx.mutation_rate) {
                let jitter: f64 = rng.sample(StandardNormal);
                *v += jitter;
            }
        }
    }

    fn crossover<R: Rng + ?Sized>(&mut self, other: &mut Self, rng: &mut R) {
        for (a, b) in self.values.iter_mut().zip(other.values.iter_mut()) {
            if rng.random_bool(UNIFORM_SWAP_PROBABILITY) {
                std::mem::swap(a, b);
            }
        }
    }

    fn complexity(&self) -> usize {
        self.values.len()
    }
}

#[derive(Clone, Debug)]
pub struct PolishOutcome {
    pub program: Program,
    pub fitness: f64,
    pub improved: bool,
}

impl PolishOutcome {
    fn unchanged(genome: &ProgramGenome, fitness: f64) -> Self {
        Self {
            program: genome.program.clone(),
            fitness,
            improved: false,
        }
    }
}

/// Tunes the constants of `genome`, whose current fitness is `fitness`.
///
/// The result keeps the original program unless polishing found strictly
/// lower fitness. Programs without constants are returned as is.
pub fn polish(
    genome: &ProgramGenome,
    fitness: f64,
    config: &GpConfig,
    rng: &mut StdRng,
) -> Result<PolishOutcome, GpError> {
    let view = ConstantView::new(&genome.program.tree);
    if view.is_empty() || config.polish_generations == 0 {
        debug!("skipping polish: nothing to tune");
        return Ok(PolishOutcome::unchanged(genome, fitness));
    }

    let original = view.values(&genome.program.tree);
    let ctx = Arc::new(PolishContext {
        template: genome.clone(),
        view,
        mutation_rate: config.polish_mutation_rate,
    });
    let settings = EvolutionSettings {
        n_populations: 1,
        n_individuals: config.polish_individuals,
        n_generations: config.polish_generations,
        tournament_size: config.tournament_size,
        p_crossover: POLISH_P_CROSSOVER,
        p_mutate: POLISH_P_MUTATE,
        patience: 0,
        parallel_eval: config.parallel_eval,
        verbose: false,
    };
    let jitter_scale = config.polish_jitter;

    debug!(
        "polishing {} constant(s) with {} individuals for {} generations",
        original.len(),
        settings.n_individuals,
        settings.n_generations
    );
    let outcome = evolve(
        &settings,
        rng,
        |i, rng| {
            let values = if i == 0 {
                original.clone()
            } else {
                original
                    .iter()
                    .map(|&c| {
                        let jitter: f64 = rng.sample(StandardNormal);
                        c + jitter * jitter_scale
                    })
                    .collect()
            };
            ConstantGenome {
                values,
                ctx: Arc::clone(&ctx),
            }
        },
        |_, _| Ok(()),
    )?;

    let best = outcome.best;
    if best.fitness < fitness {
        info!("polishing improved fitness from {fitness:.6e} to {:.6e}", best.fitness);
        Ok(PolishOutcome {
            program: best.genome.program(),
            fitness: best.fitness,
            improved: true,
        })
    } else {
        info!("polishing kept the original constants (fitness {fitness:.6e})");
        Ok(PolishOutcome::unchanged(genome, fitness))
    }
}
