//! Generational loop shared by program search and constant polishing.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GpConfig;
use crate::error::GpError;
use crate::genome::Genome;
use crate::hall_of_fame::HallOfFame;
use crate::population::{Individual, Population};
use crate::progress_bars::SearchProgress;
use crate::selection::tournament;

#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionSettings {
    pub n_populations: usize,
    pub n_individuals: usize,
    pub n_generations: usize,
    pub tournament_size: usize,
    /// Probability that an offspring slot is filled by crossover.
    pub p_crossover: f64,
    /// Probability that an offspring slot is filled by mutation. The
    /// remainder, if any, copies a selected parent unchanged.
    pub p_mutate: f64,
    /// Generations without improvement before a sub-population stops; 0 disables.
    pub patience: usize,
    pub parallel_eval: bool,
    pub verbose: bool,
}

impl EvolutionSettings {
    pub fn from_config(config: &GpConfig) -> Self {
        Self {
            n_populations: config.n_populations,
            n_individuals: config.n_individuals,
            n_generations: config.n_generations,
            tournament_size: config.tournament_size,
            p_crossover: config.p_subtree_crossover,
            p_mutate: config.p_hoist_mutation + config.p_point_mutation + config.p_subtree_mutation,
            patience: config.patience,
            parallel_eval: config.parallel_eval,
            verbose: config.verbose,
        }
    }
}

/// Summary of one generation of one sub-population.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationStats {
    pub population: usize,
    pub generation: usize,
    /// Best fitness seen so far across the whole run.
    pub best_fitness: f64,
    /// Mean over the finite fitness values of the generation.
    pub mean_fitness: f64,
    pub mean_size: f64,
    pub duration: Duration,
    /// Score of the current best individual on held-out data, when provided.
    pub validation_score: Option<f64>,
}

pub struct EvolutionOutcome<G> {
    pub best: Individual<G>,
    pub history: Vec<GenerationStats>,
    pub generations_run: usize,
}

/// Runs `settings.n_populations` independent sub-populations one after the
/// other and returns the best individual found by any of them.
///
/// `new_genome` builds the initial members; `on_generation` sees the best
/// genome so far after every generation and may fill in the validation score.
pub fn evolve<G, F, C>(
    settings: &EvolutionSettings,
    rng: &mut StdRng,
    mut new_genome: F,
    mut on_generation: C,
) -> Result<EvolutionOutcome<G>, GpError>
where
    G: Genome,
    F: FnMut(usize, &mut StdRng) -> G,
    C: FnMut(&G, &mut GenerationStats) -> Result<(), GpError>,
{
    if settings.n_individuals == 0 || settings.n_populations == 0 {
        return Err(GpError::Configuration(
            "at least one population with one individual is required".to_string(),
        ));
    }

    let mut hall = HallOfFame::new();
    let mut history = Vec::with_capacity(settings.n_populations * settings.n_generations);
    let mut generations_run = 0;
    let mut progress = SearchProgress::new(
        settings.verbose,
        &format!("Evolving {} population(s)...", settings.n_populations),
        settings.n_populations * settings.n_generations,
    );

    for p in 0..settings.n_populations {
        let mut sub_rng = StdRng::seed_from_u64(rng.random());
        let members = (0..settings.n_individuals)
            .map(|i| Individual::new(new_genome(i, &mut sub_rng)))
            .collect();
        let mut pop = Population::new(members);
        debug!("population {p}: initialized {} individuals", pop.len());

        let mut local_best = f64::INFINITY;
        let mut stale = 0;
        for generation in 0..settings.n_generations {
            let start = Instant::now();
            pop.evaluate(settings.parallel_eval)?;
            hall.update_from_members(&pop.members);

            let mut stats = GenerationStats {
                population: p,
                generation,
                best_fitness: hall.best_fitness(),
                mean_fitness: pop.mean_fitness(),
                mean_size: pop.mean_complexity(),
                duration: Duration::ZERO,
                validation_score: None,
            };
            if let Some(best) = hall.best() {
                on_generation(&best.genome, &mut stats)?;
            }

            let pop_best = pop
                .best_index()
                .map_or(f64::INFINITY, |i| pop.members[i].fitness);
            if pop_best < local_best {
                local_best = pop_best;
                stale = 0;
            } else {
                stale += 1;
            }

            let last = generation + 1 == settings.n_generations;
            let stop_early = settings.patience > 0 && stale >= settings.patience;
            if !last && !stop_early {
                pop = breed(&pop, settings, &mut sub_rng);
            }

            stats.duration = start.elapsed();
            match stats.validation_score {
                Some(score) => info!(
                    "population {p} generation {generation}: best fitness {:.6e}, validation {score:.6e}, mean size {:.1}, {:?}",
                    stats.best_fitness, stats.mean_size, stats.duration
                ),
                None => info!(
                    "population {p} generation {generation}: best fitness {:.6e}, mean size {:.1}, {:?}",
                    stats.best_fitness, stats.mean_size, stats.duration
                ),
            }
            debug!(
                "population {p} generation {generation}: mean fitness {:.6e}, population best {pop_best:.6e}",
                stats.mean_fitness
            );
            progress.on_generation(&stats);
            history.push(stats);
            generations_run += 1;

            if stop_early {
                info!("population {p}: no improvement for {stale} generation(s), stopping early");
                break;
            }
        }
    }
    progress.finish();

    let best = hall
        .into_best()
        .ok_or_else(|| GpError::Configuration("no generation was evaluated".to_string()))?;
    Ok(EvolutionOutcome {
        best,
        history,
        generations_run,
    })
}

/// Builds the next generation of the same size from tournament-selected parents.
fn breed<G: Genome>(pop: &Population<G>, settings: &EvolutionSettings, rng: &mut StdRng) -> Population<G> {
    let n = pop.len();
    let p_clone = (1.0 - settings.p_crossover - settings.p_mutate).max(0.0);
    let choice = WeightedIndex::new([settings.p_crossover, settings.p_mutate, p_clone]).ok();

    let mut next = Vec::with_capacity(n);
    while next.len() < n {
        let op = choice.as_ref().map_or(2, |c| c.sample(rng));
        let mut child = pop.members[tournament(pop, settings.tournament_size, rng)].clone();
        match op {
            0 => {
                let mut other = pop.members[tournament(pop, settings.tournament_size, rng)].clone();
                child.genome.crossover(&mut other.genome, rng);
                child.needs_eval = true;
                other.needs_eval = true;
                next.push(child);
                if next.len() < n {
                    next.push(other);
                }
            }
            1 => {
                child.genome.mutate(rng);
                child.needs_eval = true;
                next.push(child);
            }
            _ => next.push(child),
        }
    }
    Population::new(next)
}
