use std::cmp::Ordering;

use rayon::prelude::*;

use crate::error::GpError;
use crate::genome::Genome;

#[derive(Clone, Debug)]
pub struct Individual<G> {
    pub genome: G,
    /// Cached fitness; only meaningful once `needs_eval` is false.
    pub fitness: f64,
    pub needs_eval: bool,
}

impl<G: Genome> Individual<G> {
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: f64::INFINITY,
            needs_eval: true,
        }
    }

    pub fn evaluate(&mut self) -> Result<(), GpError> {
        self.fitness = self.genome.evaluate()?;
        self.needs_eval = false;
        Ok(())
    }
}

pub(crate) fn fitness_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}

pub struct Population<G> {
    pub members: Vec<Individual<G>>,
}

impl<G: Genome> Population<G> {
    pub fn new(members: Vec<Individual<G>>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Scores every member whose genome changed since its last evaluation.
    /// The first error aborts and is returned.
    pub fn evaluate(&mut self, parallel: bool) -> Result<(), GpError> {
        if parallel {
            self.members
                .par_iter_mut()
                .filter(|m| m.needs_eval)
                .try_for_each(Individual::evaluate)
        } else {
            self.members
                .iter_mut()
                .filter(|m| m.needs_eval)
                .try_for_each(Individual::evaluate)
        }
    }

    pub fn best_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| fitness_cmp(a.fitness, b.fitness))
            .map(|(i, _)| i)
    }

    /// Mean over finite fitness values; `NaN` when there are none.
    pub fn mean_fitness(&self) -> f64 {
        let finite: Vec<f64> = self
            .members
            .iter()
            .map(|m| m.fitness)
            .filter(|f| f.is_finite())
            .collect();
        if finite.is_empty() {
            return f64::NAN;
        }
        finite.iter().sum::<f64>() / finite.len() as f64
    }

    pub fn mean_complexity(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let total: usize = self.members.iter().map(|m| m.genome.complexity()).sum();
        total as f64 / self.members.len() as f64
    }
}
