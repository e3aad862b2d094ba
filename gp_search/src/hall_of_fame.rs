use crate::genome::Genome;
use crate::population::{fitness_cmp, Individual};

/// The best individual seen so far. Its fitness never increases.
pub struct HallOfFame<G> {
    best: Option<Individual<G>>,
}

impl<G: Genome> Default for HallOfFame<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genome> HallOfFame<G> {
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Keeps `member` if it is strictly better than the current best.
    pub fn consider(&mut self, member: &Individual<G>) -> bool {
        if member.needs_eval || member.fitness.is_nan() {
            return false;
        }
        match &self.best {
            Some(best) if fitness_cmp(member.fitness, best.fitness).is_ge() => false,
            _ => {
                self.best = Some(member.clone());
                true
            }
        }
    }

    pub fn update_from_members(&mut self, members: &[Individual<G>]) -> bool {
        let mut improved = false;
        for m in members {
            improved |= self.consider(m);
        }
        improved
    }

    pub fn best(&self) -> Option<&Individual<G>> {
        self.best.as_ref()
    }

    /// `+inf` while empty.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.fitness)
    }

    pub fn into_best(self) -> Option<Individual<G>> {
        self.best
    }
}
