use rand::seq::index::sample;
use rand::Rng;

use crate::genome::Genome;
use crate::population::{fitness_cmp, Population};

/// Index of the fittest of `k` members drawn uniformly without replacement.
pub fn tournament<G: Genome, R: Rng + ?Sized>(pop: &Population<G>, k: usize, rng: &mut R) -> usize {
    let n = k.clamp(1, pop.len().max(1));
    sample_indices(rng, pop.len(), n)
        .into_iter()
        .min_by(|&a, &b| fitness_cmp(pop.members[a].fitness, pop.members[b].fitness))
        .unwrap_or(0)
}

fn sample_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, n: usize) -> Vec<usize> {
    let take = n.min(len);
    if take == 0 {
        return Vec::new();
    }
    sample(rng, len, take).into_vec()
}
