use rand::Rng;

use crate::error::GpError;

/// Anything the generational driver can evolve. Lower fitness is better.
pub trait Genome: Clone + Send + Sync {
    /// Scores the genome. May normalize the genome in place.
    fn evaluate(&mut self) -> Result<f64, GpError>;

    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Recombines `self` and `other` in place; both become offspring.
    fn crossover<R: Rng + ?Sized>(&mut self, other: &mut Self, rng: &mut R);

    /// Size measure reported in generation statistics.
    fn complexity(&self) -> usize;
}
