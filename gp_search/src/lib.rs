pub mod config;
pub(crate) mod dataset;
pub(crate) mod error;
pub mod evolution;
pub mod genetic_operators;
pub mod genome;
pub(crate) mod gp;
pub(crate) mod hall_of_fame;
pub mod init;
pub mod metric;
pub mod picker;
pub mod polish;
pub(crate) mod population;
pub mod prelude;
pub mod program;
pub(crate) mod progress_bars;
pub(crate) mod selection;
pub mod transform;

pub use config::GpConfig;
pub use dataset::Dataset;
pub use error::GpError;
pub use evolution::{evolve, EvolutionOutcome, EvolutionSettings, GenerationStats};
pub use genetic_operators::{HoistMutation, PointMutation, SubtreeCrossover, SubtreeMutation};
pub use genome::Genome;
pub use gp::Gp;
pub use hall_of_fame::HallOfFame;
pub use init::{Full, Grow, Initializer, OperatorFactory, RampedHalfAndHalf};
pub use metric::{metric_from_name, minimizing, Accuracy, LogLoss, Mae, Metric, MetricError, MetricObject, Mse, Negative};
pub use picker::{Picker, Weighting};
pub use polish::{polish, ConstantGenome, PolishOutcome};
pub use population::{Individual, Population};
pub use program::{Program, ProgramGenome, RunContext};
pub use selection::tournament;
pub use transform::Transform;

#[cfg(test)]
mod tests;
