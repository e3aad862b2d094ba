//! Convenience re-exports for quickstarts.

pub use crate::config::GpConfig;
pub use crate::gp::Gp;
pub use crate::metric::{Accuracy, LogLoss, Mae, Metric, MetricObject, Mse};
pub use crate::program::Program;
pub use crate::transform::Transform;

// Expression types so callers don't need to depend on `gp_expressions` directly.
pub use gp_expressions::expression_algebra::*;
pub use gp_expressions::{Function, FunctionSet, Operator, Tree};
