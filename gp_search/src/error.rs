use gp_expressions::ExprError;
use thiserror::Error;

use crate::metric::MetricError;

#[derive(Debug, Error)]
pub enum GpError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error("multi-class classification is not supported ({0} classes found)")]
    MultiClass(usize),

    #[error("evaluation failed: {0}")]
    Evaluation(#[from] MetricError),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("no program has been fitted yet")]
    NotFitted,
}
