use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExprError {
    #[error("unknown function name '{0}'")]
    UnknownFunction(String),

    #[error("function list is empty")]
    EmptyFunctionSet,

    #[error("'{name}' expects {expected} operand(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("operator sequence is not a valid postfix tree")]
    InvalidPostfix,

    #[error("parse error at byte {pos}: {message}")]
    Parse { pos: usize, message: String },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("feature x{feature} is out of range for {n_features} feature column(s)")]
    FeatureOutOfRange { feature: usize, n_features: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
