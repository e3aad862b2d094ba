//! Scoring of predictions against targets.
//!
//! Search code only talks to [`Metric`]; the concrete metrics below are the
//! reference catalog. Every metric returns a score where the direction is
//! reported by [`Metric::bigger_is_better`]. The search minimizes, so
//! bigger-is-better metrics are wrapped in [`Negative`] before use.

use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error("y_true has {y_true} values but y_pred has {y_pred}")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("expected {expected} weights, got {found}")]
    WeightLengthMismatch { expected: usize, found: usize },

    #[error("cannot score an empty prediction")]
    Empty,

    #[error("sum of weights is zero")]
    ZeroWeight,
}

pub trait Metric: Send + Sync + Debug {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError>;

    /// Whether the metric expects binary labels.
    fn classification(&self) -> bool;

    fn bigger_is_better(&self) -> bool;

    /// Whether predictions must be probabilities rather than labels.
    fn needs_probabilities(&self) -> bool;

    fn name(&self) -> &str;
}

pub type MetricObject = Arc<dyn Metric>;

/// Weighted mean of `f(y_true[i], y_pred[i])`.
fn weighted_mean(
    y_true: &[f64],
    y_pred: &[f64],
    weights: Option<&[f64]>,
    f: impl Fn(f64, f64) -> f64,
) -> Result<f64, MetricError> {
    if y_true.len() != y_pred.len() {
        return Err(MetricError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MetricError::Empty);
    }
    match weights {
        None => {
            let sum: f64 = y_true.iter().zip(y_pred).map(|(&t, &p)| f(t, p)).sum();
            Ok(sum / y_true.len() as f64)
        }
        Some(w) => {
            if w.len() != y_true.len() {
                return Err(MetricError::WeightLengthMismatch {
                    expected: y_true.len(),
                    found: w.len(),
                });
            }
            let sum_w: f64 = w.iter().sum();
            if sum_w == 0.0 {
                return Err(MetricError::ZeroWeight);
            }
            let sum: f64 = y_true
                .iter()
                .zip(y_pred)
                .zip(w)
                .map(|((&t, &p), &wi)| wi * f(t, p))
                .sum();
            Ok(sum / sum_w)
        }
    }
}

/// Mean squared error.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mse;

impl Metric for Mse {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError> {
        weighted_mean(y_true, y_pred, weights, |t, p| (p - t) * (p - t))
    }

    fn classification(&self) -> bool {
        false
    }

    fn bigger_is_better(&self) -> bool {
        false
    }

    fn needs_probabilities(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "mse"
    }
}

/// Mean absolute error.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mae;

impl Metric for Mae {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError> {
        weighted_mean(y_true, y_pred, weights, |t, p| (p - t).abs())
    }

    fn classification(&self) -> bool {
        false
    }

    fn bigger_is_better(&self) -> bool {
        false
    }

    fn needs_probabilities(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "mae"
    }
}

/// Fraction of labels predicted exactly.
#[derive(Copy, Clone, Debug, Default)]
pub struct Accuracy;

impl Metric for Accuracy {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError> {
        weighted_mean(y_true, y_pred, weights, |t, p| if t == p { 1.0 } else { 0.0 })
    }

    fn classification(&self) -> bool {
        true
    }

    fn bigger_is_better(&self) -> bool {
        true
    }

    fn needs_probabilities(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "accuracy"
    }
}

/// Binary cross-entropy on probabilities of the positive class.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogLoss;

impl LogLoss {
    pub const CLIP: f64 = 1e-15;
}

impl Metric for LogLoss {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError> {
        weighted_mean(y_true, y_pred, weights, |t, p| {
            let p = p.clamp(Self::CLIP, 1.0 - Self::CLIP);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
    }

    fn classification(&self) -> bool {
        true
    }

    fn bigger_is_better(&self) -> bool {
        false
    }

    fn needs_probabilities(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "logloss"
    }
}

/// Flips the sign of the wrapped metric so that it can be minimized.
#[derive(Clone, Debug)]
pub struct Negative {
    inner: MetricObject,
    name: String,
}

impl Negative {
    pub fn new(inner: MetricObject) -> Self {
        let name = format!("neg_{}", inner.name());
        Self { inner, name }
    }

    pub fn inner(&self) -> &MetricObject {
        &self.inner
    }
}

impl Metric for Negative {
    fn apply(&self, y_true: &[f64], y_pred: &[f64], weights: Option<&[f64]>) -> Result<f64, MetricError> {
        self.inner.apply(y_true, y_pred, weights).map(|v| -v)
    }

    fn classification(&self) -> bool {
        self.inner.classification()
    }

    fn bigger_is_better(&self) -> bool {
        !self.inner.bigger_is_better()
    }

    fn needs_probabilities(&self) -> bool {
        self.inner.needs_probabilities()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wraps `metric` in [`Negative`] when bigger scores are better.
pub fn minimizing(metric: MetricObject) -> MetricObject {
    if metric.bigger_is_better() {
        Arc::new(Negative::new(metric))
    } else {
        metric
    }
}

/// Looks up a reference metric by name.
pub fn metric_from_name(name: &str) -> Option<MetricObject> {
    match name.trim().to_ascii_lowercase().as_str() {
        "mse" => Some(Arc::new(Mse)),
        "mae" => Some(Arc::new(Mae)),
        "accuracy" => Some(Arc::new(Accuracy)),
        "logloss" | "log_loss" => Some(Arc::new(LogLoss)),
        _ => None,
    }
}
