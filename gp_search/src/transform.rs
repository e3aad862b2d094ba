use core::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Mapping from raw program output to the prediction handed to the metric.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    #[default]
    Identity,
    /// `0` for negative outputs, `1` otherwise.
    Binary,
    Sigmoid,
}

impl Transform {
    pub fn for_metric(metric: &dyn Metric) -> Self {
        match (metric.classification(), metric.needs_probabilities()) {
            (true, true) => Transform::Sigmoid,
            (true, false) => Transform::Binary,
            (false, _) => Transform::Identity,
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Binary => {
                if x < 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Transform::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    pub fn apply_in_place(self, values: &mut Array1<f64>) {
        if self != Transform::Identity {
            values.mapv_inplace(|v| self.apply(v));
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Binary => "binary",
            Transform::Sigmoid => "sigmoid",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
