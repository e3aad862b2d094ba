use std::collections::BTreeSet;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::GpError;

#[derive(Clone, Debug)]
pub struct Dataset {
    /// Row-major contiguous data with shape `(n_rows, n_features)`.
    pub x: Array2<f64>,
    /// Target vector with length `n_rows`.
    pub y: Vec<f64>,
    pub weights: Option<Vec<f64>>,
}

impl Dataset {
    pub fn new(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Self, GpError> {
        Self::with_weights(x, y, None)
    }

    pub fn with_weights(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
        weights: Option<ArrayView1<'_, f64>>,
    ) -> Result<Self, GpError> {
        let (n_rows, n_features) = x.dim();
        if n_rows == 0 {
            return Err(GpError::Dataset("no rows".to_string()));
        }
        if n_features == 0 {
            return Err(GpError::Dataset("no feature columns".to_string()));
        }
        if y.len() != n_rows {
            return Err(GpError::Dataset(format!(
                "{} targets for {n_rows} rows",
                y.len()
            )));
        }
        if let Some(w) = &weights {
            if w.len() != n_rows {
                return Err(GpError::Dataset(format!(
                    "{} weights for {n_rows} rows",
                    w.len()
                )));
            }
        }

        Ok(Self {
            x: x.as_standard_layout().to_owned(),
            y: y.to_vec(),
            weights: weights.map(|w| w.to_vec()),
        })
    }

    /// Builds a dataset from feature columns (`columns[j][i]` is feature `j` of row `i`).
    pub fn from_columns(columns: &[Vec<f64>], y: &[f64]) -> Result<Self, GpError> {
        let n_rows = y.len();
        if let Some(bad) = columns.iter().position(|c| c.len() != n_rows) {
            return Err(GpError::Dataset(format!(
                "column x{bad} has {} values for {n_rows} rows",
                columns[bad].len()
            )));
        }
        let x = Array2::from_shape_fn((n_rows, columns.len()), |(i, j)| columns[j][i]);
        Self::new(x.view(), ArrayView1::from(y))
    }

    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn y_slice(&self) -> &[f64] {
        &self.y
    }

    pub fn weights_slice(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Number of distinct target values.
    pub fn n_classes(&self) -> usize {
        self.y.iter().map(|v| v.to_bits()).collect::<BTreeSet<u64>>().len()
    }
}
