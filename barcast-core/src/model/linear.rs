//! Ordinary least squares with intercept.
//!
//! Columns are centered before the solve so the intercept drops out, then the
//! centered system is solved through the SVD pseudo-inverse. Rank-deficient
//! designs (a constant or all-zero feature column) get the minimum-norm
//! solution instead of an error.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinearRegressionError {
    #[error("no samples to fit")]
    Empty,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model has not been fitted")]
    NotFitted,

    #[error("inputs contain non-finite values")]
    NonFinite,

    #[error("least-squares solve failed: {0}")]
    Solve(String),
}

#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    pub coefficients: Option<DVector<f64>>,
    pub intercept: Option<f64>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit `y ≈ x·β + intercept`. `x` is `samples × features`.
    pub fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), LinearRegressionError> {
        let (n, p) = x.shape();
        if n == 0 {
            return Err(LinearRegressionError::Empty);
        }
        if y.len() != n {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: n,
                got: y.len(),
            });
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(LinearRegressionError::NonFinite);
        }

        let x_mean = DVector::from_iterator(p, x.column_iter().map(|c| c.mean()));
        let y_mean = y.mean();

        let mut centered = x.clone();
        for (j, mut col) in centered.column_iter_mut().enumerate() {
            col.add_scalar_mut(-x_mean[j]);
        }
        let y_centered = y.add_scalar(-y_mean);

        let beta = if p == 0 {
            DVector::zeros(0)
        } else {
            let svd = centered.svd(true, true);
            let sigma_max = svd.singular_values.max();
            if sigma_max == 0.0 {
                DVector::zeros(p)
            } else {
                let eps = f64::EPSILON * n.max(p) as f64 * sigma_max;
                svd.solve(&y_centered, eps)
                    .map_err(|e| LinearRegressionError::Solve(e.to_string()))?
            }
        };

        let intercept = y_mean - x_mean.dot(&beta);
        if !intercept.is_finite() || beta.iter().any(|b| !b.is_finite()) {
            return Err(LinearRegressionError::Solve("solution is not finite".into()));
        }

        self.coefficients = Some(beta);
        self.intercept = Some(intercept);
        Ok(())
    }

    pub fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, LinearRegressionError> {
        let (Some(beta), Some(intercept)) = (&self.coefficients, self.intercept) else {
            return Err(LinearRegressionError::NotFitted);
        };
        if x.ncols() != beta.len() {
            return Err(LinearRegressionError::DimensionMismatch {
                expected: beta.len(),
                got: x.ncols(),
            });
        }
        Ok((x * beta).add_scalar(intercept))
    }
}
