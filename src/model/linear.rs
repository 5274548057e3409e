//! Ordinary least squares regression over the three house features

use linfa::traits::Fit;
use linfa::Dataset;
use linfa_linear::LinearRegression as OlsSolver;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::{HouseError, Result};

/// Number of input features
pub const N_FEATURES: usize = 3;

/// Fitted linear model: `y = intercept + coefficients · x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: [f64; N_FEATURES],
}

impl LinearRegression {
    /// Minimum rows for a determined fit with intercept
    pub const MIN_SAMPLES: usize = N_FEATURES + 1;

    pub fn new(intercept: f64, coefficients: [f64; N_FEATURES]) -> Self {
        LinearRegression {
            intercept,
            coefficients,
        }
    }

    /// Fit by least squares with an intercept term
    pub fn fit(x: &[[f64; N_FEATURES]], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(HouseError::InvalidInput {
                field: "targets".to_string(),
                message: format!("{} feature rows but {} targets", x.len(), y.len()),
            });
        }
        let n = x.len();
        if n < Self::MIN_SAMPLES {
            return Err(HouseError::InsufficientData {
                rows: n,
                required: Self::MIN_SAMPLES,
            });
        }

        let records = Array2::from(x.to_vec());
        check_rank(&records)?;

        let dataset = Dataset::new(records, Array1::from(y.to_vec()));
        let fitted = OlsSolver::new()
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| {
                log::debug!("Least squares solve failed: {}", e);
                HouseError::SingularDesign
            })?;

        let params = fitted.params();
        let model = LinearRegression {
            intercept: fitted.intercept(),
            coefficients: [params[0], params[1], params[2]],
        };
        if !model.is_finite() {
            return Err(HouseError::SingularDesign);
        }
        Ok(model)
    }

    /// Predict a single row
    pub fn predict(&self, x: &[f64; N_FEATURES]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }

    /// Predict many rows
    pub fn predict_batch(&self, x: &[[f64; N_FEATURES]]) -> Vec<f64> {
        x.iter().map(|row| self.predict(row)).collect()
    }

    /// True when every parameter is a finite number
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }
}

/// Reject constant or linearly dependent feature columns.
///
/// Uses the determinant of the centered Gram matrix relative to the product
/// of its diagonal, which is 1 for orthogonal columns and 0 for dependent ones.
fn check_rank(records: &Array2<f64>) -> Result<()> {
    let mean = records
        .mean_axis(Axis(0))
        .ok_or(HouseError::InsufficientData {
            rows: 0,
            required: LinearRegression::MIN_SAMPLES,
        })?;
    let centered = records - &mean;
    let g = centered.t().dot(&centered);

    let diag_product = g[[0, 0]] * g[[1, 1]] * g[[2, 2]];
    let det = g[[0, 0]] * (g[[1, 1]] * g[[2, 2]] - g[[1, 2]] * g[[2, 1]])
        - g[[0, 1]] * (g[[1, 0]] * g[[2, 2]] - g[[1, 2]] * g[[2, 0]])
        + g[[0, 2]] * (g[[1, 0]] * g[[2, 1]] - g[[1, 1]] * g[[2, 0]]);

    if !(diag_product > 0.0 && det / diag_product > 1e-10) {
        return Err(HouseError::SingularDesign);
    }
    Ok(())
}
