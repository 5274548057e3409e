//! Held-out evaluation metrics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Regression error over a set of predictions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Number of scored rows
    pub count: usize,
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination, undefined for fewer than two rows or a
    /// constant target
    pub r2: Option<f64>,
}

impl RegressionMetrics {
    /// Score predictions against targets. Returns `None` for empty input.
    pub fn compute(predictions: &[f64], targets: &[f64]) -> Option<Self> {
        let count = predictions.len().min(targets.len());
        if count == 0 {
            return None;
        }
        let n = count as f64;

        let mut sse = 0.0;
        let mut sae = 0.0;
        for (p, t) in predictions.iter().zip(targets) {
            let err = p - t;
            sse += err * err;
            sae += err.abs();
        }

        let mean = targets[..count].iter().sum::<f64>() / n;
        let sst: f64 = targets[..count].iter().map(|t| (t - mean).powi(2)).sum();
        let r2 = if count >= 2 && sst > 0.0 {
            Some(1.0 - sse / sst)
        } else {
            None
        };

        let mse = sse / n;
        Some(RegressionMetrics {
            count,
            mse,
            rmse: mse.sqrt(),
            mae: sae / n,
            r2,
        })
    }
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} | RMSE: {:.2} | MAE: {:.2} | MSE: {:.2}",
            self.count, self.rmse, self.mae, self.mse
        )?;
        match self.r2 {
            Some(r2) => write!(f, " | R²: {:.4}", r2),
            None => write!(f, " | R²: n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let m = RegressionMetrics::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(m.count, 3);
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.r2, Some(1.0));
    }

    #[test]
    fn test_known_errors() {
        // errors: +1, -3
        let m = RegressionMetrics::compute(&[3.0, 5.0], &[2.0, 8.0]).unwrap();
        assert!((m.mse - 5.0).abs() < 1e-12);
        assert!((m.rmse - 5.0f64.sqrt()).abs() < 1e-12);
        assert!((m.mae - 2.0).abs() < 1e-12);
        // sst = 18, sse = 10
        assert!((m.r2.unwrap() - (1.0 - 10.0 / 18.0)).abs() < 1e-12);
    }

    #[test]
    fn test_r2_undefined_cases() {
        let single = RegressionMetrics::compute(&[10.0], &[12.0]).unwrap();
        assert_eq!(single.r2, None);
        assert!((single.mae - 2.0).abs() < 1e-12);

        let constant = RegressionMetrics::compute(&[1.0, 2.0], &[5.0, 5.0]).unwrap();
        assert_eq!(constant.r2, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(RegressionMetrics::compute(&[], &[]).is_none());
    }

    #[test]
    fn test_display() {
        let m = RegressionMetrics::compute(&[10.0], &[12.0]).unwrap();
        assert_eq!(m.to_string(), "n=1 | RMSE: 2.00 | MAE: 2.00 | MSE: 4.00 | R²: n/a");
    }
}
