//! Regression metrics for holdout evaluation.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("got {y_true} true values but {y_pred} predictions")]
pub struct LengthMismatch {
    pub y_true: usize,
    pub y_pred: usize,
}

/// Error summary of a set of predictions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// Coefficient of determination. Can be negative when the model is
    /// worse than predicting the mean.
    pub r2: f64,
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Compute every metric in one pass over the residuals.
    ///
    /// Empty input yields all zeros.
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Result<Self, LengthMismatch> {
        if y_true.len() != y_pred.len() {
            return Err(LengthMismatch {
                y_true: y_true.len(),
                y_pred: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Ok(Self::default());
        }

        let n = y_true.len() as f64;
        let (sum_abs, ss_res) = y_true
            .iter()
            .zip(y_pred)
            .fold((0.0, 0.0), |(abs, sq), (&t, &p)| {
                let r = t - p;
                (abs + r.abs(), sq + r * r)
            });

        let mean_true = y_true.iter().sum::<f64>() / n;
        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        let r2 = if ss_tot == 0.0 {
            // Constant target: perfect only if every residual is zero.
            if ss_res == 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            1.0 - ss_res / ss_tot
        };

        let mse = ss_res / n;
        Ok(Self {
            mae: sum_abs / n,
            mse,
            rmse: mse.sqrt(),
            r2,
            n_samples: y_true.len(),
        })
    }
}
