//! Linear regression with an L2 penalty.
//!
//! - [`RidgeRegression`]: hyperparameters only, used during training.
//! - [`LinearModel`]: inference-only, serializable predictor `y = w·x + b`.
//!
//! The fitted model is free from training hyperparameters.
//!
//! Fitting solves the ridge normal equations in closed form:
//!
//! ```text
//! (XcᵀXc + αI) w = Xcᵀyc,    b = ȳ − x̄·w
//! ```
//!
//! where `Xc` and `yc` are centered when an intercept is fitted, so the
//! intercept itself is never penalized.

use crate::model::{Estimator, InferenceModel, ModelError};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trainable hyperparameters of a ridge regressor.
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeRegression {
    alpha: f64,
    fit_intercept: bool,
}

impl Default for RidgeRegression {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_intercept: true,
        }
    }
}

impl RidgeRegression {
    /// Ridge regressor with the given L2 strength and a fitted intercept.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }
}

impl Estimator for RidgeRegression {
    type Fitted = LinearModel;

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<LinearModel, ModelError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        let (rows, cols) = x.dim();
        if rows == 0 {
            return Err(ModelError::EmptyData);
        }
        if rows != y.len() {
            return Err(ModelError::SampleMismatch {
                x_rows: rows,
                y_len: y.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("feature matrix"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite("targets"));
        }

        let (x_mean, y_mean) = if self.fit_intercept {
            let x_mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyData)?;
            let y_mean = y.mean().ok_or(ModelError::EmptyData)?;
            (x_mean, y_mean)
        } else {
            (Array1::zeros(cols), 0.0)
        };

        let xc = x - &x_mean;
        let yc = y - y_mean;

        let mut gram = xc.t().dot(&xc);
        for i in 0..cols {
            gram[[i, i]] += self.alpha;
        }
        let rhs = xc.t().dot(&yc);

        let weights = solve_cholesky(gram, rhs)?;
        let bias = y_mean - x_mean.dot(&weights);

        debug!(samples = rows, features = cols, alpha = self.alpha, "fitted ridge regression");

        Ok(LinearModel::new(LinearParams {
            weights: weights.to_vec(),
            bias,
        }))
    }
}

/// Solve `a · x = b` for symmetric positive-definite `a`.
fn solve_cholesky(mut a: Array2<f64>, b: Array1<f64>) -> Result<Array1<f64>, ModelError> {
    let n = b.len();

    // In-place lower factor: a = L Lᵀ
    for j in 0..n {
        let mut d = a[[j, j]];
        for k in 0..j {
            d -= a[[j, k]] * a[[j, k]];
        }
        if d.is_nan() || d <= 1e-12 * a[[j, j]].abs().max(1.0) {
            return Err(ModelError::SingularMatrix);
        }
        let l_jj = d.sqrt();
        a[[j, j]] = l_jj;
        for i in (j + 1)..n {
            let mut s = a[[i, j]];
            for k in 0..j {
                s -= a[[i, k]] * a[[j, k]];
            }
            a[[i, j]] = s / l_jj;
        }
    }

    // L z = b
    let mut z = b;
    for i in 0..n {
        for k in 0..i {
            z[i] -= a[[i, k]] * z[k];
        }
        z[i] /= a[[i, i]];
    }

    // Lᵀ x = z
    for i in (0..n).rev() {
        for k in (i + 1)..n {
            z[i] -= a[[k, i]] * z[k];
        }
        z[i] /= a[[i, i]];
    }

    Ok(z)
}

/// Serializable parameters of a fitted linear model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// A fitted linear model: `y = w·x + b`.
#[derive(Clone, Debug)]
pub struct LinearModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LinearModel {
    /// Creates a fitted model from trained parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            weights: Array1::from(params.weights),
            bias: params.bias,
        }
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl InferenceModel for LinearModel {
    type ParamsRepr = LinearParams;

    fn predict(&self, input: &[f64]) -> Result<f64, ModelError> {
        if input.len() != self.weights.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.weights.len(),
                got: input.len(),
            });
        }
        Ok(self.weights.dot(&ArrayView1::from(input)) + self.bias)
    }

    fn predict_batch(&self, input: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if input.ncols() != self.weights.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.weights.len(),
                got: input.ncols(),
            });
        }
        Ok(input.dot(&self.weights) + self.bias)
    }

    fn extract_params(&self) -> LinearParams {
        LinearParams {
            weights: self.weights.to_vec(),
            bias: self.bias,
        }
    }

    fn from_params(params: LinearParams) -> Result<Self, ModelError> {
        if !params.bias.is_finite() || params.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NonFinite("model parameters"));
        }
        Ok(Self::new(params))
    }

    fn n_features(&self) -> usize {
        self.weights.len()
    }
}
