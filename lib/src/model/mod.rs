//! Regression models with a strict fit/inference split.
//!
//! An [`Estimator`] holds only hyperparameters and produces a fitted model.
//! The fitted model implements [`InferenceModel`]: it contains only what
//! prediction needs and can be serialized through its parameter struct.

pub mod linear;

pub use linear::{LinearModel, LinearParams, RidgeRegression};

use crate::serialization::SerializableParams;
use ndarray::{Array1, Array2};
use std::path::Path;

/// Errors raised while fitting or running a model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Cannot fit a model on zero samples")]
    EmptyData,
    /// Feature matrix and target vector disagree on the number of samples.
    #[error("Got {x_rows} feature rows but {y_len} targets")]
    SampleMismatch { x_rows: usize, y_len: usize },
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
    /// The normal equations are not positive definite (only possible with alpha = 0).
    #[error("Normal equations are singular; use a positive alpha")]
    SingularMatrix,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An unfitted model: hyperparameters plus a fitting procedure.
pub trait Estimator {
    /// The fitted model produced by [`fit`](Self::fit).
    type Fitted: InferenceModel;

    /// Learn parameters from a design matrix and a target vector.
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Fitted, ModelError>;
}

/// A trained model that only predicts.
pub trait InferenceModel: Sized {
    /// Serializable representation of the learned parameters.
    type ParamsRepr: SerializableParams;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: &[f64]) -> Result<f64, ModelError>;

    /// Predict every row of `input`.
    fn predict_batch(&self, input: &Array2<f64>) -> Result<Array1<f64>, ModelError>;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Result<Self, ModelError>;

    /// Number of features the model expects.
    fn n_features(&self) -> usize;

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        self.extract_params().write_to_file(path)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let params = Self::ParamsRepr::from_bytes(&bytes)
            .map_err(|e| ModelError::Serialization(e.to_string()))?;
        Self::from_params(params)
    }
}
