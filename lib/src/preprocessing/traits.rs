//! Fit/transform contract shared by every preprocessing step.
//!
//! A step exists in two states. The [`Transformer`] carries only its
//! settings (which statistic to impute, how to treat unseen labels). Calling
//! [`fit`](Transformer::fit) on training rows yields the matching
//! [`FittedTransformer`], which owns the learned statistics and nothing else.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;

/// A preprocessing step before it has seen any data.
///
/// `Input` is `Array2<f64>` for numeric steps (NaN marks a missing cell)
/// and [`CategoricalFrame`](crate::preprocessing::CategoricalFrame) for
/// label steps.
///
/// ```ignore
/// use salary_estimator::preprocessing::{ImputeStrategy, SimpleImputer, Transformer};
///
/// let fitted = SimpleImputer::new(ImputeStrategy::Median).fit(&ratings)?;
/// let filled = fitted.transform(&ratings)?;
/// ```
pub trait Transformer: Clone {
    type Input;
    type Output;
    /// Plain-data form of what [`fit`](Self::fit) learns.
    type Params: SerializableParams;
    type Fitted: FittedTransformer<Params = Self::Params, Input = Self::Input, Output = Self::Output>;

    /// Learn statistics from training rows.
    ///
    /// Fails on empty input and on columns with nothing to learn from.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit on `data` and transform the same rows.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.fit(data)?.transform(data)
    }
}

/// A step holding learned statistics, e.g. per-column medians or the
/// category list of each one-hot column.
///
/// `from_params(extract_params())` rebuilds a step that transforms
/// bit-identically.
pub trait FittedTransformer: Clone {
    type Input;
    type Output;
    type Params: SerializableParams;

    /// Apply the learned statistics. The column count must match fit time.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    fn extract_params(&self) -> Self::Params;

    /// Rebuild from stored statistics, rejecting inconsistent ones.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        self.extract_params().write_to_file(path)
    }

    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Columns seen during fit.
    fn n_features_in(&self) -> usize;

    /// Columns produced by `transform`; differs from the input for one-hot steps.
    fn n_features_out(&self) -> usize {
        self.n_features_in()
    }
}
