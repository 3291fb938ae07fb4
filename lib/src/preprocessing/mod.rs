//! Data preprocessing transformers for the salary model.
//!
//! Every transformer follows the same type-state pattern as the model:
//! an unfitted value holding hyperparameters, and a fitted value holding
//! learned statistics that can be serialized and restored exactly.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference
//!
//! # Available Transformers
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill NaN with mean, median, most_frequent, or constant
//! - [`CategoricalImputer`]: Fill missing labels with the mode or a constant
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Encoding
//! - [`OneHotEncoder`]: String categories to indicator columns
//!
//! ## Composition
//! - [`NumericPipeline`], [`CategoricalPipeline`]: Chain steps per column kind
//! - [`ColumnTransformer`]: Route named columns of a [`FeatureFrame`] to pipelines
//!
//! # Example
//!
//! ```ignore
//! use salary_estimator::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let fitted = StandardScaler::new().fit(&training_data)?;
//! let scaled_train = fitted.transform(&training_data)?;
//!
//! fitted.save_to_file("scaler.bin")?;
//! let loaded = FittedStandardScaler::load_from_file("scaler.bin")?;
//! let scaled_test = loaded.transform(&test_data)?;
//! ```

pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod imputation;
pub mod pipeline;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use column_transformer::{
    ColumnSpec, ColumnTransformer, ColumnTransformerParams, FittedColumnTransformer,
};
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder, OneHotEncoderParams};
pub use error::PreprocessingError;
pub use frame::{CategoricalFrame, Column, FeatureFrame};
pub use imputation::{
    CategoricalImputer, CategoricalImputerParams, CategoricalStrategy, FittedCategoricalImputer,
    FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams,
};
pub use pipeline::{
    CategoricalPipeline, FittedCategoricalPipeline, FittedNumericPipeline, NumericPipeline,
};
pub use scaling::{FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams};
pub use traits::{FittedTransformer, Transformer};
