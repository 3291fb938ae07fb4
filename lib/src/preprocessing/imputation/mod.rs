//! Imputation transformers for handling missing values.
//!
//! # Available Transformers
//!
//! | Transformer | Input | Description |
//! |-------------|-------|-------------|
//! | [`SimpleImputer`] | `Array2<f64>` (NaN = missing) | Mean, median, most_frequent, or constant |
//! | [`CategoricalImputer`] | [`CategoricalFrame`](crate::preprocessing::CategoricalFrame) | Mode or constant label |
//!
//! # Example
//!
//! ```ignore
//! use salary_estimator::preprocessing::{ImputeStrategy, SimpleImputer, Transformer};
//!
//! let imputer = SimpleImputer::new(ImputeStrategy::Median);
//! let fitted = imputer.fit(&data)?;
//! let imputed = fitted.transform(&new_data)?;
//! ```

pub mod categorical;
pub mod simple;

pub use categorical::{
    CategoricalImputer, CategoricalImputerParams, CategoricalStrategy, FittedCategoricalImputer,
};
pub use simple::{FittedSimpleImputer, ImputeStrategy, SimpleImputer, SimpleImputerParams};
