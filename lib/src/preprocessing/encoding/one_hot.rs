//! One-hot encoding for categorical features.
//!
//! Transforms string categories to one-hot (dummy) encoded vectors.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::frame::CategoricalFrame;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature, and the encoder
/// learns the distinct labels present in each column during fitting.
/// Categories are kept in sorted order, which fixes the output layout.
///
/// # Example
/// ```ignore
/// use salary_estimator::preprocessing::{CategoricalFrame, OneHotEncoder, Transformer};
///
/// let data = CategoricalFrame::from_rows(&[
///     vec![Some("Retail")],
///     vec![Some("Finance")],
/// ])?;
///
/// let fitted = OneHotEncoder::new().fit(&data)?;
///
/// // categories: ["Finance", "Retail"]
/// let encoded = fitted.transform(&data)?;
/// // [[0, 1],
/// //  [1, 0]]
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Sorted categories for each input column.
    pub categories_: Vec<Vec<String>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    categories_: Vec<Vec<String>>,
    /// Output column where each input column's block starts.
    offsets: Vec<usize>,
    n_features_out: usize,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    fn build(categories_: Vec<Vec<String>>, handle_unknown: HandleUnknown) -> Self {
        let mut offsets = Vec::with_capacity(categories_.len());
        let mut n_features_out = 0;
        for cats in &categories_ {
            offsets.push(n_features_out);
            n_features_out += cats.len();
        }
        Self {
            categories_,
            offsets,
            n_features_out,
            handle_unknown,
        }
    }

    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories_
    }

    /// Get the number of categories per input feature.
    pub fn n_values(&self) -> Vec<usize> {
        self.categories_.iter().map(Vec::len).collect()
    }

    /// Output column names, `<input name>=<category>` in output order.
    pub fn feature_names_out(&self, input_names: &[String]) -> Vec<String> {
        input_names
            .iter()
            .zip(&self.categories_)
            .flat_map(|(name, cats)| cats.iter().map(move |c| format!("{name}={c}")))
            .collect()
    }
}

impl Transformer for OneHotEncoder {
    type Input = CategoricalFrame;
    type Output = Array2<f64>;
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        // Missing cells do not become a category of their own.
        let categories_: Vec<Vec<String>> = (0..cols)
            .map(|col| {
                data.column(col)
                    .flatten()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        Ok(FittedOneHotEncoder::build(categories_, self.handle_unknown))
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = CategoricalFrame;
    type Output = Array2<f64>;
    type Params = OneHotEncoderParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (rows, cols) = data.shape();

        if cols != self.categories_.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.categories_.len(),
                got_features: cols,
            });
        }

        let mut result = Array2::zeros((rows, self.n_features_out));

        for row in 0..rows {
            for (col, cats) in self.categories_.iter().enumerate() {
                let value = data.get(row, col);
                let position = value.and_then(|v| cats.binary_search_by(|c| c.as_str().cmp(v)).ok());

                match position {
                    Some(idx) => result[[row, self.offsets[col] + idx]] = 1.0,
                    None => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(PreprocessingError::UnknownCategory {
                                column: col,
                                value: value.unwrap_or("<missing>").to_string(),
                            });
                        }
                        // With Ignore, leave the block as zeros
                    }
                }
            }
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            categories_: self.categories_.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        for (col, cats) in params.categories_.iter().enumerate() {
            if cats.windows(2).any(|w| w[0] >= w[1]) {
                return Err(PreprocessingError::SerializationError(format!(
                    "categories of column {col} are not sorted and distinct"
                )));
            }
        }
        Ok(Self::build(params.categories_, params.handle_unknown))
    }

    fn n_features_in(&self) -> usize {
        self.categories_.len()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sectors() -> CategoricalFrame {
        CategoricalFrame::from_rows(&[
            vec![Some("Retail")],
            vec![Some("Finance")],
            vec![Some("Media")],
        ])
        .unwrap()
    }

    #[test]
    fn test_one_hot_encoder_single_column() {
        let fitted = OneHotEncoder::new().fit(&sectors()).unwrap();

        assert_eq!(fitted.n_features_in(), 1);
        assert_eq!(fitted.n_features_out(), 3);
        assert_eq!(fitted.categories()[0], vec!["Finance", "Media", "Retail"]);

        let transformed = fitted.transform(&sectors()).unwrap();
        assert_eq!(
            transformed,
            array![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_one_hot_encoder_multiple_columns() {
        let data = CategoricalFrame::from_rows(&[
            vec![Some("a"), Some("y")],
            vec![Some("b"), Some("x")],
        ])
        .unwrap();

        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        assert_eq!(fitted.n_features_out(), 4);
        assert_eq!(fitted.n_values(), vec![2, 2]);

        let transformed = fitted.transform(&data).unwrap();
        assert_eq!(
            transformed,
            array![[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_one_hot_encoder_unknown_error() {
        let fitted = OneHotEncoder::new().fit(&sectors()).unwrap();
        let test = CategoricalFrame::from_rows(&[vec![Some("Aerospace")]]).unwrap();

        let result = fitted.transform(&test);
        assert!(matches!(
            result,
            Err(PreprocessingError::UnknownCategory { column: 0, .. })
        ));
    }

    #[test]
    fn test_one_hot_encoder_unknown_ignore() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Ignore)
            .fit(&sectors())
            .unwrap();
        let test = CategoricalFrame::from_rows(&[vec![Some("Aerospace")], vec![None]]).unwrap();

        let transformed = fitted.transform(&test).unwrap();
        assert_eq!(transformed, Array2::<f64>::zeros((2, 3)));
    }

    #[test]
    fn test_one_hot_encoder_missing_is_not_a_category() {
        let data = CategoricalFrame::from_rows(&[vec![Some("Retail")], vec![None]]).unwrap();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();
        assert_eq!(fitted.categories()[0], vec!["Retail"]);
    }

    #[test]
    fn test_one_hot_encoder_feature_names_out() {
        let data = CategoricalFrame::from_rows(&[
            vec![Some("Finance"), Some("Private")],
            vec![Some("Retail"), Some("Public")],
        ])
        .unwrap();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        let names = fitted.feature_names_out(&["Sector".to_string(), "Type of ownership".to_string()]);
        assert_eq!(
            names,
            vec![
                "Sector=Finance",
                "Sector=Retail",
                "Type of ownership=Private",
                "Type of ownership=Public"
            ]
        );
    }

    #[test]
    fn test_one_hot_encoder_serialization() {
        let fitted = OneHotEncoder::new().fit(&sectors()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let temp_file = dir.path().join("onehot.bin");
        fitted.save_to_file(&temp_file).unwrap();

        let loaded = FittedOneHotEncoder::load_from_file(&temp_file).unwrap();

        assert_eq!(loaded.n_features_in(), fitted.n_features_in());
        assert_eq!(loaded.n_features_out(), fitted.n_features_out());
        assert_eq!(loaded.categories(), fitted.categories());
    }

    #[test]
    fn test_one_hot_encoder_empty_data() {
        let result = OneHotEncoder::new().fit(&CategoricalFrame::empty(2));
        assert!(result.is_err());
    }

    #[test]
    fn test_one_hot_encoder_feature_mismatch() {
        let fitted = OneHotEncoder::new().fit(&sectors()).unwrap();
        let test = CategoricalFrame::from_rows(&[vec![Some("Retail"), Some("x")]]).unwrap();

        assert!(matches!(
            fitted.transform(&test),
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_one_hot_encoder_empty_transform() {
        let fitted = OneHotEncoder::new().fit(&sectors()).unwrap();
        let result = fitted.transform(&CategoricalFrame::empty(1)).unwrap();
        assert_eq!(result.dim(), (0, 3));
    }

    #[test]
    fn test_one_hot_encoder_from_params_rejects_unsorted() {
        let params = OneHotEncoderParams {
            categories_: vec![vec!["b".to_string(), "a".to_string()]],
            handle_unknown: HandleUnknown::Error,
        };
        assert!(FittedOneHotEncoder::from_params(params).is_err());
    }

    #[test]
    fn test_one_hot_encoder_fit_transform() {
        let transformed = OneHotEncoder::new().fit_transform(&sectors()).unwrap();
        assert_eq!(transformed.dim(), (3, 3));
        assert_eq!(transformed.sum(), 3.0);
    }
}
