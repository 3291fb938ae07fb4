//! Imputer for string-valued categorical columns.
//!
//! The numeric [`SimpleImputer`](super::SimpleImputer) works on NaN-marked
//! matrices; this one fills `None` cells of a [`CategoricalFrame`] with the
//! column mode or a constant label.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::frame::CategoricalFrame;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strategy for filling missing categories.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CategoricalStrategy {
    /// Most frequent label of the column; ties go to the lexicographically smallest.
    #[default]
    MostFrequent,
    /// A fixed label, e.g. `"missing"`.
    Constant(String),
}

/// Serializable parameters for a fitted CategoricalImputer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoricalImputerParams {
    pub strategy: CategoricalStrategy,
    /// Fill label for each column.
    pub fill_values: Vec<String>,
    pub n_features: usize,
}

/// CategoricalImputer transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct CategoricalImputer {
    strategy: CategoricalStrategy,
}

impl CategoricalImputer {
    pub fn new(strategy: CategoricalStrategy) -> Self {
        Self { strategy }
    }
}

fn most_frequent<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values.flatten() {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

impl Transformer for CategoricalImputer {
    type Input = CategoricalFrame;
    type Output = CategoricalFrame;
    type Params = CategoricalImputerParams;
    type Fitted = FittedCategoricalImputer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.shape();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit CategoricalImputer on empty data".to_string(),
            ));
        }

        let fill_values = (0..cols)
            .map(|col| match &self.strategy {
                CategoricalStrategy::Constant(label) => Ok(label.clone()),
                CategoricalStrategy::MostFrequent => {
                    most_frequent(data.column(col)).ok_or_else(|| {
                        PreprocessingError::EmptyData(format!(
                            "column {col} has no observed category to take the mode of"
                        ))
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FittedCategoricalImputer {
            strategy: self.strategy.clone(),
            fill_values,
        })
    }
}

/// Fitted CategoricalImputer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedCategoricalImputer {
    strategy: CategoricalStrategy,
    fill_values: Vec<String>,
}

impl FittedCategoricalImputer {
    /// Fill label for each column.
    pub fn fill_values(&self) -> &[String] {
        &self.fill_values
    }
}

impl FittedTransformer for FittedCategoricalImputer {
    type Input = CategoricalFrame;
    type Output = CategoricalFrame;
    type Params = CategoricalImputerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();
        if cols != self.fill_values.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.fill_values.len(),
                got_features: cols,
            });
        }
        Ok(data.map_cells(|col, value| {
            Some(value.map_or_else(|| self.fill_values[col].clone(), str::to_string))
        }))
    }

    fn extract_params(&self) -> Self::Params {
        CategoricalImputerParams {
            strategy: self.strategy.clone(),
            fill_values: self.fill_values.clone(),
            n_features: self.fill_values.len(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.fill_values.len() != params.n_features {
            return Err(PreprocessingError::SerializationError(format!(
                "categorical imputer has {} fill values for {} features",
                params.fill_values.len(),
                params.n_features
            )));
        }
        Ok(Self {
            strategy: params.strategy,
            fill_values: params.fill_values,
        })
    }

    fn n_features_in(&self) -> usize {
        self.fill_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sectors() -> CategoricalFrame {
        CategoricalFrame::from_rows(&[
            vec![Some("Finance"), Some("Private")],
            vec![None, Some("Public")],
            vec![Some("Retail"), None],
            vec![Some("Finance"), Some("Public")],
        ])
        .unwrap()
    }

    #[test]
    fn test_categorical_imputer_most_frequent() {
        let fitted = CategoricalImputer::default().fit(&sectors()).unwrap();
        assert_eq!(fitted.fill_values(), &["Finance", "Public"]);

        let imputed = fitted.transform(&sectors()).unwrap();
        assert_eq!(imputed.get(1, 0), Some("Finance"));
        assert_eq!(imputed.get(2, 1), Some("Public"));
        assert_eq!(imputed.get(2, 0), Some("Retail"));
    }

    #[test]
    fn test_categorical_imputer_tie_takes_smallest_label() {
        let data = CategoricalFrame::from_rows(&[
            vec![Some("Sales")],
            vec![Some("Analyst")],
            vec![None],
        ])
        .unwrap();
        let fitted = CategoricalImputer::default().fit(&data).unwrap();
        assert_eq!(fitted.fill_values(), &["Analyst"]);
    }

    #[test]
    fn test_categorical_imputer_constant() {
        let fitted = CategoricalImputer::new(CategoricalStrategy::Constant("missing".into()))
            .fit(&sectors())
            .unwrap();
        let imputed = fitted.transform(&sectors()).unwrap();
        assert_eq!(imputed.get(1, 0), Some("missing"));
    }

    #[test]
    fn test_categorical_imputer_all_missing_column_errors() {
        let data = CategoricalFrame::from_rows(&[vec![None], vec![None]]).unwrap();
        let result = CategoricalImputer::default().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_categorical_imputer_feature_mismatch() {
        let fitted = CategoricalImputer::default().fit(&sectors()).unwrap();
        let narrow = CategoricalFrame::from_rows(&[vec![Some("Finance")]]).unwrap();
        assert!(matches!(
            fitted.transform(&narrow),
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 1
            })
        ));
    }

    #[test]
    fn test_categorical_imputer_params_round_trip() {
        let fitted = CategoricalImputer::default().fit(&sectors()).unwrap();
        let restored = FittedCategoricalImputer::from_params(fitted.extract_params()).unwrap();
        assert_eq!(
            restored.transform(&sectors()).unwrap(),
            fitted.transform(&sectors()).unwrap()
        );
    }
}
