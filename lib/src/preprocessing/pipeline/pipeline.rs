//! Pipelines for chaining transformers.
//!
//! A [`NumericPipeline`] chains numeric steps where the output of one step
//! becomes the input to the next. A [`CategoricalPipeline`] fills missing
//! labels and then one-hot encodes them.
//!
//! # Example
//! ```ignore
//! use salary_estimator::preprocessing::{
//!     ImputeStrategy, NumericPipeline, SimpleImputer, StandardScaler, Transformer,
//! };
//!
//! let pipeline = NumericPipeline::new()
//!     .add_simple_imputer(SimpleImputer::new(ImputeStrategy::Median))
//!     .add_standard_scaler(StandardScaler::new());
//!
//! let fitted = pipeline.fit(&data)?;
//! let transformed = fitted.transform(&data)?;
//! ```

use crate::preprocessing::encoding::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::frame::CategoricalFrame;
use crate::preprocessing::imputation::{
    CategoricalImputer, CategoricalImputerParams, FittedCategoricalImputer, FittedSimpleImputer,
    SimpleImputer, SimpleImputerParams,
};
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A fitted numeric step that can be part of a pipeline.
pub trait PipelineStep: Clone {
    /// Transform the data.
    fn transform_step(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError>;
    /// Get the step name for debugging.
    fn step_name(&self) -> &'static str;
}

/// A step in the unfitted numeric pipeline.
#[derive(Clone, Debug)]
pub enum NumericStep {
    SimpleImputer(SimpleImputer),
    StandardScaler(StandardScaler),
}

impl NumericStep {
    fn fit(&self, data: &Array2<f64>) -> Result<FittedNumericStep, PreprocessingError> {
        match self {
            NumericStep::SimpleImputer(t) => t.fit(data).map(FittedNumericStep::SimpleImputer),
            NumericStep::StandardScaler(t) => t.fit(data).map(FittedNumericStep::StandardScaler),
        }
    }
}

/// A fitted step of a numeric pipeline.
#[derive(Clone, Debug)]
pub enum FittedNumericStep {
    SimpleImputer(FittedSimpleImputer),
    StandardScaler(FittedStandardScaler),
}

impl PipelineStep for FittedNumericStep {
    fn transform_step(&self, data: &Array2<f64>) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            FittedNumericStep::SimpleImputer(t) => t.transform(data),
            FittedNumericStep::StandardScaler(t) => t.transform(data),
        }
    }

    fn step_name(&self) -> &'static str {
        match self {
            FittedNumericStep::SimpleImputer(_) => "SimpleImputer",
            FittedNumericStep::StandardScaler(_) => "StandardScaler",
        }
    }
}

impl FittedNumericStep {
    fn extract_params(&self) -> NumericStepParams {
        match self {
            FittedNumericStep::SimpleImputer(t) => NumericStepParams::SimpleImputer(t.extract_params()),
            FittedNumericStep::StandardScaler(t) => {
                NumericStepParams::StandardScaler(t.extract_params())
            }
        }
    }

    fn from_params(params: NumericStepParams) -> Result<Self, PreprocessingError> {
        match params {
            NumericStepParams::SimpleImputer(p) => {
                FittedSimpleImputer::from_params(p).map(FittedNumericStep::SimpleImputer)
            }
            NumericStepParams::StandardScaler(p) => {
                FittedStandardScaler::from_params(p).map(FittedNumericStep::StandardScaler)
            }
        }
    }
}

/// Serializable parameters of one fitted numeric step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NumericStepParams {
    SimpleImputer(SimpleImputerParams),
    StandardScaler(StandardScalerParams),
}

/// Serializable representation of a fitted numeric pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NumericPipelineParams {
    /// Step parameters in application order.
    pub steps: Vec<NumericStepParams>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Numeric pipeline transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct NumericPipeline {
    steps: Vec<NumericStep>,
}

impl NumericPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a SimpleImputer to the pipeline.
    pub fn add_simple_imputer(mut self, imputer: SimpleImputer) -> Self {
        self.steps.push(NumericStep::SimpleImputer(imputer));
        self
    }

    /// Add a StandardScaler to the pipeline.
    pub fn add_standard_scaler(mut self, scaler: StandardScaler) -> Self {
        self.steps.push(NumericStep::StandardScaler(scaler));
        self
    }

    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transformer for NumericPipeline {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = NumericPipelineParams;
    type Fitted = FittedNumericPipeline;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit an empty pipeline".to_string(),
            ));
        }

        let (rows, cols) = data.dim();
        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit pipeline on empty data".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        let mut current_data = data.clone();

        for step in &self.steps {
            let fitted = step.fit(&current_data)?;
            current_data = fitted.transform_step(&current_data)?;
            fitted_steps.push(fitted);
        }

        Ok(FittedNumericPipeline {
            steps: fitted_steps,
            n_features: cols,
        })
    }
}

/// Fitted numeric pipeline ready for inference.
#[derive(Clone, Debug)]
pub struct FittedNumericPipeline {
    steps: Vec<FittedNumericStep>,
    n_features: usize,
}

impl FittedNumericPipeline {
    /// Get the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fitted steps in application order.
    pub fn steps(&self) -> &[FittedNumericStep] {
        &self.steps
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }
}

impl FittedTransformer for FittedNumericPipeline {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Params = NumericPipelineParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        if data.ncols() != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: data.ncols(),
            });
        }

        let mut result = data.clone();
        for step in &self.steps {
            result = step.transform_step(&result)?;
        }
        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        NumericPipelineParams {
            steps: self.steps.iter().map(FittedNumericStep::extract_params).collect(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.steps.is_empty() {
            return Err(PreprocessingError::SerializationError(
                "numeric pipeline has no steps".to_string(),
            ));
        }
        let steps = params
            .steps
            .into_iter()
            .map(FittedNumericStep::from_params)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            steps,
            n_features: params.n_features,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

/// Serializable representation of a fitted categorical pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoricalPipelineParams {
    pub imputer: Option<CategoricalImputerParams>,
    pub encoder: OneHotEncoderParams,
}

/// Categorical pipeline: optional imputation followed by one-hot encoding.
#[derive(Clone, Debug)]
pub struct CategoricalPipeline {
    imputer: Option<CategoricalImputer>,
    encoder: OneHotEncoder,
}

impl CategoricalPipeline {
    /// Pipeline that only encodes.
    pub fn new(encoder: OneHotEncoder) -> Self {
        Self {
            imputer: None,
            encoder,
        }
    }

    /// Fill missing labels before encoding.
    pub fn with_imputer(mut self, imputer: CategoricalImputer) -> Self {
        self.imputer = Some(imputer);
        self
    }
}

impl Transformer for CategoricalPipeline {
    type Input = CategoricalFrame;
    type Output = Array2<f64>;
    type Params = CategoricalPipelineParams;
    type Fitted = FittedCategoricalPipeline;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let imputer = self.imputer.as_ref().map(|i| i.fit(data)).transpose()?;
        let encoder = match &imputer {
            Some(fitted) => self.encoder.fit(&fitted.transform(data)?)?,
            None => self.encoder.fit(data)?,
        };
        Ok(FittedCategoricalPipeline { imputer, encoder })
    }
}

/// Fitted categorical pipeline ready for inference.
#[derive(Clone, Debug)]
pub struct FittedCategoricalPipeline {
    imputer: Option<FittedCategoricalImputer>,
    encoder: FittedOneHotEncoder,
}

impl FittedCategoricalPipeline {
    pub fn imputer(&self) -> Option<&FittedCategoricalImputer> {
        self.imputer.as_ref()
    }

    pub fn encoder(&self) -> &FittedOneHotEncoder {
        &self.encoder
    }

    /// Get the names of all steps in the pipeline.
    pub fn step_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2);
        if self.imputer.is_some() {
            names.push("CategoricalImputer");
        }
        names.push("OneHotEncoder");
        names
    }
}

impl FittedTransformer for FittedCategoricalPipeline {
    type Input = CategoricalFrame;
    type Output = Array2<f64>;
    type Params = CategoricalPipelineParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        match &self.imputer {
            Some(imputer) => self.encoder.transform(&imputer.transform(data)?),
            None => self.encoder.transform(data),
        }
    }

    fn extract_params(&self) -> Self::Params {
        CategoricalPipelineParams {
            imputer: self.imputer.as_ref().map(|i| i.extract_params()),
            encoder: self.encoder.extract_params(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let imputer = params
            .imputer
            .map(FittedCategoricalImputer::from_params)
            .transpose()?;
        let encoder = FittedOneHotEncoder::from_params(params.encoder)?;
        if let Some(imputer) = &imputer {
            if imputer.n_features_in() != encoder.n_features_in() {
                return Err(PreprocessingError::SerializationError(format!(
                    "imputer covers {} columns but encoder covers {}",
                    imputer.n_features_in(),
                    encoder.n_features_in()
                )));
            }
        }
        Ok(Self { imputer, encoder })
    }

    fn n_features_in(&self) -> usize {
        self.encoder.n_features_in()
    }

    fn n_features_out(&self) -> usize {
        self.encoder.n_features_out()
    }
}
