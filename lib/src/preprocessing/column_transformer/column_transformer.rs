//! ColumnTransformer implementation.
//!
//! Applies different pipelines to different column subsets of a
//! [`FeatureFrame`] and concatenates the results.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::frame::FeatureFrame;
use crate::preprocessing::pipeline::{
    CategoricalPipeline, CategoricalPipelineParams, FittedCategoricalPipeline,
    FittedNumericPipeline, NumericPipeline, NumericPipelineParams,
};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Specifies which columns a transformer should be applied to.
#[derive(Clone, Debug)]
pub enum ColumnSpec {
    /// Apply to the named columns.
    Names(Vec<String>),
    /// Apply to specific column indices of the frame seen at fit time.
    Indices(Vec<usize>),
}

impl ColumnSpec {
    /// Build a spec from column names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSpec::Names(names.into_iter().map(Into::into).collect())
    }

    /// Resolve the spec to column names present in `frame`.
    fn resolve(&self, frame: &FeatureFrame) -> Result<Vec<String>, PreprocessingError> {
        match self {
            ColumnSpec::Names(names) => {
                for name in names {
                    if frame.index_of(name).is_none() {
                        return Err(PreprocessingError::UnknownColumn(name.clone()));
                    }
                }
                Ok(names.clone())
            }
            ColumnSpec::Indices(indices) => indices
                .iter()
                .map(|&idx| {
                    frame.column_names().get(idx).cloned().ok_or_else(|| {
                        PreprocessingError::InvalidParameter(format!(
                            "Column index {} out of bounds ({} columns)",
                            idx,
                            frame.n_columns()
                        ))
                    })
                })
                .collect(),
        }
    }
}

/// Unfitted transformers that can be used in a ColumnTransformer.
#[derive(Clone, Debug)]
pub enum ColumnTransformerStep {
    Numeric(NumericPipeline),
    Categorical(CategoricalPipeline),
}

/// Fitted transformers of a ColumnTransformer.
#[derive(Clone, Debug)]
pub enum FittedColumnTransformerStep {
    Numeric(FittedNumericPipeline),
    Categorical(FittedCategoricalPipeline),
}

impl FittedColumnTransformerStep {
    fn transform(
        &self,
        frame: &FeatureFrame,
        columns: &[usize],
    ) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            FittedColumnTransformerStep::Numeric(t) => t.transform(&frame.numeric_block(columns)?),
            FittedColumnTransformerStep::Categorical(t) => {
                t.transform(&frame.categorical_block(columns)?)
            }
        }
    }

    fn step_kind(&self) -> &'static str {
        match self {
            FittedColumnTransformerStep::Numeric(_) => "NumericPipeline",
            FittedColumnTransformerStep::Categorical(_) => "CategoricalPipeline",
        }
    }

    fn n_features_out(&self) -> usize {
        match self {
            FittedColumnTransformerStep::Numeric(t) => t.n_features_out(),
            FittedColumnTransformerStep::Categorical(t) => t.n_features_out(),
        }
    }

    fn feature_names_out(&self, prefix: &str, columns: &[String]) -> Vec<String> {
        match self {
            FittedColumnTransformerStep::Numeric(_) => {
                columns.iter().map(|c| format!("{prefix}__{c}")).collect()
            }
            FittedColumnTransformerStep::Categorical(t) => t
                .encoder()
                .feature_names_out(columns)
                .into_iter()
                .map(|c| format!("{prefix}__{c}"))
                .collect(),
        }
    }
}

fn fit_step(
    step: &ColumnTransformerStep,
    frame: &FeatureFrame,
    columns: &[usize],
) -> Result<FittedColumnTransformerStep, PreprocessingError> {
    match step {
        ColumnTransformerStep::Numeric(t) => t
            .fit(&frame.numeric_block(columns)?)
            .map(FittedColumnTransformerStep::Numeric),
        ColumnTransformerStep::Categorical(t) => t
            .fit(&frame.categorical_block(columns)?)
            .map(FittedColumnTransformerStep::Categorical),
    }
}

/// ColumnTransformer applies different pipelines to different columns.
///
/// Each step is named; the name prefixes the step's output feature names.
/// Outputs are concatenated horizontally in the order steps were added.
///
/// # Example
/// ```ignore
/// use salary_estimator::preprocessing::{
///     CategoricalPipeline, ColumnSpec, ColumnTransformer, NumericPipeline, Transformer,
/// };
///
/// let ct = ColumnTransformer::new()
///     .add_numeric("num", numeric, ColumnSpec::names(["Rating", "Founded"]))
///     .add_categorical("cat", categorical, ColumnSpec::names(["Sector"]));
///
/// let fitted = ct.fit(&frame)?;
/// let matrix = fitted.transform(&frame)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnTransformer {
    steps: Vec<(String, ColumnSpec, ColumnTransformerStep)>,
}

impl ColumnTransformer {
    /// Create a new empty ColumnTransformer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric pipeline for the specified columns.
    pub fn add_numeric(
        self,
        name: impl Into<String>,
        pipeline: NumericPipeline,
        spec: ColumnSpec,
    ) -> Self {
        self.add(name, ColumnTransformerStep::Numeric(pipeline), spec)
    }

    /// Add a categorical pipeline for the specified columns.
    pub fn add_categorical(
        self,
        name: impl Into<String>,
        pipeline: CategoricalPipeline,
        spec: ColumnSpec,
    ) -> Self {
        self.add(name, ColumnTransformerStep::Categorical(pipeline), spec)
    }

    /// Add a generic step.
    pub fn add(
        mut self,
        name: impl Into<String>,
        step: ColumnTransformerStep,
        spec: ColumnSpec,
    ) -> Self {
        self.steps.push((name.into(), spec, step));
        self
    }

    /// Get the number of transformer steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Serializable parameters of one fitted pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum StepKindParams {
    Numeric(NumericPipelineParams),
    Categorical(CategoricalPipelineParams),
}

/// Serializable parameters for fitted column transformer step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepParams {
    /// Step name.
    pub name: String,
    /// Column names this step was applied to.
    pub columns: Vec<String>,
    /// Fitted pipeline parameters.
    pub params: StepKindParams,
}

/// Serializable parameters for a fitted ColumnTransformer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnTransformerParams {
    pub steps: Vec<StepParams>,
}

#[derive(Clone, Debug)]
struct FittedStep {
    name: String,
    columns: Vec<String>,
    step: FittedColumnTransformerStep,
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedColumnTransformer {
    fitted_steps: Vec<FittedStep>,
    n_features_out: usize,
}

impl FittedColumnTransformer {
    fn from_steps(fitted_steps: Vec<FittedStep>) -> Self {
        let n_features_out = fitted_steps.iter().map(|s| s.step.n_features_out()).sum();
        Self {
            fitted_steps,
            n_features_out,
        }
    }

    /// Get step names, kinds and the columns each step consumes.
    pub fn step_names(&self) -> Vec<(&str, &'static str, &[String])> {
        self.fitted_steps
            .iter()
            .map(|s| (s.name.as_str(), s.step.step_kind(), s.columns.as_slice()))
            .collect()
    }

    /// Fitted pipeline of the step called `name`.
    pub fn step(&self, name: &str) -> Option<&FittedColumnTransformerStep> {
        self.fitted_steps
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.step)
    }

    /// Names of the output columns, `<step>__<column>` for numeric steps and
    /// `<step>__<column>=<category>` for categorical ones.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.fitted_steps
            .iter()
            .flat_map(|s| s.step.feature_names_out(&s.name, &s.columns))
            .collect()
    }

    fn column_indices(
        frame: &FeatureFrame,
        columns: &[String],
    ) -> Result<Vec<usize>, PreprocessingError> {
        columns
            .iter()
            .map(|c| {
                frame
                    .index_of(c)
                    .ok_or_else(|| PreprocessingError::UnknownColumn(c.clone()))
            })
            .collect()
    }
}

impl Transformer for ColumnTransformer {
    type Input = FeatureFrame;
    type Output = Array2<f64>;
    type Params = ColumnTransformerParams;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.n_rows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on empty data".to_string(),
            ));
        }

        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit empty ColumnTransformer".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());

        for (name, spec, step) in &self.steps {
            let columns = spec.resolve(data)?;
            let indices = FittedColumnTransformer::column_indices(data, &columns)?;
            let fitted = fit_step(step, data, &indices)?;
            fitted_steps.push(FittedStep {
                name: name.clone(),
                columns,
                step: fitted,
            });
        }

        Ok(FittedColumnTransformer::from_steps(fitted_steps))
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Input = FeatureFrame;
    type Output = Array2<f64>;
    type Params = ColumnTransformerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let mut outputs = Vec::with_capacity(self.fitted_steps.len());
        for s in &self.fitted_steps {
            let indices = Self::column_indices(data, &s.columns)?;
            outputs.push(s.step.transform(data, &indices)?);
        }

        let views: Vec<ArrayView2<f64>> = outputs.iter().map(|o| o.view()).collect();
        concatenate(Axis(1), &views).map_err(|e| PreprocessingError::NumericalError(e.to_string()))
    }

    fn extract_params(&self) -> Self::Params {
        let steps = self
            .fitted_steps
            .iter()
            .map(|s| StepParams {
                name: s.name.clone(),
                columns: s.columns.clone(),
                params: match &s.step {
                    FittedColumnTransformerStep::Numeric(t) => {
                        StepKindParams::Numeric(t.extract_params())
                    }
                    FittedColumnTransformerStep::Categorical(t) => {
                        StepKindParams::Categorical(t.extract_params())
                    }
                },
            })
            .collect();

        ColumnTransformerParams { steps }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.steps.is_empty() {
            return Err(PreprocessingError::SerializationError(
                "column transformer has no steps".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(params.steps.len());
        for step_params in params.steps {
            let step = match step_params.params {
                StepKindParams::Numeric(p) => {
                    FittedColumnTransformerStep::Numeric(FittedNumericPipeline::from_params(p)?)
                }
                StepKindParams::Categorical(p) => FittedColumnTransformerStep::Categorical(
                    FittedCategoricalPipeline::from_params(p)?,
                ),
            };
            let n_in = match &step {
                FittedColumnTransformerStep::Numeric(t) => t.n_features_in(),
                FittedColumnTransformerStep::Categorical(t) => t.n_features_in(),
            };
            if n_in != step_params.columns.len() {
                return Err(PreprocessingError::SerializationError(format!(
                    "step {:?} names {} columns but was fitted on {}",
                    step_params.name,
                    step_params.columns.len(),
                    n_in
                )));
            }
            fitted_steps.push(FittedStep {
                name: step_params.name,
                columns: step_params.columns,
                step,
            });
        }

        Ok(Self::from_steps(fitted_steps))
    }

    fn n_features_in(&self) -> usize {
        self.fitted_steps.iter().map(|s| s.columns.len()).sum()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}
