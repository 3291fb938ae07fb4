//! The salary model as one fit-able, persistable unit.
//!
//! [`SalaryPipeline`] routes the numeric listing attributes through median
//! imputation and standardization, the categorical ones through mode
//! imputation and one-hot encoding, and feeds the concatenated matrix to a
//! ridge regressor. Fitting yields a [`FittedSalaryPipeline`], which owns
//! every learned statistic and is written to disk as a single artifact.

use crate::config::ConfigError;
use crate::dataset::{DatasetError, JobFeatures, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::metrics::LengthMismatch;
use crate::model::{Estimator, InferenceModel, LinearModel, LinearParams, ModelError, RidgeRegression};
use crate::preprocessing::{
    CategoricalImputer, CategoricalPipeline, CategoricalStrategy, ColumnSpec, ColumnTransformer,
    ColumnTransformerParams, FeatureFrame, FittedColumnTransformer, FittedTransformer,
    HandleUnknown, ImputeStrategy, NumericPipeline, OneHotEncoder, PreprocessingError,
    SimpleImputer, StandardScaler, Transformer,
};
use crate::serialization::SerializableParams;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Leading bytes of every pipeline artifact.
pub const ARTIFACT_MAGIC: [u8; 4] = *b"SALP";

/// Layout version of [`SalaryPipelineParams`] inside the artifact.
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised while fitting, running or persisting the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Metrics(#[from] LengthMismatch),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The file is not a pipeline artifact, or was written by another format version.
    #[error("Incompatible artifact: {0}")]
    IncompatibleArtifact(String),
    #[error("Got {rows} feature rows but {targets} targets")]
    SampleMismatch { rows: usize, targets: usize },
}

impl From<bincode::Error> for PipelineError {
    fn from(err: bincode::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

/// Column transformer of the salary model: `num` then `cat`.
pub fn salary_preprocessor() -> ColumnTransformer {
    let numeric = NumericPipeline::new()
        .add_simple_imputer(SimpleImputer::new(ImputeStrategy::Median))
        .add_standard_scaler(StandardScaler::new());
    let categorical =
        CategoricalPipeline::new(OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore))
            .with_imputer(CategoricalImputer::new(CategoricalStrategy::MostFrequent));

    ColumnTransformer::new()
        .add_numeric("num", numeric, ColumnSpec::names(NUMERIC_FEATURES))
        .add_categorical("cat", categorical, ColumnSpec::names(CATEGORICAL_FEATURES))
}

/// Unfitted salary model.
#[derive(Clone, Debug)]
pub struct SalaryPipeline {
    preprocessor: ColumnTransformer,
    regressor: RidgeRegression,
}

impl Default for SalaryPipeline {
    fn default() -> Self {
        Self {
            preprocessor: salary_preprocessor(),
            regressor: RidgeRegression::default(),
        }
    }
}

impl SalaryPipeline {
    /// Standard preprocessing with a ridge penalty of `alpha`.
    pub fn new(alpha: f64) -> Self {
        Self {
            regressor: RidgeRegression::new(alpha),
            ..Self::default()
        }
    }

    /// Replace the column transformer, e.g. to model a different column set.
    pub fn with_preprocessor(mut self, preprocessor: ColumnTransformer) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_regressor(mut self, regressor: RidgeRegression) -> Self {
        self.regressor = regressor;
        self
    }

    pub fn regressor(&self) -> &RidgeRegression {
        &self.regressor
    }

    /// Fit every transform and the regressor on the same rows.
    pub fn fit(
        &self,
        frame: &FeatureFrame,
        targets: &[f64],
    ) -> Result<FittedSalaryPipeline, PipelineError> {
        if frame.n_rows() != targets.len() {
            return Err(PipelineError::SampleMismatch {
                rows: frame.n_rows(),
                targets: targets.len(),
            });
        }

        let preprocessor = self.preprocessor.fit(frame)?;
        let x = preprocessor.transform(frame)?;
        debug!(rows = x.nrows(), features = x.ncols(), "design matrix built");

        let y = Array1::from(targets.to_vec());
        let model = self.regressor.fit(&x, &y)?;
        info!(
            rows = frame.n_rows(),
            features = model.n_features(),
            alpha = self.regressor.alpha(),
            "fitted salary pipeline"
        );

        Ok(FittedSalaryPipeline {
            preprocessor,
            model,
        })
    }

    /// [`fit`](Self::fit) over listing attributes.
    pub fn fit_features(
        &self,
        features: &[JobFeatures],
        targets: &[f64],
    ) -> Result<FittedSalaryPipeline, PipelineError> {
        self.fit(&JobFeatures::to_frame(features)?, targets)
    }
}

/// Plain-data state of a fitted pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SalaryPipelineParams {
    pub preprocessor: ColumnTransformerParams,
    pub model: LinearParams,
}

#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    magic: [u8; 4],
    format_version: u32,
    payload: Vec<u8>,
}

/// Fitted salary model. Immutable; predictions are in thousands of dollars.
#[derive(Clone, Debug)]
pub struct FittedSalaryPipeline {
    preprocessor: FittedColumnTransformer,
    model: LinearModel,
}

impl FittedSalaryPipeline {
    pub fn preprocessor(&self) -> &FittedColumnTransformer {
        &self.preprocessor
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Names of the design-matrix columns, in coefficient order.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.preprocessor.feature_names_out()
    }

    /// Estimate the salary of every row of `frame`.
    ///
    /// Missing values are imputed and unseen categories contribute nothing.
    pub fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>, PipelineError> {
        if frame.n_rows() == 0 {
            return Ok(Vec::new());
        }
        let x = self.preprocessor.transform(frame)?;
        Ok(self.model.predict_batch(&x)?.to_vec())
    }

    pub fn predict_features(&self, features: &[JobFeatures]) -> Result<Vec<f64>, PipelineError> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        self.predict(&JobFeatures::to_frame(features)?)
    }

    pub fn predict_one(&self, features: &JobFeatures) -> Result<f64, PipelineError> {
        self.predict_features(std::slice::from_ref(features))?
            .first()
            .copied()
            .ok_or(PipelineError::Model(ModelError::EmptyData))
    }

    pub fn extract_params(&self) -> SalaryPipelineParams {
        SalaryPipelineParams {
            preprocessor: self.preprocessor.extract_params(),
            model: self.model.extract_params(),
        }
    }

    pub fn from_params(params: SalaryPipelineParams) -> Result<Self, PipelineError> {
        let preprocessor = FittedColumnTransformer::from_params(params.preprocessor)?;
        let model = LinearModel::from_params(params.model)?;

        if preprocessor.n_features_out() != model.n_features() {
            return Err(PipelineError::IncompatibleArtifact(format!(
                "preprocessor emits {} features but the model expects {}",
                preprocessor.n_features_out(),
                model.n_features()
            )));
        }

        Ok(Self {
            preprocessor,
            model,
        })
    }

    /// Encode as an artifact: magic, format version, then the bincode params.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        let envelope = ArtifactEnvelope {
            magic: ARTIFACT_MAGIC,
            format_version: FORMAT_VERSION,
            payload: self.extract_params().to_bytes()?,
        };
        Ok(envelope.to_bytes()?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PipelineError> {
        if bytes.get(..ARTIFACT_MAGIC.len()) != Some(&ARTIFACT_MAGIC[..]) {
            return Err(PipelineError::IncompatibleArtifact(
                "missing salary pipeline header".to_string(),
            ));
        }

        let envelope = ArtifactEnvelope::from_bytes(bytes)?;
        if envelope.format_version != FORMAT_VERSION {
            return Err(PipelineError::IncompatibleArtifact(format!(
                "format version {} is not supported (expected {})",
                envelope.format_version, FORMAT_VERSION
            )));
        }

        Self::from_params(SalaryPipelineParams::from_bytes(&envelope.payload)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "saved pipeline artifact");
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let pipeline = Self::from_bytes(&std::fs::read(path)?)?;
        info!(
            path = %path.display(),
            features = pipeline.model.n_features(),
            "loaded pipeline artifact"
        );
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn listing(title: &str, sector: &str, rating: Option<f64>, founded: Option<i32>) -> JobFeatures {
        JobFeatures {
            job_title: Some(title.to_string()),
            location: Some("New York, NY".to_string()),
            industry: Some("Internet".to_string()),
            sector: Some(sector.to_string()),
            ownership: Some("Company - Private".to_string()),
            rating,
            founded,
        }
    }

    fn training_set() -> (Vec<JobFeatures>, Vec<f64>) {
        let features = vec![
            listing("Data Scientist", "Information Technology", Some(4.1), Some(2005)),
            listing("Data Scientist", "Finance", Some(3.6), Some(1990)),
            listing("Data Engineer", "Information Technology", Some(3.9), Some(2012)),
            listing("Data Analyst", "Finance", Some(3.2), None),
            listing("Data Analyst", "Information Technology", None, Some(1999)),
            listing("Data Engineer", "Finance", Some(4.5), Some(2015)),
        ];
        let targets = vec![120.0, 110.0, 105.0, 70.0, 75.0, 115.0];
        (features, targets)
    }

    fn fitted() -> FittedSalaryPipeline {
        let (features, targets) = training_set();
        SalaryPipeline::default()
            .fit_features(&features, &targets)
            .unwrap()
    }

    #[test]
    fn test_fit_matches_closed_form_ridge_on_design_matrix() {
        let (features, targets) = training_set();
        let pipeline = fitted();

        let frame = JobFeatures::to_frame(&features).unwrap();
        let x: Array2<f64> = pipeline.preprocessor().transform(&frame).unwrap();
        let direct = RidgeRegression::new(1.0)
            .fit(&x, &Array1::from(targets))
            .unwrap();

        let got = pipeline.predict(&frame).unwrap();
        let want = direct.predict_batch(&x).unwrap();
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-12);
        }
    }

    #[test]
    fn test_feature_names_follow_numeric_then_categorical() {
        let names = fitted().feature_names_out();
        assert_eq!(names[0], "num__Rating");
        assert_eq!(names[1], "num__Founded");
        assert_eq!(names[2], "cat__Job Title=Data Analyst");
        assert!(names.contains(&"cat__Sector=Finance".to_string()));
        // 2 numeric + 3 titles + 1 location + 1 industry + 2 sectors + 1 ownership
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_minus_one_cells_are_imputed_not_categories() {
        use crate::dataset::{prepare, read_records, MalformedSalaryPolicy};

        let csv = "\
Job Title,Salary Estimate,Rating,Location,Founded,Type of ownership,Industry,Sector
Data Analyst,$50K-$70K,3.0,Austin,2000,Company - Private,-1,-1
Data Scientist,$80K-$100K,4.0,Boston,1990,-1,Internet,Finance
Data Engineer,$60K-$90K,-1.0,Austin,2010,Company - Public,Internet,Information Technology
Data Scientist,$90K-$130K,5.0,Boston,-1,Company - Private,Banks,Finance
";
        let prepared = prepare(&read_records(csv.as_bytes()).unwrap(), MalformedSalaryPolicy::Reject).unwrap();
        let features = prepared.features();
        let pipeline = SalaryPipeline::default()
            .fit_features(&features, &prepared.targets)
            .unwrap();

        let names = pipeline.feature_names_out();
        assert!(
            names.iter().all(|n| !n.ends_with("=-1") && !n.ends_with("=-1.0")),
            "{names:?}"
        );

        // -1.0 rating behaves like the median of the known ratings
        assert_eq!(features[2].rating, None);
        let mut at_median = features[2].clone();
        at_median.rating = Some(4.0);
        let imputed = pipeline.predict_one(&features[2]).unwrap();
        let explicit = pipeline.predict_one(&at_median).unwrap();
        assert_eq!(imputed.to_bits(), explicit.to_bits());
    }

    #[test]
    fn test_predict_tolerates_unknown_and_missing_values() {
        let pipeline = fitted();
        let unseen = JobFeatures {
            job_title: Some("Chief Astronaut".to_string()),
            location: None,
            sector: Some("Aerospace & Defense".to_string()),
            ..JobFeatures::default()
        };

        let estimate = pipeline.predict_one(&unseen).unwrap();
        assert!(estimate.is_finite());
    }

    #[test]
    fn test_predict_empty_batch() {
        assert!(fitted().predict_features(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_fit_rejects_target_length_mismatch() {
        let (features, _) = training_set();
        let result = SalaryPipeline::default().fit_features(&features, &[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(PipelineError::SampleMismatch { rows: 6, targets: 2 })
        ));
    }

    #[test]
    fn test_larger_alpha_shrinks_towards_mean() {
        let (features, targets) = training_set();
        let loose = SalaryPipeline::new(0.01).fit_features(&features, &targets).unwrap();
        let tight = SalaryPipeline::new(1e6).fit_features(&features, &targets).unwrap();

        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        let spread = |p: &FittedSalaryPipeline| {
            p.predict_features(&features)
                .unwrap()
                .iter()
                .map(|v| (v - mean).abs())
                .sum::<f64>()
        };
        assert!(spread(&tight) < spread(&loose));
        assert!(spread(&tight) < 1.0);
    }

    #[test]
    fn test_artifact_round_trip_is_bit_identical() {
        let (features, _) = training_set();
        let pipeline = fitted();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salary_prediction_pipeline.bin");

        pipeline.save_to_file(&path).unwrap();
        let loaded = FittedSalaryPipeline::load_from_file(&path).unwrap();

        let before = pipeline.predict_features(&features).unwrap();
        let after = loaded.predict_features(&features).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert_eq!(pipeline.feature_names_out(), loaded.feature_names_out());
    }

    #[test]
    fn test_from_bytes_rejects_foreign_file() {
        let result = FittedSalaryPipeline::from_bytes(b"PK\x03\x04 not an artifact");
        assert!(matches!(result, Err(PipelineError::IncompatibleArtifact(_))));
        assert!(matches!(
            FittedSalaryPipeline::from_bytes(&[]),
            Err(PipelineError::IncompatibleArtifact(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_other_format_version() {
        let envelope = ArtifactEnvelope {
            magic: ARTIFACT_MAGIC,
            format_version: FORMAT_VERSION + 1,
            payload: fitted().extract_params().to_bytes().unwrap(),
        };
        let bytes = envelope.to_bytes().unwrap();
        match FittedSalaryPipeline::from_bytes(&bytes) {
            Err(PipelineError::IncompatibleArtifact(msg)) => assert!(msg.contains("version")),
            other => panic!("expected IncompatibleArtifact, got {other:?}"),
        }
    }

    #[test]
    fn test_from_bytes_rejects_truncated_artifact() {
        let bytes = fitted().to_bytes().unwrap();
        let result = FittedSalaryPipeline::from_bytes(&bytes[..bytes.len() - 8]);
        assert!(matches!(result, Err(PipelineError::Serialization(_))));
    }

    #[test]
    fn test_from_params_rejects_inconsistent_model() {
        let mut params = fitted().extract_params();
        params.model.weights.pop();
        assert!(matches!(
            FittedSalaryPipeline::from_params(params),
            Err(PipelineError::IncompatibleArtifact(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = FittedSalaryPipeline::load_from_file("/nonexistent/pipeline.bin");
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }
}
