//! Read-only prediction service over a fitted pipeline.

use crate::dataset::JobFeatures;
use crate::pipeline::{FittedSalaryPipeline, PipelineError};
use std::path::Path;
use std::sync::Arc;

/// Cheap-to-clone handle answering salary estimates.
///
/// The pipeline is loaded once and shared; clones can be handed to other
/// threads and queried concurrently.
#[derive(Clone, Debug)]
pub struct SalaryService {
    pipeline: Arc<FittedSalaryPipeline>,
}

impl SalaryService {
    pub fn new(pipeline: FittedSalaryPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Load the artifact at `path`. Callers treat failure as fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        FittedSalaryPipeline::load_from_file(path).map(Self::new)
    }

    pub fn pipeline(&self) -> &FittedSalaryPipeline {
        &self.pipeline
    }

    /// Estimated salary for one listing, in thousands.
    pub fn estimate(&self, features: &JobFeatures) -> Result<f64, PipelineError> {
        self.pipeline.predict_one(features)
    }

    pub fn estimate_batch(&self, features: &[JobFeatures]) -> Result<Vec<f64>, PipelineError> {
        self.pipeline.predict_features(features)
    }
}
