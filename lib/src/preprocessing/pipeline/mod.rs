//! Pipeline utilities for chaining transformers.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`NumericPipeline`] | Chain numeric transformers sequentially |
//! | [`CategoricalPipeline`] | Impute labels, then one-hot encode |

#[allow(clippy::module_inception)]
pub mod pipeline;

pub use pipeline::{
    CategoricalPipeline, CategoricalPipelineParams, FittedCategoricalPipeline,
    FittedNumericPipeline, FittedNumericStep, NumericPipeline, NumericPipelineParams,
    NumericStep, NumericStepParams, PipelineStep,
};
