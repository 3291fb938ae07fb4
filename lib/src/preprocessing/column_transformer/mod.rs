//! ColumnTransformer for applying different pipelines to different columns.
//!
//! This module provides the `ColumnTransformer` which routes named columns of
//! a [`FeatureFrame`](crate::preprocessing::FeatureFrame) through numeric or
//! categorical pipelines and stitches the outputs into one design matrix.

#[allow(clippy::module_inception)]
mod column_transformer;

pub use column_transformer::{
    ColumnSpec, ColumnTransformer, ColumnTransformerParams, ColumnTransformerStep,
    FittedColumnTransformer, FittedColumnTransformerStep, StepKindParams, StepParams,
};
