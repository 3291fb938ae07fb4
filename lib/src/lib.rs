//! # salary-estimator
//!
//! Salary estimation for scraped Glassdoor job listings: salary-text
//! cleanup, a typed preprocessing pipeline and a closed-form ridge
//! regressor, persisted as a single artifact.
//!
//! ## Core Design Principles
//!
//! - **Fit/inference separation**: unfitted values hold hyperparameters;
//!   fitting returns a different type holding only what prediction needs.
//! - **Learned state is plain data**: every fitted component round-trips
//!   through a serde parameter struct, so a reloaded pipeline predicts
//!   bit-identically.
//! - **Missing is not an error**: absent attributes are imputed and unseen
//!   categories contribute nothing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use salary_estimator::dataset::{load_csv, prepare, MalformedSalaryPolicy};
//! use salary_estimator::pipeline::SalaryPipeline;
//!
//! let raw = load_csv("glassdoor_jobs.csv")?;
//! let prepared = prepare(&raw, MalformedSalaryPolicy::Reject)?;
//!
//! let fitted = SalaryPipeline::default().fit_features(&prepared.features(), &prepared.targets)?;
//! fitted.save_to_file("salary_prediction_pipeline.bin")?;
//!
//! let estimate = fitted.predict_one(&prepared.features()[0])?;
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: CSV ingest, salary parsing, seeded holdout split
//! - `preprocessing`: imputers, scaler, one-hot encoder, column transformer
//! - `model`: ridge regression and the fitted linear model
//! - `pipeline`: preprocessing plus model as one persistable unit
//! - `trainer`: the load, split, fit, evaluate, persist run
//! - `service`: shareable read-only prediction handle

pub mod config;

/// Listing ingest, salary cleanup and train/holdout splitting.
pub mod dataset;

pub mod metrics;

/// Regression models with a strict fit/inference split.
pub mod model;

pub mod pipeline;

/// Data preprocessing transformers for the salary pipeline.
pub mod preprocessing;

/// Byte encoding of fitted parameters.
pub mod serialization;

pub mod service;

/// Training run orchestration.
pub mod trainer;

pub use dataset::JobFeatures;
pub use pipeline::{FittedSalaryPipeline, PipelineError, SalaryPipeline};
pub use service::SalaryService;
