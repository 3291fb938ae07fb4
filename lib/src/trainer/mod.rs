//! End-to-end training run.
//!
//! [`Trainer::run`] loads listings, cleans salaries, holds out a seeded test
//! split, fits the [`SalaryPipeline`] on the training rows only, scores the
//! holdout and writes the artifact.

use crate::config::TrainConfig;
use crate::dataset::{self, JobFeatures, PreparedDataset, RawRecord};
use crate::metrics::RegressionMetrics;
use crate::pipeline::{FittedSalaryPipeline, PipelineError, SalaryPipeline};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub input_rows: usize,
    pub sentinel_rows: usize,
    pub rejected_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub n_features: usize,
    pub alpha: f64,
    pub seed: u64,
    pub train_metrics: RegressionMetrics,
    pub test_metrics: RegressionMetrics,
    pub artifact: PathBuf,
    pub elapsed_ms: u64,
}

/// Runs training from a [`TrainConfig`].
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Read the configured CSV, then train.
    pub fn run(&self) -> Result<TrainingReport, PipelineError> {
        let records = dataset::load_csv(&self.config.data.input)?;
        self.run_on_records(&records)
    }

    /// Train on already loaded listings and persist the artifact.
    pub fn run_on_records(&self, records: &[RawRecord]) -> Result<TrainingReport, PipelineError> {
        let (fitted, mut report) = self.fit(records)?;

        fitted.save_to_file(&self.config.output.artifact)?;
        report.artifact = self.config.output.artifact.clone();

        if let Some(path) = &self.config.output.report {
            let json = serde_json::to_vec_pretty(&report)
                .map_err(|e| PipelineError::Serialization(e.to_string()))?;
            std::fs::write(path, json)?;
            info!(path = %path.display(), "wrote training report");
        }

        Ok(report)
    }

    /// Train and evaluate without touching the filesystem.
    pub fn fit(
        &self,
        records: &[RawRecord],
    ) -> Result<(FittedSalaryPipeline, TrainingReport), PipelineError> {
        let started = Instant::now();
        let config = &self.config;
        config.validate()?;

        let prepared = dataset::prepare(records, config.data.malformed_salary)?;
        let split = dataset::train_test_split(prepared.len(), config.split.test_size, config.split.seed)?;
        info!(
            train = split.train.len(),
            test = split.test.len(),
            seed = config.split.seed,
            "split prepared rows"
        );

        let (train_x, train_y) = subset(&prepared, &split.train);
        let (test_x, test_y) = subset(&prepared, &split.test);

        let fitted = SalaryPipeline::new(config.model.alpha).fit_features(&train_x, &train_y)?;

        let train_metrics = evaluate(&fitted, &train_x, &train_y)?;
        let test_metrics = evaluate(&fitted, &test_x, &test_y)?;
        info!(
            mae = test_metrics.mae,
            rmse = test_metrics.rmse,
            r2 = test_metrics.r2,
            "holdout evaluation"
        );

        let report = TrainingReport {
            input_rows: records.len(),
            sentinel_rows: prepared.sentinel_rows,
            rejected_rows: prepared.rejected_rows,
            train_rows: train_y.len(),
            test_rows: test_y.len(),
            n_features: fitted.feature_names_out().len(),
            alpha: config.model.alpha,
            seed: config.split.seed,
            train_metrics,
            test_metrics,
            artifact: PathBuf::new(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        Ok((fitted, report))
    }
}

fn subset(prepared: &PreparedDataset, indices: &[usize]) -> (Vec<JobFeatures>, Vec<f64>) {
    indices
        .iter()
        .map(|&i| (prepared.records[i].features.clone(), prepared.targets[i]))
        .unzip()
}

fn evaluate(
    fitted: &FittedSalaryPipeline,
    features: &[JobFeatures],
    targets: &[f64],
) -> Result<RegressionMetrics, PipelineError> {
    let predictions = fitted.predict_features(features)?;
    Ok(RegressionMetrics::compute(targets, &predictions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MalformedSalaryPolicy;

    fn record(salary: &str, title: &str, sector: &str, rating: f64, founded: i32) -> RawRecord {
        RawRecord {
            salary_estimate: salary.to_string(),
            job_title: Some(title.to_string()),
            location: Some("Boston, MA".to_string()),
            industry: Some("Internet".to_string()),
            sector: Some(sector.to_string()),
            ownership: Some("Company - Public".to_string()),
            rating: Some(rating),
            founded: Some(founded),
        }
    }

    fn listings() -> Vec<RawRecord> {
        let titles = ["Data Scientist", "Data Engineer", "Data Analyst"];
        let sectors = ["Finance", "Information Technology"];
        let mut rows = Vec::new();
        for i in 0..30 {
            let low = 50 + (i * 7) % 60;
            rows.push(record(
                &format!("${}K-${}K (Glassdoor est.)", low, low + 30),
                titles[i % 3],
                sectors[i % 2],
                3.0 + (i % 5) as f64 * 0.3,
                1980 + i as i32,
            ));
        }
        rows.push(record("-1", "Data Scientist", "Finance", 4.0, 2000));
        rows.push(record("competitive", "Data Scientist", "Finance", 4.0, 2000));
        rows
    }

    #[test]
    fn test_fit_reports_split_and_counts() {
        let (fitted, report) = Trainer::new(TrainConfig::default()).fit(&listings()).unwrap();

        assert_eq!(report.input_rows, 32);
        assert_eq!(report.sentinel_rows, 1);
        assert_eq!(report.rejected_rows, 1);
        assert_eq!(report.test_rows, 6);
        assert_eq!(report.train_rows, 24);
        assert_eq!(report.test_metrics.n_samples, 6);
        assert_eq!(report.n_features, fitted.feature_names_out().len());
        assert!(report.test_metrics.rmse.is_finite());
    }

    #[test]
    fn test_fit_is_reproducible_for_seed() {
        let trainer = Trainer::new(TrainConfig::default());
        let (_, a) = trainer.fit(&listings()).unwrap();
        let (_, b) = trainer.fit(&listings()).unwrap();
        assert_eq!(a.test_metrics, b.test_metrics);
    }

    #[test]
    fn test_abort_policy_stops_training() {
        let mut config = TrainConfig::default();
        config.data.malformed_salary = MalformedSalaryPolicy::Abort;
        let result = Trainer::new(config).fit(&listings());
        assert!(matches!(result, Err(PipelineError::Dataset(_))));
    }

    #[test]
    fn test_run_writes_artifact_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TrainConfig::default();
        config.output.artifact = dir.path().join("model.bin");
        config.output.report = Some(dir.path().join("report.json"));

        let report = Trainer::new(config.clone())
            .run_on_records(&listings())
            .unwrap();
        assert_eq!(report.artifact, config.output.artifact);

        let loaded = FittedSalaryPipeline::load_from_file(&config.output.artifact).unwrap();
        assert_eq!(loaded.feature_names_out().len(), report.n_features);

        let json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        let parsed: TrainingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.test_rows, report.test_rows);
    }

    #[test]
    fn test_too_few_rows_fail_split() {
        let rows = vec![record("$50K-$60K", "Data Scientist", "Finance", 4.0, 2000)];
        let result = Trainer::new(TrainConfig::default()).fit(&rows);
        assert!(matches!(result, Err(PipelineError::Dataset(_))));
    }
}
