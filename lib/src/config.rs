//! Training configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional TOML file, and `SALARY__<SECTION>__<KEY>` environment variables.
//! Command-line flags are applied on top by the binary.

use crate::dataset::MalformedSalaryPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub data: DataConfig,
    pub split: SplitConfig,
    pub model: ModelConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where listings come from and how bad salary text is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub input: PathBuf,
    pub malformed_salary: MalformedSalaryPolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("glassdoor_jobs.csv"),
            malformed_salary: MalformedSalaryPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Holdout fraction, in (0, 1).
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Ridge penalty.
    pub alpha: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub artifact: PathBuf,
    /// Optional JSON file receiving the training report.
    pub report: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from("salary_prediction_pipeline.bin"),
            report: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's targets (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TrainConfig {
    /// Load defaults, then `path` if given, then the environment.
    ///
    /// Values are not validated here so callers can layer overrides first.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let config: TrainConfig = builder
            .add_source(
                Environment::with_prefix("SALARY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: TrainConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let test_size = self.split.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "split.test_size must lie in (0, 1), got {test_size}"
            )));
        }
        let alpha = self.model.alpha;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "model.alpha must be finite and non-negative, got {alpha}"
            )));
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "logging.level {:?} is not a tracing level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_training_script() {
        let config = TrainConfig::default();
        assert_eq!(config.data.input, PathBuf::from("glassdoor_jobs.csv"));
        assert_eq!(config.split.test_size, 0.2);
        assert_eq!(config.split.seed, 42);
        assert_eq!(config.model.alpha, 1.0);
        assert_eq!(
            config.output.artifact,
            PathBuf::from("salary_prediction_pipeline.bin")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = TrainConfig::from_toml_str(
            r#"
            [model]
            alpha = 2.5

            [data]
            malformed_salary = "abort"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.alpha, 2.5);
        assert_eq!(config.data.malformed_salary, MalformedSalaryPolicy::Abort);
        assert_eq!(config.data.input, PathBuf::from("glassdoor_jobs.csv"));
        assert_eq!(config.split, SplitConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for toml in [
            "[split]\ntest_size = 1.0",
            "[split]\ntest_size = 0.0",
            "[model]\nalpha = -1.0",
            "[logging]\nlevel = \"loud\"",
        ] {
            assert!(
                matches!(
                    TrainConfig::from_toml_str(toml).unwrap().validate(),
                    Err(ConfigError::Invalid(_))
                ),
                "accepted {toml:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[split]\nseed = 7\n[output]\nreport = \"report.json\"").unwrap();
        file.flush().unwrap();

        let config = TrainConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.split.seed, 7);
        assert_eq!(config.output.report, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn test_load_defers_validation() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[split]\ntest_size = 1.0").unwrap();
        file.flush().unwrap();

        let mut config = TrainConfig::load(Some(file.path())).unwrap();
        assert!(config.validate().is_err());
        config.split.test_size = 0.2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = TrainConfig::load(Some(Path::new("/nonexistent/train.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
