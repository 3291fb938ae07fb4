//! Command-line entry point.
//!
//!   `salary-estimator train --config train.toml --alpha 0.5`
//!   `salary-estimator predict --model salary_prediction_pipeline.bin --title "Data Scientist" --rating 4.1`

use anyhow::{anyhow, bail, Context, Result};
use salary_estimator::{
    config::TrainConfig, dataset::JobFeatures, service::SalaryService, trainer::Trainer,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
salary-estimator

  train   [--config <toml>] [--input <csv>] [--output <bin>] [--report <json>]
          [--alpha <f64>] [--seed <u64>] [--test-size <f64>]

  predict --model <bin> [--title <s>] [--location <s>] [--industry <s>]
          [--sector <s>] [--ownership <s>] [--rating <f64>] [--founded <i32>]

Logging honours RUST_LOG, defaulting to salary_estimator=<logging.level>.
";

struct TrainArgs {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    alpha: Option<f64>,
    seed: Option<u64>,
    test_size: Option<f64>,
}

struct PredictArgs {
    model: PathBuf,
    features: JobFeatures,
}

enum Command {
    Train(TrainArgs),
    Predict(PredictArgs),
    Help,
}

fn value<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<String> {
    it.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn parsed<T, I>(it: &mut I, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    I: Iterator<Item = String>,
{
    let raw = value(it, flag)?;
    raw.parse()
        .with_context(|| format!("invalid value {raw:?} for {flag}"))
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Command> {
    let Some(command) = it.next() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "train" => {
            let mut args = TrainArgs {
                config: None,
                input: None,
                output: None,
                report: None,
                alpha: None,
                seed: None,
                test_size: None,
            };
            while let Some(flag) = it.next() {
                match flag.as_str() {
                    "--config" => args.config = Some(value(&mut it, &flag)?.into()),
                    "--input" => args.input = Some(value(&mut it, &flag)?.into()),
                    "--output" => args.output = Some(value(&mut it, &flag)?.into()),
                    "--report" => args.report = Some(value(&mut it, &flag)?.into()),
                    "--alpha" => args.alpha = Some(parsed(&mut it, &flag)?),
                    "--seed" => args.seed = Some(parsed(&mut it, &flag)?),
                    "--test-size" => args.test_size = Some(parsed(&mut it, &flag)?),
                    other => bail!("unknown train option {other:?}\n\n{USAGE}"),
                }
            }
            Ok(Command::Train(args))
        }
        "predict" => {
            let mut model = None;
            let mut features = JobFeatures::default();
            while let Some(flag) = it.next() {
                match flag.as_str() {
                    "--model" => model = Some(PathBuf::from(value(&mut it, &flag)?)),
                    "--title" => features.job_title = Some(value(&mut it, &flag)?),
                    "--location" => features.location = Some(value(&mut it, &flag)?),
                    "--industry" => features.industry = Some(value(&mut it, &flag)?),
                    "--sector" => features.sector = Some(value(&mut it, &flag)?),
                    "--ownership" => features.ownership = Some(value(&mut it, &flag)?),
                    "--rating" => features.rating = Some(parsed(&mut it, &flag)?),
                    "--founded" => features.founded = Some(parsed(&mut it, &flag)?),
                    other => bail!("unknown predict option {other:?}\n\n{USAGE}"),
                }
            }
            let model = model.ok_or_else(|| anyhow!("predict requires --model <bin>"))?;
            Ok(Command::Predict(PredictArgs { model, features }))
        }
        "--help" | "-h" | "help" => Ok(Command::Help),
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    }
}

/// A non-empty `RUST_LOG` wins over the configured level.
fn log_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("parsing {}={directives:?}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(format!("salary_estimator={level}"))
            .with_context(|| format!("parsing log level {level:?}")),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level, rust_log.as_deref())?)
        .init();
    Ok(())
}

/// File and environment values, then command-line overrides, then validation.
fn train_config(args: &TrainArgs) -> Result<TrainConfig> {
    let mut config = TrainConfig::load(args.config.as_deref()).context("loading training config")?;
    if let Some(input) = &args.input {
        config.data.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output.artifact = output.clone();
    }
    if args.report.is_some() {
        config.output.report = args.report.clone();
    }
    if let Some(alpha) = args.alpha {
        config.model.alpha = alpha;
    }
    if let Some(seed) = args.seed {
        config.split.seed = seed;
    }
    if let Some(test_size) = args.test_size {
        config.split.test_size = test_size;
    }
    config.validate()?;
    Ok(config)
}

fn train(args: TrainArgs) -> Result<()> {
    let config = train_config(&args)?;

    init_logging(&config.logging.level)?;
    info!(input = %config.data.input.display(), "starting training");

    let report = Trainer::new(config)
        .run()
        .context("training salary pipeline")?;

    println!(
        "trained on {} rows, evaluated on {} rows ({} features)",
        report.train_rows, report.test_rows, report.n_features
    );
    println!(
        "holdout MAE {:.2}K  RMSE {:.2}K  R² {:.3}",
        report.test_metrics.mae, report.test_metrics.rmse, report.test_metrics.r2
    );
    println!("artifact written to {}", report.artifact.display());
    Ok(())
}

fn predict(args: PredictArgs) -> Result<()> {
    init_logging("warn")?;
    let service = SalaryService::load(&args.model)
        .with_context(|| format!("loading model from {}", args.model.display()))?;
    let estimate = service.estimate(&args.features)?;
    println!("Estimated salary: ${estimate:.2}K");
    Ok(())
}

fn main() -> Result<()> {
    match parse_args(std::env::args().skip(1))? {
        Command::Train(args) => train(args),
        Command::Predict(args) => predict(args),
        Command::Help => {
            print!("{USAGE}");
            Ok(())
        }
    }
}
