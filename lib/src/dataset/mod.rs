//! Job-listing ingest and salary cleanup.
//!
//! The flow from a scraped CSV to model inputs:
//!
//! 1. [`load_csv`] reads [`RawRecord`]s, matching columns by header name.
//! 2. [`prepare`] drops `-1` salaries, parses `"$80K-$100K (...)"` into a
//!    [`SalaryRange`], and derives the average salary target.
//! 3. [`train_test_split`] picks a seeded holdout.
//!
//! # Example
//!
//! ```ignore
//! use salary_estimator::dataset::{load_csv, prepare, train_test_split, MalformedSalaryPolicy};
//!
//! let raw = load_csv("glassdoor_jobs.csv")?;
//! let prepared = prepare(&raw, MalformedSalaryPolicy::Reject)?;
//! let split = train_test_split(prepared.len(), 0.2, 42)?;
//! ```

pub mod loader;
pub mod prepare;
pub mod record;
pub mod salary;
pub mod split;

pub use loader::{load_csv, read_records};
pub use prepare::{prepare, MalformedSalaryPolicy, PreparedDataset};
pub use record::{JobFeatures, PreparedRecord, RawRecord, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
pub use salary::{parse_salary_estimate, SalaryParseError, SalaryRange, SALARY_SENTINEL};
pub use split::{train_test_split, SplitIndices};

/// Errors raised while reading or cleaning listings.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The CSV could not be opened, or a row did not match the expected columns.
    #[error("reading {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: malformed salary estimate {value:?}")]
    MalformedSalary {
        /// Zero-based position among the data rows, header excluded.
        row: usize,
        value: String,
        #[source]
        source: SalaryParseError,
    },
    #[error("invalid split: {0}")]
    InvalidSplit(String),
}
