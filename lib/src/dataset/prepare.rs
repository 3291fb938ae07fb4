//! Salary cleanup: drop unknown salaries, derive bounds and the target.

use crate::dataset::record::{JobFeatures, PreparedRecord, RawRecord};
use crate::dataset::salary::parse_salary_estimate;
use crate::dataset::DatasetError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What to do with a salary field that is neither the sentinel nor well formed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedSalaryPolicy {
    /// Log the row, count it, and leave it out.
    #[default]
    Reject,
    /// Stop preparation with [`DatasetError::MalformedSalary`].
    Abort,
}

/// Cleaned rows plus the regression target.
#[derive(Clone, Debug, Default)]
pub struct PreparedDataset {
    pub records: Vec<PreparedRecord>,
    /// Average salary per record, in thousands.
    pub targets: Vec<f64>,
    /// Rows dropped because the salary was the `-1` sentinel.
    pub sentinel_rows: usize,
    /// Rows dropped under [`MalformedSalaryPolicy::Reject`].
    pub rejected_rows: usize,
}

impl PreparedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Model inputs, one per record.
    pub fn features(&self) -> Vec<JobFeatures> {
        self.records.iter().map(|r| r.features.clone()).collect()
    }
}

/// Filter sentinel rows and parse every remaining salary field.
///
/// Row numbers in logs and errors are zero-based positions in `records`.
pub fn prepare(
    records: &[RawRecord],
    policy: MalformedSalaryPolicy,
) -> Result<PreparedDataset, DatasetError> {
    let mut prepared = PreparedDataset::default();

    for (row, record) in records.iter().enumerate() {
        match parse_salary_estimate(&record.salary_estimate) {
            Ok(None) => prepared.sentinel_rows += 1,
            Ok(Some(range)) => {
                let avg_salary = range.average();
                prepared.records.push(PreparedRecord {
                    features: record.features(),
                    min_salary: range.min,
                    max_salary: range.max,
                    avg_salary,
                });
                prepared.targets.push(avg_salary);
            }
            Err(source) => match policy {
                MalformedSalaryPolicy::Abort => {
                    return Err(DatasetError::MalformedSalary {
                        row,
                        value: record.salary_estimate.clone(),
                        source,
                    })
                }
                MalformedSalaryPolicy::Reject => {
                    warn!(row, value = %record.salary_estimate, error = %source, "rejecting row with malformed salary");
                    prepared.rejected_rows += 1;
                }
            },
        }
    }

    info!(
        input = records.len(),
        kept = prepared.len(),
        sentinel = prepared.sentinel_rows,
        rejected = prepared.rejected_rows,
        "prepared salary records"
    );

    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(salary: &str, title: &str) -> RawRecord {
        RawRecord {
            salary_estimate: salary.to_string(),
            job_title: Some(title.to_string()),
            rating: Some(3.5),
            ..RawRecord::default()
        }
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            raw("$80K-$100K (Glassdoor est.)", "Data Scientist"),
            raw("-1", "Data Engineer"),
            raw("$53K-$91K (Glassdoor est.)", "Analyst"),
            raw("Employer Provided Salary:$150K-$160K", "Director"),
        ]
    }

    #[test]
    fn test_prepare_derives_bounds_and_target() {
        let prepared = prepare(&sample(), MalformedSalaryPolicy::Reject).unwrap();

        assert_eq!(prepared.len(), 2);
        let first = &prepared.records[0];
        assert_eq!((first.min_salary, first.max_salary), (80, 100));
        assert_eq!(first.avg_salary, 90.0);
        assert_eq!(prepared.targets, vec![90.0, 72.0]);
    }

    #[test]
    fn test_prepare_drops_sentinel_rows() {
        let prepared = prepare(&sample(), MalformedSalaryPolicy::Reject).unwrap();

        assert_eq!(prepared.sentinel_rows, 1);
        assert!(prepared
            .features()
            .iter()
            .all(|f| f.job_title.as_deref() != Some("Data Engineer")));
    }

    #[test]
    fn test_prepare_reject_counts_malformed() {
        let prepared = prepare(&sample(), MalformedSalaryPolicy::Reject).unwrap();
        assert_eq!(prepared.rejected_rows, 1);
        assert_eq!(prepared.targets.len(), prepared.records.len());
    }

    #[test]
    fn test_prepare_abort_reports_row() {
        let result = prepare(&sample(), MalformedSalaryPolicy::Abort);
        match result {
            Err(DatasetError::MalformedSalary { row, value, .. }) => {
                assert_eq!(row, 3);
                assert!(value.starts_with("Employer Provided"));
            }
            other => panic!("expected MalformedSalary, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_all_sentinel_is_empty() {
        let prepared = prepare(&[raw("-1", "a"), raw("-1", "b")], MalformedSalaryPolicy::Abort).unwrap();
        assert!(prepared.is_empty());
        assert_eq!(prepared.sentinel_rows, 2);
    }

    #[test]
    fn test_prepare_keeps_features() {
        let prepared = prepare(&sample(), MalformedSalaryPolicy::Reject).unwrap();
        let features = prepared.features();
        assert_eq!(features[1].job_title.as_deref(), Some("Analyst"));
        assert_eq!(features[1].rating, Some(3.5));
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: MalformedSalaryPolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, MalformedSalaryPolicy::Abort);
    }
}
