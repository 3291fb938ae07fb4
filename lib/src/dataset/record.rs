//! Row types of the job-listings dataset.

use crate::preprocessing::{FeatureFrame, PreprocessingError};
use serde::{Deserialize, Deserializer, Serialize};

/// Numeric model inputs, in design-matrix order.
pub const NUMERIC_FEATURES: [&str; 2] = ["Rating", "Founded"];

/// Categorical model inputs, in design-matrix order.
pub const CATEGORICAL_FEATURES: [&str; 5] = [
    "Job Title",
    "Location",
    "Industry",
    "Sector",
    "Type of ownership",
];

/// One listing as it appears in the CSV. Unlisted columns are ignored.
///
/// The dataset marks unknown values with `-1`; those and empty cells are
/// read as `None`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Salary Estimate")]
    pub salary_estimate: String,
    #[serde(rename = "Job Title", deserialize_with = "placeholder_text")]
    pub job_title: Option<String>,
    #[serde(rename = "Location", deserialize_with = "placeholder_text")]
    pub location: Option<String>,
    #[serde(rename = "Industry", deserialize_with = "placeholder_text")]
    pub industry: Option<String>,
    #[serde(rename = "Sector", deserialize_with = "placeholder_text")]
    pub sector: Option<String>,
    #[serde(rename = "Type of ownership", deserialize_with = "placeholder_text")]
    pub ownership: Option<String>,
    #[serde(rename = "Rating", deserialize_with = "placeholder_number")]
    pub rating: Option<f64>,
    #[serde(rename = "Founded", deserialize_with = "placeholder_number")]
    pub founded: Option<i32>,
}

impl RawRecord {
    pub fn features(&self) -> JobFeatures {
        JobFeatures {
            job_title: self.job_title.clone(),
            location: self.location.clone(),
            industry: self.industry.clone(),
            sector: self.sector.clone(),
            ownership: self.ownership.clone(),
            rating: self.rating,
            founded: self.founded,
        }
    }
}

fn is_placeholder(cell: &str) -> bool {
    cell.is_empty() || cell == "-1" || cell == "-1.0"
}

fn placeholder_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?;
    Ok(cell
        .map(|s| s.trim().to_string())
        .filter(|s| !is_placeholder(s)))
}

fn placeholder_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let cell = Option::<String>::deserialize(deserializer)?;
    match cell.as_deref().map(str::trim) {
        None => Ok(None),
        Some(s) if is_placeholder(s) => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// The seven attributes the salary model consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFeatures {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub ownership: Option<String>,
    pub rating: Option<f64>,
    pub founded: Option<i32>,
}

impl JobFeatures {
    /// Column-major frame with one row per listing, named after the CSV headers.
    pub fn to_frame(rows: &[JobFeatures]) -> Result<FeatureFrame, PreprocessingError> {
        FeatureFrame::new()
            .with_numeric("Rating", rows.iter().map(|r| r.rating).collect())?
            .with_numeric(
                "Founded",
                rows.iter().map(|r| r.founded.map(f64::from)).collect(),
            )?
            .with_categorical("Job Title", rows.iter().map(|r| r.job_title.clone()).collect())?
            .with_categorical("Location", rows.iter().map(|r| r.location.clone()).collect())?
            .with_categorical("Industry", rows.iter().map(|r| r.industry.clone()).collect())?
            .with_categorical("Sector", rows.iter().map(|r| r.sector.clone()).collect())?
            .with_categorical(
                "Type of ownership",
                rows.iter().map(|r| r.ownership.clone()).collect(),
            )
    }
}

/// A listing with a usable salary: features plus derived salary bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRecord {
    pub features: JobFeatures,
    pub min_salary: i64,
    pub max_salary: i64,
    pub avg_salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::Column;

    const CSV: &str = "\
Job Title,Salary Estimate,Rating,Company Name,Location,Founded,Type of ownership,Industry,Sector
Data Scientist,$53K-$91K (Glassdoor est.),3.8,Tecolote Research,\"Albuquerque, NM\",1973,Company - Private,Aerospace & Defense,Aerospace & Defense
Data Analyst,-1,-1.0,Acme,\"New York, NY\",-1,-1,-1,
";

    fn read(csv: &str) -> Vec<RawRecord> {
        csv::Reader::from_reader(csv.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_raw_record_reads_named_columns() {
        let rows = read(CSV);
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.salary_estimate, "$53K-$91K (Glassdoor est.)");
        assert_eq!(first.job_title.as_deref(), Some("Data Scientist"));
        assert_eq!(first.location.as_deref(), Some("Albuquerque, NM"));
        assert_eq!(first.rating, Some(3.8));
        assert_eq!(first.founded, Some(1973));
        assert_eq!(first.ownership.as_deref(), Some("Company - Private"));
    }

    #[test]
    fn test_raw_record_placeholders_are_missing() {
        let second = &read(CSV)[1];
        assert_eq!(second.salary_estimate, "-1");
        assert_eq!(second.rating, None);
        assert_eq!(second.founded, None);
        assert_eq!(second.ownership, None);
        assert_eq!(second.industry, None);
        assert_eq!(second.sector, None);
    }

    #[test]
    fn test_raw_record_rejects_garbage_rating() {
        let csv = "Salary Estimate,Job Title,Location,Industry,Sector,Type of ownership,Rating,Founded\n\
                   $1K-$2K,a,b,c,d,e,great,1999\n";
        let result: Result<Vec<RawRecord>, _> =
            csv::Reader::from_reader(csv.as_bytes()).deserialize().collect();
        assert!(result.is_err());
    }

    #[test]
    fn test_to_frame_layout() {
        let rows: Vec<JobFeatures> = read(CSV).iter().map(RawRecord::features).collect();
        let frame = JobFeatures::to_frame(&rows).unwrap();

        assert_eq!(frame.n_rows(), 2);
        let mut expected: Vec<&str> = NUMERIC_FEATURES.to_vec();
        expected.extend(CATEGORICAL_FEATURES);
        assert_eq!(frame.column_names(), expected.as_slice());
        assert_eq!(
            frame.column("Founded"),
            Some(&Column::Numeric(vec![Some(1973.0), None]))
        );
    }
}
