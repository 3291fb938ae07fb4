//! Parsing of the free-text `Salary Estimate` field.
//!
//! Accepted shapes:
//!
//! ```text
//! "-1"                              sentinel, salary unknown
//! "$80K-$100K"
//! "$80K-$100K (Glassdoor est.)"     trailer after whitespace is ignored
//! ```

use serde::{Deserialize, Serialize};

/// Value the source uses for "salary unknown".
pub const SALARY_SENTINEL: &str = "-1";

/// Salary bounds in thousands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: i64,
    pub max: i64,
}

impl SalaryRange {
    /// Midpoint of the range, in thousands.
    pub fn average(&self) -> f64 {
        (self.min + self.max) as f64 / 2.0
    }
}

/// A non-sentinel salary field that does not follow the grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SalaryParseError {
    #[error("salary estimate {0:?} has no '-' between bounds")]
    MissingSeparator(String),
    #[error("salary estimate {text:?} has a non-integer {bound} bound")]
    InvalidBound { text: String, bound: &'static str },
    #[error("salary estimate {text:?} has min {min} above max {max}")]
    InvertedRange { text: String, min: i64, max: i64 },
}

/// Parse a salary field into bounds.
///
/// Returns `Ok(None)` for the sentinel. Every `$` and `K` is stripped, the
/// remainder is split at the first `-`, the lower token is the minimum and
/// the first whitespace-separated word of the upper token is the maximum.
pub fn parse_salary_estimate(text: &str) -> Result<Option<SalaryRange>, SalaryParseError> {
    let trimmed = text.trim();
    if trimmed == SALARY_SENTINEL {
        return Ok(None);
    }

    let cleaned: String = trimmed.chars().filter(|c| !matches!(c, '$' | 'K')).collect();
    let (lower, upper) = cleaned
        .split_once('-')
        .ok_or_else(|| SalaryParseError::MissingSeparator(text.to_string()))?;

    let min = lower
        .trim()
        .parse::<i64>()
        .map_err(|_| SalaryParseError::InvalidBound {
            text: text.to_string(),
            bound: "lower",
        })?;
    let max = upper
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse::<i64>().ok())
        .ok_or_else(|| SalaryParseError::InvalidBound {
            text: text.to_string(),
            bound: "upper",
        })?;

    if min > max {
        return Err(SalaryParseError::InvertedRange {
            text: text.to_string(),
            min,
            max,
        });
    }

    Ok(Some(SalaryRange { min, max }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glassdoor_estimate() {
        let range = parse_salary_estimate("$80K-$100K (Glassdoor est.)")
            .unwrap()
            .unwrap();
        assert_eq!(range, SalaryRange { min: 80, max: 100 });
        assert_eq!(range.average(), 90.0);
    }

    #[test]
    fn test_parse_without_trailer() {
        let range = parse_salary_estimate("$53K-$91K").unwrap().unwrap();
        assert_eq!((range.min, range.max), (53, 91));
        assert_eq!(range.average(), 72.0);
    }

    #[test]
    fn test_parse_half_thousand_average() {
        let range = parse_salary_estimate("$79K-$106K (Glassdoor est.)")
            .unwrap()
            .unwrap();
        assert_eq!(range.average(), 92.5);
    }

    #[test]
    fn test_parse_sentinel() {
        assert_eq!(parse_salary_estimate("-1"), Ok(None));
        assert_eq!(parse_salary_estimate(" -1 "), Ok(None));
    }

    #[test]
    fn test_parse_equal_bounds() {
        let range = parse_salary_estimate("$100K-$100K").unwrap().unwrap();
        assert_eq!(range.average(), 100.0);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_salary_estimate("competitive"),
            Err(SalaryParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_salary_estimate("Employer Provided Salary:$150K-$160K"),
            Err(SalaryParseError::InvalidBound { bound: "lower", .. })
        ));
        assert!(matches!(
            parse_salary_estimate("$80K-"),
            Err(SalaryParseError::InvalidBound { bound: "upper", .. })
        ));
        assert!(matches!(
            parse_salary_estimate(""),
            Err(SalaryParseError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_parse_inverted_range() {
        assert!(matches!(
            parse_salary_estimate("$120K-$90K"),
            Err(SalaryParseError::InvertedRange { min: 120, max: 90, .. })
        ));
    }

    #[test]
    fn test_parse_error_names_text() {
        let err = parse_salary_estimate("$abcK-$90K").unwrap_err();
        assert!(err.to_string().contains("$abcK-$90K"));
    }
}
