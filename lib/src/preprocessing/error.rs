//! Errors raised by preprocessing steps.

#[derive(Debug, thiserror::Error)]
pub enum PreprocessingError {
    /// A statistic or block concatenation could not be computed.
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// NaN reached a step that needs complete columns, e.g. the scaler.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Invalid hyperparameter value or unsupported operation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// A category seen at transform time was not learned during fit.
    #[error("Unknown category {value:?} in column {column}")]
    UnknownCategory { column: usize, value: String },
    /// Column referenced by name or index does not exist in the frame.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    /// Column exists but holds the wrong kind of values.
    #[error("Column {name:?} is not {expected}")]
    ColumnKind { name: String, expected: &'static str },
    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
    /// Columns of a frame disagree on the number of rows.
    #[error("Inconsistent rows: column {column:?} has {got} rows, expected {expected}")]
    InconsistentRows {
        column: String,
        expected: usize,
        got: usize,
    },
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_category() {
        let err = PreprocessingError::UnknownCategory {
            column: 2,
            value: "Astronaut".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Astronaut"));
        assert!(msg.contains("column 2"));
    }

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = PreprocessingError::FeatureMismatch {
            expected_features: 5,
            got_features: 3,
        };
        assert!(err.to_string().contains("expected 5 features, got 3"));
    }

    #[test]
    fn test_error_display_column_kind() {
        let err = PreprocessingError::ColumnKind {
            name: "Rating".to_string(),
            expected: "categorical",
        };
        assert!(err.to_string().contains("\"Rating\" is not categorical"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: PreprocessingError = io_err.into();
        assert!(matches!(err, PreprocessingError::IoError(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: PreprocessingError = e.into();
            assert!(matches!(err, PreprocessingError::SerializationError(_)));
        }
    }
}
