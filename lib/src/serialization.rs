//! Serialization of fitted parameters.
//!
//! Fitted transformers and models expose their learned state as plain-data
//! parameter structs. Anything that derives serde's traits gets a bincode
//! byte representation through the blanket impl below.

use std::error::Error;
use std::path::Path;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implementors should contain only plain data (`Vec<f64>`, strings, scalars).
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Write the serialized parameters to `path`.
    fn write_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Coefficients {
        weights: Vec<f64>,
        label: String,
    }

    #[test]
    fn test_blanket_impl_round_trip() {
        let params = Coefficients {
            weights: vec![0.1, -2.5, f64::MAX],
            label: "ridge".to_string(),
        };
        let bytes = params.to_bytes().unwrap();
        let restored = Coefficients::from_bytes(&bytes).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_from_bytes_rejects_truncated_input() {
        let params = Coefficients {
            weights: vec![1.0, 2.0],
            label: "x".to_string(),
        };
        let bytes = params.to_bytes().unwrap();
        assert!(Coefficients::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }
}
