//! Seeded train/holdout split of row indices.

use crate::dataset::DatasetError;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Row positions of each side of a split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded generator and cut off the holdout.
///
/// The first `ceil(n * test_size)` shuffled positions form the holdout and
/// the rest the training split. The same `(n, test_size, seed)` always gives
/// the same split.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Result<SplitIndices, DatasetError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DatasetError::InvalidSplit(format!(
            "test_size must lie in (0, 1), got {test_size}"
        )));
    }

    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(DatasetError::InvalidSplit(format!(
            "{n} rows cannot be split with test_size {test_size} into two non-empty sides"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_round_holdout_up() {
        let split = train_test_split(11, 0.2, 42).unwrap();
        // ceil(11 * 0.2) = 3
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn test_split_is_partition() {
        let split = train_test_split(100, 0.2, 7).unwrap();
        let train: HashSet<_> = split.train.iter().copied().collect();
        let test: HashSet<_> = split.test.iter().copied().collect();

        assert!(train.is_disjoint(&test));
        assert_eq!(train.len() + test.len(), 100);
        assert!(train.union(&test).all(|&i| i < 100));
    }

    #[test]
    fn test_split_is_reproducible() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(10, bad, 42),
                Err(DatasetError::InvalidSplit(_))
            ));
        }
    }

    #[test]
    fn test_split_rejects_too_few_rows() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(2, 0.2, 42).is_ok());
    }
}
