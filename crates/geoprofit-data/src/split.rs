//! Reproducible train/validation partitioning.
//!
//! The split is a random permutation of row indices drawn from a seeded
//! [`Pcg64`] stream: the first `ceil(fraction * n)` permuted indices form the
//! validation set and the rest the training set. The same `(n, fraction, seed)`
//! always produces the same partition, on every platform.

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

/// Row indices of a train/validation partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Number of validation rows for a table of `rows` rows.
///
/// Rounds up, and never exceeds `rows`.
///
/// ```
/// use geoprofit_data::split::validation_len;
///
/// assert_eq!(validation_len(100_000, 0.25), 25_000);
/// assert_eq!(validation_len(10, 0.25), 3);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn validation_len(rows: usize, validation_fraction: f64) -> usize {
    let len = (rows as f64 * validation_fraction.clamp(0.0, 1.0)).ceil() as usize;
    len.min(rows)
}

/// Randomly partitions `0..rows` into training and validation indices.
#[must_use]
pub fn train_validation_split(rows: usize, validation_fraction: f64, seed: u64) -> SplitIndices {
    let mut indices = (0..rows).collect::<Vec<_>>();
    let mut rng = Pcg64::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(validation_len(rows, validation_fraction));
    SplitIndices {
        train,
        validation: indices,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let split = train_validation_split(1000, 0.25, 7);
        assert_eq!(split.validation.len(), 250);
        assert_eq!(split.train.len(), 750);

        let validation = split.validation.iter().collect::<HashSet<_>>();
        let train = split.train.iter().collect::<HashSet<_>>();
        assert!(validation.is_disjoint(&train));
        assert_eq!(validation.len() + train.len(), 1000);
    }

    #[test]
    fn test_same_seed_same_split() {
        assert_eq!(
            train_validation_split(500, 0.25, 12345),
            train_validation_split(500, 0.25, 12345)
        );
    }

    #[test]
    fn test_different_seed_different_split() {
        assert_ne!(
            train_validation_split(500, 0.25, 1).validation,
            train_validation_split(500, 0.25, 2).validation
        );
    }

    #[test]
    fn test_split_is_not_sequential() {
        let split = train_validation_split(400, 0.25, 12345);
        assert_ne!(split.validation, (0..100).collect::<Vec<_>>());
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_validation_len_rounds_up() {
        for rows in [1, 4, 5, 7, 99, 101, 10_001] {
            let len = validation_len(rows, 0.25);
            let exact = rows as f64 * 0.25;
            assert!(len as f64 >= exact && (len as f64) < exact + 1.0);
        }
        assert_eq!(validation_len(0, 0.25), 0);
        assert_eq!(validation_len(3, 1.5), 3);
    }
}
