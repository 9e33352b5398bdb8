//! Profit of drilling the best-predicted wells from a candidate pool.
//!
//! Wells are chosen by their *predicted* reserves, but revenue is realized
//! from their *true* reserves. A model that ranks wells badly therefore
//! shows up directly as lost profit.

use serde::{Deserialize, Serialize};

/// Business parameters of a drilling campaign.
///
/// These come from configuration; nothing here is derived from well data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Economics {
    /// Number of wells actually drilled out of each candidate pool.
    pub n_wells_to_drill: usize,
    /// Total investment for developing the drilled wells.
    pub budget: f64,
    /// Revenue per unit of product (per thousand barrels).
    pub revenue_per_unit: f64,
}

impl Economics {
    /// Mean reserves each drilled well needs for the campaign to break even.
    ///
    /// ```
    /// use geoprofit_analysis::profit::Economics;
    ///
    /// let economics = Economics {
    ///     n_wells_to_drill: 200,
    ///     budget: 10_000_000.0,
    ///     revenue_per_unit: 4_500.0,
    /// };
    /// assert!((economics.break_even_reserves_per_well() - 11.111).abs() < 1e-3);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn break_even_reserves_per_well(&self) -> f64 {
        self.budget / (self.n_wells_to_drill as f64 * self.revenue_per_unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DimensionMismatchError {
    #[display("{actual} true values but {predicted} predicted values")]
    LengthMismatch { actual: usize, predicted: usize },
    #[display("{candidates} candidate wells cannot supply {required} wells to drill")]
    TooFewCandidates { candidates: usize, required: usize },
    #[display("no wells to sample from")]
    EmptyPopulation,
    #[display("non-finite value for well {index}")]
    NonFinite { index: usize },
}

/// Index of the first well whose true or predicted value is NaN or infinite.
pub(crate) fn first_non_finite(actual: &[f64], predicted: &[f64]) -> Option<usize> {
    actual
        .iter()
        .zip(predicted)
        .position(|(a, p)| !a.is_finite() || !p.is_finite())
}

/// Indices of the `count` highest predictions, best first.
///
/// Ties are broken by ascending index, so the selection is fully
/// deterministic.
///
/// ```
/// use geoprofit_analysis::profit::select_top_wells;
///
/// assert_eq!(select_top_wells(&[1.0, 5.0, 3.0, 5.0], 3), vec![1, 3, 2]);
/// ```
#[must_use]
pub fn select_top_wells(predicted: &[f64], count: usize) -> Vec<usize> {
    let mut order = (0..predicted.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| predicted[b].total_cmp(&predicted[a]).then(a.cmp(&b)));
    order.truncate(count);
    order
}

/// Profit of drilling the `n_wells_to_drill` best-predicted wells of a pool.
///
/// `profit = Σ actual[selected] × revenue_per_unit − budget`
///
/// # Errors
///
/// * [`DimensionMismatchError::LengthMismatch`] - the sequences differ in length
/// * [`DimensionMismatchError::TooFewCandidates`] - the pool is smaller than
///   `n_wells_to_drill`
/// * [`DimensionMismatchError::NonFinite`] - a value is NaN or infinite
pub fn simulate_profit(
    actual: &[f64],
    predicted: &[f64],
    economics: &Economics,
) -> Result<f64, DimensionMismatchError> {
    if actual.len() != predicted.len() {
        return Err(DimensionMismatchError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.len() < economics.n_wells_to_drill {
        return Err(DimensionMismatchError::TooFewCandidates {
            candidates: actual.len(),
            required: economics.n_wells_to_drill,
        });
    }
    if let Some(index) = first_non_finite(actual, predicted) {
        return Err(DimensionMismatchError::NonFinite { index });
    }

    let total_product = select_top_wells(predicted, economics.n_wells_to_drill)
        .into_iter()
        .map(|i| actual[i])
        .sum::<f64>();
    Ok(total_product * economics.revenue_per_unit - economics.budget)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg64;

    use super::*;

    const ECONOMICS: Economics = Economics {
        n_wells_to_drill: 200,
        budget: 100_000_000.0,
        revenue_per_unit: 450_000.0,
    };

    #[test]
    fn test_constant_reserves_profit() {
        let actual = vec![100.0; 500];
        let predicted = vec![100.0; 500];
        let profit = simulate_profit(&actual, &predicted, &ECONOMICS).unwrap();
        // 200 * 100 * 450_000 - 100_000_000
        assert_eq!(profit, 8_900_000_000.0);
    }

    #[test]
    fn test_constant_reserves_loss() {
        let economics = Economics {
            n_wells_to_drill: 200,
            budget: 10_000_000.0,
            revenue_per_unit: 450.0,
        };
        let actual = vec![100.0; 500];
        let profit = simulate_profit(&actual, &actual, &economics).unwrap();
        // 200 * 100 * 450 - 10_000_000
        assert_eq!(profit, -1_000_000.0);
    }

    #[test]
    fn test_break_even_volume() {
        let economics = Economics {
            revenue_per_unit: 2_500.0,
            ..ECONOMICS
        };
        assert_eq!(economics.break_even_reserves_per_well(), 200.0);
        let actual = vec![200.0; 300];
        let profit = simulate_profit(&actual, &actual, &economics).unwrap();
        assert_eq!(profit, 0.0);
    }

    #[test]
    fn test_selects_by_prediction_but_pays_on_truth() {
        let economics = Economics {
            n_wells_to_drill: 2,
            budget: 10.0,
            revenue_per_unit: 1.0,
        };
        // Best predictions are wells 0 and 3, whose true reserves are poor
        let actual = [1.0, 50.0, 60.0, 2.0];
        let predicted = [90.0, 10.0, 20.0, 80.0];
        let profit = simulate_profit(&actual, &predicted, &economics).unwrap();
        assert_eq!(profit, 1.0 + 2.0 - 10.0);
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        let economics = Economics {
            n_wells_to_drill: 1,
            budget: 0.0,
            revenue_per_unit: 1.0,
        };
        let actual = [7.0, 3.0];
        let predicted = [5.0, 5.0];
        assert_eq!(simulate_profit(&actual, &predicted, &economics).unwrap(), 7.0);
    }

    #[test]
    fn test_invariant_under_permutation() {
        let actual = (0..500).map(|i| f64::from(i % 97)).collect::<Vec<_>>();
        let predicted = (0..500)
            .map(|i| f64::from((i * 37) % 500) + 0.5)
            .collect::<Vec<_>>();
        let expected = simulate_profit(&actual, &predicted, &ECONOMICS).unwrap();

        let mut rng = Pcg64::seed_from_u64(99);
        for _ in 0..10 {
            let mut pairs = actual
                .iter()
                .copied()
                .zip(predicted.iter().copied())
                .collect::<Vec<_>>();
            pairs.shuffle(&mut rng);
            let (shuffled_actual, shuffled_predicted): (Vec<_>, Vec<_>) =
                pairs.into_iter().unzip();
            let profit = simulate_profit(&shuffled_actual, &shuffled_predicted, &ECONOMICS)
                .unwrap();
            assert_eq!(profit, expected);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = simulate_profit(&[1.0; 300], &[1.0; 299], &ECONOMICS).unwrap_err();
        assert_eq!(
            err,
            DimensionMismatchError::LengthMismatch {
                actual: 300,
                predicted: 299
            }
        );
    }

    #[test]
    fn test_too_few_candidates() {
        let err = simulate_profit(&[1.0; 199], &[1.0; 199], &ECONOMICS).unwrap_err();
        assert_eq!(
            err,
            DimensionMismatchError::TooFewCandidates {
                candidates: 199,
                required: 200
            }
        );
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let economics = Economics {
            n_wells_to_drill: 1,
            budget: 0.0,
            revenue_per_unit: 1.0,
        };
        assert_eq!(
            simulate_profit(&[1.0, 2.0, 3.0], &[1.0, f64::NAN, 3.0], &economics),
            Err(DimensionMismatchError::NonFinite { index: 1 })
        );
        assert_eq!(
            simulate_profit(&[1.0, 2.0, f64::INFINITY], &[1.0, 2.0, 3.0], &economics),
            Err(DimensionMismatchError::NonFinite { index: 2 })
        );
    }
}
