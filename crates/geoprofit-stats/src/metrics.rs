use crate::descriptive;

/// Accuracy of a set of predictions against observed values.
///
/// # Examples
///
/// ```
/// use geoprofit_stats::metrics::RegressionMetrics;
///
/// let actual = [3.0, 5.0, 7.0];
/// let predicted = [3.0, 5.0, 7.0];
/// let metrics = RegressionMetrics::new(&actual, &predicted).unwrap();
/// assert_eq!(metrics.rmse, 0.0);
/// assert_eq!(metrics.r2, 1.0);
/// assert_eq!(metrics.mean_predicted, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    /// Root mean squared error, `sqrt(mean((actual - predicted)²))`.
    pub rmse: f64,
    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    pub r2: f64,
    /// Mean of the predictions.
    pub mean_predicted: f64,
    /// Mean of the observed values.
    pub mean_actual: f64,
}

impl RegressionMetrics {
    /// Computes all metrics at once.
    ///
    /// Returns `None` if the slices are empty or differ in length.
    ///
    /// When the observed values have zero variance R² is undefined; it is
    /// reported as `1.0` for a perfect fit and `0.0` otherwise.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if actual.len() != predicted.len() {
            return None;
        }
        let mean_actual = descriptive::mean(actual)?;
        let mean_predicted = descriptive::mean(predicted)?;

        let ss_res = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum::<f64>();
        let ss_tot = actual
            .iter()
            .map(|a| (a - mean_actual).powi(2))
            .sum::<f64>();

        let rmse = (ss_res / actual.len() as f64).sqrt();
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Some(Self {
            rmse,
            r2,
            mean_predicted,
            mean_actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 2.0, 2.0, 6.0];
        let metrics = RegressionMetrics::new(&actual, &predicted).unwrap();
        // residuals: -1, 0, 1, -2 => SS_res = 6, SS_tot = 5
        assert!((metrics.rmse - 1.5_f64.sqrt()).abs() < 1e-12);
        assert!((metrics.r2 - (1.0 - 6.0 / 5.0)).abs() < 1e-12);
        assert_eq!(metrics.mean_predicted, 3.0);
        assert_eq!(metrics.mean_actual, 2.5);
    }

    #[test]
    fn test_mean_prediction_gives_zero_r2() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [2.0, 2.0, 2.0];
        let metrics = RegressionMetrics::new(&actual, &predicted).unwrap();
        assert_eq!(metrics.r2, 0.0);
    }

    #[test]
    fn test_constant_actuals() {
        let exact = RegressionMetrics::new(&[4.0, 4.0], &[4.0, 4.0]).unwrap();
        assert_eq!(exact.r2, 1.0);
        let off = RegressionMetrics::new(&[4.0, 4.0], &[3.0, 5.0]).unwrap();
        assert_eq!(off.r2, 0.0);
        assert_eq!(off.rmse, 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(RegressionMetrics::new(&[], &[]).is_none());
        assert!(RegressionMetrics::new(&[1.0], &[1.0, 2.0]).is_none());
    }
}
