//! Bootstrap estimate of a region's profit distribution.
//!
//! Each iteration draws a pool of candidate wells **with replacement** from
//! the validation set and computes the profit of drilling the best-predicted
//! wells of that pool. The empirical distribution of those profits gives the
//! expected profit, a percentile confidence interval and the probability of
//! a loss, with no normality assumption.
//!
//! # Reproducibility
//!
//! A single [`Pcg64`] stream is seeded once per call, so the whole sequence of
//! draws, and therefore every reported number, is a pure function of the
//! inputs and [`BootstrapParams::seed`].
//!
//! # Choosing the iteration count
//!
//! The confidence bounds and the loss probability are tail statistics of the
//! sample and converge slowly: with 1000 iterations a 2.5% tail rests on
//! about 25 samples. More iterations stabilize the estimates at a linear cost
//! in run time (each iteration sorts one pool).

use geoprofit_stats::{descriptive, percentiles::Percentiles};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::profit::{self, DimensionMismatchError, Economics};

/// Resampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapParams {
    /// Number of resampled pools. Trades estimate stability for compute time.
    pub iterations: usize,
    /// Candidate wells drawn per iteration.
    pub pool_size: usize,
    /// Central mass of the reported confidence interval, e.g. `0.95`.
    pub confidence_level: f64,
    pub seed: u64,
}

impl Default for BootstrapParams {
    fn default() -> Self {
        Self {
            iterations: 1000,
            pool_size: 500,
            confidence_level: 0.95,
            seed: 12345,
        }
    }
}

/// Summary of a region's bootstrapped profit distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapResult {
    pub mean_profit: f64,
    /// Lower confidence bound, the `(1 - level) / 2` percentile.
    pub ci_lower: f64,
    /// Upper confidence bound, the `(1 + level) / 2` percentile.
    pub ci_upper: f64,
    /// Fraction of iterations with negative profit.
    pub loss_probability: f64,
    /// Profit of every iteration, in draw order.
    #[serde(skip)]
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BootstrapError {
    #[display("{_0}")]
    Dimensions(#[error(not(source))] DimensionMismatchError),
    #[display("bootstrap needs at least one iteration")]
    NoIterations,
    #[display("bootstrap produced a non-finite profit")]
    NonFiniteProfit,
}

impl From<DimensionMismatchError> for BootstrapError {
    fn from(err: DimensionMismatchError) -> Self {
        Self::Dimensions(err)
    }
}

/// Bootstraps the profit distribution of drilling from a validation set.
///
/// # Errors
///
/// * [`DimensionMismatchError::LengthMismatch`] - `actual` and `predicted` differ in length
/// * [`DimensionMismatchError::EmptyPopulation`] - there are no validation wells
/// * [`DimensionMismatchError::TooFewCandidates`] - `pool_size` is smaller than
///   the number of wells to drill
/// * [`DimensionMismatchError::NonFinite`] - a true or predicted value is NaN
///   or infinite
/// * [`BootstrapError::NoIterations`] - `iterations` is zero
/// * [`BootstrapError::NonFiniteProfit`] - the economics turn a pool's
///   profit into NaN or infinity
#[expect(clippy::cast_precision_loss)]
pub fn bootstrap(
    actual: &[f64],
    predicted: &[f64],
    params: &BootstrapParams,
    economics: &Economics,
) -> Result<BootstrapResult, BootstrapError> {
    if actual.len() != predicted.len() {
        return Err(DimensionMismatchError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        }
        .into());
    }
    if actual.is_empty() {
        return Err(DimensionMismatchError::EmptyPopulation.into());
    }
    if let Some(index) = profit::first_non_finite(actual, predicted) {
        return Err(DimensionMismatchError::NonFinite { index }.into());
    }
    if params.iterations == 0 {
        return Err(BootstrapError::NoIterations);
    }

    let mut rng = Pcg64::seed_from_u64(params.seed);
    let mut pool_actual = vec![0.0; params.pool_size];
    let mut pool_predicted = vec![0.0; params.pool_size];
    let mut samples = Vec::with_capacity(params.iterations);
    for _ in 0..params.iterations {
        for (a, p) in pool_actual.iter_mut().zip(&mut pool_predicted) {
            let i = rng.random_range(0..actual.len());
            *a = actual[i];
            *p = predicted[i];
        }
        samples.push(profit::simulate_profit(
            &pool_actual,
            &pool_predicted,
            economics,
        )?);
    }

    if samples.iter().any(|p| !p.is_finite()) {
        return Err(BootstrapError::NonFiniteProfit);
    }

    let mean_profit = descriptive::mean(&samples).unwrap_or(f64::NAN);
    // 100 * 0.95 rounds to exactly 95, so the default points are exactly 2.5 and 97.5
    let central = 100.0 * params.confidence_level;
    let (lower_point, upper_point) = ((100.0 - central) / 2.0, (100.0 + central) / 2.0);
    let mut sorted = samples.clone();
    sorted.sort_by(f64::total_cmp);
    let percentiles = Percentiles::from_sorted(&sorted, &[lower_point, upper_point]);
    let ci_lower = percentiles.get(lower_point).unwrap_or(f64::NAN);
    let ci_upper = percentiles.get(upper_point).unwrap_or(f64::NAN);
    let losses = samples.iter().filter(|&&p| p < 0.0).count();
    let loss_probability = losses as f64 / samples.len() as f64;

    tracing::debug!(
        iterations = params.iterations,
        pool_size = params.pool_size,
        mean_profit,
        ci_lower,
        ci_upper,
        loss_probability,
        "bootstrap finished"
    );

    Ok(BootstrapResult {
        mean_profit,
        ci_lower,
        ci_upper,
        loss_probability,
        samples,
    })
}
