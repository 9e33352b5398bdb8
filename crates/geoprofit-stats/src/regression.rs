//! Ordinary least squares regression with an intercept.
//!
//! [`LinearModel::fit`] minimizes the sum of squared residuals between the
//! targets and `intercept + coefficients · features`. No regularization or
//! feature scaling is applied by the caller.
//!
//! # Numerical approach
//!
//! Features and targets are mean-centred first, the centred normal equations
//! `XᵀX β = Xᵀy` are solved by Gaussian elimination, and the intercept is
//! recovered as `ȳ - β·x̄`. Centring keeps the system well conditioned when
//! features have large offsets, so unscaled inputs are fine.
//!
//! Rank deficiency is judged per feature against its own sum of squares, so
//! features on wildly different scales do not mask each other. A constant or
//! linearly dependent feature fails with [`FitError::Singular`] instead of
//! producing huge coefficients.

/// Relative pivot size below which the normal equations are treated as singular.
const SINGULARITY_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("feature rows ({features}) and targets ({targets}) differ in length")]
    LengthMismatch { features: usize, targets: usize },
    #[display("{samples} samples cannot determine {required} model parameters")]
    TooFewSamples { samples: usize, required: usize },
    #[display("non-finite value in sample #{index}")]
    NonFinite { index: usize },
    #[display("features are linearly dependent (singular design matrix)")]
    Singular,
}

/// A fitted linear mapping from `N` features to a scalar prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel<const N: usize> {
    /// Per-feature weights.
    pub coefficients: [f64; N],
    /// Constant term.
    pub intercept: f64,
}

impl<const N: usize> LinearModel<N> {
    /// Number of fitted parameters (coefficients plus intercept).
    pub const PARAMETER_COUNT: usize = N + 1;

    /// Fits the model by ordinary least squares.
    ///
    /// # Errors
    ///
    /// * [`FitError::LengthMismatch`] - `features` and `targets` differ in length
    /// * [`FitError::TooFewSamples`] - fewer samples than [`Self::PARAMETER_COUNT`]
    /// * [`FitError::NonFinite`] - a feature or target is NaN or infinite
    /// * [`FitError::Singular`] - the centred features are linearly dependent
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(features: &[[f64; N]], targets: &[f64]) -> Result<Self, FitError> {
        if features.len() != targets.len() {
            return Err(FitError::LengthMismatch {
                features: features.len(),
                targets: targets.len(),
            });
        }
        if features.len() < Self::PARAMETER_COUNT {
            return Err(FitError::TooFewSamples {
                samples: features.len(),
                required: Self::PARAMETER_COUNT,
            });
        }
        if let Some(index) = features
            .iter()
            .zip(targets)
            .position(|(x, y)| !y.is_finite() || x.iter().any(|v| !v.is_finite()))
        {
            return Err(FitError::NonFinite { index });
        }

        let n = features.len() as f64;
        let mut x_mean = [0.0; N];
        for row in features {
            for (m, v) in x_mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut x_mean {
            *m /= n;
        }
        let y_mean = targets.iter().sum::<f64>() / n;

        // Centred Gram matrix and right-hand side
        let mut gram = [[0.0; N]; N];
        let mut rhs = [0.0; N];
        for (row, &y) in features.iter().zip(targets) {
            let centred: [f64; N] = std::array::from_fn(|j| row[j] - x_mean[j]);
            let yc = y - y_mean;
            for (j, &xj) in centred.iter().enumerate() {
                rhs[j] += xj * yc;
                for (k, &xk) in centred.iter().enumerate() {
                    gram[j][k] += xj * xk;
                }
            }
        }

        let coefficients = solve(gram, rhs)?;
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// Predicts the target for one feature row.
    #[must_use]
    pub fn predict(&self, features: &[f64; N]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }

    /// Predicts the target for every row.
    #[must_use]
    pub fn predict_all(&self, rows: &[[f64; N]]) -> Vec<f64> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

/// Solves the centred normal equations `a · x = b`.
///
/// `a` is a Gram matrix and therefore symmetric positive semi-definite, so
/// elimination runs without row exchanges. Each pivot is the residual sum of
/// squares of its feature after projecting out the earlier ones; a pivot that
/// is negligible next to that feature's own sum of squares marks a linear
/// dependency.
fn solve<const N: usize>(mut a: [[f64; N]; N], mut b: [f64; N]) -> Result<[f64; N], FitError> {
    let diagonal: [f64; N] = std::array::from_fn(|i| a[i][i]);

    for col in 0..N {
        let pivot = a[col][col];
        if pivot.is_nan() || pivot <= diagonal[col] * SINGULARITY_TOLERANCE {
            return Err(FitError::Singular);
        }
        for row in col + 1..N {
            let factor = a[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail = (row + 1..N).map(|k| a[row][k] * x[k]).sum::<f64>();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
