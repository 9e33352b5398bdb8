//! Per-region reserves model.
//!
//! [`fit_and_evaluate`] splits a region's wells into training and validation
//! sets, fits ordinary least squares on the training set and measures the
//! model on the held-out wells. The validation predictions it returns are the
//! input of the profit bootstrap.

use geoprofit_data::{DataValidationError, FEATURE_COLUMNS, FEATURE_COUNT, RegionDataset, split};
use geoprofit_stats::{
    metrics::RegressionMetrics,
    regression::{FitError, LinearModel},
};
use serde::Serialize;

/// Observed and predicted reserves of the validation wells, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPredictions {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl ValidationPredictions {
    #[must_use]
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }
}

/// Model quality on the validation split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub rmse: f64,
    pub r2: f64,
    /// Mean predicted reserves per well, thousand barrels.
    pub mean_predicted_reserves: f64,
    /// Mean observed reserves per well, thousand barrels.
    pub mean_actual_reserves: f64,
}

impl From<RegressionMetrics> for ModelMetrics {
    fn from(metrics: RegressionMetrics) -> Self {
        Self {
            rmse: metrics.rmse,
            r2: metrics.r2,
            mean_predicted_reserves: metrics.mean_predicted,
            mean_actual_reserves: metrics.mean_actual,
        }
    }
}

/// Everything produced by training one region's model.
#[derive(Debug, Clone)]
pub struct RegionEvaluation {
    pub model: LinearModel<FEATURE_COUNT>,
    pub train_rows: usize,
    pub validation: ValidationPredictions,
    pub metrics: ModelMetrics,
}

/// Trains and validates the reserves model of one region.
///
/// `validation_fraction` of the wells (rounded up) are held out using a
/// permutation seeded with `seed`.
///
/// # Errors
///
/// * [`DataValidationError::NonFiniteValue`] - a feature or target is NaN or infinite
/// * [`DataValidationError::InsufficientRows`] - the validation split would be
///   empty or the training split smaller than the number of model parameters
/// * [`DataValidationError::DegenerateFeatures`] - the training features are
///   linearly dependent
pub fn fit_and_evaluate(
    dataset: &RegionDataset,
    validation_fraction: f64,
    seed: u64,
) -> Result<RegionEvaluation, DataValidationError> {
    check_finite(dataset)?;

    let rows = dataset.len();
    let split = split::train_validation_split(rows, validation_fraction, seed);
    let required_train_rows = LinearModel::<FEATURE_COUNT>::PARAMETER_COUNT;
    let insufficient = || DataValidationError::InsufficientRows {
        rows,
        train_rows: split.train.len(),
        validation_rows: split.validation.len(),
        required_train_rows,
    };
    if split.validation.is_empty() || split.train.len() < required_train_rows {
        return Err(insufficient());
    }

    let train_features = dataset.feature_rows(&split.train);
    let train_targets = dataset.products(&split.train);
    let model = LinearModel::fit(&train_features, &train_targets).map_err(|err| match err {
        FitError::Singular => DataValidationError::DegenerateFeatures,
        FitError::NonFinite { index } => DataValidationError::NonFiniteValue {
            id: dataset.wells()[split.train[index]].id.clone(),
            column: "product",
        },
        FitError::LengthMismatch { .. } | FitError::TooFewSamples { .. } => insufficient(),
    })?;

    let actual = dataset.products(&split.validation);
    let predicted = model.predict_all(&dataset.feature_rows(&split.validation));
    let metrics = RegressionMetrics::new(&actual, &predicted).ok_or_else(insufficient)?;

    tracing::debug!(
        region = %dataset.region(),
        train_rows = split.train.len(),
        validation_rows = split.validation.len(),
        coefficients = ?model.coefficients,
        intercept = model.intercept,
        rmse = metrics.rmse,
        "model fitted"
    );

    Ok(RegionEvaluation {
        model,
        train_rows: split.train.len(),
        validation: ValidationPredictions { actual, predicted },
        metrics: metrics.into(),
    })
}

/// Re-checks finiteness before fitting.
///
/// Datasets built through [`RegionDataset::new`] already satisfy this; the
/// model refuses to rely on it.
fn check_finite(dataset: &RegionDataset) -> Result<(), DataValidationError> {
    for well in dataset.wells() {
        let column = well
            .features
            .iter()
            .zip(FEATURE_COLUMNS)
            .find_map(|(v, column)| (!v.is_finite()).then_some(column))
            .or_else(|| (!well.product.is_finite()).then_some("product"));
        if let Some(column) = column {
            return Err(DataValidationError::NonFiniteValue {
                id: well.id.clone(),
                column,
            });
        }
    }
    Ok(())
}
