//! Numerical building blocks for the geoprofit workspace.
//!
//! This crate provides the small set of statistical tools the
//! region-selection pipeline is built on:
//!
//! - **Descriptive statistics**: range, mean, median, standard deviation
//! - **Percentiles**: empirical quantiles with linear interpolation between order statistics
//! - **Histogram generation**: equal-width frequency distributions for text reports
//! - **Linear regression**: ordinary least squares with an intercept
//! - **Regression metrics**: RMSE, R² and mean prediction over a validation set
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`histogram`]: Histogram construction for visualizing data distributions
//! - [`regression`]: Ordinary least squares fitting and prediction
//! - [`metrics`]: Accuracy metrics comparing predictions with observed values
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use geoprofit_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use geoprofit_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Fitting a linear model
//!
//! ```
//! use geoprofit_stats::regression::LinearModel;
//!
//! // y = 2 * x0 - x1 + 3
//! let features = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 3.0], [4.0, 1.0]];
//! let targets = features.map(|[x0, x1]| 2.0 * x0 - x1 + 3.0);
//! let model = LinearModel::fit(&features, &targets).unwrap();
//! assert!((model.predict(&[10.0, 5.0]) - 18.0).abs() < 1e-9);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod metrics;
pub mod percentiles;
pub mod regression;
