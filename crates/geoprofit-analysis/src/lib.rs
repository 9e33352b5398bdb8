//! Region-selection decision pipeline.
//!
//! For every candidate region this crate trains a linear model of well
//! reserves, simulates the economics of drilling the best-predicted wells,
//! and bootstraps the profit distribution to estimate its mean, confidence
//! interval and probability of loss. A comparator then recommends the most
//! profitable region whose risk of loss is acceptable.
//!
//! # Pipeline
//!
//! ```text
//! RegionDataset
//!     ↓ model::fit_and_evaluate        (seeded 75/25 split, OLS, RMSE / R²)
//! ValidationPredictions
//!     ↓ bootstrap::bootstrap           (resample pools of wells with replacement)
//!     ↓   profit::simulate_profit      (top-K by prediction, realized on true reserves)
//! BootstrapResult                      (mean profit, 95% CI, loss probability)
//!     ↓ comparator::recommend          (risk threshold, then highest mean profit)
//! RegionId
//! ```
//!
//! [`pipeline::run_pipeline`] runs every stage for every region with one
//! [`config::PipelineConfig`].
//!
//! # Reproducibility
//!
//! Randomness enters in two places, the train/validation split and the
//! bootstrap resampling. Both are driven by explicit seeds from the
//! configuration, so repeated runs over the same tables produce bit-identical
//! reports regardless of how regions are scheduled across threads.
//!
//! # Example
//!
//! ```
//! use geoprofit_analysis::{config::PipelineConfig, pipeline};
//! use geoprofit_data::{RegionId, synthetic::SyntheticRegion};
//!
//! let region = SyntheticRegion {
//!     rows: 2_000,
//!     ..SyntheticRegion::default()
//! };
//! let datasets = vec![
//!     region.generate(RegionId(0), 1).unwrap(),
//!     region.generate(RegionId(1), 2).unwrap(),
//! ];
//! let config = PipelineConfig {
//!     n_bootstrap_iterations: 100,
//!     ..PipelineConfig::default()
//! };
//! let report = pipeline::run_pipeline(&datasets, &config).unwrap();
//! assert_eq!(report.regions.len(), 2);
//! ```

pub mod bootstrap;
pub mod comparator;
pub mod config;
pub mod model;
pub mod pipeline;
pub mod profit;
