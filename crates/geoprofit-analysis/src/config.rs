//! Pipeline configuration.
//!
//! All economic and statistical constants of a run live here. The defaults
//! reproduce the reference drilling campaign: 200 wells drilled out of pools
//! of 500, a budget of 10 000 000 and revenue of 4 500 per unit of product
//! (both in thousands of currency units), 1000 bootstrap iterations and a
//! 2.5% loss-risk ceiling.

use serde::{Deserialize, Serialize};

use crate::{bootstrap::BootstrapParams, profit::Economics};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Fraction of each region's wells held out for validation.
    pub validation_fraction: f64,
    pub n_wells_to_drill: usize,
    /// Candidate wells drawn per bootstrap iteration.
    pub pool_size: usize,
    pub budget: f64,
    pub revenue_per_unit: f64,
    pub n_bootstrap_iterations: usize,
    pub confidence_level: f64,
    /// Maximum acceptable probability of loss for a region to be viable.
    pub risk_threshold: f64,
    /// Seeds both the train/validation split and the bootstrap.
    pub random_seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            validation_fraction: 0.25,
            n_wells_to_drill: 200,
            pool_size: 500,
            budget: 10_000_000.0,
            revenue_per_unit: 4_500.0,
            n_bootstrap_iterations: 1000,
            confidence_level: 0.95,
            risk_threshold: 0.025,
            random_seed: 12345,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl PipelineConfig {
    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_owned(),
            })
        };
        if !(self.validation_fraction > 0.0 && self.validation_fraction < 1.0) {
            return invalid("validation_fraction", "must be in (0, 1)");
        }
        if self.n_wells_to_drill == 0 {
            return invalid("n_wells_to_drill", "must be positive");
        }
        if self.pool_size < self.n_wells_to_drill {
            return invalid("pool_size", "must be at least `n_wells_to_drill`");
        }
        if !(self.budget.is_finite() && self.budget >= 0.0) {
            return invalid("budget", "must be finite and non-negative");
        }
        if !(self.revenue_per_unit.is_finite() && self.revenue_per_unit > 0.0) {
            return invalid("revenue_per_unit", "must be finite and positive");
        }
        if self.n_bootstrap_iterations == 0 {
            return invalid("n_bootstrap_iterations", "must be positive");
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return invalid("confidence_level", "must be in (0, 1)");
        }
        if !(0.0..=1.0).contains(&self.risk_threshold) {
            return invalid("risk_threshold", "must be in [0, 1]");
        }
        Ok(())
    }

    #[must_use]
    pub fn economics(&self) -> Economics {
        Economics {
            n_wells_to_drill: self.n_wells_to_drill,
            budget: self.budget,
            revenue_per_unit: self.revenue_per_unit,
        }
    }

    #[must_use]
    pub fn bootstrap_params(&self) -> BootstrapParams {
        BootstrapParams {
            iterations: self.n_bootstrap_iterations,
            pool_size: self.pool_size,
            confidence_level: self.confidence_level,
            seed: self.random_seed,
        }
    }
}
