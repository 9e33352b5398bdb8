//! End-to-end evaluation of a set of regions.

use std::{collections::BTreeMap, error::Error, thread};

use geoprofit_data::{DataValidationError, RegionDataset, RegionId};
use serde::{Serialize, Serializer};

use crate::{
    bootstrap::{self, BootstrapError, BootstrapResult},
    comparator::{self, NoViableRegionError, RankedRegion},
    config::{ConfigError, PipelineConfig},
    model::{self, ModelMetrics},
};

/// Outcome of evaluating one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub region: RegionId,
    pub rows: usize,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub metrics: ModelMetrics,
    pub break_even_reserves_per_well: f64,
    pub bootstrap: BootstrapResult,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Per-region reports, ordered by region id.
    pub regions: Vec<RegionReport>,
    pub ranking: Vec<RankedRegion>,
    /// The recommended region, or why none qualifies.
    #[serde(rename = "recommended_region", serialize_with = "serialize_recommendation")]
    pub recommendation: Result<RegionId, NoViableRegionError>,
}

fn serialize_recommendation<S>(
    recommendation: &Result<RegionId, NoViableRegionError>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    recommendation.as_ref().ok().serialize(serializer)
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::From, derive_more::Error)]
pub enum RegionErrorKind {
    #[display("{_0}")]
    Data(#[error(not(source))] DataValidationError),
    #[display("{_0}")]
    Bootstrap(#[error(not(source))] BootstrapError),
}

/// A failure while evaluating a specific region.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("{region}: {kind}")]
pub struct RegionError {
    pub region: RegionId,
    pub kind: RegionErrorKind,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum PipelineError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("{_0}")]
    Region(RegionError),
    #[display("{region} was supplied more than once")]
    DuplicateRegion { region: RegionId },
    #[display("no regions to compare")]
    NoRegions,
}

// The messages above already embed the wrapped error.
impl Error for PipelineError {}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<RegionError> for PipelineError {
    fn from(err: RegionError) -> Self {
        Self::Region(err)
    }
}

/// Fits, validates and bootstraps one region.
///
/// `config` is expected to be valid; see [`PipelineConfig::validate`].
///
/// # Errors
///
/// Returns a [`RegionError`] tagged with the dataset's region when the model
/// cannot be fitted or the bootstrap rejects its inputs.
pub fn evaluate_region(
    dataset: &RegionDataset,
    config: &PipelineConfig,
) -> Result<RegionReport, RegionError> {
    let region = dataset.region();
    let tag = |kind: RegionErrorKind| RegionError { region, kind };

    let evaluation =
        model::fit_and_evaluate(dataset, config.validation_fraction, config.random_seed)
            .map_err(|err| tag(err.into()))?;
    let economics = config.economics();
    let bootstrap = bootstrap::bootstrap(
        &evaluation.validation.actual,
        &evaluation.validation.predicted,
        &config.bootstrap_params(),
        &economics,
    )
    .map_err(|err| tag(err.into()))?;

    tracing::info!(
        %region,
        rmse = evaluation.metrics.rmse,
        mean_profit = bootstrap.mean_profit,
        loss_probability = bootstrap.loss_probability,
        "region evaluated"
    );

    Ok(RegionReport {
        region,
        rows: dataset.len(),
        train_rows: evaluation.train_rows,
        validation_rows: evaluation.validation.len(),
        metrics: evaluation.metrics,
        break_even_reserves_per_well: economics.break_even_reserves_per_well(),
        bootstrap,
    })
}

/// Evaluates every region and recommends one.
///
/// Regions are evaluated on scoped threads. Each region's randomness is
/// seeded from [`PipelineConfig::random_seed`] alone, so the report does not
/// depend on scheduling.
///
/// A run where no region meets the risk threshold still succeeds; the report
/// then carries the [`NoViableRegionError`].
///
/// # Errors
///
/// * [`PipelineError::Config`] - `config` is out of range
/// * [`PipelineError::NoRegions`] - `datasets` is empty
/// * [`PipelineError::DuplicateRegion`] - two datasets share a region id
/// * [`PipelineError::Region`] - a region failed; the whole run is aborted
pub fn run_pipeline(
    datasets: &[RegionDataset],
    config: &PipelineConfig,
) -> Result<PipelineReport, PipelineError> {
    config.validate()?;
    if datasets.is_empty() {
        return Err(PipelineError::NoRegions);
    }
    let mut outcomes = BTreeMap::new();
    for dataset in datasets {
        if outcomes.insert(dataset.region(), (dataset, None)).is_some() {
            return Err(PipelineError::DuplicateRegion {
                region: dataset.region(),
            });
        }
    }

    tracing::info!(regions = datasets.len(), "evaluating regions");
    thread::scope(|s| {
        for (dataset, outcome) in outcomes.values_mut() {
            let dataset = *dataset;
            s.spawn(move || {
                *outcome = Some(evaluate_region(dataset, config));
            });
        }
    });

    let regions = outcomes
        .into_values()
        .filter_map(|(_, outcome)| outcome)
        .collect::<Result<Vec<_>, _>>()?;
    let results = regions
        .iter()
        .map(|report| (report.region, report.bootstrap.clone()))
        .collect::<BTreeMap<_, _>>();
    let ranking = comparator::rank_regions(&results, config.risk_threshold);
    let recommendation = comparator::recommend(&results, config.risk_threshold);
    match &recommendation {
        Ok(region) => tracing::info!(%region, "region recommended"),
        Err(err) => tracing::warn!("{err}"),
    }

    Ok(PipelineReport {
        regions,
        ranking,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use geoprofit_data::{WellRecord, synthetic::SyntheticRegion};

    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            n_bootstrap_iterations: 200,
            ..PipelineConfig::default()
        }
    }

    fn region(id: usize, product_shift: f64, seed: u64) -> RegionDataset {
        SyntheticRegion {
            rows: 2_000,
            product_shift,
            ..SyntheticRegion::default()
        }
        .generate(RegionId(id), seed)
        .unwrap()
    }

    #[test]
    fn test_parallel_run_matches_sequential_evaluation() {
        let datasets = vec![region(0, 0.0, 1), region(1, -40.0, 2), region(2, 10.0, 3)];
        let config = config();
        let report = run_pipeline(&datasets, &config).unwrap();
        let sequential = datasets
            .iter()
            .map(|dataset| evaluate_region(dataset, &config).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(report.regions, sequential);
        assert_eq!(run_pipeline(&datasets, &config).unwrap(), report);
    }

    #[test]
    fn test_reports_are_ordered_by_region() {
        let datasets = vec![region(2, 0.0, 1), region(0, 0.0, 2), region(1, 0.0, 3)];
        let report = run_pipeline(&datasets, &config()).unwrap();
        let order = report.regions.iter().map(|r| r.region.0).collect::<Vec<_>>();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_barren_region_is_not_recommended() {
        // Every well of region 1 is clipped to zero reserves
        let datasets = vec![region(0, 0.0, 1), region(1, -1_000.0, 2)];
        let report = run_pipeline(&datasets, &config()).unwrap();
        assert_eq!(report.recommendation, Ok(RegionId(0)));
        let barren = &report.regions[1];
        assert_eq!(barren.bootstrap.loss_probability, 1.0);
        assert_eq!(barren.bootstrap.mean_profit, -10_000_000.0);
        assert_eq!(report.ranking[0].region, RegionId(0));
        assert!(!report.ranking[1].viable);
    }

    #[test]
    fn test_no_viable_region_is_reported() {
        let datasets = vec![region(0, -1_000.0, 1), region(1, -1_000.0, 2)];
        let report = run_pipeline(&datasets, &config()).unwrap();
        let err = report.recommendation.clone().unwrap_err();
        assert_eq!(err.least_risky, Some((RegionId(0), 1.0)));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["recommended_region"].is_null());
        assert_eq!(json["regions"][1]["region"], 1);
        assert!(json["regions"][0]["bootstrap"].get("samples").is_none());
    }

    #[test]
    fn test_region_error_names_region() {
        let tiny = RegionDataset::new(
            RegionId(1),
            (0..4)
                .map(|i| WellRecord {
                    id: format!("w{i}"),
                    features: [f64::from(i), 0.0, 1.0],
                    product: 1.0,
                })
                .collect(),
        )
        .unwrap();
        let datasets = vec![region(0, 0.0, 1), tiny];
        let err = run_pipeline(&datasets, &config()).unwrap_err();
        let PipelineError::Region(region_err) = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(region_err.region, RegionId(1));
        assert!(matches!(
            region_err.kind,
            RegionErrorKind::Data(DataValidationError::InsufficientRows { .. })
        ));
        assert!(err.to_string().starts_with("region 1: "));
    }

    #[test]
    fn test_invalid_input_sets() {
        assert_eq!(
            run_pipeline(&[], &config()).unwrap_err(),
            PipelineError::NoRegions
        );
        let datasets = vec![region(0, 0.0, 1), region(0, 0.0, 2)];
        assert_eq!(
            run_pipeline(&datasets, &config()).unwrap_err(),
            PipelineError::DuplicateRegion {
                region: RegionId(0)
            }
        );
        let bad = PipelineConfig {
            pool_size: 10,
            ..config()
        };
        assert!(matches!(
            run_pipeline(&datasets, &bad),
            Err(PipelineError::Config(_))
        ));
    }
}
