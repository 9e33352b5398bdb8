use std::path::PathBuf;

use anyhow::Context;
use geoprofit_analysis::{config::PipelineConfig, pipeline};
use geoprofit_data::{RegionId, loader};

use crate::{schema::report::AnalysisReport, util};

mod text;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Region tables (CSV with columns id,f0,f1,f2,product), one per region
    #[arg(required = true)]
    regions: Vec<PathBuf>,
    /// Pipeline configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    #[clap(flatten)]
    overrides: ConfigOverrides,
    /// Also write the JSON report to this file
    #[arg(long, conflicts_with = "json")]
    output: Option<PathBuf>,
    /// Print the JSON report to stdout instead of the text report
    #[arg(long)]
    json: bool,
    /// Number of bins in the profit histograms
    #[arg(long, default_value_t = 16)]
    histogram_bins: usize,
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default, Clone, clap::Args)]
struct ConfigOverrides {
    /// Fraction of wells held out for validation
    #[arg(long)]
    validation_fraction: Option<f64>,
    /// Wells drilled per region
    #[arg(long)]
    n_wells_to_drill: Option<usize>,
    /// Candidate wells drawn per bootstrap iteration
    #[arg(long)]
    pool_size: Option<usize>,
    /// Total development budget
    #[arg(long)]
    budget: Option<f64>,
    /// Revenue per unit of product
    #[arg(long)]
    revenue_per_unit: Option<f64>,
    /// Bootstrap iterations
    #[arg(long = "iterations")]
    n_bootstrap_iterations: Option<usize>,
    /// Confidence level of the profit interval
    #[arg(long)]
    confidence_level: Option<f64>,
    /// Maximum acceptable probability of loss
    #[arg(long)]
    risk_threshold: Option<f64>,
    /// Seed of the split and the bootstrap
    #[arg(long = "seed")]
    random_seed: Option<u64>,
}

impl ConfigOverrides {
    fn apply(&self, config: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            validation_fraction: self
                .validation_fraction
                .unwrap_or(config.validation_fraction),
            n_wells_to_drill: self.n_wells_to_drill.unwrap_or(config.n_wells_to_drill),
            pool_size: self.pool_size.unwrap_or(config.pool_size),
            budget: self.budget.unwrap_or(config.budget),
            revenue_per_unit: self.revenue_per_unit.unwrap_or(config.revenue_per_unit),
            n_bootstrap_iterations: self
                .n_bootstrap_iterations
                .unwrap_or(config.n_bootstrap_iterations),
            confidence_level: self.confidence_level.unwrap_or(config.confidence_level),
            risk_threshold: self.risk_threshold.unwrap_or(config.risk_threshold),
            random_seed: self.random_seed.unwrap_or(config.random_seed),
        }
    }
}

fn resolve_config(arg: &AnalyzeArg) -> anyhow::Result<PipelineConfig> {
    let base = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => PipelineConfig::default(),
    };
    let config = arg.overrides.apply(base);
    config.validate().context("Invalid pipeline configuration")?;
    Ok(config)
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = resolve_config(arg)?;
    tracing::debug!(?config, "configuration resolved");

    let datasets = arg
        .regions
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let region = RegionId(i);
            let dataset = loader::load_region_csv(region, path)
                .with_context(|| format!("Failed to load {region}"))?;
            tracing::info!(%region, path = %path.display(), wells = dataset.len(), "region loaded");
            Ok(dataset)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let report = pipeline::run_pipeline(&datasets, &config)?;
    let recommendation = report.recommendation.clone();

    if arg.json {
        let mut output = util::Output::from_output_path(None)?;
        output.write_json(&AnalysisReport::new(config, input_names(arg), report))?;
    } else {
        text::print_report(&report, &config, &arg.regions, arg.histogram_bins);
        if let Some(path) = &arg.output {
            let mut output = util::Output::from_output_path(Some(path))?;
            output.write_json(&AnalysisReport::new(config, input_names(arg), report))?;
            tracing::info!(output = %output.display_path(), "JSON report written");
        }
    }

    // The report is complete either way; a missing recommendation still fails the command
    if let Err(err) = recommendation {
        return Err(err.into());
    }
    Ok(())
}

fn input_names(arg: &AnalyzeArg) -> Vec<String> {
    arg.regions
        .iter()
        .map(|path| path.display().to_string())
        .collect()
}
