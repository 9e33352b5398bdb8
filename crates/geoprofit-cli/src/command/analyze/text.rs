//! Human-readable rendering of a pipeline report.

use std::path::PathBuf;

use geoprofit_analysis::{
    config::PipelineConfig,
    pipeline::{PipelineReport, RegionReport},
};
use geoprofit_stats::{descriptive::DescriptiveStats, histogram::Histogram};

const MAX_BAR_WIDTH: u64 = 50;

pub(super) fn print_report(
    report: &PipelineReport,
    config: &PipelineConfig,
    inputs: &[PathBuf],
    histogram_bins: usize,
) {
    println!(
        "Drilling {} of {} candidate wells per iteration, budget {:.0}, revenue {:.0} per unit",
        config.n_wells_to_drill, config.pool_size, config.budget, config.revenue_per_unit
    );
    println!(
        "{} bootstrap iterations, seed {}, risk threshold {:.1}%",
        config.n_bootstrap_iterations,
        config.random_seed,
        config.risk_threshold * 100.0
    );

    for region in &report.regions {
        println!();
        match inputs.get(region.region.0) {
            Some(path) => println!("== {} ({}) ==", region.region, path.display()),
            None => println!("== {} ==", region.region),
        }
        print_region(region, config.confidence_level, histogram_bins);
    }

    println!();
    print_ranking(report);

    println!();
    match &report.recommendation {
        Ok(region) => println!("Recommended: {region}"),
        Err(err) => println!("No recommendation: {err}"),
    }
}

fn print_region(region: &RegionReport, confidence_level: f64, histogram_bins: usize) {
    let metrics = &region.metrics;
    let bootstrap = &region.bootstrap;
    println!(
        "  {:<24}: {} ({} train / {} validation)",
        "Wells", region.rows, region.train_rows, region.validation_rows
    );
    println!("  {:<24}: {:.2}", "RMSE", metrics.rmse);
    println!("  {:<24}: {:.4}", "R²", metrics.r2);
    println!(
        "  {:<24}: {:.2} predicted / {:.2} actual",
        "Mean reserves per well", metrics.mean_predicted_reserves, metrics.mean_actual_reserves
    );
    println!(
        "  {:<24}: {:.2}",
        "Break-even per well", region.break_even_reserves_per_well
    );
    println!("  {:<24}: {:.2}", "Mean profit", bootstrap.mean_profit);
    println!(
        "  {:<24}: [{:.2}, {:.2}]",
        format!("{:.0}% confidence", confidence_level * 100.0),
        bootstrap.ci_lower,
        bootstrap.ci_upper
    );
    if let Some(stats) = DescriptiveStats::new(bootstrap.samples.iter().copied()) {
        println!("  {:<24}: {:.2}", "Median profit", stats.median);
        println!(
            "  {:<24}: [{:.2}, {:.2}]",
            "Profit range", stats.min, stats.max
        );
        println!("  {:<24}: {:.2}", "Profit std dev", stats.std_dev);
    }
    println!(
        "  {:<24}: {:.1}%",
        "Risk of loss",
        bootstrap.loss_probability * 100.0
    );

    if !bootstrap.samples.is_empty() {
        println!("  Profit distribution:");
        print_histogram(&Histogram::new(
            bootstrap.samples.iter().copied(),
            histogram_bins,
        ));
    }
}

fn print_histogram(histogram: &Histogram) {
    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let bar_width = usize::try_from(bin.count * MAX_BAR_WIDTH / max_count).unwrap_or(0);
        println!(
            "  {:>15.0} | {:<5} {}",
            bin.range.start,
            bin.count,
            "#".repeat(bar_width)
        );
    }
}

fn print_ranking(report: &PipelineReport) {
    println!("Ranking:");
    println!(
        "  {:<12} {:>18} {:>10} {:>8}",
        "Region", "Mean profit", "Risk", "Viable"
    );
    println!("  {}", "-".repeat(51));
    for entry in &report.ranking {
        println!(
            "  {:<12} {:>18.2} {:>9.1}% {:>8}",
            entry.region.to_string(),
            entry.mean_profit,
            entry.loss_probability * 100.0,
            if entry.viable { "yes" } else { "no" }
        );
    }
}
