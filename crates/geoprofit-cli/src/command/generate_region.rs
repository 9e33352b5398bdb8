use std::path::PathBuf;

use geoprofit_data::{RegionId, synthetic::SyntheticRegion};

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateRegionArg {
    /// Number of wells to generate
    #[arg(long, default_value_t = 10_000)]
    rows: usize,
    /// Seed of the generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Region index used in well ids
    #[arg(long, default_value_t = 0)]
    region: usize,
    /// Constant added to every well's reserves (thousand barrels)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    product_shift: f64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateRegionArg) -> anyhow::Result<()> {
    let GenerateRegionArg {
        rows,
        seed,
        region,
        product_shift,
        output,
    } = arg;

    let generator = SyntheticRegion {
        rows: *rows,
        product_shift: *product_shift,
        ..SyntheticRegion::default()
    };
    let dataset = generator.generate(RegionId(*region), *seed)?;

    let mut output = Output::from_output_path(output.as_deref())?;
    output.write_wells(dataset.wells())?;
    tracing::info!(
        rows = dataset.len(),
        output = %output.display_path(),
        "synthetic region written"
    );
    Ok(())
}
