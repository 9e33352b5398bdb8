use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, generate_region::GenerateRegionArg};

mod analyze;
mod generate_region;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evaluate candidate regions and recommend one to drill
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Generate a synthetic region table as CSV
    GenerateRegion(#[clap(flatten)] GenerateRegionArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::GenerateRegion(arg) => generate_region::run(&arg)?,
    }
    Ok(())
}
