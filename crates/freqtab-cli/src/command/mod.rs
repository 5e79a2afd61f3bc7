use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, export::ExportArg};

mod analyze;
mod export;
mod input;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct CommandArgs {
    /// What to do with the sample
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print frequency tables, measures and quantiles of a sample
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Write the analysis of a sample to an Excel workbook
    Export(#[clap(flatten)] ExportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
    }
    Ok(())
}
