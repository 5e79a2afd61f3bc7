//! Analysis report command
//!
//! Prints the sorted sample, its frequency distribution, the measures of
//! central tendency and dispersion, and the quantiles. With `--json` the same
//! analysis is written as JSON instead.

mod chart;
mod table;

use std::path::PathBuf;

use clap::Args;

use super::input::InputArg;
use crate::util::Output;

#[derive(Debug, Clone, Args)]
#[expect(clippy::option_option)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Write the analysis as JSON to this path, or to stdout if no path is given
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub json: Option<Option<PathBuf>>,

    /// Also draw text charts (histogram, shares, box plot, scatter)
    #[arg(long)]
    pub charts: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let analysis = arg.input.analyze()?;

    // JSON on stdout replaces the text report
    if let Some(None) = &arg.json {
        return Output::save_json(&analysis, None);
    }

    table::print_sample_summary(&analysis.sample);
    println!();
    table::print_distribution(&analysis);
    println!();
    table::print_measures(&analysis.measures);
    println!();
    table::print_quantiles(&analysis.quantiles, &analysis.extra_percentiles);

    if arg.charts {
        println!();
        chart::print_charts(&analysis);
    }

    if let Some(Some(path)) = &arg.json {
        Output::save_json(&analysis, Some(path.clone()))?;
        eprintln!("Analysis saved to: {}", path.display());
    }
    Ok(())
}
