//! Excel export command
//!
//! Writes the analysis to a workbook with four sheets: the original data,
//! the frequency table, the measures and the quantiles. Real-valued cells are
//! written as text with [`EXPORT_PRECISION`] decimals; counts stay numeric.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Args;
use freqtab_stats::{
    analysis::{Analysis, Distribution},
    measures::Measure,
    percentiles::QuantileGroup,
};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use super::input::InputArg;

const EXPORT_PRECISION: usize = 4;

#[derive(Debug, Clone, Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Workbook path [default: statistical_analysis_<YYYY-MM-DD>.xlsx]
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let analysis = arg.input.analyze()?;
    let path = arg
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(Utc::now().date_naive()));
    save_workbook(&analysis, &path)?;
    eprintln!("Workbook saved to: {}", path.display());
    Ok(())
}

fn default_output_path(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "statistical_analysis_{}.xlsx",
        date.format("%Y-%m-%d")
    ))
}

#[derive(Debug, Clone, Copy, derive_more::Display)]
enum SheetName {
    #[display("Original Data")]
    OriginalData,
    #[display("Frequency Table")]
    FrequencyTable,
    #[display("Measures")]
    Measures,
    #[display("Quantiles")]
    Quantiles,
}

#[derive(Debug, Clone)]
enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn fixed(value: f64) -> Self {
        Cell::Text(format!("{value:.EXPORT_PRECISION$}"))
    }

    fn measure(measure: Measure) -> Self {
        Cell::Text(measure.format(EXPORT_PRECISION))
    }

    #[expect(clippy::cast_precision_loss)]
    fn count<N: Into<u64>>(n: N) -> Self {
        Cell::Number(n.into() as f64)
    }
}

/// Appends rows to a worksheet, starting at row 1.
struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    next_row: u32,
}

impl<'a> SheetWriter<'a> {
    fn new(book: &'a mut Spreadsheet, name: SheetName) -> anyhow::Result<Self> {
        let sheet = book
            .new_sheet(name.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to add sheet {name}: {e}"))?;
        Ok(Self { sheet, next_row: 1 })
    }

    fn row<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        for (col, cell) in (1u32..).zip(cells) {
            let target = self.sheet.get_cell_mut((col, self.next_row));
            match cell {
                Cell::Text(text) => {
                    target.set_value(text);
                }
                Cell::Number(n) => {
                    target.set_value_number(n);
                }
            }
        }
        self.next_row += 1;
    }

    fn blank(&mut self) {
        self.next_row += 1;
    }
}

fn write_original_data(book: &mut Spreadsheet, analysis: &Analysis) -> anyhow::Result<()> {
    let mut w = SheetWriter::new(book, SheetName::OriginalData)?;
    let n = u64::try_from(analysis.sample.len()).context("sample too large")?;
    w.row([Cell::text("Original Data")]);
    w.row([Cell::text("Total values"), Cell::count(n)]);
    w.blank();
    w.row([Cell::text("Index"), Cell::text("Value")]);
    for (index, value) in analysis.scatter_points() {
        let index = u64::try_from(index).context("sample too large")?;
        w.row([Cell::count(index), Cell::Number(value)]);
    }
    Ok(())
}

fn write_frequency_table(book: &mut Spreadsheet, analysis: &Analysis) -> anyhow::Result<()> {
    let mut w = SheetWriter::new(book, SheetName::FrequencyTable)?;
    match &analysis.distribution {
        Distribution::Ungrouped(table) => {
            w.row([Cell::text("Frequency Table (ungrouped data)")]);
            w.blank();
            w.row(
                ["Value", "fi", "Fi", "fi (%)", "Fi (%)"]
                    .into_iter()
                    .map(Cell::text),
            );
            for row in &table.rows {
                w.row([
                    Cell::fixed(row.value),
                    Cell::count(row.frequency),
                    Cell::count(row.cumulative_frequency),
                    Cell::fixed(row.relative_frequency_pct),
                    Cell::fixed(row.cumulative_relative_frequency_pct),
                ]);
            }
        }
        Distribution::Grouped(table) => {
            w.row([Cell::text(format!(
                "Frequency Table (grouped data, {} classes, width {})",
                table.intervals.len(),
                table.class_width
            ))]);
            w.blank();
            w.row(
                ["Interval", "Midpoint", "fi", "Fi", "fi (%)", "Fi (%)"]
                    .into_iter()
                    .map(Cell::text),
            );
            for class in &table.intervals {
                w.row([
                    Cell::text(class.label(EXPORT_PRECISION)),
                    Cell::fixed(class.midpoint),
                    Cell::count(class.frequency),
                    Cell::count(class.cumulative_frequency),
                    Cell::fixed(class.relative_frequency_pct),
                    Cell::fixed(class.cumulative_relative_frequency_pct),
                ]);
            }
        }
    }
    w.blank();
    w.row([
        Cell::text("Total"),
        Cell::count(analysis.distribution.total_frequency()),
    ]);
    Ok(())
}

fn write_measures(book: &mut Spreadsheet, analysis: &Analysis) -> anyhow::Result<()> {
    let mut w = SheetWriter::new(book, SheetName::Measures)?;
    let m = &analysis.measures;
    w.row([Cell::text("Statistical Measures")]);
    w.blank();
    w.row([Cell::text("CENTRAL TENDENCY")]);
    w.row([Cell::text("Mean"), Cell::measure(m.mean)]);
    w.row([Cell::text("Median"), Cell::measure(m.median)]);
    w.row([Cell::text("Mode"), Cell::text(m.mode.format(EXPORT_PRECISION))]);
    w.blank();
    w.row([Cell::text("DISPERSION")]);
    w.row([Cell::text("Range"), Cell::measure(m.range)]);
    w.row([Cell::text("Variance"), Cell::measure(m.variance)]);
    w.row([
        Cell::text("Standard Deviation"),
        Cell::measure(m.standard_deviation),
    ]);
    w.row([
        Cell::text("Coefficient of Variation (%)"),
        Cell::measure(m.coefficient_of_variation_pct),
    ]);
    w.row([Cell::text("Minimum"), Cell::fixed(m.min)]);
    w.row([Cell::text("Maximum"), Cell::fixed(m.max)]);
    Ok(())
}

fn write_quantiles(book: &mut Spreadsheet, analysis: &Analysis) -> anyhow::Result<()> {
    let mut w = SheetWriter::new(book, SheetName::Quantiles)?;
    w.row([Cell::text("Quantiles")]);

    let mut current_group: Option<QuantileGroup> = None;
    for (group, label, value) in analysis.quantiles.labeled() {
        if current_group != Some(group) {
            w.blank();
            w.row([Cell::text(group.to_string())]);
            current_group = Some(group);
        }
        w.row([Cell::text(label), Cell::fixed(value)]);
    }
    w.blank();
    w.row([
        Cell::text("IQR"),
        Cell::fixed(analysis.quantiles.interquartile_range()),
    ]);

    if !analysis.extra_percentiles.is_empty() {
        w.blank();
        w.row([Cell::text("REQUESTED PERCENTILES")]);
        for (p, value) in analysis.extra_percentiles.iter() {
            w.row([Cell::text(format!("P{p}")), Cell::fixed(value)]);
        }
    }
    Ok(())
}

fn build_workbook(analysis: &Analysis) -> anyhow::Result<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    write_original_data(&mut book, analysis)?;
    write_frequency_table(&mut book, analysis)?;
    write_measures(&mut book, analysis)?;
    write_quantiles(&mut book, analysis)?;
    Ok(book)
}

fn save_workbook(analysis: &Analysis, path: &Path) -> anyhow::Result<()> {
    let book = build_workbook(analysis)?;
    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "workbook written");
    Ok(())
}
