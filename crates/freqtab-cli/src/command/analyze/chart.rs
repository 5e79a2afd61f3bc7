//! Text renderings of the histogram, pie, box plot and scatter charts

use freqtab_stats::{analysis::Analysis, percentiles::BoxPlotSummary};

use super::table::PRECISION;

const BAR_WIDTH: usize = 40;
const BOX_PLOT_WIDTH: usize = 60;
const SCATTER_WIDTH: usize = 60;
const SCATTER_HEIGHT: usize = 12;

/// Maps `value` in `min..=max` onto `0..steps`; a flat range maps to 0.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scale(value: f64, min: f64, max: f64, steps: usize) -> usize {
    if steps == 0 || max <= min {
        return 0;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (t * (steps - 1) as f64).round() as usize
}

pub(super) fn print_charts(analysis: &Analysis) {
    let bars = analysis.distribution.bars(PRECISION);
    print_histogram(&bars);
    println!();
    print_pie_shares(&bars);
    println!();
    print_box_plot(&analysis.box_plot());
    println!();
    print_scatter(analysis);
}

fn bar_length(frequency: u64, max_frequency: u64) -> usize {
    if max_frequency == 0 {
        return 0;
    }
    let len = u128::from(frequency) * BAR_WIDTH as u128 / u128::from(max_frequency);
    usize::try_from(len).unwrap_or(BAR_WIDTH)
}

fn print_histogram(bars: &[(String, u64, f64)]) {
    println!("Histogram");
    let max_frequency = bars.iter().map(|(_, f, _)| *f).max().unwrap_or(0);
    let label_width = bars.iter().map(|(l, _, _)| l.len()).max().unwrap_or(0);
    for (label, frequency, _) in bars {
        println!(
            "  {label:>label_width$} | {} {frequency}",
            "#".repeat(bar_length(*frequency, max_frequency))
        );
    }
}

fn print_pie_shares(bars: &[(String, u64, f64)]) {
    println!("Shares");
    let label_width = bars.iter().map(|(l, _, _)| l.len()).max().unwrap_or(0);
    for (label, _, share) in bars {
        println!("  {label:>label_width$} : {share:>6.PRECISION$}%");
    }
}

fn box_plot_line(summary: &BoxPlotSummary, width: usize) -> String {
    let BoxPlotSummary {
        min,
        q1,
        median,
        q3,
        max,
    } = *summary;
    let at = |v| scale(v, min, max, width);
    let mut line = vec![' '; width];
    for c in &mut line[at(min)..=at(max)] {
        *c = '-';
    }
    for c in &mut line[at(q1)..=at(q3)] {
        *c = '=';
    }
    line[at(q1)] = '[';
    line[at(q3)] = ']';
    line[at(min)] = '|';
    line[at(max)] = '|';
    line[at(median)] = 'M';
    line.into_iter().collect()
}

fn print_box_plot(summary: &BoxPlotSummary) {
    println!("Box Plot");
    println!("  {}", box_plot_line(summary, BOX_PLOT_WIDTH));
    println!(
        "  min {:.PRECISION$}  Q1 {:.PRECISION$}  median {:.PRECISION$}  Q3 {:.PRECISION$}  max {:.PRECISION$}",
        summary.min, summary.q1, summary.median, summary.q3, summary.max
    );
}

/// Plots `(index, value)` points; columns bucket indices when there are more
/// points than columns.
fn scatter_grid(points: &[(usize, f64)], min: f64, max: f64) -> Vec<String> {
    let width = points.len().clamp(1, SCATTER_WIDTH);
    let mut grid = vec![vec![' '; width]; SCATTER_HEIGHT];
    for &(index, value) in points {
        let col = (index - 1) * width / points.len();
        let row = SCATTER_HEIGHT - 1 - scale(value, min, max, SCATTER_HEIGHT);
        grid[row][col] = '*';
    }
    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn print_scatter(analysis: &Analysis) {
    println!("Scatter (index vs value)");
    let (min, max) = (analysis.sample.min(), analysis.sample.max());
    let points = analysis.scatter_points().collect::<Vec<_>>();
    let rows = scatter_grid(&points, min, max);
    let last = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        let axis = match i {
            0 => format!("{max:>10.PRECISION$}"),
            i if i == last => format!("{min:>10.PRECISION$}"),
            _ => " ".repeat(10),
        };
        println!("  {axis} |{}", row.trim_end());
    }
    println!("  {} +{}", " ".repeat(10), "-".repeat(rows[0].len()));
    println!("  {} 1 .. {}", " ".repeat(10), points.len());
}
