//! Text tables for the `analyze` report
//!
//! Numbers are printed with [`PRECISION`] decimals; the underlying values
//! keep full precision.

use freqtab_stats::{
    analysis::{Analysis, Distribution},
    frequency::FrequencyTable,
    grouped::GroupedTable,
    measures::MeasureSet,
    percentiles::{Percentiles, QuantileGroup, QuantileSet},
    sample::Sample,
};

pub(super) const PRECISION: usize = 2;

/// How many sorted values are listed before the summary is elided.
const MAX_LISTED_VALUES: usize = 50;

pub(super) fn print_sample_summary(sample: &Sample) {
    println!("Sorted Data");
    println!(
        "  n = {}, min = {:.PRECISION$}, max = {:.PRECISION$}",
        sample.len(),
        sample.min(),
        sample.max()
    );
    println!("  {}", sorted_listing(sample));
}

fn sorted_listing(sample: &Sample) -> String {
    let mut listed = sample
        .iter()
        .take(MAX_LISTED_VALUES)
        .map(|v| v.to_string())
        .collect::<Vec<_>>();
    if sample.len() > MAX_LISTED_VALUES {
        listed.push(format!("... ({} more)", sample.len() - MAX_LISTED_VALUES));
    }
    listed.join(", ")
}

pub(super) fn print_distribution(analysis: &Analysis) {
    match &analysis.distribution {
        Distribution::Ungrouped(table) => print_frequency_table(table),
        Distribution::Grouped(table) => print_grouped_table(table),
    }
}

fn print_frequency_table(table: &FrequencyTable) {
    println!("Frequency Table");
    println!(
        "  {:<20} {:>8} {:>8} {:>10} {:>10}",
        "Value", "fi", "Fi", "fi (%)", "Fi (%)"
    );
    // value(20) + fi(8) + Fi(8) + fi%(10) + Fi%(10) + spaces(4)
    println!("  {}", "-".repeat(60));
    for row in &table.rows {
        println!(
            "  {:<20} {:>8} {:>8} {:>9.PRECISION$}% {:>9.PRECISION$}%",
            row.value,
            row.frequency,
            row.cumulative_frequency,
            row.relative_frequency_pct,
            row.cumulative_relative_frequency_pct,
        );
    }
}

fn print_grouped_table(table: &GroupedTable) {
    println!(
        "Grouped Frequency Table ({} classes, width {})",
        table.intervals.len(),
        table.class_width
    );
    println!(
        "  {:<24} {:>10} {:>8} {:>8} {:>10} {:>10}",
        "Interval", "Midpoint", "fi", "Fi", "fi (%)", "Fi (%)"
    );
    // interval(24) + midpoint(10) + fi(8) + Fi(8) + fi%(10) + Fi%(10) + spaces(5)
    println!("  {}", "-".repeat(75));
    for class in &table.intervals {
        println!(
            "  {:<24} {:>10.PRECISION$} {:>8} {:>8} {:>9.PRECISION$}% {:>9.PRECISION$}%",
            class.label(PRECISION),
            class.midpoint,
            class.frequency,
            class.cumulative_frequency,
            class.relative_frequency_pct,
            class.cumulative_relative_frequency_pct,
        );
    }
}

pub(super) fn print_measures(measures: &MeasureSet) {
    let cv = measures
        .coefficient_of_variation_pct
        .value()
        .map_or("N/A".to_string(), |cv| format!("{cv:.PRECISION$}%"));

    println!("Central Tendency");
    println!("  {:<26}: {}", "Mean", measures.mean.format(PRECISION));
    println!("  {:<26}: {}", "Median", measures.median.format(PRECISION));
    println!("  {:<26}: {}", "Mode", measures.mode.format(PRECISION));
    println!();
    println!("Dispersion");
    println!("  {:<26}: {}", "Range", measures.range.format(PRECISION));
    println!("  {:<26}: {}", "Variance", measures.variance.format(PRECISION));
    println!(
        "  {:<26}: {}",
        "Standard Deviation",
        measures.standard_deviation.format(PRECISION)
    );
    println!("  {:<26}: {cv}", "Coefficient of Variation");
    println!("  {:<26}: {:.PRECISION$}", "Minimum", measures.min);
    println!("  {:<26}: {:.PRECISION$}", "Maximum", measures.max);
}

pub(super) fn print_quantiles(quantiles: &QuantileSet, extra: &Percentiles) {
    let mut current_group: Option<QuantileGroup> = None;
    for (group, label, value) in quantiles.labeled() {
        if current_group != Some(group) {
            if current_group.is_some() {
                println!();
            }
            println!("{group}");
            current_group = Some(group);
        }
        println!("  {label:<10}: {value:.PRECISION$}");
    }
    println!(
        "  {:<10}: {:.PRECISION$}",
        "IQR",
        quantiles.interquartile_range()
    );

    if !extra.is_empty() {
        println!();
        println!("REQUESTED PERCENTILES");
        for (p, value) in extra.iter() {
            println!("  {:<10}: {value:.PRECISION$}", format!("P{p}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_listing() {
        let sample = Sample::parse("3 1 2.5").unwrap();
        assert_eq!(sorted_listing(&sample), "1, 2.5, 3");
    }

    #[test]
    fn test_sorted_listing_is_elided() {
        let sample = Sample::new((0..60).map(f64::from)).unwrap();
        let listing = sorted_listing(&sample);
        assert!(listing.starts_with("0, 1, 2"));
        assert!(listing.ends_with("48, 49, ... (10 more)"));
    }
}
