use serde::Serialize;

use crate::{
    frequency::FrequencyTable,
    grouped::{GroupedTable, GroupingError},
    measures::MeasureSet,
    percentiles::{BoxPlotSummary, Percentiles, QuantileSet},
    sample::Sample,
};

/// How the sample is tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Grouping {
    /// One row per distinct value.
    Ungrouped,
    /// `classes` equal-width class intervals.
    Grouped { classes: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("cannot group sample: {_0}")]
    Grouping(GroupingError),
}

/// The frequency distribution of an analysis, ungrouped rows or class intervals.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    Ungrouped(FrequencyTable),
    Grouped(GroupedTable),
}

impl Distribution {
    /// `(label, frequency, relative %)` per row or class, in table order.
    ///
    /// Class labels use `precision` decimals; ungrouped values are printed
    /// as-is.
    #[must_use]
    pub fn bars(&self, precision: usize) -> Vec<(String, u64, f64)> {
        match self {
            Distribution::Ungrouped(table) => table
                .rows
                .iter()
                .map(|row| {
                    (
                        row.value.to_string(),
                        row.frequency,
                        row.relative_frequency_pct,
                    )
                })
                .collect(),
            Distribution::Grouped(table) => table
                .intervals
                .iter()
                .map(|c| (c.label(precision), c.frequency, c.relative_frequency_pct))
                .collect(),
        }
    }

    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        match self {
            Distribution::Ungrouped(table) => table.total_frequency(),
            Distribution::Grouped(table) => table.total_frequency(),
        }
    }
}

/// Complete result of one analysis run.
///
/// This structure bundles everything the presentation side needs:
/// - The sorted sample itself
/// - The frequency distribution (ungrouped rows or class intervals)
/// - Central tendency and dispersion measures
/// - Quartiles, deciles and percentiles of the raw sample
///
/// Each run builds a new value; nothing is updated in place.
///
/// # Examples
///
/// ```
/// use freqtab_stats::{
///     analysis::{Analysis, Grouping},
///     measures::Measure,
///     sample::Sample,
/// };
///
/// let sample = Sample::parse("1 2 3 4 5 6 7 8 9 10").unwrap();
/// let analysis = Analysis::run(sample, Grouping::Grouped { classes: 5 }).unwrap();
///
/// assert!(analysis.is_grouped());
/// assert_eq!(analysis.measures.mean, Measure::Value(6.0));
/// assert_eq!(analysis.quantiles.q2, 5.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub sample: Sample,
    pub grouping: Grouping,
    pub distribution: Distribution,
    pub measures: MeasureSet,
    pub quantiles: QuantileSet,
    /// Extra percentile points requested by the caller.
    #[serde(skip_serializing_if = "Percentiles::is_empty")]
    pub extra_percentiles: Percentiles,
}

impl Analysis {
    pub fn run(sample: Sample, grouping: Grouping) -> Result<Self, AnalysisError> {
        Self::run_with_percentiles(sample, grouping, &[])
    }

    /// Runs an analysis and also computes the given percentile points.
    pub fn run_with_percentiles(
        sample: Sample,
        grouping: Grouping,
        percentile_points: &[f64],
    ) -> Result<Self, AnalysisError> {
        tracing::debug!(n = sample.len(), ?grouping, "running analysis");

        let (distribution, measures) = match grouping {
            Grouping::Ungrouped => {
                let table = FrequencyTable::from_sample(&sample);
                let measures = MeasureSet::from_ungrouped(&sample, &table);
                (Distribution::Ungrouped(table), measures)
            }
            Grouping::Grouped { classes } => {
                let table =
                    GroupedTable::from_sample(&sample, classes).map_err(AnalysisError::Grouping)?;
                let measures = MeasureSet::from_grouped(&table);
                (Distribution::Grouped(table), measures)
            }
        };
        let quantiles = QuantileSet::from_sample(&sample);
        let extra_percentiles = Percentiles::from_sample(&sample, percentile_points);

        Ok(Self {
            sample,
            grouping,
            distribution,
            measures,
            quantiles,
            extra_percentiles,
        })
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.grouping.is_grouped()
    }

    #[must_use]
    pub fn box_plot(&self) -> BoxPlotSummary {
        BoxPlotSummary::new(&self.sample, &self.quantiles)
    }

    /// `(1-based index, value)` pairs of the sorted sample, as drawn by a
    /// scatter plot.
    pub fn scatter_points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.sample.iter().enumerate().map(|(i, v)| (i + 1, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::{Measure, Mode};

    fn run(text: &str, grouping: Grouping) -> Analysis {
        Analysis::run(Sample::parse(text).unwrap(), grouping).unwrap()
    }

    #[test]
    fn test_ungrouped_run() {
        let analysis = run("3 1 2 2", Grouping::Ungrouped);
        assert!(!analysis.is_grouped());
        assert!(analysis.distribution.is_ungrouped());
        assert_eq!(analysis.distribution.total_frequency(), 4);
        assert_eq!(analysis.measures.mode, Mode::Single(2.0));
        assert_eq!(analysis.measures.median, Measure::Value(2.0));
        assert_eq!(analysis.quantiles.q2, 2.0);
    }

    #[test]
    fn test_grouped_quantiles_use_raw_sample() {
        let ungrouped = run("1 2 3 4 5 6 7 8 9 10", Grouping::Ungrouped);
        let grouped = run("1 2 3 4 5 6 7 8 9 10", Grouping::Grouped { classes: 5 });
        assert_eq!(ungrouped.quantiles, grouped.quantiles);
        assert_eq!(grouped.distribution.total_frequency(), 10);
        // grouped bounds widen min/max to the class edges
        assert_eq!(grouped.measures.max, 11.0);
        assert_eq!(ungrouped.measures.max, 10.0);
    }

    #[test]
    fn test_zero_classes_error() {
        let err = Analysis::run(
            Sample::parse("1 2").unwrap(),
            Grouping::Grouped { classes: 0 },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot group sample: number of classes must be at least 1"
        );
    }

    #[test]
    fn test_uniform_sample_grouped() {
        let analysis = run("5 5 5 5 5", Grouping::Grouped { classes: 3 });
        assert_eq!(analysis.measures.mean, Measure::Value(5.0));
        assert_eq!(analysis.measures.variance, Measure::Value(0.0));
        let Distribution::Grouped(table) = &analysis.distribution else {
            panic!("expected grouped distribution");
        };
        assert!(table.is_degenerate());
    }

    #[test]
    fn test_sample_spanning_f64_range() {
        let sample = Sample::parse("-1e308 1e308").unwrap();

        let err = Analysis::run(sample.clone(), Grouping::Grouped { classes: 2 }).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Grouping(GroupingError::RangeOverflow { .. })
        ));

        let analysis = Analysis::run(sample, Grouping::Ungrouped).unwrap();
        let measures = &analysis.measures;
        assert_eq!(measures.mean, Measure::Value(0.0));
        assert!(measures.variance.is_undefined());
        assert!(measures.standard_deviation.is_undefined());
        assert!(measures.range.is_undefined());
        assert!(measures.coefficient_of_variation_pct.is_undefined());
        assert_eq!(analysis.quantiles.q2, 0.0);

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["measures"]["variance"], "overflow");
        assert_eq!(json["measures"]["range"], "overflow");
    }

    #[test]
    fn test_extra_percentiles() {
        let analysis = Analysis::run_with_percentiles(
            Sample::parse("10 20 30 40 50").unwrap(),
            Grouping::Ungrouped,
            &[0.0, 37.5],
        )
        .unwrap();
        assert_eq!(analysis.extra_percentiles.get(0.0), Some(10.0));
        assert_eq!(analysis.extra_percentiles.get(37.5), Some(25.0));
    }

    #[test]
    fn test_bars_and_scatter() {
        let analysis = run("1 2 2 3.5", Grouping::Ungrouped);
        let bars = analysis.distribution.bars(2);
        assert_eq!(bars[1], ("2".to_string(), 2, 50.0));
        assert_eq!(bars[2].0, "3.5");
        let points = analysis.scatter_points().collect::<Vec<_>>();
        assert_eq!(points, [(1, 1.0), (2, 2.0), (3, 2.0), (4, 3.5)]);

        let grouped = run("1 2 3 4", Grouping::Grouped { classes: 2 });
        let labels = grouped
            .distribution
            .bars(1)
            .into_iter()
            .map(|(label, _, _)| label)
            .collect::<Vec<_>>();
        assert_eq!(labels, ["[1.0 - 3.0)", "[3.0 - 5.0]"]);
    }

    #[test]
    fn test_serializes_undefined_measures_without_nan() {
        let analysis = run("-1 1", Grouping::Ungrouped);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["measures"]["coefficient_of_variation_pct"], "zero_mean");
        assert_eq!(json["measures"]["mode"]["kind"], "no_mode");
        assert_eq!(json["grouping"]["mode"], "ungrouped");
        assert_eq!(json["distribution"]["kind"], "ungrouped");
        assert_eq!(json["quantiles"]["Q2"], 0.0);
        assert!(json.get("extra_percentiles").is_none());
    }
}
