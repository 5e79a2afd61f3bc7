//! Central tendency and dispersion measures
//!
//! [`MeasureSet`] is computed either from the raw sample
//! ([`MeasureSet::from_ungrouped`]) or from class midpoints and frequencies
//! ([`MeasureSet::from_grouped`]). Measures that can be undefined for a
//! degenerate distribution, or that overflow `f64` for extreme samples, are
//! [`Measure`] values rather than bare `f64`, so NaN or infinity never leaks
//! to the caller.

use serde::Serialize;

use crate::{frequency::FrequencyTable, grouped::GroupedTable, sample::Sample};

/// Why a measure has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Undefined {
    /// The coefficient of variation divides by a zero mean.
    #[display("mean is zero")]
    ZeroMean,
    /// The interpolated median landed on a class with no members.
    #[display("median class is empty")]
    EmptyMedianClass,
    /// The modal class has the same frequency as both neighbours.
    #[display("modal class is not a peak")]
    FlatModalClass,
    /// The result does not fit in an `f64`.
    #[display("value overflows")]
    Overflow,
}

/// A real-valued measure that may be undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(untagged)]
pub enum Measure {
    Value(f64),
    Undefined(Undefined),
}

impl Measure {
    /// Wraps `value`, or reports [`Undefined::Overflow`] when it is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::measures::{Measure, Undefined};
    ///
    /// assert_eq!(Measure::finite(1.5), Measure::Value(1.5));
    /// assert_eq!(Measure::finite(f64::INFINITY), Measure::Undefined(Undefined::Overflow));
    /// assert!(Measure::finite(f64::NAN).is_undefined());
    /// ```
    #[must_use]
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            Measure::Value(value)
        } else {
            Measure::Undefined(Undefined::Overflow)
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Value(value) => Some(value),
            Measure::Undefined(_) => None,
        }
    }

    /// Formats with `precision` decimals, or `N/A` when undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::measures::{Measure, Undefined};
    ///
    /// assert_eq!(Measure::Value(2.0 / 3.0).format(2), "0.67");
    /// assert_eq!(Measure::Undefined(Undefined::ZeroMean).format(2), "N/A");
    /// ```
    #[must_use]
    pub fn format(self, precision: usize) -> String {
        self.value()
            .map_or("N/A".to_string(), |value| format!("{value:.precision$}"))
    }
}

/// The most frequent value(s) of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Mode {
    Single(f64),
    /// Several values share the highest frequency, ascending.
    Tied(Vec<f64>),
    /// Every observation is its own modal value.
    NoMode,
    Undefined(Undefined),
}

impl Mode {
    /// Mode of an ungrouped distribution.
    ///
    /// When the number of values sharing the highest frequency equals the
    /// sample size (every observation occurs once), there is no mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{frequency::FrequencyTable, measures::Mode, sample::Sample};
    ///
    /// let mode = |text| {
    ///     let sample = Sample::parse(text).unwrap();
    ///     Mode::from_frequencies(&FrequencyTable::from_sample(&sample), sample.len())
    /// };
    /// assert_eq!(mode("1 1 2 3"), Mode::Single(1.0));
    /// assert_eq!(mode("1 1 2 2"), Mode::Tied(vec![1.0, 2.0]));
    /// assert_eq!(mode("1 2 3"), Mode::NoMode);
    /// ```
    #[must_use]
    pub fn from_frequencies(table: &FrequencyTable, n: usize) -> Self {
        let max_frequency = table.max_frequency();
        let mut modes = table
            .rows
            .iter()
            .filter(|row| row.frequency == max_frequency)
            .map(|row| row.value)
            .collect::<Vec<_>>();
        match modes.len() {
            len if len == n => Mode::NoMode,
            1 => Mode::Single(modes.remove(0)),
            _ => Mode::Tied(modes),
        }
    }

    /// Formats modal values with `precision` decimals.
    #[must_use]
    pub fn format(&self, precision: usize) -> String {
        match self {
            Mode::Single(value) => format!("{value:.precision$}"),
            Mode::Tied(values) => values
                .iter()
                .map(|value| format!("{value:.precision$}"))
                .collect::<Vec<_>>()
                .join(", "),
            Mode::NoMode => "no mode".to_string(),
            Mode::Undefined(_) => "N/A".to_string(),
        }
    }
}

/// Central tendency and dispersion of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureSet {
    pub mean: Measure,
    pub median: Measure,
    pub mode: Mode,
    /// Population variance (divides by `n`).
    pub variance: Measure,
    pub standard_deviation: Measure,
    pub range: Measure,
    pub coefficient_of_variation_pct: Measure,
    pub min: f64,
    pub max: f64,
}

impl MeasureSet {
    /// Computes measures from raw values.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{
    ///     frequency::FrequencyTable,
    ///     measures::{Measure, MeasureSet},
    ///     sample::Sample,
    /// };
    ///
    /// let sample = Sample::parse("2 4 4 4 5 5 7 9").unwrap();
    /// let table = FrequencyTable::from_sample(&sample);
    /// let measures = MeasureSet::from_ungrouped(&sample, &table);
    ///
    /// assert_eq!(measures.mean, Measure::Value(5.0));
    /// assert_eq!(measures.variance, Measure::Value(4.0));
    /// assert_eq!(measures.standard_deviation, Measure::Value(2.0));
    /// assert_eq!(measures.range, Measure::Value(7.0));
    /// ```
    #[must_use]
    pub fn from_ungrouped(sample: &Sample, table: &FrequencyTable) -> Self {
        let values = sample.as_slice();
        let n = sample.size();
        let count = values.len();

        let mean = values.iter().sum::<f64>() / n;
        let median = if count % 2 == 0 {
            values[count / 2 - 1].midpoint(values[count / 2])
        } else {
            values[count / 2]
        };
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let standard_deviation = Measure::finite(variance.sqrt());
        let mean = Measure::finite(mean);

        Self {
            mean,
            median: Measure::Value(median),
            mode: Mode::from_frequencies(table, count),
            variance: Measure::finite(variance),
            standard_deviation,
            range: Measure::finite(sample.range()),
            coefficient_of_variation_pct: coefficient_of_variation(standard_deviation, mean),
            min: sample.min(),
            max: sample.max(),
        }
    }

    /// Computes measures from class midpoints and frequencies.
    ///
    /// The median and mode are interpolated inside the median class and the
    /// modal class respectively. Among classes tied for the highest
    /// frequency, the last one is the modal class.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{grouped::GroupedTable, measures::{Measure, MeasureSet}, sample::Sample};
    ///
    /// // [1,3) [3,5) [5,7] with frequencies 1, 3, 1
    /// let sample = Sample::parse("1 3 4 4 7").unwrap();
    /// let table = GroupedTable::from_sample(&sample, 3).unwrap();
    /// let measures = MeasureSet::from_grouped(&table);
    ///
    /// assert_eq!(measures.mean, Measure::Value(4.0));
    /// assert_eq!(measures.median, Measure::Value(4.0));
    /// assert_eq!(measures.range, Measure::Value(6.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_grouped(table: &GroupedTable) -> Self {
        let intervals = &table.intervals;
        let n = table.total_frequency() as f64;

        let mean = intervals
            .iter()
            .map(|c| c.midpoint * c.frequency as f64)
            .sum::<f64>()
            / n;
        let variance = intervals
            .iter()
            .map(|c| (c.midpoint - mean).powi(2) * c.frequency as f64)
            .sum::<f64>()
            / n;
        let standard_deviation = Measure::finite(variance.sqrt());
        let mean = Measure::finite(mean);
        let min = table.first().lower_bound;
        let max = table.last().upper_bound;

        Self {
            mean,
            median: grouped_median(table, n),
            mode: grouped_mode(table),
            variance: Measure::finite(variance),
            standard_deviation,
            range: Measure::finite(max - min),
            coefficient_of_variation_pct: coefficient_of_variation(standard_deviation, mean),
            min,
            max,
        }
    }
}

/// `std_dev / mean * 100`.
///
/// Undefined with [`Undefined::ZeroMean`] for a zero mean, and with
/// [`Undefined::Overflow`] when either input is undefined or the ratio
/// overflows.
///
/// # Examples
///
/// ```
/// use freqtab_stats::measures::{coefficient_of_variation, Measure, Undefined};
///
/// let cv = coefficient_of_variation(Measure::Value(2.0), Measure::Value(8.0));
/// assert_eq!(cv, Measure::Value(25.0));
///
/// let cv = coefficient_of_variation(Measure::Value(2.0), Measure::Value(0.0));
/// assert_eq!(cv, Measure::Undefined(Undefined::ZeroMean));
/// ```
#[must_use]
pub fn coefficient_of_variation(std_dev: Measure, mean: Measure) -> Measure {
    let (Some(std_dev), Some(mean)) = (std_dev.value(), mean.value()) else {
        return Measure::Undefined(Undefined::Overflow);
    };
    if mean == 0.0 {
        tracing::debug!(std_dev, "coefficient of variation is undefined for a zero mean");
        return Measure::Undefined(Undefined::ZeroMean);
    }
    let cv = Measure::finite(std_dev / mean * 100.0);
    if cv.is_undefined() {
        tracing::debug!(mean, std_dev, "coefficient of variation overflows");
    }
    cv
}

/// `L + ((n/2 - F) / fm) * c` on the first class whose cumulative frequency
/// reaches `n/2`.
#[expect(clippy::cast_precision_loss)]
fn grouped_median(table: &GroupedTable, n: f64) -> Measure {
    let half_n = n / 2.0;
    let Some(idx) = table
        .intervals
        .iter()
        .position(|c| c.cumulative_frequency as f64 >= half_n)
    else {
        // unreachable for a built table: the last cumulative frequency is n
        return Measure::Undefined(Undefined::EmptyMedianClass);
    };
    let class = &table.intervals[idx];
    let preceding = if idx == 0 {
        0.0
    } else {
        table.intervals[idx - 1].cumulative_frequency as f64
    };
    // unreachable for a built table: the first class to reach n/2 holds a value
    if class.frequency == 0 {
        tracing::warn!(class = idx, "median class is empty");
        return Measure::Undefined(Undefined::EmptyMedianClass);
    }
    let fm = class.frequency as f64;
    Measure::finite(class.lower_bound + ((half_n - preceding) / fm) * class.width())
}

/// `L0 + (d1 / (d1 + d2)) * c` on the modal class.
#[expect(clippy::cast_precision_loss)]
fn grouped_mode(table: &GroupedTable) -> Mode {
    let intervals = &table.intervals;
    // `max_by_key` keeps the last of several equal maxima
    let Some((idx, class)) = intervals.iter().enumerate().max_by_key(|(_, c)| c.frequency) else {
        // only a hand-built table can have no classes
        return Mode::Undefined(Undefined::FlatModalClass);
    };
    let frequency = class.frequency as f64;
    let before = idx
        .checked_sub(1)
        .map_or(0.0, |i| intervals[i].frequency as f64);
    let after = intervals.get(idx + 1).map_or(0.0, |c| c.frequency as f64);
    let d1 = frequency - before;
    let d2 = frequency - after;
    // unreachable for a built table: the last of the tied classes has `d2 > 0`
    if d1 + d2 == 0.0 {
        tracing::warn!(class = idx, "modal class has no peak");
        return Mode::Undefined(Undefined::FlatModalClass);
    }
    Mode::Single(class.lower_bound + (d1 / (d1 + d2)) * class.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ungrouped(text: &str) -> MeasureSet {
        let sample = Sample::parse(text).unwrap();
        MeasureSet::from_ungrouped(&sample, &FrequencyTable::from_sample(&sample))
    }

    fn grouped(text: &str, classes: usize) -> MeasureSet {
        let sample = Sample::parse(text).unwrap();
        MeasureSet::from_grouped(&GroupedTable::from_sample(&sample, classes).unwrap())
    }

    fn assert_close(actual: Measure, expected: f64) {
        let Measure::Value(actual) = actual else {
            panic!("expected {expected}, got {actual:?}");
        };
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(ungrouped("1 2 3 4").median, Measure::Value(2.5));
        assert_eq!(ungrouped("3 1 2").median, Measure::Value(2.0));
        assert_eq!(ungrouped("8").median, Measure::Value(8.0));
    }

    #[test]
    fn test_mode_variants() {
        assert_eq!(ungrouped("1 1 2 3").mode, Mode::Single(1.0));
        assert_eq!(ungrouped("1 1 2 2").mode, Mode::Tied(vec![1.0, 2.0]));
        assert_eq!(ungrouped("1 2 3").mode, Mode::NoMode);
        // all values equally frequent but repeated: still a tie, not "no mode"
        assert_eq!(
            ungrouped("3 1 2 1 2 3").mode,
            Mode::Tied(vec![1.0, 2.0, 3.0])
        );
        assert_eq!(ungrouped("5 5").mode, Mode::Single(5.0));
        // a single observation is its own modal value
        assert_eq!(ungrouped("5").mode, Mode::NoMode);
    }

    #[test]
    fn test_population_variance() {
        let m = ungrouped("2 4 4 4 5 5 7 9");
        assert_eq!(m.mean, Measure::Value(5.0));
        assert_eq!(m.variance, Measure::Value(4.0));
        assert_eq!(m.standard_deviation, Measure::Value(2.0));
        assert_close(m.coefficient_of_variation_pct, 40.0);
        assert_eq!((m.min, m.max), (2.0, 9.0));
        assert_eq!(m.range, Measure::Value(7.0));
    }

    #[test]
    fn test_cv_undefined_for_zero_mean() {
        let m = ungrouped("-2 -1 0 1 2");
        assert_eq!(m.mean, Measure::Value(0.0));
        assert_eq!(
            m.coefficient_of_variation_pct,
            Measure::Undefined(Undefined::ZeroMean)
        );
        assert_eq!(m.coefficient_of_variation_pct.format(2), "N/A");

        let m = ungrouped("0 0 0");
        assert!(m.coefficient_of_variation_pct.is_undefined());
    }

    #[test]
    fn test_cv_negative_mean() {
        let m = ungrouped("-2 -4");
        assert_close(m.coefficient_of_variation_pct, -100.0 / 3.0);
    }

    #[test]
    fn test_grouped_one_to_ten() {
        // classes [1,3) [3,5) [5,7) [7,9) [9,11], two values each
        let m = grouped("1 2 3 4 5 6 7 8 9 10", 5);
        assert_eq!(m.mean, Measure::Value(6.0));
        // median class [5,7): 5 + ((5 - 4) / 2) * 2
        assert_eq!(m.median, Measure::Value(6.0));
        // every class ties; the last one is modal with d1 = 0, d2 = 2
        assert_eq!(m.mode, Mode::Single(9.0));
        assert_close(m.variance, 8.0);
        assert_eq!((m.min, m.max), (1.0, 11.0));
        assert_eq!(m.range, Measure::Value(10.0));
    }

    #[test]
    fn test_grouped_mode_interpolation() {
        // width 2: [0,2) [2,4) [4,6] frequencies 1, 4, 2
        let m = grouped("0 2 2 3 3 5 6", 3);
        // d1 = 3, d2 = 2 -> 2 + 3/5 * 2
        let Mode::Single(mode) = m.mode else {
            panic!("expected a single mode, got {:?}", m.mode);
        };
        assert_close(Measure::Value(mode), 3.2);
    }

    #[test]
    fn test_grouped_mode_ties_pick_last_class() {
        // width 1: [0,1) [1,2) [2,3] -> 1, 1, 1; last class: d1 = 0, d2 = 1
        assert_eq!(grouped("0 1 2", 3).mode, Mode::Single(2.0));
        // width 1: [0,1) [1,2) [2,3] -> 1, 2, 2; last class: d1 = 0, d2 = 2
        assert_eq!(grouped("0 1 1 2 2", 3).mode, Mode::Single(2.0));
        // width 1: [0,1) [1,2) [2,3) [3,4] -> 2, 2, 2, 1; third class: d1 = 0, d2 = 1
        assert_eq!(grouped("0 0 1 1 2 2 4", 4).mode, Mode::Single(2.0));
    }

    #[test]
    fn test_grouped_mode_without_classes() {
        let table = GroupedTable {
            intervals: vec![],
            class_width: 1.0,
            requested_classes: 0,
        };
        assert_eq!(grouped_mode(&table), Mode::Undefined(Undefined::FlatModalClass));
    }

    #[test]
    fn test_grouped_degenerate_sample() {
        let m = grouped("7 7 7", 4);
        assert_eq!(m.mean, Measure::Value(7.0));
        assert_eq!(m.median, Measure::Value(7.0));
        assert_eq!(m.mode, Mode::Single(7.0));
        assert_eq!(m.variance, Measure::Value(0.0));
        assert_eq!(m.range, Measure::Value(0.0));
        assert_close(m.coefficient_of_variation_pct, 0.0);
    }

    #[test]
    fn test_grouped_zero_mean_cv() {
        let m = grouped("-1 -1 0 0", 1);
        // single class [-1, 0]; width 1, midpoint -0.5
        assert_eq!(m.mean, Measure::Value(-0.5));
        let m = grouped("-1 1", 2);
        // [-1,0) [0,1]: midpoints -0.5, 0.5
        assert_eq!(m.mean, Measure::Value(0.0));
        assert_eq!(
            m.coefficient_of_variation_pct,
            Measure::Undefined(Undefined::ZeroMean)
        );
    }

    #[test]
    fn test_grouped_median_skips_empty_leading_classes() {
        // width 3: [0,3) [3,6) [6,9) [9,12] -> 1, 0, 0, 3
        let m = grouped("0 9 10 12", 4);
        // n/2 = 2, first class with F >= 2 is the last: 9 + ((2 - 1) / 3) * 3
        assert_close(m.median, 10.0);
    }

    #[test]
    fn test_overflowing_spread_is_undefined() {
        let overflow = Measure::Undefined(Undefined::Overflow);
        let m = ungrouped("-1e308 1e308");
        assert_eq!(m.mean, Measure::Value(0.0));
        assert_eq!(m.median, Measure::Value(0.0));
        assert_eq!(m.variance, overflow);
        assert_eq!(m.standard_deviation, overflow);
        assert_eq!(m.range, overflow);
        assert_eq!(m.coefficient_of_variation_pct, overflow);
        assert_eq!((m.min, m.max), (-1e308, 1e308));
    }

    #[test]
    fn test_overflowing_sum_is_undefined() {
        let m = ungrouped("1e308 1e308 1.5e308");
        assert!(m.mean.is_undefined());
        assert!(m.variance.is_undefined());
        assert!(m.coefficient_of_variation_pct.is_undefined());
        // ranks and extremes are still exact
        assert_eq!(m.median, Measure::Value(1e308));
        assert_eq!(m.range, Measure::Value(1.5e308 - 1e308));
    }

    #[test]
    fn test_cv_reasons() {
        let cv = |sd, mean| coefficient_of_variation(Measure::Value(sd), Measure::Value(mean));
        assert_eq!(cv(1.0, 0.0), Measure::Undefined(Undefined::ZeroMean));
        // a tiny non-zero mean overflows the ratio instead
        assert_eq!(cv(1e300, 1e-300), Measure::Undefined(Undefined::Overflow));
        assert_eq!(
            coefficient_of_variation(Measure::Undefined(Undefined::Overflow), Measure::Value(1.0)),
            Measure::Undefined(Undefined::Overflow)
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(Mode::Tied(vec![1.0, 2.5]).format(1), "1.0, 2.5");
        assert_eq!(Mode::NoMode.format(2), "no mode");
        assert_eq!(Measure::Value(3.14159).format(4), "3.1416");
    }
}
