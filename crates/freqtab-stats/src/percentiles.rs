//! Quantiles by linear interpolation between order statistics
//!
//! Every quartile, decile and percentile in this crate goes through
//! [`compute_percentile`], so `Q2`, `D5` and `P50` are always the same number.

use serde::Serialize;

use crate::sample::Sample;

/// Computes a single percentile value from sorted data.
///
/// The fractional rank is `index = (p / 100) * (n - 1)`. When `index` is a
/// whole number the order statistic at that position is returned, otherwise
/// the result is interpolated linearly between its two neighbours.
/// `percentile` is clamped to `0.0..=100.0`.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use freqtab_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 0.0), 1.0);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );

    let index = (percentile.clamp(0.0, 100.0) / 100.0) * (sorted_values.len() - 1) as f64;
    let lo = index.floor();
    let hi = index.ceil();
    let lower = sorted_values[lo as usize];
    if lo == hi {
        return lower;
    }
    let upper = sorted_values[hi as usize];
    let fraction = index - lo;
    let span = upper - lower;
    if span.is_finite() {
        lower + fraction * span
    } else {
        // weighted form stays finite when the gap itself overflows
        lower * (1.0 - fraction) + upper * fraction
    }
}

/// The fixed set of quartiles, deciles and percentiles reported for a sample.
///
/// All fields come from [`compute_percentile`] on the raw sample, also in
/// grouped mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct QuantileSet {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub d1: f64,
    pub d5: f64,
    pub d9: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl QuantileSet {
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{percentiles::QuantileSet, sample::Sample};
    ///
    /// let sample = Sample::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let q = QuantileSet::from_sample(&sample);
    /// assert_eq!(q.q1, 2.0);
    /// assert_eq!(q.q2, 3.0);
    /// assert_eq!(q.q2, q.d5);
    /// assert_eq!(q.d5, q.p50);
    /// ```
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Self {
        let at = |p| compute_percentile(sample.as_slice(), p);
        Self {
            q1: at(25.0),
            q2: at(50.0),
            q3: at(75.0),
            d1: at(10.0),
            d5: at(50.0),
            d9: at(90.0),
            p10: at(10.0),
            p25: at(25.0),
            p50: at(50.0),
            p75: at(75.0),
            p90: at(90.0),
        }
    }

    /// `Q3 - Q1`
    #[must_use]
    pub fn interquartile_range(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Quartiles, deciles and percentiles as `(group, label, value)` rows, in
    /// display order.
    #[must_use]
    pub fn labeled(&self) -> [(QuantileGroup, &'static str, f64); 11] {
        use QuantileGroup::{Deciles, Percentiles, Quartiles};
        [
            (Quartiles, "Q1 (25%)", self.q1),
            (Quartiles, "Q2 (50%)", self.q2),
            (Quartiles, "Q3 (75%)", self.q3),
            (Deciles, "D1 (10%)", self.d1),
            (Deciles, "D5 (50%)", self.d5),
            (Deciles, "D9 (90%)", self.d9),
            (Percentiles, "P10", self.p10),
            (Percentiles, "P25", self.p25),
            (Percentiles, "P50", self.p50),
            (Percentiles, "P75", self.p75),
            (Percentiles, "P90", self.p90),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum QuantileGroup {
    #[display("QUARTILES")]
    Quartiles,
    #[display("DECILES")]
    Deciles,
    #[display("PERCENTILES")]
    Percentiles,
}

/// Precomputed values for caller-chosen percentile points.
///
/// # Examples
///
/// ```
/// use freqtab_stats::{percentiles::Percentiles, sample::Sample};
///
/// let sample = Sample::new([10.0, 20.0, 30.0, 40.0]).unwrap();
/// let percentiles = Percentiles::from_sample(&sample, &[50.0, 100.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(25.0));
/// assert_eq!(percentiles.get(100.0), Some(40.0));
/// assert_eq!(percentiles.get(75.0), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Percentiles {
    /// Percentile-value pairs, in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    #[must_use]
    pub fn from_sample(sample: &Sample, percentile_points: &[f64]) -> Self {
        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sample.as_slice(), p)))
            .collect();
        Self { values }
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Five-number summary drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxPlotSummary {
    #[must_use]
    pub fn new(sample: &Sample, quantiles: &QuantileSet) -> Self {
        Self {
            min: sample.min(),
            q1: quantiles.q1,
            median: quantiles.q2,
            q3: quantiles.q3,
            max: sample.max(),
        }
    }
}
