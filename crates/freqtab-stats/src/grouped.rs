//! Class intervals for grouped data
//!
//! A sample is partitioned into `k` contiguous, equal-width classes starting
//! at the sample minimum. The class width is `ceil(range / k)`: widths are
//! always whole numbers, so the last class usually reaches past the sample
//! maximum. Every class is half-open `[lower, upper)` except the last, which
//! is closed `[lower, upper]` so that the maximum is always counted.
//!
//! # Examples
//!
//! ```
//! use freqtab_stats::{grouped::GroupedTable, sample::Sample};
//!
//! let sample = Sample::parse("1 2 3 4 5 6 7 8 9 10").unwrap();
//! let table = GroupedTable::from_sample(&sample, 5).unwrap();
//!
//! assert_eq!(table.class_width, 2.0);
//! let bounds = table
//!     .intervals
//!     .iter()
//!     .map(|c| (c.lower_bound, c.upper_bound))
//!     .collect::<Vec<_>>();
//! assert_eq!(bounds, [(1.0, 3.0), (3.0, 5.0), (5.0, 7.0), (7.0, 9.0), (9.0, 11.0)]);
//! assert_eq!(table.intervals[4].member_values, [9.0, 10.0]);
//! ```

use serde::Serialize;

use crate::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GroupingError {
    #[display("number of classes must be at least 1")]
    ZeroClasses,
    #[display("sample range from {min:e} to {max:e} is too wide to split into classes")]
    RangeOverflow { min: f64, max: f64 },
}

/// A single class of a grouped frequency distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInterval {
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Whether `upper_bound` itself belongs to the class (only the last one).
    pub upper_inclusive: bool,
    pub midpoint: f64,
    pub frequency: u64,
    pub cumulative_frequency: u64,
    pub relative_frequency_pct: f64,
    pub cumulative_relative_frequency_pct: f64,
    /// Sample values assigned to this class, ascending.
    pub member_values: Vec<f64>,
}

impl ClassInterval {
    fn new(lower_bound: f64, upper_bound: f64, upper_inclusive: bool) -> Self {
        Self {
            lower_bound,
            upper_bound,
            upper_inclusive,
            midpoint: lower_bound.midpoint(upper_bound),
            frequency: 0,
            cumulative_frequency: 0,
            relative_frequency_pct: 0.0,
            cumulative_relative_frequency_pct: 0.0,
            member_values: vec![],
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Class membership test: `lower <= v < upper`, or `lower <= v <= upper`
    /// for the closed last class.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.upper_inclusive {
            self.lower_bound <= value && value <= self.upper_bound
        } else {
            self.lower_bound <= value && value < self.upper_bound
        }
    }

    /// Interval notation with `precision` decimals, e.g. `[1.00 - 3.00)`.
    #[must_use]
    pub fn label(&self, precision: usize) -> String {
        let close = if self.upper_inclusive { ']' } else { ')' };
        format!(
            "[{:.precision$} - {:.precision$}{close}",
            self.lower_bound, self.upper_bound
        )
    }
}

/// Grouped frequency distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub intervals: Vec<ClassInterval>,
    /// Common width of every class; `0.0` for a zero-range sample.
    pub class_width: f64,
    /// The class count that was asked for.
    pub requested_classes: usize,
}

impl GroupedTable {
    /// Partitions a sample into `classes` class intervals.
    ///
    /// A sample whose values are all identical has no spread to partition.
    /// It produces a single degenerate class `[v, v]` of width zero that holds
    /// every value, whatever `classes` is.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqtab_stats::{grouped::GroupedTable, sample::Sample};
    /// let sample = Sample::parse("4 4 4").unwrap();
    /// let table = GroupedTable::from_sample(&sample, 3).unwrap();
    /// assert!(table.is_degenerate());
    /// assert_eq!(table.intervals.len(), 1);
    /// assert_eq!(table.intervals[0].frequency, 3);
    ///
    /// assert!(GroupedTable::from_sample(&sample, 0).is_err());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sample(sample: &Sample, classes: usize) -> Result<Self, GroupingError> {
        if classes == 0 {
            return Err(GroupingError::ZeroClasses);
        }

        let min = sample.min();
        let max = sample.max();
        let range = max - min;
        if !range.is_finite() {
            return Err(GroupingError::RangeOverflow { min, max });
        }

        if range == 0.0 {
            tracing::warn!(
                value = min,
                requested_classes = classes,
                "sample has zero range, using a single degenerate class"
            );
            let mut interval = ClassInterval::new(min, max, true);
            interval.member_values = sample.as_slice().to_vec();
            interval.frequency = sample.len() as u64;
            let mut intervals = vec![interval];
            accumulate(&mut intervals, sample.size());
            return Ok(Self {
                intervals,
                class_width: 0.0,
                requested_classes: classes,
            });
        }

        // `range / classes` can underflow to zero for subnormal ranges
        let class_width = (range / classes as f64).ceil().max(1.0);
        // rounding the width up can push the last bound past `f64::MAX`
        if !(min + classes as f64 * class_width).is_finite() {
            return Err(GroupingError::RangeOverflow { min, max });
        }

        // Both bounds are computed from `min` so neighbours share a boundary exactly
        let mut intervals = (0..classes)
            .map(|i| {
                let lower = min + (i as f64) * class_width;
                let upper = min + ((i + 1) as f64) * class_width;
                ClassInterval::new(lower, upper, i == classes - 1)
            })
            .collect::<Vec<_>>();
        let last_idx = intervals.len() - 1;
        let last = &mut intervals[last_idx];
        if last.upper_bound < max {
            last.upper_bound = max;
            last.midpoint = last.lower_bound.midpoint(last.upper_bound);
        }

        // Values are ascending, so the matching class never moves backwards
        let mut idx = 0;
        for value in sample.iter() {
            while idx < last_idx && !intervals[idx].contains(value) {
                idx += 1;
            }
            debug_assert!(intervals[idx].contains(value), "value {value} not in any class");
            tracing::trace!(value, class = idx, "assigned value to class");
            let interval = &mut intervals[idx];
            interval.frequency += 1;
            interval.member_values.push(value);
        }
        accumulate(&mut intervals, sample.size());

        tracing::debug!(
            classes,
            class_width,
            first_lower = min,
            last_upper = intervals[last_idx].upper_bound,
            "built class intervals"
        );

        Ok(Self {
            intervals,
            class_width,
            requested_classes: classes,
        })
    }

    /// `true` when the sample had zero range and the classes collapsed to a point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.class_width == 0.0
    }

    /// Sum of all class frequencies; equals the sample size.
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.intervals.iter().map(|c| c.frequency).sum()
    }

    #[must_use]
    pub fn first(&self) -> &ClassInterval {
        &self.intervals[0]
    }

    #[must_use]
    pub fn last(&self) -> &ClassInterval {
        &self.intervals[self.intervals.len() - 1]
    }
}

#[expect(clippy::cast_precision_loss)]
fn accumulate(intervals: &mut [ClassInterval], n: f64) {
    let mut cumulative_frequency = 0;
    for interval in intervals {
        cumulative_frequency += interval.frequency;
        interval.cumulative_frequency = cumulative_frequency;
        interval.relative_frequency_pct = interval.frequency as f64 / n * 100.0;
        interval.cumulative_relative_frequency_pct = cumulative_frequency as f64 / n * 100.0;
    }
}
