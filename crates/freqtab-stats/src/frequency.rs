//! Exact-value frequency tables for ungrouped data
//!
//! Values are counted by exact numeric equality. Counting goes through a
//! [`BTreeMap`] keyed by [`ValueKey`], a totally ordered wrapper around
//! `f64`, so rows come out ascending without any string round-trip.
//!
//! # Examples
//!
//! ```
//! use freqtab_stats::{frequency::FrequencyTable, sample::Sample};
//!
//! let sample = Sample::parse("3 1 3 2 3").unwrap();
//! let table = FrequencyTable::from_sample(&sample);
//!
//! let values = table.rows.iter().map(|r| r.value).collect::<Vec<_>>();
//! assert_eq!(values, [1.0, 2.0, 3.0]);
//! assert_eq!(table.rows[2].frequency, 3);
//! assert_eq!(table.rows[2].cumulative_frequency, 5);
//! assert_eq!(table.rows[2].relative_frequency_pct, 60.0);
//! ```

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::sample::Sample;

/// Totally ordered map key for a finite `f64`.
///
/// `-0.0` is folded into `0.0` so both count as the same value.
#[derive(Debug, Clone, Copy)]
pub struct ValueKey(f64);

impl ValueKey {
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ValueKey {}

impl PartialOrd for ValueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Counts occurrences of each distinct value.
#[must_use]
pub fn count_values<I>(values: I) -> BTreeMap<ValueKey, u64>
where
    I: IntoIterator<Item = f64>,
{
    let mut value_counts = BTreeMap::new();
    for value in values {
        *value_counts.entry(ValueKey::new(value)).or_insert(0) += 1;
    }
    value_counts
}

/// One row of an ungrouped frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: f64,
    pub frequency: u64,
    pub cumulative_frequency: u64,
    /// Share of the sample, in percent, kept at full precision.
    pub relative_frequency_pct: f64,
    pub cumulative_relative_frequency_pct: f64,
}

/// Ungrouped frequency distribution: one row per distinct value, ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Self {
        let n = sample.size();
        let mut cumulative_frequency = 0;
        let rows = count_values(sample.iter())
            .into_iter()
            .map(|(key, frequency)| {
                cumulative_frequency += frequency;
                FrequencyRow {
                    value: key.value(),
                    frequency,
                    cumulative_frequency,
                    relative_frequency_pct: frequency as f64 / n * 100.0,
                    cumulative_relative_frequency_pct: cumulative_frequency as f64 / n * 100.0,
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(distinct = rows.len(), n = sample.len(), "built frequency table");
        Self { rows }
    }

    /// Highest frequency of any single value.
    #[must_use]
    pub fn max_frequency(&self) -> u64 {
        self.rows.iter().map(|row| row.frequency).max().unwrap_or(0)
    }

    /// Sum of all frequencies; equals the sample size.
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.rows.iter().map(|row| row.frequency).sum()
    }
}
