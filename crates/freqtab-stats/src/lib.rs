//! Descriptive statistics for a single numeric sample.
//!
//! This crate provides the computation side of `freqtab`:
//!
//! - **Samples**: Validated parsing of free-form numeric text
//! - **Frequency tables**: Exact-value frequencies with cumulative and relative columns
//! - **Class intervals**: Fixed-width grouping of a sample into `k` classes
//! - **Measures**: Mean, median, mode, variance, standard deviation, range and
//!   coefficient of variation, for raw or grouped data
//! - **Quantiles**: Quartiles, deciles and percentiles by linear interpolation
//! - **Analysis**: One bundle holding all of the above for a run
//!
//! Everything here is a pure function of its inputs; there is no I/O and no
//! shared state.
//!
//! # Modules
//!
//! - [`sample`]: Parsing and validating samples
//! - [`frequency`]: Ungrouped frequency tables
//! - [`grouped`]: Grouped frequency tables (class intervals)
//! - [`measures`]: Central tendency and dispersion measures
//! - [`percentiles`]: Percentile computation, quantile sets, box-plot summaries
//! - [`analysis`]: The complete result of an analysis run
//!
//! # Examples
//!
//! ## Analyzing ungrouped data
//!
//! ```
//! use freqtab_stats::{
//!     analysis::{Analysis, Grouping},
//!     measures::{Measure, Mode},
//!     sample::Sample,
//! };
//!
//! let sample = Sample::parse("4, 8, 15, 16, 23, 42, 8").unwrap();
//! let analysis = Analysis::run(sample, Grouping::Ungrouped).unwrap();
//!
//! assert_eq!(analysis.measures.mode, Mode::Single(8.0));
//! assert_eq!(analysis.measures.range, Measure::Value(38.0));
//! ```
//!
//! ## Grouping into class intervals
//!
//! ```
//! use freqtab_stats::{grouped::GroupedTable, sample::Sample};
//!
//! let sample = Sample::parse("1 2 3 4 5 6 7 8 9 10").unwrap();
//! let table = GroupedTable::from_sample(&sample, 5).unwrap();
//! assert_eq!(table.intervals.len(), 5);
//! assert_eq!(table.total_frequency(), 10);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use freqtab_stats::percentiles::compute_percentile;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&values, 50.0), 3.0);
//! assert_eq!(compute_percentile(&values, 10.0), 1.4);
//! ```

pub mod analysis;
pub mod frequency;
pub mod grouped;
pub mod measures;
pub mod percentiles;
pub mod sample;
