//! Data processing for air-quality measurements.
//!
//! This crate turns raw measurement lists into the frequency histograms the
//! temporal coverage charts are drawn from.

pub mod coverage;

pub use coverage::{
    bin_measurements, coverage_for_parameter, Bucket, CoverageError, DayOfWeek, Histogram,
    HourOfDay, MonthOfYear, TemporalCoverage,
};
