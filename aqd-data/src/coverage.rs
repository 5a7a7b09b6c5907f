//! Hour-of-day, day-of-week and month-of-year coverage histograms.
//!
//! Buckets that were never observed are absent from a [`Histogram`] rather
//! than present with a zero count. Hours are listed in ascending order; days
//! and months keep the order in which each bucket was first seen.

use aqd_openaq::measurement::Measurement;
use aqd_utils::dates::parse_local_timestamp;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("measurement {index} has malformed local timestamp {timestamp:?}: {reason}")]
    MalformedTimestamp {
        index: usize,
        timestamp: String,
        reason: String,
    },
}

/// A labeled histogram cell domain.
pub trait Bucket: Copy + Ord + fmt::Display + 'static {
    /// Every bucket of the domain, in display order.
    const ALL: &'static [Self];

    /// Keep histogram entries in domain order instead of first-seen order.
    const ORDERED: bool = false;

    fn from_timestamp(timestamp: &NaiveDateTime) -> Self;
}

/// Local hour, `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourOfDay(u8);

const HOURS: [HourOfDay; 24] = {
    let mut hours = [HourOfDay(0); 24];
    let mut i = 0;
    while i < 24 {
        hours[i] = HourOfDay(i as u8);
        i += 1;
    }
    hours
};

impl HourOfDay {
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(HourOfDay(hour))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Bucket for HourOfDay {
    const ALL: &'static [Self] = &HOURS;
    const ORDERED: bool = true;

    fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        HourOfDay(timestamp.hour() as u8)
    }
}

/// Local weekday; ordinal 0 is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    Sun,
    Mon,
    Tues,
    Wed,
    Thurs,
    Fri,
    Sat,
}

impl DayOfWeek {
    pub const LABELS: [&'static str; 7] = ["SUN", "MON", "TUES", "WED", "THURS", "FRI", "SAT"];

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Bucket for DayOfWeek {
    const ALL: &'static [Self] = &[
        DayOfWeek::Sun,
        DayOfWeek::Mon,
        DayOfWeek::Tues,
        DayOfWeek::Wed,
        DayOfWeek::Thurs,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
    ];

    fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        Self::ALL[timestamp.weekday().num_days_from_sunday() as usize]
    }
}

/// Local month; ordinal 0 is January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthOfYear {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    June,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthOfYear {
    pub const LABELS: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUNE", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Bucket for MonthOfYear {
    const ALL: &'static [Self] = &[
        MonthOfYear::Jan,
        MonthOfYear::Feb,
        MonthOfYear::Mar,
        MonthOfYear::Apr,
        MonthOfYear::May,
        MonthOfYear::June,
        MonthOfYear::Jul,
        MonthOfYear::Aug,
        MonthOfYear::Sep,
        MonthOfYear::Oct,
        MonthOfYear::Nov,
        MonthOfYear::Dec,
    ];

    fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        Self::ALL[timestamp.month0() as usize]
    }
}

/// Ordered bucket counts. Only observed buckets are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<B> {
    entries: Vec<(B, u64)>,
}

impl<B> Default for Histogram<B> {
    fn default() -> Self {
        Histogram {
            entries: Vec::new(),
        }
    }
}

impl<B: Bucket> Histogram<B> {
    /// Count one more occurrence.
    ///
    /// A first occurrence is appended, or inserted at its domain position
    /// for [`Bucket::ORDERED`] domains.
    pub fn increment(&mut self, bucket: B) {
        match self.entries.iter().position(|(b, _)| *b == bucket) {
            Some(index) => self.entries[index].1 += 1,
            None if B::ORDERED => {
                let at = self.entries.partition_point(|(b, _)| *b < bucket);
                self.entries.insert(at, (bucket, 1));
            }
            None => self.entries.push((bucket, 1)),
        }
    }

    pub fn get(&self, bucket: B) -> Option<u64> {
        self.entries
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (B, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Bucket labels, in entry order (chart x-axis).
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(b, _)| b.to_string()).collect()
    }

    /// Counts, in entry order (chart bar heights).
    pub fn frequencies(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with every bucket of the domain in domain order, zero-filled.
    ///
    /// Meant for gap-free charts; the binner itself never fills.
    pub fn with_all_buckets(&self) -> Histogram<B> {
        Histogram {
            entries: B::ALL
                .iter()
                .map(|&bucket| (bucket, self.get(bucket).unwrap_or(0)))
                .collect(),
        }
    }
}

impl<B: Bucket> Serialize for Histogram<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (bucket, count) in &self.entries {
            map.serialize_entry(&bucket.to_string(), count)?;
        }
        map.end()
    }
}

/// The three coverage histograms of one parameter's measurements.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TemporalCoverage {
    pub hour: Histogram<HourOfDay>,
    pub day: Histogram<DayOfWeek>,
    pub month: Histogram<MonthOfYear>,
}

/// Bin measurements (already filtered to one parameter) by local time.
///
/// Fails on the first timestamp that does not parse; nothing is returned
/// for the measurements before it.
pub fn bin_measurements<'a, I>(measurements: I) -> Result<TemporalCoverage, CoverageError>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut coverage = TemporalCoverage::default();
    for (index, measurement) in measurements.into_iter().enumerate() {
        let timestamp = parse_local_timestamp(measurement.timestamp_local()).map_err(|e| {
            CoverageError::MalformedTimestamp {
                index,
                timestamp: measurement.timestamp_local().to_string(),
                reason: e.to_string(),
            }
        })?;
        coverage.hour.increment(HourOfDay::from_timestamp(&timestamp));
        coverage.day.increment(DayOfWeek::from_timestamp(&timestamp));
        coverage.month.increment(MonthOfYear::from_timestamp(&timestamp));
    }
    log::debug!("Binned {} measurements", coverage.hour.total());
    Ok(coverage)
}

/// Select one parameter's measurements, then bin them.
pub fn coverage_for_parameter(
    measurements: &[Measurement],
    parameter_id: &str,
) -> Result<TemporalCoverage, CoverageError> {
    bin_measurements(Measurement::for_parameter(measurements, parameter_id))
}
