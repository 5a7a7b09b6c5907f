use aqd_utils::dates::{format_date, parse_date};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the two dates of an ISO-8601 interval.
pub const INTERVAL_SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("date range {0:?} is not of the form YYYY-MM-DD/YYYY-MM-DD")]
    Format(String),

    #[error("date range starts on {start} after it ends on {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// An inclusive range of calendar dates selected in the dashboard.
///
/// Written and parsed as an ISO-8601 interval, `2024-01-01/2024-01-31`.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Reversed { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// True when the timestamp's calendar date lies within the range.
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        let date = timestamp.date();
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            format_date(&self.start),
            INTERVAL_SEPARATOR,
            format_date(&self.end)
        )
    }
}

impl FromStr for DateRange {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || DateRangeError::Format(s.to_string());
        let (start, end) = s.split_once(INTERVAL_SEPARATOR).ok_or_else(format_error)?;
        let start = parse_date(start.trim()).map_err(|_| format_error())?;
        let end = parse_date(end.trim()).map_err(|_| format_error())?;
        DateRange::new(start, end)
    }
}
