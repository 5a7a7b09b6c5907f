//! Shared utility functions for air-quality dashboard crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Calendar date format used in query strings and API parameters: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Offset-free local timestamp layouts accepted by [`parse_local_timestamp`].
    const NAIVE_TIMESTAMP_FORMATS: [&str; 3] =
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
    }

    /// Parse a local timestamp into its wall-clock date and time.
    ///
    /// An RFC 3339 timestamp with an offset (`2024-01-15T09:00:00+02:00`)
    /// keeps the wall-clock fields as written; the offset is dropped, not
    /// applied. Offset-free timestamps (`2024-01-15T09:00:00`,
    /// `2024-01-15T09:00`) are taken as local already.
    pub fn parse_local_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
        let trimmed = s.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(with_offset.naive_local());
        }
        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| DateError(format!("unrecognised local timestamp {:?}", s)).into())
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
