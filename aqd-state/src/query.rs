//! Query strings that round-trip byte-for-byte.
//!
//! Segments are kept exactly as they arrived; only the `dateRange` segment
//! is ever decoded or rewritten.

use aqd_openaq::date_range::{DateRange, DateRangeError, INTERVAL_SEPARATOR};
use std::fmt;
use thiserror::Error;

/// Query key holding the selected date range.
pub const DATE_RANGE_KEY: &str = "dateRange";

/// Encoded form of the interval separator inside a query value.
const ENCODED_SEPARATOR: &str = "%2F";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query key {key} holds an invalid date range")]
    DateRange {
        key: &'static str,
        #[source]
        source: DateRangeError,
    },
}

/// The `&`-separated segments of a query string, without the leading `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    segments: Vec<String>,
}

impl QueryString {
    /// Split a query string; a leading `?` is ignored.
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        if raw.is_empty() {
            return QueryString::default();
        }
        QueryString {
            segments: raw.split('&').map(str::to_string).collect(),
        }
    }

    /// Raw (still encoded) value of the first segment named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment_key(segment) == key)
            .map(|segment| segment.split_once('=').map_or("", |(_, value)| value))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The decoded `dateRange`, or `None` when the key is absent.
    pub fn date_range(&self) -> Result<Option<DateRange>, QueryError> {
        self.get(DATE_RANGE_KEY)
            .map(|raw| {
                decode_date_range(raw)
                    .parse::<DateRange>()
                    .map_err(|source| QueryError::DateRange {
                        key: DATE_RANGE_KEY,
                        source,
                    })
            })
            .transpose()
    }

    /// Copy with `dateRange` replaced, inserted, or removed (`None`).
    ///
    /// A replacement takes the place of the first existing `dateRange`
    /// segment; an insertion is appended. Every other segment is kept as is.
    pub fn with_date_range(&self, range: Option<&DateRange>) -> QueryString {
        let position = self
            .segments
            .iter()
            .position(|segment| segment_key(segment) == DATE_RANGE_KEY);
        let mut segments: Vec<String> = self
            .segments
            .iter()
            .filter(|segment| segment_key(segment) != DATE_RANGE_KEY)
            .cloned()
            .collect();
        if let Some(range) = range {
            let segment = format!("{}={}", DATE_RANGE_KEY, encode_date_range(range));
            match position {
                Some(index) => segments.insert(index, segment),
                None => segments.push(segment),
            }
        }
        QueryString { segments }
    }

    /// The query string with a leading `?`, or empty when there are no keys.
    pub fn to_search(&self) -> String {
        if self.segments.is_empty() {
            String::new()
        } else {
            format!("?{}", self)
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("&"))
    }
}

fn segment_key(segment: &str) -> &str {
    segment.split_once('=').map_or(segment, |(key, _)| key)
}

fn encode_date_range(range: &DateRange) -> String {
    range
        .to_string()
        .replace(INTERVAL_SEPARATOR, ENCODED_SEPARATOR)
}

fn decode_date_range(raw: &str) -> String {
    raw.replace(ENCODED_SEPARATOR, "/").replace("%2f", "/")
}
