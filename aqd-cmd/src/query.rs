//! Rewrite a dashboard URL for a new date range.

use aqd_openaq::date_range::DateRange;
use aqd_state::filter::{FilterQuerySync, MemoryLocation};
use log::debug;

/// Value of `--date-range` that clears the range.
pub const NO_RANGE: &str = "none";

/// `url` after selecting `date_range` in the dashboard filter.
///
/// Query keys other than `dateRange` come back untouched.
pub fn rewrite_url(url: &str, date_range: &str) -> anyhow::Result<String> {
    let range = if date_range.eq_ignore_ascii_case(NO_RANGE) {
        None
    } else {
        Some(date_range.parse::<DateRange>()?)
    };
    let mut sync = FilterQuerySync::hydrate(MemoryLocation::new(url));
    if !sync.set_date_range(range) {
        debug!("{} already selects {}", url, date_range);
    }
    Ok(sync.into_target().url())
}
