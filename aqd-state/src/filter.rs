//! The dashboard filter and its one-way sync into the page's query string.

use crate::query::QueryString;
use aqd_openaq::date_range::DateRange;
use aqd_openaq::project::LocationId;
use log::{debug, warn};
use std::collections::BTreeSet;
use thiserror::Error;

/// Most locations that can be picked individually.
pub const MAX_SELECTED_LOCATIONS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("at most {max} locations can be selected")]
    LimitReached { max: usize },
}

/// Date range and location selection the dashboard is filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub date_range: Option<DateRange>,
    pub selected_location_ids: BTreeSet<LocationId>,
    pub is_all_locations: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Filter {
            date_range: None,
            selected_location_ids: BTreeSet::new(),
            is_all_locations: true,
        }
    }
}

impl Filter {
    /// Select `id`, or deselect it if already selected.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle_location(&mut self, id: LocationId) -> Result<bool, SelectionError> {
        if self.selected_location_ids.remove(&id) {
            return Ok(false);
        }
        if self.selected_location_ids.len() >= MAX_SELECTED_LOCATIONS {
            return Err(SelectionError::LimitReached {
                max: MAX_SELECTED_LOCATIONS,
            });
        }
        self.selected_location_ids.insert(id);
        Ok(true)
    }
}

/// The page location the filter is mirrored into.
pub trait QueryTarget {
    /// Path of the current page, without the query string.
    fn path(&self) -> String;

    /// Current query string, with or without its leading `?`.
    fn search(&self) -> String;

    /// Replace the current navigation entry with `url`; never push.
    fn replace(&mut self, url: &str);
}

/// In-memory page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    search: String,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(url: &str) -> Self {
        let (path, search) = split_url(url);
        MemoryLocation {
            path: path.to_string(),
            search: search.to_string(),
            replacements: 0,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.path, self.search)
    }

    /// How many times the entry was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl QueryTarget for MemoryLocation {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn replace(&mut self, url: &str) {
        let (path, search) = split_url(url);
        self.path = path.to_string();
        self.search = search.to_string();
        self.replacements += 1;
    }
}

fn split_url(url: &str) -> (&str, &str) {
    match url.find('?') {
        Some(index) => url.split_at(index),
        None => (url, ""),
    }
}

/// Keeps [`Filter::date_range`] mirrored into a [`QueryTarget`].
///
/// Only date-range changes write to the query string; location selection
/// stays in memory until it is applied.
pub struct FilterQuerySync<Q> {
    filter: Filter,
    target: Q,
}

impl<Q: QueryTarget> FilterQuerySync<Q> {
    /// Seed the filter from the target's query string, once.
    ///
    /// A missing `dateRange` means no range; a malformed one is logged and
    /// treated as missing.
    pub fn hydrate(target: Q) -> Self {
        let date_range = match QueryString::parse(&target.search()).date_range() {
            Ok(range) => range,
            Err(e) => {
                warn!("Ignoring query string date range: {}", e);
                None
            }
        };
        FilterQuerySync {
            filter: Filter {
                date_range,
                ..Filter::default()
            },
            target,
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn target(&self) -> &Q {
        &self.target
    }

    pub fn into_target(self) -> Q {
        self.target
    }

    /// Change the date range and rewrite the query string.
    ///
    /// Returns whether the navigation entry was replaced; setting the range
    /// it already holds does nothing.
    pub fn set_date_range(&mut self, range: Option<DateRange>) -> bool {
        if self.filter.date_range == range {
            return false;
        }
        self.filter.date_range = range;
        self.sync()
    }

    /// Write the current date range over the target's query string.
    ///
    /// Does nothing when the query string already carries that range.
    pub fn sync(&mut self) -> bool {
        let current = QueryString::parse(&self.target.search());
        if current.date_range().ok().flatten() == self.filter.date_range {
            return false;
        }
        let next = current.with_date_range(self.filter.date_range.as_ref());
        let url = format!("{}{}", self.target.path(), next.to_search());
        debug!("Replacing location with {}", url);
        self.target.replace(&url);
        true
    }

    pub fn toggle_location(&mut self, id: LocationId) -> Result<bool, SelectionError> {
        self.filter.toggle_location(id)
    }

    pub fn set_all_locations(&mut self, all: bool) {
        self.filter.is_all_locations = all;
    }

    /// Whether applying the selection calls for a re-fetch.
    pub fn apply_selection(&self) -> bool {
        !self.filter.is_all_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> DateRange {
        s.parse().unwrap()
    }

    #[test]
    fn test_hydrate_reads_date_range() {
        let sync = FilterQuerySync::hydrate(MemoryLocation::new(
            "/projects/22?dateRange=2024-01-01%2F2024-01-31",
        ));
        assert_eq!(sync.filter().date_range, Some(range("2024-01-01/2024-01-31")));
        assert!(sync.filter().is_all_locations);
        assert!(sync.filter().selected_location_ids.is_empty());
    }

    #[test]
    fn test_hydrate_without_key() {
        let sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22"));
        assert_eq!(sync.filter().date_range, None);
    }

    #[test]
    fn test_hydrate_ignores_malformed_range() {
        let sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22?dateRange=soon"));
        assert_eq!(sync.filter().date_range, None);
    }

    #[test]
    fn test_initial_sync_is_a_no_op_when_unchanged() {
        let mut sync = FilterQuerySync::hydrate(MemoryLocation::new(
            "/projects/22?tab=day&dateRange=2024-01-01/2024-01-31",
        ));
        assert!(!sync.sync());
        let mut empty = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22?tab=day"));
        assert!(!empty.sync());
        assert_eq!(sync.target().replacements(), 0);
        assert_eq!(empty.target().replacements(), 0);
    }

    #[test]
    fn test_set_date_range_replaces_entry() {
        let mut sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22?tab=day&x=%7B%7D"));
        assert!(sync.set_date_range(Some(range("2024-03-01/2024-03-31"))));
        let location = sync.into_target();
        assert_eq!(
            location.url(),
            "/projects/22?tab=day&x=%7B%7D&dateRange=2024-03-01%2F2024-03-31"
        );
        assert_eq!(location.replacements(), 1);
    }

    #[test]
    fn test_same_range_does_not_rewrite() {
        let mut sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22"));
        assert!(sync.set_date_range(Some(range("2024-03-01/2024-03-31"))));
        assert!(!sync.set_date_range(Some(range("2024-03-01/2024-03-31"))));
        assert_eq!(sync.target().replacements(), 1);
    }

    #[test]
    fn test_clearing_range_removes_key() {
        let mut sync = FilterQuerySync::hydrate(MemoryLocation::new(
            "/p?dateRange=2024-01-01%2F2024-01-31&tab=hour",
        ));
        assert!(sync.set_date_range(None));
        assert_eq!(sync.target().url(), "/p?tab=hour");
    }

    #[test]
    fn test_location_changes_never_touch_query() {
        let mut sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22?tab=day"));
        sync.set_all_locations(false);
        assert_eq!(sync.toggle_location(101), Ok(true));
        assert_eq!(sync.toggle_location(102), Ok(true));
        assert_eq!(sync.toggle_location(101), Ok(false));
        assert!(sync.apply_selection());
        assert_eq!(sync.target().replacements(), 0);
        assert_eq!(sync.target().url(), "/projects/22?tab=day");
        assert_eq!(
            sync.filter().selected_location_ids.iter().copied().collect::<Vec<_>>(),
            vec![102]
        );
    }

    #[test]
    fn test_all_locations_needs_no_refetch() {
        let sync = FilterQuerySync::hydrate(MemoryLocation::new("/projects/22"));
        assert!(!sync.apply_selection());
    }

    #[test]
    fn test_selection_limit() {
        let mut filter = Filter::default();
        for id in 0..MAX_SELECTED_LOCATIONS as LocationId {
            assert_eq!(filter.toggle_location(id), Ok(true));
        }
        assert_eq!(
            filter.toggle_location(999),
            Err(SelectionError::LimitReached { max: 15 })
        );
        // deselecting is always allowed
        assert_eq!(filter.toggle_location(0), Ok(false));
        assert_eq!(filter.toggle_location(999), Ok(true));
    }
}
