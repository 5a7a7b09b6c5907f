//! Dashboard state that is independent of any UI framework.
//!
//! - `fetch`: the fetch lifecycle reducer and the last-request-wins
//!   [`FetchCoordinator`](fetch::FetchCoordinator)
//! - `query`: a query string that keeps foreign keys byte-for-byte
//! - `filter`: the date-range/location filter and its one-way sync into the
//!   page's query string

pub mod fetch;
pub mod filter;
pub mod query;
