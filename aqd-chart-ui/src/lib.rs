//! Shared Dioxus components and browser bindings for air-quality dashboard apps.
//!
//! This crate provides:
//! - `browser`: the page location and `fetch` transport, via `web-sys`
//! - `state`: Reactive AppState with Dioxus Signals, fed by fetch coordinators
//! - `components`: Reusable RSX components (header, filters, coverage charts)

pub mod browser;
pub mod components;
pub mod state;
