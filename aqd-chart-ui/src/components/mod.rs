//! Reusable Dioxus RSX components for the air-quality dashboard apps.

mod coverage_chart;
mod date_range_picker;
mod error_display;
mod loading_spinner;
mod location_selector;
mod parameter_tabs;
mod project_header;
mod temporal_coverage_card;

pub use coverage_chart::CoverageChart;
pub use date_range_picker::DateRangePicker;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use location_selector::LocationSelector;
pub use parameter_tabs::ParameterTabs;
pub use project_header::ProjectHeader;
pub use temporal_coverage_card::TemporalCoverageCard;
