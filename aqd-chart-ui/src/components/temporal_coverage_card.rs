//! Temporal coverage card: hour, day and month histograms per parameter.

use super::{CoverageChart, ErrorDisplay, LoadingSpinner, ParameterTabs};
use crate::state::AppState;
use aqd_data::coverage::{coverage_for_parameter, CoverageError, TemporalCoverage};
use dioxus::prelude::*;

/// Shows how a parameter's measurements spread over the hours of the day,
/// the days of the week and the months of the year.
///
/// Nothing is drawn until the measurement load has started.
#[component]
pub fn TemporalCoverageCard() -> Element {
    let state = use_context::<AppState>();

    let parameters = use_memo(move || {
        state
            .project
            .read()
            .data
            .as_ref()
            .map(|p| p.parameters.clone())
            .unwrap_or_default()
    });

    let active = use_memo(move || {
        (state.active_parameter)().or_else(|| parameters.read().first().map(|p| p.id.clone()))
    });

    // Re-binned only when the measurements or the active tab change.
    let coverage = use_memo(move || -> Option<Result<TemporalCoverage, CoverageError>> {
        let measurements = state.measurements.read();
        let data = measurements.data.as_ref()?;
        let parameter = active()?;
        Some(coverage_for_parameter(data, &parameter))
    });

    let (fetched, fetching, error) = {
        let measurements = state.measurements.read();
        (
            measurements.fetched,
            measurements.fetching,
            measurements.error.clone(),
        )
    };

    if !fetched && !fetching {
        return rsx! {};
    }

    let body = if fetching {
        rsx! { LoadingSpinner {} }
    } else if let Some(e) = error {
        rsx! { ErrorDisplay { message: e.to_string() } }
    } else {
        match coverage() {
            Some(Ok(coverage)) => rsx! {
                CoverageChart {
                    title: "Hour of the Day".to_string(),
                    labels: coverage.hour.labels(),
                    frequencies: coverage.hour.frequencies(),
                }
                CoverageChart {
                    title: "Day of the Week".to_string(),
                    labels: coverage.day.labels(),
                    frequencies: coverage.day.frequencies(),
                }
                CoverageChart {
                    title: "Month of the Year".to_string(),
                    labels: coverage.month.labels(),
                    frequencies: coverage.month.frequencies(),
                }
            },
            Some(Err(e)) => rsx! { ErrorDisplay { message: e.to_string() } },
            None => rsx! {},
        }
    };

    rsx! {
        section {
            style: "grid-column: 1 / -1; padding: 12px; border: 1px solid #E0E0E0; border-radius: 4px;",
            ParameterTabs {
                parameters: parameters(),
                active: active().unwrap_or_default(),
            }
            h3 {
                style: "margin: 0 0 8px 0; font-size: 16px;",
                "Temporal Coverage"
            }
            {body}
        }
    }
}
