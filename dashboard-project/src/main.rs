//! Project Temporal Coverage
//!
//! Dashboard page for a single OpenAQ project, served at `/projects/{id}`.
//! Shows the project header, the date range and location filters, and the
//! temporal coverage of the selected parameter's measurements.
//!
//! Data flow:
//! 1. The filter is hydrated from the page's `dateRange` query key.
//! 2. On mount the project is loaded once its id is read from the path.
//! 3. Whenever the project or the date range changes, the project's
//!    measurements are reloaded; older responses are dropped.
//! 4. Date range edits are written back to the query string with
//!    `history.replaceState`.

use aqd_chart_ui::browser::{project_id_from_path, BrowserClient, BrowserLocation};
use aqd_chart_ui::components::{
    DateRangePicker, ErrorDisplay, LoadingSpinner, LocationSelector, ProjectHeader,
    TemporalCoverageCard,
};
use aqd_chart_ui::state::{AppState, Loaders};
use aqd_openaq::DEFAULT_API_URL;
use aqd_state::filter::QueryTarget;
use dioxus::prelude::*;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("project-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let loaders = use_context_provider(|| Loaders::new(state, BrowserClient::new(DEFAULT_API_URL)));
    let project_id = use_hook(|| project_id_from_path(&BrowserLocation.path()));

    // Load the project and write the hydrated range back once on mount
    {
        let loaders = loaders.clone();
        let project_id = project_id.clone();
        use_effect(move || match &project_id {
            Some(id) => {
                log::info!("Loading project {}", id);
                loaders.load_project(id);
                state.filter.with_mut(|sync| {
                    sync.sync();
                });
            }
            None => {
                let path = BrowserLocation.path();
                log::error!("No project id in path {}", path);
                state
                    .notice
                    .set(Some(format!("No project found at {}", path)));
            }
        });
    }

    {
        let loaders = loaders.clone();
        use_drop(move || loaders.teardown());
    }

    let loaded_id = use_memo(move || state.project.read().data.as_ref().map(|p| p.id.clone()));
    let date_range = use_memo(move || state.filter.read().filter().date_range);

    // Reload measurements whenever the project or the date range changes
    {
        let loaders = loaders.clone();
        use_effect(move || {
            let range = date_range();
            if let Some(id) = loaded_id() {
                loaders.load_measurements(&id, range);
            }
        });
    }

    let on_retry = {
        let loaders = loaders.clone();
        EventHandler::new(move |_: MouseEvent| loaders.reload_project())
    };

    let (fetching, error, project) = {
        let project = state.project.read();
        (project.fetching, project.error.clone(), project.data.clone())
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            if let Some(notice) = (state.notice)() {
                Notice { message: notice }
            }

            if let Some(project) = project {
                ProjectHeader {
                    title: project.name.clone(),
                    subtitle: project.subtitle.clone().unwrap_or_default(),
                    lifecycle: project.lifecycle_stages().into_iter().map(str::to_string).collect::<Vec<_>>(),
                }
                if fetching {
                    LoadingSpinner { message: "Refreshing project...".to_string(), compact: true }
                }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; margin-bottom: 8px;",
                    DateRangePicker {}
                }
                LocationSelector { location_ids: project.location_ids.clone() }
                div {
                    style: "display: grid; grid-template-columns: repeat(2, 1fr); gap: 12px;",
                    TemporalCoverageCard {}
                }
            } else if let Some(e) = error {
                ErrorDisplay { message: e.to_string(), on_retry: on_retry }
            } else if fetching {
                LoadingSpinner {}
            }
        }
    }
}

/// Dismissable banner for non-fatal messages.
#[component]
fn Notice(message: String) -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        div {
            style: "margin-bottom: 12px; padding: 8px 12px; background: #FFF8E1; border: 1px solid #FFE082; border-radius: 4px; font-size: 13px; display: flex; justify-content: space-between;",
            span { "{message}" }
            button {
                onclick: move |_| state.notice.set(None),
                "Dismiss"
            }
        }
    }
}
