//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! Loads are owned by [`Loaders`]: each resource has a `FetchCoordinator`
//! whose transitions are mirrored into the matching `AppState` signal.

use crate::browser::{BrowserClient, BrowserLocation};
use aqd_openaq::date_range::DateRange;
use aqd_openaq::measurement::Measurement;
use aqd_openaq::project::Project;
use aqd_state::fetch::{load, FetchCoordinator, FetchState, SharedCoordinator};
use aqd_state::filter::FilterQuerySync;
use dioxus::prelude::*;
use std::rc::Rc;

/// Shared application state for the air-quality dashboard apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Lifecycle of the project load
    pub project: Signal<FetchState<Project>>,
    /// Lifecycle of the raw measurement load behind the coverage charts
    pub measurements: Signal<FetchState<Vec<Measurement>>>,
    /// Date range and location selection, mirrored into the query string
    pub filter: Signal<FilterQuerySync<BrowserLocation>>,
    /// Parameter tab currently shown (None until the user picks one)
    pub active_parameter: Signal<Option<String>>,
    /// Non-fatal message for the user (e.g. selection limit reached)
    pub notice: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState, hydrating the filter from the page's query string.
    pub fn new() -> Self {
        Self {
            project: Signal::new(FetchState::default()),
            measurements: Signal::new(FetchState::default()),
            filter: Signal::new(FilterQuerySync::hydrate(BrowserLocation)),
            active_parameter: Signal::new(None),
            notice: Signal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Mirror every coordinator transition into `signal`.
fn mirror<T: Clone + 'static>(coordinator: &SharedCoordinator<T>, mut signal: Signal<FetchState<T>>) {
    coordinator.borrow_mut().subscribe(move |state| {
        // The signal may already be gone while the view is torn down.
        if let Ok(mut slot) = signal.try_write() {
            *slot = state.clone();
        }
    });
}

/// Fetch coordinators for the dashboard's remote resources.
#[derive(Clone)]
pub struct Loaders {
    project: SharedCoordinator<Project>,
    measurements: SharedCoordinator<Vec<Measurement>>,
    client: Rc<BrowserClient>,
}

impl Loaders {
    pub fn new(state: AppState, client: BrowserClient) -> Self {
        let project = FetchCoordinator::shared();
        let measurements = FetchCoordinator::shared();
        mirror(&project, state.project);
        mirror(&measurements, state.measurements);
        Self {
            project,
            measurements,
            client: Rc::new(client),
        }
    }

    /// Start the first project load once its id is known.
    pub fn load_project(&self, id: &str) {
        let ticket = self.project.borrow_mut().identify(id);
        if let Some(ticket) = ticket {
            self.spawn_project(ticket);
        }
    }

    /// Reload the current project (the "Apply Selection" action).
    pub fn reload_project(&self) {
        let ticket = self.project.borrow_mut().refetch();
        if let Some(ticket) = ticket {
            self.spawn_project(ticket);
        }
    }

    fn spawn_project(&self, ticket: aqd_state::fetch::FetchTicket) {
        let coordinator = Rc::downgrade(&self.project);
        let client = Rc::clone(&self.client);
        spawn(async move {
            load(coordinator, ticket, client.as_ref()).await;
        });
    }

    /// Load the project's raw measurements, superseding any earlier load.
    pub fn load_measurements(&self, project_id: &str, range: Option<DateRange>) {
        let key = match &range {
            Some(range) => format!("{}@{}", project_id, range),
            None => project_id.to_string(),
        };
        let ticket = self.measurements.borrow_mut().request(&key);
        let coordinator = Rc::downgrade(&self.measurements);
        let client = Rc::clone(&self.client);
        let project_id = project_id.to_string();
        spawn(async move {
            let outcome = client.fetch_measurements(&project_id, range.as_ref()).await;
            if let Some(coordinator) = coordinator.upgrade() {
                coordinator.borrow_mut().resolve_payload(&ticket, outcome);
            }
        });
    }

    /// Return both loads to idle; responses still in flight are dropped.
    pub fn teardown(&self) {
        self.project.borrow_mut().reset();
        self.measurements.borrow_mut().reset();
    }
}
