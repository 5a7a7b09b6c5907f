//! Date range picker with start and end date inputs.

use crate::state::AppState;
use aqd_openaq::date_range::DateRange;
use dioxus::prelude::*;

/// Date range picker for filtering the dashboard.
///
/// The filter only changes once both inputs hold a valid, ordered pair of
/// dates; every change rewrites the page's query string.
#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let current = state.filter.read().filter().date_range;
    let mut start = use_signal(|| current.map(|r| r.start.to_string()).unwrap_or_default());
    let mut end = use_signal(|| current.map(|r| r.end.to_string()).unwrap_or_default());

    let mut commit = move || {
        let candidate = format!("{}/{}", start(), end());
        match candidate.parse::<DateRange>() {
            Ok(range) => {
                state.filter.with_mut(|sync| sync.set_date_range(Some(range)));
                state.notice.set(None);
            }
            Err(e) if !start().is_empty() && !end().is_empty() => {
                state.notice.set(Some(e.to_string()));
            }
            Err(_) => {}
        }
    };

    let on_start_change = move |evt: Event<FormData>| {
        start.set(evt.value());
        commit();
    };

    let on_end_change = move |evt: Event<FormData>| {
        end.set(evt.value());
        commit();
    };

    let on_clear = move |_: Event<MouseData>| {
        start.set(String::new());
        end.set(String::new());
        state.filter.with_mut(|sync| sync.set_date_range(None));
    };

    let start_value = start();
    let end_value = end();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                input {
                    r#type: "date",
                    value: "{start_value}",
                    onchange: on_start_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                input {
                    r#type: "date",
                    value: "{end_value}",
                    onchange: on_end_change,
                }
            }
            if current.is_some() {
                button {
                    onclick: on_clear,
                    "Project lifetime"
                }
            }
        }
    }
}
