//! Location selection with the "Apply Selection" action.

use crate::state::{AppState, Loaders};
use aqd_openaq::project::LocationId;
use aqd_state::filter::MAX_SELECTED_LOCATIONS;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LocationSelectorProps {
    pub location_ids: Vec<LocationId>,
}

/// Lets the user narrow the dashboard to up to fifteen locations.
///
/// Ticking boxes only edits the filter; the project is reloaded when the
/// selection is applied.
#[component]
pub fn LocationSelector(props: LocationSelectorProps) -> Element {
    let mut state = use_context::<AppState>();
    let loaders = use_context::<Loaders>();
    let (is_all, selected) = {
        let sync = state.filter.read();
        (
            sync.filter().is_all_locations,
            sync.filter().selected_location_ids.clone(),
        )
    };
    let count = selected.len();

    let on_all_change = move |evt: Event<FormData>| {
        let all = evt.checked();
        state.filter.with_mut(|sync| sync.set_all_locations(all));
    };

    let on_apply = move |_: Event<MouseData>| {
        if state.filter.read().apply_selection() {
            loaders.reload_project();
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                input {
                    r#type: "checkbox",
                    checked: is_all,
                    onchange: on_all_change,
                }
                " All locations"
            }
            if !is_all {
                div {
                    style: "display: grid; grid-template-columns: repeat(2, 1fr); align-items: center; margin: 8px 0;",
                    span {
                        style: "padding: 2px 8px; border-radius: 12px; background: #E3F2FD; justify-self: start;",
                        "{count}/{MAX_SELECTED_LOCATIONS}"
                    }
                    div {
                        style: "display: flex; justify-content: flex-end;",
                        button {
                            onclick: on_apply,
                            "Apply Selection"
                        }
                    }
                }
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 8px;",
                    for id in props.location_ids.iter().copied() {
                        label {
                            key: "{id}",
                            input {
                                r#type: "checkbox",
                                checked: selected.contains(&id),
                                onchange: move |_| {
                                    let toggled = state.filter.with_mut(|sync| sync.toggle_location(id));
                                    match toggled {
                                        Ok(_) => state.notice.set(None),
                                        Err(e) => state.notice.set(Some(e.to_string())),
                                    }
                                },
                            }
                            " {id}"
                        }
                    }
                }
            }
        }
    }
}
