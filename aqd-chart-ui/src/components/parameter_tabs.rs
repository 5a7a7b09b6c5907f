//! Tab strip for choosing which parameter the coverage charts show.

use crate::state::AppState;
use aqd_openaq::project::Parameter;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ParameterTabsProps {
    pub parameters: Vec<Parameter>,
    /// Id of the tab drawn as active
    pub active: String,
}

#[component]
pub fn ParameterTabs(props: ParameterTabsProps) -> Element {
    rsx! {
        div {
            style: "display: flex; gap: 4px; margin-bottom: 8px;",
            for parameter in props.parameters.iter() {
                ParameterTab {
                    key: "{parameter.id}",
                    id: parameter.id.clone(),
                    label: parameter.label().to_string(),
                    active: parameter.id == props.active,
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ParameterTabProps {
    id: String,
    label: String,
    active: bool,
}

#[component]
fn ParameterTab(props: ParameterTabProps) -> Element {
    let mut state = use_context::<AppState>();
    let weight = if props.active { "bold" } else { "normal" };
    let id = props.id.clone();

    let on_select = move |_: Event<MouseData>| {
        state.active_parameter.set(Some(id.clone()));
    };

    rsx! {
        button {
            style: "font-weight: {weight}; padding: 4px 10px;",
            onclick: on_select,
            "{props.label}"
        }
    }
}
