//! Loading indicator shown while a fetch is in flight.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading data...".to_string())]
    pub message: String,
    /// Inline variant for refreshes that keep the previous data on screen
    #[props(default)]
    pub compact: bool,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    let padding = if props.compact { "4px 0" } else { "40px" };

    rsx! {
        div {
            "aria-busy": "true",
            style: "display: flex; justify-content: center; align-items: center; gap: 8px; padding: {padding}; color: #666;",
            span {
                style: "display: inline-block; width: 12px; height: 12px; border: 2px solid #BDBDBD; border-top-color: #2196F3; border-radius: 50%;",
            }
            "{props.message}"
        }
    }
}
