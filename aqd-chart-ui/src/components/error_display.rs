//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Shows a "Try again" button when set; loads are never retried on their own
    #[props(default)]
    pub on_retry: Option<EventHandler<MouseEvent>>,
}

/// Displays a failed load's message, with an optional manual retry.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "We couldn't get any data. " }
            "{props.message}"
            if let Some(on_retry) = props.on_retry {
                div {
                    style: "margin-top: 8px;",
                    button {
                        onclick: move |evt| on_retry.call(evt),
                        "Try again"
                    }
                }
            } else {
                p {
                    style: "margin: 4px 0 0 0; font-size: 12px;",
                    "Please try again later."
                }
            }
        }
    }
}
