//! Page header with the project's name and lifecycle stages.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ProjectHeaderProps {
    /// Project name
    pub title: String,
    /// Small caption above the title
    #[props(default = "Datasets".to_string())]
    pub tagline: String,
    #[props(default = String::new())]
    pub subtitle: String,
    /// Lifecycle stages of the project's sources
    #[props(default = Vec::new())]
    pub lifecycle: Vec<String>,
}

#[component]
pub fn ProjectHeader(props: ProjectHeaderProps) -> Element {
    let lifecycle = props.lifecycle.join(", ");

    rsx! {
        header {
            style: "margin-bottom: 16px;",
            p {
                style: "margin: 0; font-size: 12px; text-transform: uppercase; color: #666;",
                "{props.tagline}"
            }
            h1 {
                style: "margin: 0 0 4px 0; font-size: 24px;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 0; font-size: 14px; color: #444;",
                    "{props.subtitle}"
                }
            }
            if !lifecycle.is_empty() {
                p {
                    style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                    "Lifecycle: {lifecycle}"
                }
            }
        }
    }
}
