//! Bar chart of one coverage histogram.

use dioxus::prelude::*;

/// Props for CoverageChart
#[derive(Props, Clone, PartialEq)]
pub struct CoverageChartProps {
    pub title: String,
    /// Bucket labels, in the order the bars are drawn
    pub labels: Vec<String>,
    /// Count per bucket, parallel to `labels`
    pub frequencies: Vec<u64>,
    /// Optional height of the plot area in pixels
    #[props(default = 160)]
    pub height: u32,
}

/// Draws one bar per bucket, scaled to the largest count.
#[component]
pub fn CoverageChart(props: CoverageChartProps) -> Element {
    let max = props.frequencies.iter().copied().max().unwrap_or(0).max(1);
    let bars: Vec<(String, u64, u64)> = props
        .labels
        .iter()
        .zip(props.frequencies.iter().copied())
        .map(|(label, count)| (label.clone(), count, count * 100 / max))
        .collect();
    let plot_style = format!(
        "height: {}px; display: flex; align-items: flex-end; gap: 2px; border-bottom: 1px solid #BDBDBD;",
        props.height
    );

    rsx! {
        div {
            style: "margin: 12px 0;",
            h4 {
                style: "margin: 0 0 4px 0; font-size: 14px;",
                "{props.title}"
            }
            if bars.is_empty() {
                p {
                    style: "color: #666; font-size: 12px;",
                    "No measurements"
                }
            } else {
                div {
                    style: "{plot_style}",
                    for (label, count, percent) in bars.iter().cloned() {
                        div {
                            key: "{label}",
                            title: "{label}: {count}",
                            style: "flex: 1; display: flex; flex-direction: column; justify-content: flex-end; height: 100%;",
                            div {
                                style: "height: {percent}%; background: #2196F3;",
                            }
                            span {
                                style: "font-size: 10px; text-align: center;",
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
