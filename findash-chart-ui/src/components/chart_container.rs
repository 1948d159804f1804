//! Placeholder that `DomSink` draws a dashboard's charts into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// Render target of the dashboard's binder.
    pub id: String,
    /// Dims the previous charts while a newer selection is being fetched.
    #[props(default = false)]
    pub loading: bool,
    /// Room reserved before the first draw, so the page does not jump.
    #[props(default = 420)]
    pub min_height: u32,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let opacity = if props.loading { "0.4" } else { "1" };
    let style = format!(
        "min-height: {}px; width: 100%; opacity: {}; transition: opacity 0.2s;",
        props.min_height, opacity
    );

    rsx! {
        div {
            id: "{props.id}",
            "aria-busy": "{props.loading}",
            style: "{style}",
        }
    }
}
