//! Shown while a dashboard loads its file or waits on a fetch.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Fetching data...".to_string())]
    pub message: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            role: "status",
            style: "margin: 8px 0; padding: 10px 16px; color: #455A64; background: #ECEFF1; border-radius: 4px; font-size: 14px;",
            "{props.message}"
        }
    }
}
