//! Inline warning or error shown in place of the charts.

use findash_core::binder::{Notice, NoticeLevel};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NoticeDisplayProps {
    pub notice: Notice,
}

#[component]
pub fn NoticeDisplay(props: NoticeDisplayProps) -> Element {
    let (style, prefix) = match props.notice.level {
        NoticeLevel::Warning => (
            "padding: 12px 16px; margin: 8px 0; background: #FFF8E1; color: #8D6E00; border-radius: 4px; border: 1px solid #FFE082;",
            "⚠️ ",
        ),
        NoticeLevel::Error => (
            "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            "Error: ",
        ),
    };

    rsx! {
        div {
            style: "{style}",
            strong { "{prefix}" }
            "{props.notice.message}"
        }
    }
}
