//! Checkbox list for a multi-select control.

use crate::state::DashState;
use findash_core::controls::Control;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MultiSelectProps {
    pub control: Control,
}

#[component]
pub fn MultiSelect(props: MultiSelectProps) -> Element {
    let state = use_context::<DashState>();
    let selected: Vec<String> = state
        .controls
        .read()
        .multi(&props.control.id)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            span { style: "font-weight: bold;", "{props.control.label}: " }
            for item in props.control.domain.iter() {
                CheckboxItem {
                    key: "{item}",
                    control_id: props.control.id.clone(),
                    item: item.clone(),
                    checked: selected.contains(item),
                }
            }
        }
    }
}

#[component]
fn CheckboxItem(control_id: String, item: String, checked: bool) -> Element {
    let mut state = use_context::<DashState>();
    let text = item.clone();

    rsx! {
        label {
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| state.toggle(&control_id, &item),
            }
            " {text}"
        }
    }
}
