//! Radio buttons for a single-value control.

use crate::state::DashState;
use findash_core::controls::{Control, ControlValue};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct RadioGroupProps {
    pub control: Control,
}

#[component]
pub fn RadioGroup(props: RadioGroupProps) -> Element {
    let state = use_context::<DashState>();
    let selected = state
        .controls
        .read()
        .get(&props.control.id)
        .map(ControlValue::label)
        .unwrap_or_default();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            span { style: "font-weight: bold;", "{props.control.label}: " }
            for item in props.control.domain.iter() {
                RadioItem {
                    key: "{item}",
                    control_id: props.control.id.clone(),
                    item: item.clone(),
                    checked: *item == selected,
                }
            }
        }
    }
}

#[component]
fn RadioItem(control_id: String, item: String, checked: bool) -> Element {
    let mut state = use_context::<DashState>();
    let text = item.clone();
    let name = control_id.clone();

    rsx! {
        label {
            input {
                r#type: "radio",
                name: "{name}",
                value: "{text}",
                checked,
                onchange: move |_| state.set_control(&control_id, ControlValue::Single(item.clone())),
            }
            " {text}"
        }
    }
}
