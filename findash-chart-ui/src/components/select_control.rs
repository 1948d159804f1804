//! Dropdown for a single-value control (indicators, years).

use crate::state::DashState;
use findash_core::controls::{Control, ControlValue};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SelectControlProps {
    pub control: Control,
}

#[component]
pub fn SelectControl(props: SelectControlProps) -> Element {
    let mut state = use_context::<DashState>();
    let selected = state
        .controls
        .read()
        .get(&props.control.id)
        .map(ControlValue::label)
        .unwrap_or_default();
    let select_id = format!("{}-select", props.control.id);

    let id = props.control.id.clone();
    let on_change = move |evt: Event<FormData>| {
        state.set_control(&id, ControlValue::Single(evt.value()));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "{select_id}",
                style: "font-weight: bold; margin-right: 8px;",
                "{props.control.label}: "
            }
            select {
                id: "{select_id}",
                onchange: on_change,
                for item in props.control.domain.iter() {
                    option {
                        value: "{item}",
                        selected: *item == selected,
                        "{item}"
                    }
                }
            }
        }
    }
}
