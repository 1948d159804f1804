//! Every control of the active dashboard, each drawn with its widget.

use crate::components::{MultiSelect, RadioGroup, SelectControl};
use crate::state::DashState;
use findash_core::controls::Widget;
use dioxus::prelude::*;

#[component]
pub fn ControlPanel() -> Element {
    let state = use_context::<DashState>();
    let controls = state.registry.read().controls().to_vec();

    let widgets = controls.into_iter().map(|control| {
        let key = control.id.clone();
        match control.widget {
            Widget::Radio => rsx! { RadioGroup { key: "{key}", control } },
            Widget::MultiSelect => rsx! { MultiSelect { key: "{key}", control } },
            Widget::Dropdown | Widget::YearPicker => rsx! { SelectControl { key: "{key}", control } },
        }
    });

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end; margin-bottom: 8px;",
            {widgets}
        }
    }
}
