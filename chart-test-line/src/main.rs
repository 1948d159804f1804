//! Test Stock Data
//!
//! Draws a single line chart of a built-in ten-day AAPL sample. There are no
//! controls: the binder fires once with the empty default state.

use findash_chart_ui::components::{ChartContainer, ChartHeader, LoadingSpinner, NoticeDisplay};
use findash_chart_ui::sink::DomSink;
use findash_chart_ui::state::DashState;
use findash_core::binder::{Binder, Notice};
use findash_dashboards::test_line::{sample_table, TestLine, TITLE};
use dioxus::prelude::*;

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "test-graph";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("test-line-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(DashState::new);
    let binder = use_hook(|| Binder::new(TestLine::new(), CHART_ID));

    use_effect(move || {
        match sample_table() {
            Ok(table) => state.table.set(Some(table)),
            Err(e) => {
                log::error!("Failed to build sample data: {}", e);
                state.notice.set(Some(Notice::from(&e)));
            }
        }
        state.loading.set(false);
    });

    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let controls = (state.controls)();
        let guard = state.table.read();
        let Some(table) = guard.as_ref() else {
            return;
        };
        let mut sink = DomSink::new(state.notice);
        binder.fire(&controls, table, &mut sink);
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader { title: TITLE.to_string() }

            if (state.loading)() {
                LoadingSpinner { message: "Loading stock data...".to_string() }
            } else {
                if let Some(notice) = (state.notice)() {
                    NoticeDisplay { notice }
                }
                ChartContainer { id: CHART_ID.to_string() }
            }
        }
    }
}
