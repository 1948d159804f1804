//! Stock Price Trends
//!
//! Loads the embedded stock price file and draws one line per stock picked
//! in a multi-select list. Clearing the selection replaces the chart with a
//! notice instead of drawing an empty chart.

use findash_chart_ui::components::{
    ChartContainer, ChartHeader, ControlPanel, DownloadButton, LoadingSpinner, NoticeDisplay,
};
use findash_chart_ui::sink::DomSink;
use findash_chart_ui::state::DashState;
use findash_core::binder::{Binder, Dashboard, Notice};
use findash_core::csv_io::load_csv_str;
use findash_dashboards::stock_dropdown::StockDropdown;
use findash_dashboards::stock_file_layout;
use dioxus::prelude::*;

const STOCK_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/StockData.csv"));

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "control-and-graph";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stock-dropdown-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(DashState::new);
    let mut binder = use_signal(|| None::<Binder<StockDropdown>>);

    use_effect(move || {
        match load_csv_str(STOCK_CSV, &stock_file_layout()) {
            Ok(table) => {
                let dashboard = StockDropdown::new(&table);
                state.install(dashboard.registry().clone());
                binder.set(Some(Binder::new(dashboard, CHART_ID)));
                state.table.set(Some(table));
            }
            Err(e) => {
                log::error!("Failed to load stock data: {}", e);
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
        let binder_guard = binder.read();
        let Some(binder) = binder_guard.as_ref() else {
            return;
        };
        let mut sink = DomSink::new(state.notice);
        binder.fire(&controls, table, &mut sink);
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader { title: "Stock Price Trends".to_string() }

            if (state.loading)() {
                LoadingSpinner { message: "Loading stock data...".to_string() }
            } else {
                ControlPanel {}

                if let Some(notice) = (state.notice)() {
                    NoticeDisplay { notice }
                }

                ChartContainer { id: CHART_ID.to_string() }

                if let Some(table) = (state.table)() {
                    DownloadButton {
                        table: table.clone(),
                        filename: "StockData.csv".to_string(),
                        date_format: stock_file_layout().date_format,
                    }
                }
            }
        }
    }
}
