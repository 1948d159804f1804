//! Stock Price by Radio Selection
//!
//! Loads the embedded stock price file, offers one radio button per stock and
//! redraws the price line of the selected stock on every change. The loaded
//! rows are shown below the chart in a paged table and can be downloaded.
//!
//! Data flow:
//! 1. `build.rs` copies `StockData.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds it into the WASM binary.
//! 3. On mount the file is parsed into a `Table` and the radio domain is
//!    built from its distinct stocks.
//! 4. Every radio change fires the binder, which hands the chart to D3.

use findash_chart_ui::components::{
    ChartContainer, ChartHeader, ControlPanel, DataTable, DownloadButton, LoadingSpinner,
    NoticeDisplay,
};
use findash_chart_ui::sink::DomSink;
use findash_chart_ui::state::DashState;
use findash_core::binder::{Binder, Dashboard, Notice};
use findash_core::csv_io::load_csv_str;
use findash_dashboards::stock_file_layout;
use findash_dashboards::stock_radio::{StockRadio, PAGE_SIZE, STOCK_CONTROL};
use dioxus::prelude::*;

const STOCK_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/StockData.csv"));

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "control-and-graph";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stock-radio-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(DashState::new);
    let mut binder = use_signal(|| None::<Binder<StockRadio>>);

    // Parse the embedded file once and build the controls from it
    use_effect(move || {
        let layout = stock_file_layout();
        match load_csv_str(STOCK_CSV, &layout) {
            Ok(table) => {
                log::info!("Loaded {} rows, {} stocks", table.len(), table.categories().len());
                let dashboard = StockRadio::new(&table);
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

    // Redraw whenever the selection changes
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

    let selected = (state.controls)()
        .get(STOCK_CONTROL)
        .map(|v| v.label())
        .unwrap_or_default();
    let date_format = stock_file_layout().date_format;

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Stock Price by Selection".to_string(),
                subtitle: format!("Showing {selected}"),
            }

            if (state.loading)() {
                LoadingSpinner { message: "Loading stock data...".to_string() }
            } else {
                ControlPanel {}

                if let Some(notice) = (state.notice)() {
                    NoticeDisplay { notice }
                }

                ChartContainer { id: CHART_ID.to_string() }

                if let Some(table) = (state.table)() {
                    DataTable {
                        table: table.clone(),
                        page_size: PAGE_SIZE,
                        date_format: date_format.clone(),
                    }
                    DownloadButton {
                        table: table.clone(),
                        filename: "StockData.csv".to_string(),
                        date_format: date_format.clone(),
                    }
                }
            }
        }
    }
}
