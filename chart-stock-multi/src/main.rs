//! Stock Price Trends for Selected Stocks
//!
//! Fetches one year of daily closes for the checked symbols from the price
//! API and draws one line per symbol, with the latest rows in a table below.
//! Fetches are cached by the exact symbol selection for the lifetime of the
//! page; an empty selection never reaches the API.

use findash_chart_ui::components::{
    ChartContainer, ChartHeader, ControlPanel, DataTable, LoadingSpinner, NoticeDisplay,
};
use findash_chart_ui::sink::DomSink;
use findash_chart_ui::state::DashState;
use findash_core::binder::{Binder, Dashboard, RenderSink};
use findash_core::config::ApiConfig;
use findash_core::price::CachedPrices;
use findash_dashboards::stock_multi::{StockMulti, LATEST_ROWS, TITLE};
use dioxus::prelude::*;

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "stock-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stock-multi-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let binder = use_hook(|| Binder::new(StockMulti::new(), CHART_ID));
    let prices = use_hook(|| CachedPrices::new(&ApiConfig::default()));
    let registry = binder.registry().clone();
    let mut state = use_context_provider(move || DashState::with_registry(registry));
    // Only the most recent selection may draw
    let mut generation = use_signal(|| 0u64);

    use_effect(move || {
        let controls = (state.controls)();
        let ticket = *generation.peek() + 1;
        generation.set(ticket);

        let query = match binder.dashboard().price_query(&controls) {
            Ok(query) => query,
            Err(e) => {
                DomSink::new(state.notice).render(binder.target(), &binder.fail(&e));
                state.table.set(None);
                state.loading.set(false);
                return;
            }
        };

        state.loading.set(true);
        let binder = binder.clone();
        let prices = prices.clone();
        spawn(async move {
            let fetched = prices.fetch(&query).await;
            if *generation.peek() != ticket {
                log::info!("Discarding stale fetch for {:?}", query.symbols);
                return;
            }
            let mut sink = DomSink::new(state.notice);
            match fetched {
                Ok(table) => {
                    binder.fire(&controls, &table, &mut sink);
                    state.table.set(Some(StockMulti::latest(&table)));
                }
                Err(e) => {
                    log::warn!("Price fetch failed: {}", e);
                    sink.render(binder.target(), &binder.fail(&e));
                    state.table.set(None);
                }
            }
            state.loading.set(false);
        });
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader { title: TITLE.to_string() }

            ControlPanel {}

            if (state.loading)() {
                LoadingSpinner { message: "Fetching latest prices...".to_string() }
            }

            if let Some(notice) = (state.notice)() {
                NoticeDisplay { notice }
            }

            ChartContainer {
                id: CHART_ID.to_string(),
                loading: (state.loading)(),
            }

            if let Some(table) = (state.table)() {
                h4 { style: "margin: 12px 0 4px 0;", "Latest Data" }
                DataTable { table, page_size: LATEST_ROWS }
            }
        }
    }
}
