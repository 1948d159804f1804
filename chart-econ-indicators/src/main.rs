//! Economic Indicators Dashboard
//!
//! Fetches the configured FRED indicators for the chosen range of years and
//! compares two of them: levels on a dual-axis chart and year-over-year
//! change on a second one. Fetches are cached by year range, so changing
//! only the indicators never refetches. An inverted range is reported
//! before any request is made.

use findash_chart_ui::components::{
    ChartContainer, ChartHeader, ControlPanel, DownloadButton, LoadingSpinner, NoticeDisplay,
};
use findash_chart_ui::sink::DomSink;
use findash_chart_ui::state::DashState;
use findash_core::binder::{Binder, Dashboard, Notice, RenderSink};
use findash_core::config::ApiConfig;
use findash_core::indicators::CachedIndicators;
use findash_dashboards::econ::EconIndicators;
use dioxus::prelude::*;

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "econ-charts";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("econ-indicators-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(ApiConfig::default);
    match use_hook(|| EconIndicators::new(config.indicator_labels())) {
        Ok(dashboard) => rsx! { EconDashboard { config, dashboard } },
        Err(e) => {
            log::error!("Indicator catalogue rejected: {}", e);
            rsx! { NoticeDisplay { notice: Notice::from(&e) } }
        }
    }
}

#[component]
fn EconDashboard(config: ApiConfig, dashboard: EconIndicators) -> Element {
    let binder = use_hook(|| Binder::new(dashboard, CHART_ID));
    let indicators = use_hook(|| CachedIndicators::new(&config));
    let registry = binder.registry().clone();
    let mut state = use_context_provider(move || DashState::with_registry(registry));
    let mut generation = use_signal(|| 0u64);

    use_effect(move || {
        let controls = (state.controls)();
        let ticket = *generation.peek() + 1;
        generation.set(ticket);

        let query = match binder
            .check(&controls)
            .and_then(|_| binder.dashboard().macro_query(&controls))
        {
            Ok(query) => query,
            Err(e) => {
                DomSink::new(state.notice).render(binder.target(), &binder.fail(&e));
                state.loading.set(false);
                return;
            }
        };

        state.loading.set(true);
        let binder = binder.clone();
        let indicators = indicators.clone();
        spawn(async move {
            let fetched = indicators.fetch(&query).await;
            if *generation.peek() != ticket {
                return;
            }
            let mut sink = DomSink::new(state.notice);
            match fetched {
                Ok(table) => {
                    binder.fire(&controls, &table, &mut sink);
                    state.table.set(Some(table));
                }
                Err(e) => {
                    log::warn!("Indicator fetch failed: {}", e);
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

            ChartHeader {
                title: "Economic Indicators Dashboard".to_string(),
                subtitle: "Monthly series from FRED. Left axis: primary indicator, right axis: secondary.".to_string(),
            }

            ControlPanel {}

            if (state.loading)() {
                LoadingSpinner { message: "Fetching indicators from FRED...".to_string() }
            }

            if let Some(notice) = (state.notice)() {
                NoticeDisplay { notice }
            }

            ChartContainer {
                id: CHART_ID.to_string(),
                loading: (state.loading)(),
                min_height: 880,
            }

            if let Some(table) = (state.table)() {
                DownloadButton {
                    table,
                    filename: "indicators.csv".to_string(),
                }
            }
        }
    }
}
