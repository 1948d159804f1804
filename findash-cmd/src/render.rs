//! Drive a dashboard headlessly: apply control overrides, evaluate once and
//! print the resulting view as JSON.

use clap::ValueEnum;
use findash_core::binder::{Binder, Dashboard, RenderSink, View};
use findash_core::config::ApiConfig;
use findash_core::controls::ControlState;
use findash_core::csv_io::load_csv_file;
use findash_core::indicators::MacroClient;
use findash_core::price::PriceClient;
use findash_core::table::Table;
use findash_dashboards::econ::EconIndicators;
use findash_dashboards::stock_dropdown::StockDropdown;
use findash_dashboards::stock_multi::StockMulti;
use findash_dashboards::stock_radio::StockRadio;
use findash_dashboards::stock_file_layout;
use findash_dashboards::test_line::{sample_table, TestLine};
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DashboardKind {
    TestLine,
    StockRadio,
    StockDropdown,
    StockMulti,
    Econ,
}

/// Parse `id=value` from the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected id=value, got '{raw}'")),
    }
}

#[derive(Serialize)]
struct Rendered<'a> {
    target: &'a str,
    view: &'a View,
}

/// Prints every view it receives to stdout.
struct StdoutSink {
    pretty: bool,
    rendered: Vec<String>,
}

impl StdoutSink {
    fn new(pretty: bool) -> Self {
        Self {
            pretty,
            rendered: Vec::new(),
        }
    }
}

impl RenderSink for StdoutSink {
    fn render(&mut self, target: &str, view: &View) {
        let out = Rendered { target, view };
        let json = if self.pretty {
            serde_json::to_string_pretty(&out)
        } else {
            serde_json::to_string(&out)
        };
        match json {
            Ok(json) => {
                println!("{json}");
                self.rendered.push(json);
            }
            Err(e) => log::error!("Failed to serialize view for {}: {}", target, e),
        }
    }
}

/// Default state of `binder` with every override applied. An override outside
/// a control's domain is an error.
pub fn apply_overrides<D: Dashboard>(
    binder: &Binder<D>,
    overrides: &[(String, String)],
) -> anyhow::Result<ControlState> {
    let registry = binder.registry();
    let mut state = binder.initial_state();
    for (id, raw) in overrides {
        let value = registry.parse_value(id, raw)?;
        registry.apply(&mut state, id, value)?;
    }
    Ok(state)
}

fn fire_local<D: Dashboard, S: RenderSink>(
    binder: Binder<D>,
    overrides: &[(String, String)],
    table: &Table,
    sink: &mut S,
) -> anyhow::Result<View> {
    let state = apply_overrides(&binder, overrides)?;
    Ok(binder.fire(&state, table, sink))
}

async fn render_view<S: RenderSink>(
    kind: DashboardKind,
    csv: &str,
    overrides: &[(String, String)],
    sink: &mut S,
) -> anyhow::Result<View> {
    match kind {
        DashboardKind::TestLine => {
            let table = sample_table()?;
            fire_local(Binder::new(TestLine::new(), "test-graph"), overrides, &table, sink)
        }
        DashboardKind::StockRadio => {
            let table = load_csv_file(csv, &stock_file_layout())?;
            let binder = Binder::new(StockRadio::new(&table), "control-and-graph");
            fire_local(binder, overrides, &table, sink)
        }
        DashboardKind::StockDropdown => {
            let table = load_csv_file(csv, &stock_file_layout())?;
            let binder = Binder::new(StockDropdown::new(&table), "control-and-graph");
            fire_local(binder, overrides, &table, sink)
        }
        DashboardKind::StockMulti => {
            let binder = Binder::new(StockMulti::new(), "stock-chart");
            let state = apply_overrides(&binder, overrides)?;
            let fetched = match binder.dashboard().price_query(&state) {
                Ok(query) => PriceClient::new(&ApiConfig::default()).fetch(&query).await,
                Err(e) => Err(e),
            };
            Ok(match fetched {
                Ok(table) => binder.fire(&state, &table, sink),
                Err(e) => {
                    let view = binder.fail(&e);
                    sink.render(binder.target(), &view);
                    view
                }
            })
        }
        DashboardKind::Econ => {
            let config = ApiConfig::default();
            let binder = Binder::new(EconIndicators::new(config.indicator_labels())?, "econ-charts");
            let state = apply_overrides(&binder, overrides)?;
            let fetched = match binder
                .check(&state)
                .and_then(|_| binder.dashboard().macro_query(&state))
            {
                Ok(query) => MacroClient::new(&config).fetch(&query).await,
                Err(e) => Err(e),
            };
            Ok(match fetched {
                Ok(table) => binder.fire(&state, &table, sink),
                Err(e) => {
                    let view = binder.fail(&e);
                    sink.render(binder.target(), &view);
                    view
                }
            })
        }
    }
}

pub async fn run_render(
    kind: DashboardKind,
    csv: &str,
    overrides: &[(String, String)],
    pretty: bool,
) -> anyhow::Result<()> {
    info!("Rendering {:?} with {} override(s)", kind, overrides.len());
    let mut sink = StdoutSink::new(pretty);
    let view = render_view(kind, csv, overrides, &mut sink).await?;
    info!(
        "{} chart(s), notice: {}",
        view.charts().len(),
        view.notice().map(|n| n.message.as_str()).unwrap_or("none")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::binder::NoticeLevel;

    fn stock_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "date,price,stock\n01-01-2024,100,AAPL\n02-01-2024,101,AAPL\n01-01-2024,300,MSFT\n",
        )
        .unwrap();
        file
    }

    fn set(id: &str, value: &str) -> (String, String) {
        (id.to_string(), value.to_string())
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("stocks=AAPL,MSFT").unwrap(),
            set("stocks", "AAPL,MSFT")
        );
        assert!(parse_assignment("stocks").is_err());
        assert!(parse_assignment("=AAPL").is_err());
    }

    #[tokio::test]
    async fn test_render_test_line() {
        let mut sink = StdoutSink::new(false);
        let view = render_view(DashboardKind::TestLine, "", &[], &mut sink)
            .await
            .unwrap();
        assert_eq!(view.charts()[0].title, "Test Stock Data");
        assert_eq!(sink.rendered.len(), 1);
        assert!(sink.rendered[0].starts_with(r#"{"target":"test-graph","view":{"kind":"charts""#));
    }

    #[tokio::test]
    async fn test_render_dropdown_with_override() {
        let file = stock_file();
        let csv = file.path().to_str().unwrap();
        let mut sink = StdoutSink::new(false);
        let view = render_view(
            DashboardKind::StockDropdown,
            csv,
            &[set("stocks", "AAPL, MSFT")],
            &mut sink,
        )
        .await
        .unwrap();
        assert_eq!(view.charts()[0].trace_names(), vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_empty_selection_skips_fetch() {
        let mut sink = StdoutSink::new(false);
        let view = render_view(DashboardKind::StockMulti, "", &[set("stocks", "")], &mut sink)
            .await
            .unwrap();
        assert_eq!(view.notice().unwrap().level, NoticeLevel::Error);
        assert_eq!(sink.rendered.len(), 1);
    }

    #[tokio::test]
    async fn test_inverted_years_skip_fetch() {
        let mut sink = StdoutSink::new(false);
        let view = render_view(
            DashboardKind::Econ,
            "",
            &[set("start_year", "2010"), set("end_year", "2005")],
            &mut sink,
        )
        .await
        .unwrap();
        assert_eq!(
            view.notice().unwrap().message,
            "Start year must be before end year."
        );
    }

    #[tokio::test]
    async fn test_override_outside_domain_is_error() {
        let file = stock_file();
        let csv = file.path().to_str().unwrap();
        let mut sink = StdoutSink::new(false);
        let result = render_view(DashboardKind::StockRadio, csv, &[set("stock", "IBM")], &mut sink).await;
        assert!(result.is_err());
        assert!(sink.rendered.is_empty());
    }
}
