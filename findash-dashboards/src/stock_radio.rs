//! Single stock picked with radio buttons, plus a paged table of the data.

use crate::STOCK_PRICE_COLUMN;
use findash_core::binder::Dashboard;
use findash_core::chart::ChartSpec;
use findash_core::controls::{Control, ControlRegistry, ControlState, Widget};
use findash_core::error::Result;
use findash_core::table::Table;
use findash_data::render::line_chart;
use log::info;

pub const STOCK_CONTROL: &str = "stock";

/// Rows per page of the data table shown under the radio buttons.
pub const PAGE_SIZE: usize = 6;

#[derive(Debug, Clone)]
pub struct StockRadio {
    registry: ControlRegistry,
}

impl StockRadio {
    /// One radio button per distinct stock in `table`; the first stock in
    /// date order is selected by default.
    pub fn new(table: &Table) -> Self {
        Self {
            registry: ControlRegistry::new().with(Control::single(
                STOCK_CONTROL,
                "Stock",
                Widget::Radio,
                table.categories(),
            )),
        }
    }
}

impl Dashboard for StockRadio {
    fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    fn render(&self, state: &ControlState, table: &Table) -> Result<Vec<ChartSpec>> {
        let selected = state.single(STOCK_CONTROL)?;
        let filtered = table.filter_categories(&[selected.to_string()]);
        info!("Filtered data for {}: {} rows", selected, filtered.len());
        Ok(vec![line_chart(
            &filtered,
            STOCK_PRICE_COLUMN,
            format!("Stock Price of {selected}"),
        )?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::stock_table;
    use findash_core::binder::{Binder, NoticeLevel};
    use findash_core::controls::ControlValue;

    #[test]
    fn test_domain_and_default() {
        let table = stock_table();
        let dashboard = StockRadio::new(&table);
        let control = dashboard.registry().get(STOCK_CONTROL).unwrap();
        assert_eq!(control.domain, vec!["AAPL", "MSFT"]);
        assert_eq!(control.widget, Widget::Radio);
        assert_eq!(control.default, ControlValue::Single("AAPL".into()));
    }

    #[test]
    fn test_selecting_aapl_gives_ten_points() {
        let table = stock_table();
        let binder = Binder::new(StockRadio::new(&table), "control-and-graph");
        let view = binder.evaluate(&binder.initial_state(), &table);
        let chart = &view.charts()[0];
        assert_eq!(chart.title, "Stock Price of AAPL");
        assert_eq!(chart.traces.len(), 1);
        let values: Vec<f64> = chart.traces[0].values().into_iter().flatten().collect();
        assert_eq!(values, (100..110).map(f64::from).collect::<Vec<_>>());
        let dates: Vec<&str> = chart.traces[0].points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates.first(), Some(&"2024-01-01"));
        assert_eq!(dates.last(), Some(&"2024-01-10"));
    }

    #[test]
    fn test_switching_stock() {
        let table = stock_table();
        let binder = Binder::new(StockRadio::new(&table), "control-and-graph");
        let mut state = binder.initial_state();
        binder
            .registry()
            .apply(&mut state, STOCK_CONTROL, ControlValue::Single("MSFT".into()))
            .unwrap();
        let view = binder.evaluate(&state, &table);
        assert_eq!(view.charts()[0].trace_names(), vec!["MSFT"]);
        assert_eq!(view.charts()[0].traces[0].points.len(), 2);
    }

    #[test]
    fn test_empty_file_shows_warning() {
        let empty = Table::empty(stock_table().columns().to_vec());
        let binder = Binder::new(StockRadio::new(&empty), "control-and-graph");
        let view = binder.evaluate(&binder.initial_state(), &empty);
        assert_eq!(view.notice().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn test_table_pages() {
        let table = stock_table();
        assert_eq!(table.page_count(PAGE_SIZE), 2);
        assert_eq!(table.page(0, PAGE_SIZE).len(), PAGE_SIZE);
    }
}
