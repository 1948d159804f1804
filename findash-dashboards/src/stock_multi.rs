//! Remote price history for a fixed list of symbols.
//!
//! The selection is turned into a [`PriceQuery`] before anything is fetched;
//! an empty selection never reaches the price API.

use findash_core::binder::Dashboard;
use findash_core::chart::ChartSpec;
use findash_core::controls::{Control, ControlRegistry, ControlState};
use findash_core::error::{DashError, Result};
use findash_core::price::{PriceQuery, CLOSE_COLUMN};
use findash_core::table::Table;
use findash_data::render::line_chart;

pub const STOCK_LIST: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"];

pub const STOCKS_CONTROL: &str = "stocks";

pub const TITLE: &str = "Stock Price Trends for Selected Stocks";

pub const EMPTY_SELECTION_MESSAGE: &str = "No data available. Please select at least one stock.";

/// Rows shown in the latest-data table.
pub const LATEST_ROWS: usize = 10;

#[derive(Debug, Clone)]
pub struct StockMulti {
    registry: ControlRegistry,
}

impl Default for StockMulti {
    fn default() -> Self {
        Self::new()
    }
}

impl StockMulti {
    pub fn new() -> Self {
        let symbols = STOCK_LIST.iter().map(|s| s.to_string()).collect();
        Self {
            registry: ControlRegistry::new().with(Control::multi(
                STOCKS_CONTROL,
                "Select Stocks",
                symbols,
            )),
        }
    }

    /// The fetch the current selection needs.
    pub fn price_query(&self, state: &ControlState) -> Result<PriceQuery> {
        self.validate(state)?;
        Ok(PriceQuery::new(state.multi(STOCKS_CONTROL)?.to_vec()))
    }

    /// Last rows of the fetched data, for the table under the chart.
    pub fn latest(table: &Table) -> Table {
        table.tail(LATEST_ROWS)
    }
}

impl Dashboard for StockMulti {
    fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    fn validate(&self, state: &ControlState) -> Result<()> {
        if state.multi(STOCKS_CONTROL)?.is_empty() {
            return Err(DashError::invalid(EMPTY_SELECTION_MESSAGE));
        }
        Ok(())
    }

    fn render(&self, state: &ControlState, table: &Table) -> Result<Vec<ChartSpec>> {
        let filtered = table.filter_categories(state.multi(STOCKS_CONTROL)?);
        Ok(vec![line_chart(&filtered, CLOSE_COLUMN, TITLE)?])
    }
}
