//! Several stocks picked from a multi-select dropdown, one line each.

use crate::STOCK_PRICE_COLUMN;
use findash_core::binder::Dashboard;
use findash_core::chart::ChartSpec;
use findash_core::controls::{Control, ControlRegistry, ControlState};
use findash_core::error::{DashError, Result};
use findash_core::table::Table;
use findash_data::render::line_chart;

pub const STOCKS_CONTROL: &str = "stocks";

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one stock.";

#[derive(Debug, Clone)]
pub struct StockDropdown {
    registry: ControlRegistry,
}

impl StockDropdown {
    pub fn new(table: &Table) -> Self {
        Self {
            registry: ControlRegistry::new().with(Control::multi(
                STOCKS_CONTROL,
                "Stocks",
                table.categories(),
            )),
        }
    }
}

impl Dashboard for StockDropdown {
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
        let selected = state.multi(STOCKS_CONTROL)?;
        let filtered = table.filter_categories(selected);
        Ok(vec![line_chart(
            &filtered,
            STOCK_PRICE_COLUMN,
            format!("Stock Price Trends for {}", selected.join(", ")),
        )?])
    }
}
