//! Static test chart: ten days of AAPL closes, no controls.

use chrono::{Days, NaiveDate};
use findash_core::binder::Dashboard;
use findash_core::chart::ChartSpec;
use findash_core::controls::{ControlRegistry, ControlState};
use findash_core::error::{DashError, Result};
use findash_core::price::{price_columns, CLOSE_COLUMN};
use findash_core::table::{Row, Table};
use findash_data::render::line_chart;

pub const TITLE: &str = "Test Stock Data";

/// Ten daily rows from 2024-01-01 with closes 100..109, all AAPL.
pub fn sample_table() -> Result<Table> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .ok_or_else(|| DashError::unavailable("Invalid sample start date"))?;
    let rows = (0..10u32)
        .map(|i| Row {
            date: start + Days::new(u64::from(i)),
            category: Some("AAPL".to_string()),
            values: vec![Some(100.0 + f64::from(i))],
        })
        .collect();
    Table::new(price_columns(), rows)
}

#[derive(Debug, Clone, Default)]
pub struct TestLine {
    registry: ControlRegistry,
}

impl TestLine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dashboard for TestLine {
    fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    fn render(&self, _state: &ControlState, table: &Table) -> Result<Vec<ChartSpec>> {
        Ok(vec![line_chart(table, CLOSE_COLUMN, TITLE)?])
    }
}
