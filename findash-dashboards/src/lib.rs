//! The findash dashboards.
//!
//! Each module is one independent pipeline: a [`Dashboard`] whose controls
//! are derived from its data (or a fixed list) and whose render function maps
//! the current control state and table to charts. The web apps and the CLI
//! drive these through a [`findash_core::binder::Binder`].
//!
//! [`Dashboard`]: findash_core::binder::Dashboard

pub mod econ;
pub mod stock_dropdown;
pub mod stock_multi;
pub mod stock_radio;
pub mod test_line;

use findash_core::csv_io::CsvLayout;

/// Value column of the local stock price file.
pub const STOCK_PRICE_COLUMN: &str = "price";

/// Layout of the local stock price file shared by the radio and dropdown
/// dashboards.
pub fn stock_file_layout() -> CsvLayout {
    CsvLayout::stock_prices()
}
