//! Load a stock price file and write it back out, as the download action does.

use findash_core::csv_io::{load_csv_file, write_csv};
use findash_dashboards::stock_file_layout;
use log::info;

pub fn run_export(input: &str, output: &str, date_format: &str) -> anyhow::Result<()> {
    let table = load_csv_file(input, &stock_file_layout())?;
    std::fs::write(output, write_csv(&table, date_format)?)?;
    info!("Exported {} rows from {} to {}", table.len(), input, output);
    Ok(())
}
