//! Remote fetches written to CSV.

use findash_core::config::ApiConfig;
use findash_core::csv_io::write_csv;
use findash_core::dates::ISO_DATE_FORMAT;
use findash_core::indicators::{MacroClient, MacroQuery};
use findash_core::price::{PriceClient, PriceQuery};
use log::info;

/// Fetch closes for `symbols` and write `Date,Close,Stock` rows to `output`.
pub async fn run_fetch_prices(
    symbols: Vec<String>,
    range: &str,
    interval: &str,
    output: &str,
) -> anyhow::Result<()> {
    let config = ApiConfig::default();
    let query = PriceQuery::new(symbols)
        .with_range(range)
        .with_interval(interval);
    info!(
        "Fetching {} symbol(s) from {}",
        query.symbols.len(),
        config.price_api_url
    );

    let table = PriceClient::new(&config).fetch(&query).await?;
    std::fs::write(output, write_csv(&table, ISO_DATE_FORMAT)?)?;

    info!("Wrote {} rows to {}", table.len(), output);
    Ok(())
}

/// Fetch every configured indicator between January 1st of `start_year` and
/// December 31st of `end_year` and write the joined table to `output`.
pub async fn run_fetch_indicators(start_year: i32, end_year: i32, output: &str) -> anyhow::Result<()> {
    let config = ApiConfig::default();
    if config.macro_api_key.is_empty() {
        anyhow::bail!("FRED_API_KEY is not set");
    }
    let query = MacroQuery::for_years(start_year, end_year)?;

    let table = MacroClient::new(&config).fetch(&query).await?;
    std::fs::write(output, write_csv(&table, ISO_DATE_FORMAT)?)?;

    info!(
        "Wrote {} rows of {} indicators to {}",
        table.len(),
        table.value_columns().len(),
        output
    );
    Ok(())
}
