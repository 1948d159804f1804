//! Command implementations for the findash CLI.
//!
//! Provides subcommands for fetching remote price and indicator data to CSV,
//! driving any dashboard headlessly, and exporting a loaded stock file.

use clap::Subcommand;
use findash_core::price::{DEFAULT_INTERVAL, DEFAULT_RANGE};

pub mod export;
pub mod fetch;
pub mod render;

pub use render::DashboardKind;

/// Stock price file used by the file-backed dashboards.
pub const DEFAULT_STOCK_CSV: &str = "fixtures/StockData.csv";

#[derive(Subcommand)]
pub enum Command {
    /// Fetch daily closes for one or more symbols and write them as CSV
    FetchPrices {
        /// Comma separated symbols, e.g. AAPL,MSFT
        #[arg(short, long, value_delimiter = ',', required = true)]
        symbols: Vec<String>,

        /// Lookback window understood by the price API
        #[arg(long, default_value = DEFAULT_RANGE)]
        range: String,

        /// Bar interval understood by the price API
        #[arg(long, default_value = DEFAULT_INTERVAL)]
        interval: String,

        /// Output CSV path
        #[arg(short, long)]
        output: String,
    },

    /// Fetch the configured macroeconomic indicators for a range of years
    FetchIndicators {
        #[arg(long)]
        start_year: i32,

        #[arg(long)]
        end_year: i32,

        /// Output CSV path
        #[arg(short, long)]
        output: String,
    },

    /// Evaluate a dashboard once and print the resulting view as JSON
    Render {
        #[arg(value_enum)]
        dashboard: DashboardKind,

        /// Stock price file for the file-backed dashboards
        #[arg(long, default_value = DEFAULT_STOCK_CSV)]
        csv: String,

        /// Control override as id=value (comma separated for multi-select controls)
        #[arg(long = "set", value_parser = render::parse_assignment)]
        overrides: Vec<(String, String)>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Load a stock price file and write it back out as CSV
    Export {
        /// Input stock price file
        #[arg(short, long, default_value = DEFAULT_STOCK_CSV)]
        input: String,

        /// Output CSV path
        #[arg(short, long)]
        output: String,

        /// strftime date format for the output
        #[arg(long, default_value = findash_core::dates::DAY_MONTH_YEAR_FORMAT)]
        date_format: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::FetchPrices {
            symbols,
            range,
            interval,
            output,
        } => fetch::run_fetch_prices(symbols, &range, &interval, &output).await,
        Command::FetchIndicators {
            start_year,
            end_year,
            output,
        } => fetch::run_fetch_indicators(start_year, end_year, &output).await,
        Command::Render {
            dashboard,
            csv,
            overrides,
            pretty,
        } => render::run_render(dashboard, &csv, &overrides, pretty).await,
        Command::Export {
            input,
            output,
            date_format,
        } => export::run_export(&input, &output, &date_format),
    }
}
