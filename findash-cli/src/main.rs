//! findash CLI - fetch market and macro data, render dashboards headlessly.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "findash",
    version,
    about = "Financial and economic dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: findash_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("findash {}", env!("CARGO_PKG_VERSION"));
    findash_cmd::run(cli.command).await
}
