//! Stock Market Dashboard CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin stock-dashboard -- --symbols AAPL,MSFT --period 6mo
//! cargo run --bin stock-dashboard -- --start 2024-01-01 --end 2024-06-30 --export chart.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::Parser;
use market_dashboard::{
    Dashboard, DashboardConfig, DateRange, Period, YahooFinanceClient, parse_symbols, render,
};

#[derive(Parser, Debug)]
#[command(name = "stock-dashboard")]
#[command(about = "Stock market dashboard in the terminal", long_about = None)]
struct Args {
    /// Comma-separated ticker symbols
    #[arg(short, long)]
    symbols: Option<String>,

    /// Lookback period (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y)
    #[arg(short, long)]
    period: Option<Period>,

    /// First day (YYYY-MM-DD); overrides --period
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,

    /// Write the chart series as JSON to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = chat_utils::Config::from_env();
    chat_utils::init_tracing_with(&app_config, "warn,market_dashboard=info");

    let args = Args::parse();
    let config = DashboardConfig::from_env().context("invalid dashboard configuration")?;

    let symbols = match args.symbols.as_deref() {
        Some(raw) => parse_symbols(raw),
        None => config.default_symbols.clone(),
    };
    if symbols.is_empty() {
        bail!("Please enter at least one stock symbol");
    }

    let range = match (args.start, args.end) {
        (Some(start), Some(end)) => DateRange::from_dates(start, end)?,
        _ => args.period.unwrap_or(config.default_period).range(),
    };

    let client = YahooFinanceClient::new(config.request_timeout)?;
    let dashboard = Dashboard::new(client, config);

    println!("Fetching latest stock data...");
    let report = dashboard.fetch(&symbols, &range).await;
    print!("{}", render::render_report(&report));

    if let Some(path) = args.export {
        report
            .chart_data()
            .write_json(&path)
            .with_context(|| format!("failed to export chart data to {}", path.display()))?;
        println!("Chart data written to {}", path.display());
    }

    println!("Data provided by Yahoo Finance");
    Ok(())
}
