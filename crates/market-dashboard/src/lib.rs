//! Terminal stock dashboard
//!
//! Fetches daily price history for a watchlist from Yahoo Finance and
//! renders price cards, trend sparklines, trading volume, key metrics and a
//! correlation matrix of daily returns.
//!
//! - [`Dashboard`] fetches symbols concurrently through a [`MarketDataProvider`]
//! - [`StockSnapshot`] holds the per-symbol headline numbers
//! - [`render`] turns a [`DashboardReport`] into tables
//! - [`ChartData`] is the JSON export of the plotted series
//!
//! # Example
//!
//! ```rust,no_run
//! use market_dashboard::{Dashboard, DashboardConfig, Period, YahooFinanceClient, parse_symbols};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::default();
//!     let client = YahooFinanceClient::new(config.request_timeout)?;
//!     let dashboard = Dashboard::new(client, config);
//!
//!     let report = dashboard
//!         .fetch(&parse_symbols("AAPL,MSFT"), &Period::ThreeMonths.range())
//!         .await;
//!     println!("{}", market_dashboard::render::render_report(&report));
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod period;
pub mod render;
pub mod snapshot;
pub mod symbols;

pub use analytics::{CorrelationMatrix, correlation_matrix, daily_returns, pearson};
pub use api::{MarketDataProvider, Quote, YahooFinanceClient};
pub use chart::ChartData;
pub use config::{DEFAULT_SYMBOLS, DashboardConfig};
pub use dashboard::{Dashboard, DashboardReport, FetchFailure};
pub use error::{DashboardError, Result};
pub use period::{DateRange, Period};
pub use snapshot::StockSnapshot;
pub use symbols::{parse_symbols, validate_symbol};
