//! Fetching and summarising a watchlist

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analytics::{CorrelationMatrix, correlation_matrix, daily_returns};
use crate::api::MarketDataProvider;
use crate::chart::ChartData;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::period::DateRange;
use crate::snapshot::StockSnapshot;
use crate::symbols::validate_symbol;

/// A symbol that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub symbol: String,
    pub message: String,
}

/// Everything one dashboard run produced
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    /// Loaded symbols, in request order
    pub snapshots: Vec<StockSnapshot>,
    /// Symbols that failed, in request order
    pub failures: Vec<FetchFailure>,
}

impl DashboardReport {
    /// True when no symbol could be loaded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Correlation of daily returns across the loaded symbols
    pub fn correlation(&self) -> CorrelationMatrix {
        let series: Vec<_> = self
            .snapshots
            .iter()
            .map(|s| (s.symbol.clone(), daily_returns(&s.history)))
            .collect();
        correlation_matrix(&series)
    }

    /// Price and volume series for export
    pub fn chart_data(&self) -> ChartData {
        ChartData::from_snapshots(self.range, &self.snapshots)
    }
}

/// Loads price histories and turns them into snapshots
pub struct Dashboard<P> {
    provider: Arc<P>,
    config: Arc<DashboardConfig>,
}

impl<P: MarketDataProvider> Dashboard<P> {
    pub fn new(provider: P, config: DashboardConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config: Arc::new(config),
        }
    }

    /// Fetch every symbol
    ///
    /// Up to `max_concurrent_fetches` requests run at once. A failing symbol
    /// is recorded in the report and does not stop the others.
    pub async fn fetch(&self, symbols: &[String], range: &DateRange) -> DashboardReport {
        let total = symbols.len();
        info!(total, %range, "Fetching stock data");

        let results: Vec<(String, Result<StockSnapshot>)> = stream::iter(symbols.iter().enumerate())
            .map(|(i, symbol)| async move {
                let result = self.fetch_symbol(symbol, range).await;
                info!(symbol = %symbol, done = i + 1, total, ok = result.is_ok(), "Fetched");
                (symbol.clone(), result)
            })
            .buffered(self.config.max_concurrent_fetches)
            .collect()
            .await;

        let mut snapshots = Vec::new();
        let mut failures = Vec::new();
        for (symbol, result) in results {
            match result {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Error fetching data");
                    failures.push(FetchFailure {
                        symbol,
                        message: e.to_string(),
                    });
                }
            }
        }

        DashboardReport {
            range: *range,
            snapshots,
            failures,
        }
    }

    /// Fetch and summarise one symbol, retrying transient failures
    ///
    /// Malformed symbols fail with [`crate::DashboardError::InvalidSymbol`] without
    /// a request.
    pub async fn fetch_symbol(&self, symbol: &str, range: &DateRange) -> Result<StockSnapshot> {
        validate_symbol(symbol)?;

        let mut attempt = 0;
        loop {
            match self.provider.history(symbol, range).await {
                Ok(history) => return StockSnapshot::from_history(symbol, history),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    let backoff = self.config.retry_backoff(attempt);
                    debug!(symbol, attempt, ?backoff, error = %e, "Retrying");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
