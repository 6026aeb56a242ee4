//! Yahoo Finance API client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use super::{MarketDataProvider, Quote};
use crate::error::{DashboardError, Result};
use crate::period::DateRange;

/// Yahoo Finance API client
pub struct YahooFinanceClient {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooFinanceClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;
        Ok(Self { connector, timeout })
    }

    /// Get historical quotes for a symbol
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>> {
        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            DashboardError::InvalidDateRange(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DashboardError::InvalidDateRange(format!("Invalid end timestamp: {e}")))?;

        let response = tokio::time::timeout(
            self.timeout,
            self.connector.get_quote_history(symbol, start_odt, end_odt),
        )
        .await
        .map_err(|_| {
            DashboardError::ApiError(format!(
                "request for {symbol} timed out after {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| Quote {
                symbol: symbol.to_string(),
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
            })
            .collect())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn history(&self, symbol: &str, range: &DateRange) -> Result<Vec<Quote>> {
        self.get_historical_quotes(symbol, range.start, range.end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_history() {
        let client = YahooFinanceClient::new(Duration::from_secs(30)).unwrap();
        let quotes = client.history("AAPL", &Period::OneMonth.range()).await;
        assert!(quotes.is_ok());

        let quotes = quotes.unwrap();
        assert!(!quotes.is_empty());
        assert_eq!(quotes[0].symbol, "AAPL");
        assert!(quotes[0].close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol_fails() {
        let client = YahooFinanceClient::new(Duration::from_secs(30)).unwrap();
        let result = client
            .history("INVALID_SYMBOL_12345", &Period::FiveDays.range())
            .await;
        assert!(result.is_err());
    }
}
