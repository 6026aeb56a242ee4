//! Error types for dashboard operations

use thiserror::Error;

/// Dashboard specific errors
#[derive(Debug, Error)]
pub enum DashboardError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Unknown lookback period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Start date not before end date
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ApiError(_) | Self::YahooFinanceError(_))
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::InvalidSymbol("INVALID".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: INVALID");

        let err = DashboardError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "No data found".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for AAPL: No data found");
    }

    #[test]
    fn test_transient_errors() {
        assert!(DashboardError::YahooFinanceError("timeout".to_string()).is_transient());
        assert!(DashboardError::ApiError("502".to_string()).is_transient());
        assert!(
            !DashboardError::DataUnavailable {
                symbol: "AAPL".to_string(),
                reason: "empty".to_string(),
            }
            .is_transient()
        );
    }
}
