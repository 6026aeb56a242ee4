//! Configuration for dashboard runs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::period::Period;
use crate::symbols::parse_symbols;

/// Symbols shown when none are given
pub const DEFAULT_SYMBOLS: &str = "AAPL,GOOGL,MSFT,TSLA,AMZN";

/// Configuration for dashboard runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Symbols used when the caller gives none
    pub default_symbols: Vec<String>,

    /// Lookback used when no explicit dates are given
    pub default_period: Period,

    /// Retries after the first failed request for a symbol
    pub max_retries: u32,

    /// Initial backoff duration for retries
    pub retry_backoff_base: Duration,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Symbols fetched at the same time
    pub max_concurrent_fetches: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbols: parse_symbols(DEFAULT_SYMBOLS),
            default_period: Period::OneYear,
            max_retries: 2,
            retry_backoff_base: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            max_concurrent_fetches: 4,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Create config from `DASHBOARD_SYMBOLS` and `DASHBOARD_PERIOD`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_symbols.is_empty() {
            return Err(DashboardError::ConfigError(
                "default_symbols must not be empty".to_string(),
            ));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(DashboardError::ConfigError(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(DashboardError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get retry backoff duration for attempt number
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        self.retry_backoff_base * 2_u32.saturating_pow(attempt)
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    default_symbols: Option<Vec<String>>,
    default_period: Option<Period>,
    max_retries: Option<u32>,
    retry_backoff_base: Option<Duration>,
    request_timeout: Option<Duration>,
    max_concurrent_fetches: Option<usize>,
}

impl DashboardConfigBuilder {
    /// Set the fallback symbol list
    pub fn default_symbols(mut self, symbols: &str) -> Self {
        self.default_symbols = Some(parse_symbols(symbols));
        self
    }

    /// Set the fallback period
    pub fn default_period(mut self, period: Period) -> Self {
        self.default_period = Some(period);
        self
    }

    /// Set maximum retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set retry backoff base duration
    pub fn retry_backoff_base(mut self, duration: Duration) -> Self {
        self.retry_backoff_base = Some(duration);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set fetch concurrency
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = Some(limit);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Result<Self> {
        if self.default_symbols.is_none() {
            if let Ok(raw) = std::env::var("DASHBOARD_SYMBOLS") {
                self.default_symbols = Some(parse_symbols(&raw));
            }
        }
        if self.default_period.is_none() {
            if let Ok(raw) = std::env::var("DASHBOARD_PERIOD") {
                self.default_period = Some(raw.parse()?);
            }
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            default_symbols: self.default_symbols.unwrap_or(defaults.default_symbols),
            default_period: self.default_period.unwrap_or(defaults.default_period),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_base: self.retry_backoff_base.unwrap_or(defaults.retry_backoff_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_concurrent_fetches: self
                .max_concurrent_fetches
                .unwrap_or(defaults.max_concurrent_fetches),
        };

        config.validate()?;
        Ok(config)
    }
}
