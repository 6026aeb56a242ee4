//! Per-symbol price summary

use serde::Serialize;

use crate::api::Quote;
use crate::error::{DashboardError, Result};

/// Headline numbers for one symbol over the requested window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSnapshot {
    pub symbol: String,
    /// Close of the latest bar
    pub current_price: f64,
    /// Close of the bar before it, or the current price with one bar
    pub previous_close: f64,
    pub change: f64,
    /// Percent change, 0 when the previous close is 0
    pub change_percent: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub average_volume: f64,
    /// Bars the numbers were computed from, oldest first
    pub history: Vec<Quote>,
}

impl StockSnapshot {
    /// Summarise a price history
    ///
    /// Bars with a non-finite close are discarded and the rest sorted by
    /// time. Returns [`DashboardError::DataUnavailable`] when nothing is left.
    pub fn from_history(symbol: &str, mut history: Vec<Quote>) -> Result<Self> {
        history.retain(|q| q.close.is_finite());
        history.sort_by_key(|q| q.timestamp);

        let (current, previous) = match history.as_slice() {
            [] => {
                return Err(DashboardError::DataUnavailable {
                    symbol: symbol.to_string(),
                    reason: "no price history in the requested range".to_string(),
                });
            }
            [only] => (only.close, only.close),
            [.., prev, last] => (last.close, prev.close),
        };

        let change = current - previous;
        let change_percent = if previous == 0.0 {
            0.0
        } else {
            change / previous * 100.0
        };

        let period_high = history
            .iter()
            .map(|q| q.high.max(q.close))
            .fold(f64::NEG_INFINITY, f64::max);
        let period_low = history
            .iter()
            .map(|q| q.low.min(q.close))
            .fold(f64::INFINITY, f64::min);
        let average_volume =
            history.iter().map(|q| q.volume as f64).sum::<f64>() / history.len() as f64;

        Ok(Self {
            symbol: symbol.to_string(),
            current_price: current,
            previous_close: previous,
            change,
            change_percent,
            period_high,
            period_low,
            average_volume,
            history,
        })
    }

    /// Whether the last move was flat or upward
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.history.iter().map(|q| q.close).collect()
    }

    /// Volume of the latest bar
    pub fn last_volume(&self) -> u64 {
        self.history.last().map_or(0, |q| q.volume)
    }
}
