//! Daily returns and cross-symbol correlation

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::Quote;

/// Daily simple returns keyed by trading day
pub type ReturnSeries = BTreeMap<NaiveDate, f64>;

/// Day-over-day returns of the closing price
///
/// The first bar has no return. Days following a zero close are skipped.
pub fn daily_returns(quotes: &[Quote]) -> ReturnSeries {
    quotes
        .windows(2)
        .filter(|pair| pair[0].close != 0.0)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            (curr.timestamp.date_naive(), curr.close / prev.close - 1.0)
        })
        .filter(|(_, r)| r.is_finite())
        .collect()
}

/// Pearson correlation coefficient
///
/// `None` for mismatched lengths, fewer than two points, or a constant
/// series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Square matrix of pairwise return correlations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    /// `values[i][j]` correlates `symbols[i]` with `symbols[j]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two symbols, if both are present and defined
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        self.values[i][j]
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Correlate every pair of series over the days both have a return
pub fn correlation_matrix(series: &[(String, ReturnSeries)]) -> CorrelationMatrix {
    let values = series
        .iter()
        .map(|(_, a)| {
            series
                .iter()
                .map(|(_, b)| {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = a
                        .iter()
                        .filter_map(|(day, x)| b.get(day).map(|y| (*x, *y)))
                        .unzip();
                    pearson(&xs, &ys)
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        symbols: series.iter().map(|(s, _)| s.clone()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::bars;

    #[test]
    fn test_daily_returns() {
        let returns = daily_returns(&bars("AAPL", &[100.0, 110.0, 99.0]));
        let values: Vec<f64> = returns.values().copied().collect();
        assert_eq!(values.len(), 2);
        assert!((values[0] - 0.10).abs() < 1e-9);
        assert!((values[1] + 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_daily_returns_skip_zero_close() {
        let returns = daily_returns(&bars("X", &[0.0, 10.0, 20.0]));
        assert_eq!(returns.len(), 1);
    }

    #[test]
    fn test_pearson_perfect() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        let inverse = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &inverse).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[3.0]), None);
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
    }

    #[test]
    fn test_correlation_matrix() {
        let a = daily_returns(&bars("A", &[100.0, 110.0, 99.0, 120.0]));
        let b = daily_returns(&bars("B", &[50.0, 55.0, 49.5, 60.0]));
        let c = daily_returns(&bars("C", &[10.0, 9.0, 10.0, 8.0]));
        let matrix = correlation_matrix(&[
            ("A".to_string(), a),
            ("B".to_string(), b),
            ("C".to_string(), c),
        ]);

        assert_eq!(matrix.symbols, ["A", "B", "C"]);
        assert!((matrix.get("A", "A").unwrap() - 1.0).abs() < 1e-9);
        assert!(matrix.get("A", "B").unwrap() > 0.99);
        assert!(matrix.get("A", "C").unwrap() < 0.0);
        assert_eq!(matrix.get("A", "C"), matrix.get("C", "A"));
        assert_eq!(matrix.get("A", "Z"), None);
    }

    #[test]
    fn test_correlation_without_overlap() {
        let a = daily_returns(&bars("A", &[1.0, 2.0]));
        let matrix = correlation_matrix(&[("A".to_string(), a.clone()), ("B".to_string(), a)]);
        assert_eq!(matrix.get("A", "B"), None);
    }
}
