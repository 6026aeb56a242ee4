//! Ticker symbol input handling

use crate::error::{DashboardError, Result};

/// Longest ticker accepted, exchange suffix included
pub const MAX_SYMBOL_LEN: usize = 12;

/// Split a comma-separated list into ticker symbols
///
/// Symbols are trimmed and upper-cased. Empty entries and repeats are
/// dropped; first occurrence order is kept.
///
/// ```
/// use market_dashboard::parse_symbols;
///
/// assert_eq!(parse_symbols(" aapl, MSFT,,aapl "), ["AAPL", "MSFT"]);
/// ```
pub fn parse_symbols(input: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let symbol = raw.trim().to_uppercase();
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

/// Check that `symbol` has the shape of a ticker
///
/// ASCII letters, digits and `.`, `-`, `^`, `=` are allowed, which covers
/// `BRK-B`, `7203.T`, `^GSPC` and `EURUSD=X`.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    let well_formed = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    if well_formed {
        Ok(())
    } else {
        Err(DashboardError::InvalidSymbol(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        assert_eq!(
            parse_symbols("AAPL, GOOGL, MSFT, TSLA, AMZN"),
            ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"]
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_symbols("").is_empty());
        assert!(parse_symbols(" , ,").is_empty());
    }

    #[test]
    fn test_keeps_suffixes() {
        assert_eq!(parse_symbols("brk-b, 7203.t"), ["BRK-B", "7203.T"]);
    }

    #[test]
    fn test_validate_symbol() {
        for symbol in ["AAPL", "BRK-B", "7203.T", "^GSPC", "EURUSD=X"] {
            assert!(validate_symbol(symbol).is_ok(), "{symbol} rejected");
        }
        for symbol in ["", "??", "AAPL MSFT", "ÄPPLE", "ABCDEFGHIJKLM"] {
            assert!(
                matches!(validate_symbol(symbol), Err(DashboardError::InvalidSymbol(_))),
                "{symbol} accepted"
            );
        }
    }
}
