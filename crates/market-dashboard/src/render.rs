//! Terminal rendering of a dashboard report

use std::fmt::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::analytics::CorrelationMatrix;
use crate::dashboard::{DashboardReport, FetchFailure};
use crate::snapshot::StockSnapshot;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn change_color(up: bool) -> Color {
    if up { Color::Green } else { Color::Red }
}

fn right(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

/// `$1,234.56`
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `+1.23` / `-1.23`
pub fn format_change(value: f64) -> String {
    format!("{value:+.2}")
}

/// `+1.23%` / `-1.23%`
pub fn format_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

/// `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Unicode block sparkline, downsampled to at most `width` columns
pub fn sparkline(values: &[f64], width: usize) -> String {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let buckets: Vec<f64> = if values.len() <= width {
        values
    } else {
        (0..width)
            .map(|i| {
                let start = i * values.len() / width;
                let end = ((i + 1) * values.len() / width).max(start + 1);
                let slice = &values[start..end];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    };

    let min = buckets.iter().copied().fold(f64::INFINITY, f64::min);
    let max = buckets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    buckets
        .iter()
        .map(|v| {
            let level = if span == 0.0 {
                SPARK_LEVELS.len() / 2
            } else {
                (((v - min) / span) * top).round() as usize
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// One card per symbol: price and colored change
pub fn render_cards(snapshots: &[StockSnapshot]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Symbol", "Price", "Change", "Change %"]);
    for snap in snapshots {
        let color = change_color(snap.is_up());
        table.add_row(vec![
            Cell::new(&snap.symbol),
            right(format_price(snap.current_price)),
            right(format_change(snap.change)).fg(color),
            right(format_percent(snap.change_percent)).fg(color),
        ]);
    }
    table
}

/// Key metrics for every symbol
pub fn render_metrics(snapshots: &[StockSnapshot]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Symbol",
        "Current Price",
        "Change",
        "Change %",
        "Period High",
        "Period Low",
        "Avg Volume",
    ]);
    for snap in snapshots {
        table.add_row(vec![
            Cell::new(&snap.symbol),
            right(format_price(snap.current_price)),
            right(format_change(snap.change)),
            right(format_percent(snap.change_percent)),
            right(format_price(snap.period_high)),
            right(format_price(snap.period_low)),
            right(group_thousands(snap.average_volume.round() as u64)),
        ]);
    }
    table
}

/// Closing price trend per symbol
pub fn render_trends(snapshots: &[StockSnapshot]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Symbol", "Trend", "First", "Last", "Bars"]);
    for snap in snapshots {
        let closes = snap.closes();
        let first = closes.first().copied().unwrap_or_default();
        table.add_row(vec![
            Cell::new(&snap.symbol),
            Cell::new(sparkline(&closes, SPARK_WIDTH)).fg(change_color(snap.current_price >= first)),
            right(format_price(first)),
            right(format_price(snap.current_price)),
            right(closes.len()),
        ]);
    }
    table
}

/// Trading volume per symbol
pub fn render_volume(snapshots: &[StockSnapshot]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Symbol", "Volume", "Last Volume", "Avg Volume"]);
    for snap in snapshots {
        let volumes: Vec<f64> = snap.history.iter().map(|q| q.volume as f64).collect();
        table.add_row(vec![
            Cell::new(&snap.symbol),
            Cell::new(sparkline(&volumes, SPARK_WIDTH)),
            right(group_thousands(snap.last_volume())),
            right(group_thousands(snap.average_volume.round() as u64)),
        ]);
    }
    table
}

/// Return correlation heat map; blue is positive, red negative
pub fn render_correlation(matrix: &CorrelationMatrix) -> Table {
    let mut table = new_table();
    let mut header = vec![String::new()];
    header.extend(matrix.symbols.iter().cloned());
    table.set_header(header);

    for (symbol, row) in matrix.symbols.iter().zip(&matrix.values) {
        let mut cells = vec![Cell::new(symbol)];
        cells.extend(row.iter().map(|value| match value {
            Some(v) => {
                let cell = right(format!("{v:.2}"));
                if *v >= 0.5 {
                    cell.fg(Color::Blue)
                } else if *v <= -0.5 {
                    cell.fg(Color::Red)
                } else {
                    cell
                }
            }
            None => right("n/a"),
        }));
        table.add_row(cells);
    }
    table
}

fn render_failures(failures: &[FetchFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("Error fetching data for {}: {}\n", f.symbol, f.message))
        .collect()
}

/// The full dashboard as printable text
pub fn render_report(report: &DashboardReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stock Market Dashboard ({})\n", report.range);

    if !report.failures.is_empty() {
        out.push_str(&render_failures(&report.failures));
        out.push('\n');
    }

    if report.is_empty() {
        out.push_str("No data available for the selected stocks.\n");
        return out;
    }

    let _ = writeln!(out, "{}\n", render_cards(&report.snapshots));
    let _ = writeln!(out, "Price Trends\n{}\n", render_trends(&report.snapshots));
    let _ = writeln!(out, "Trading Volume\n{}\n", render_volume(&report.snapshots));
    let _ = writeln!(out, "Key Metrics\n{}\n", render_metrics(&report.snapshots));

    let matrix = report.correlation();
    if matrix.symbols.len() > 1 {
        let _ = writeln!(out, "Correlation Matrix\n{}\n", render_correlation(&matrix));
    }

    out
}
