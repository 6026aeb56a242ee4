//! Chart-ready export of price and volume series

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::period::DateRange;
use crate::snapshot::StockSnapshot;

/// One bar of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: u64,
}

/// Line and bar data for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub change_percent: f64,
    pub points: Vec<ChartPoint>,
}

/// Price trend and volume data for every loaded symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub generated_at: DateTime<Utc>,
    pub range: DateRange,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn from_snapshots(range: DateRange, snapshots: &[StockSnapshot]) -> Self {
        let series = snapshots
            .iter()
            .map(|snap| ChartSeries {
                symbol: snap.symbol.clone(),
                change_percent: snap.change_percent,
                points: snap
                    .history
                    .iter()
                    .map(|q| ChartPoint {
                        timestamp: q.timestamp,
                        close: q.close,
                        volume: q.volume,
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            range,
            series,
        }
    }

    /// Write as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), series = self.series.len(), "Chart data exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;
    use crate::snapshot::tests::bars;

    #[test]
    fn test_export_file() {
        let snap = StockSnapshot::from_history("AAPL", bars("AAPL", &[1.0, 2.0, 3.0])).unwrap();
        let data = ChartData::from_snapshots(Period::FiveDays.range(), &[snap]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        data.write_json(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["series"][0]["symbol"], "AAPL");
        assert_eq!(json["series"][0]["points"].as_array().unwrap().len(), 3);
        assert_eq!(json["series"][0]["points"][2]["close"], 3.0);
        assert!(json["range"]["start"].is_string());
    }
}
