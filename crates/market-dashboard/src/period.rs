//! Lookback periods and date ranges

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Lookback period ending now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
}

impl Period {
    /// Every period, shortest first
    pub const ALL: [Self; 7] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
    ];

    /// Short code as used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
        }
    }

    /// Length of the lookback window
    pub fn lookback(self) -> Duration {
        let days = match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::TwoYears => 730,
        };
        Duration::days(days)
    }

    /// Window of this length ending at `end`
    pub fn ending_at(self, end: DateTime<Utc>) -> DateRange {
        DateRange {
            start: end - self.lookback(),
            end,
        }
    }

    /// Window of this length ending now
    pub fn range(self) -> DateRange {
        self.ending_at(Utc::now())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == code)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
                DashboardError::InvalidPeriod(format!("'{s}' (expected one of {})", valid.join(", ")))
            })
    }
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range; `start` must be before `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(DashboardError::InvalidDateRange(format!(
                "start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering whole calendar days, `end` included
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidDateRange(format!(
                "start date {start} is after end date {end}"
            )));
        }
        let end_exclusive = end
            .succ_opt()
            .ok_or_else(|| DashboardError::InvalidDateRange(format!("end date {end} is out of range")))?;

        Self::new(
            start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end_exclusive.and_time(chrono::NaiveTime::MIN).and_utc(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_periods() {
        assert_eq!("1y".parse::<Period>().unwrap(), Period::OneYear);
        assert_eq!(" 3MO ".parse::<Period>().unwrap(), Period::ThreeMonths);
        assert!(matches!(
            "10y".parse::<Period>(),
            Err(DashboardError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_display_matches_parse() {
        for period in Period::ALL {
            assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
        }
    }

    #[test]
    fn test_ending_at() {
        let end = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
        let range = Period::OneMonth.ending_at(end);
        assert_eq!(range.end, end);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_range_rejects_reversed() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert!(DateRange::new(a, b).is_ok());
        assert!(DateRange::new(b, a).is_err());
        assert!(DateRange::new(a, a).is_err());
    }

    #[test]
    fn test_from_dates_includes_end_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let range = DateRange::from_dates(start, end).unwrap();
        assert_eq!(range.end - range.start, Duration::days(1));
        assert_eq!(range.to_string(), "2024-01-02 to 2024-01-03");
    }
}
