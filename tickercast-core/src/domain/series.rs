//! TimeSeries: an ordered run of (timestamp, value) observations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ticker::Ticker;

/// Which data series a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Intraday closes at the configured interval.
    Intraday,
    /// Daily closes.
    Daily,
    /// Relative Strength Index values.
    Rsi,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Intraday, SeriesKind::Daily, SeriesKind::Rsi];

    /// Alpha Vantage `function` query parameter.
    pub fn function(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "TIME_SERIES_INTRADAY",
            SeriesKind::Daily => "TIME_SERIES_DAILY",
            SeriesKind::Rsi => "RSI",
        }
    }

    /// Field extracted from each dated entry of the payload.
    pub fn value_field(self) -> &'static str {
        match self {
            SeriesKind::Intraday | SeriesKind::Daily => "4. close",
            SeriesKind::Rsi => "RSI",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Intraday => "Intraday",
            SeriesKind::Daily => "Daily",
            SeriesKind::Rsi => "RSI",
        }
    }

    /// True for price series (as opposed to a bounded oscillator).
    pub fn is_price(self) -> bool {
        !matches!(self, SeriesKind::Rsi)
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single observed value at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// A time series for one symbol, stored newest-first as the data source delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub symbol: Ticker,
    pub kind: SeriesKind,
    /// Newest observation first.
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from observations in any order; they are sorted newest-first.
    pub fn new(symbol: Ticker, kind: SeriesKind, mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            symbol,
            kind,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations, newest first.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.first()
    }

    /// Values newest-first, optionally limited to the most recent `window` entries.
    pub fn values_newest_first(&self, window: Option<usize>) -> Vec<f64> {
        let take = window.unwrap_or(self.observations.len());
        self.observations.iter().take(take).map(|o| o.value).collect()
    }

    /// A new oldest-first copy, for charting and export.
    pub fn oldest_first(&self) -> Vec<Observation> {
        self.observations.iter().rev().copied().collect()
    }

    /// Keep only the `n` most recent observations.
    pub fn truncate(&mut self, n: usize) {
        self.observations.truncate(n);
    }

    /// (min, max) of the values, ignoring NaN. None for an empty series.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.observations
            .iter()
            .map(|o| o.value)
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    fn sample() -> TimeSeries {
        // Deliberately out of order.
        let obs = vec![
            Observation { timestamp: ts(2), value: 101.0 },
            Observation { timestamp: ts(4), value: 103.0 },
            Observation { timestamp: ts(1), value: 100.0 },
            Observation { timestamp: ts(3), value: 102.0 },
        ];
        TimeSeries::new(Ticker::parse("IBM").unwrap(), SeriesKind::Daily, obs)
    }

    #[test]
    fn sorted_newest_first() {
        let s = sample();
        assert_eq!(s.values_newest_first(None), vec![103.0, 102.0, 101.0, 100.0]);
        assert_eq!(s.latest().unwrap().value, 103.0);
    }

    #[test]
    fn oldest_first_is_a_copy() {
        let s = sample();
        let chrono_order: Vec<f64> = s.oldest_first().iter().map(|o| o.value).collect();
        assert_eq!(chrono_order, vec![100.0, 101.0, 102.0, 103.0]);
        // Original order untouched.
        assert_eq!(s.observations()[0].value, 103.0);
    }

    #[test]
    fn window_takes_most_recent() {
        let s = sample();
        assert_eq!(s.values_newest_first(Some(2)), vec![103.0, 102.0]);
        assert_eq!(s.values_newest_first(Some(10)).len(), 4);
    }

    #[test]
    fn value_range_ignores_nan() {
        let mut s = sample();
        s.observations[1].value = f64::NAN;
        assert_eq!(s.value_range(), Some((100.0, 103.0)));
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(SeriesKind::Intraday.function(), "TIME_SERIES_INTRADAY");
        assert_eq!(SeriesKind::Daily.value_field(), "4. close");
        assert_eq!(SeriesKind::Rsi.value_field(), "RSI");
        assert!(!SeriesKind::Rsi.is_price());
    }
}
