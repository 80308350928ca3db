//! Alpha Vantage payload parsing.
//!
//! Every series endpoint returns the same shape: a `Meta Data` object and one
//! object keyed by date strings whose entries hold numeric strings. The
//! payload is handled as `serde_json::Value` because the series key depends
//! on the request (`Time Series (5min)`, `Time Series (Daily)`,
//! `Technical Analysis: RSI`). Key order is not trusted; the series is sorted
//! by timestamp when the `TimeSeries` is built.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::provider::DataError;
use crate::domain::{Observation, SeriesKind, Ticker, TimeSeries};

const ERROR_KEY: &str = "Error Message";
const THROTTLE_KEYS: [&str; 2] = ["Note", "Information"];

/// Extract a newest-first `TimeSeries` from a provider payload.
pub fn parse_series(
    requested: &Ticker,
    kind: SeriesKind,
    payload: &Value,
) -> Result<TimeSeries, DataError> {
    let root = payload.as_object().ok_or_else(|| {
        DataError::ResponseFormatChanged("payload is not a JSON object".into())
    })?;

    if root.contains_key(ERROR_KEY) {
        return Err(DataError::SymbolNotFound {
            symbol: requested.to_string(),
        });
    }

    let series = match root.iter().find(|(k, _)| is_series_key(kind, k)) {
        Some((_, v)) => v,
        None => {
            if let Some(msg) = THROTTLE_KEYS
                .iter()
                .find_map(|k| root.get(*k).and_then(Value::as_str))
            {
                return Err(DataError::RateLimited(msg.to_string()));
            }
            return Err(DataError::ResponseFormatChanged(format!(
                "no {} series in payload",
                kind.label()
            )));
        }
    };

    let entries = series.as_object().ok_or_else(|| {
        DataError::ResponseFormatChanged(format!("{} series is not an object", kind.label()))
    })?;

    let field = kind.value_field();
    let mut observations = Vec::with_capacity(entries.len());
    for (stamp, entry) in entries {
        let timestamp = parse_timestamp(stamp).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("invalid timestamp '{stamp}'"))
        })?;
        let raw = entry.get(field).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("entry {stamp} has no '{field}' field"))
        })?;
        let value = parse_number(raw).ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("entry {stamp}: '{raw}' is not a number"))
        })?;
        observations.push(Observation { timestamp, value });
    }

    if observations.is_empty() {
        return Err(DataError::SymbolNotFound {
            symbol: requested.to_string(),
        });
    }

    let symbol = meta_symbol(root.get("Meta Data")).unwrap_or_else(|| requested.clone());
    Ok(TimeSeries::new(symbol, kind, observations))
}

fn is_series_key(kind: SeriesKind, key: &str) -> bool {
    match kind {
        SeriesKind::Intraday => key.starts_with("Time Series (") && key != "Time Series (Daily)",
        SeriesKind::Daily => key == "Time Series (Daily)",
        SeriesKind::Rsi => key == "Technical Analysis: RSI",
    }
}

/// Symbol from the metadata block. Price endpoints use `2. Symbol`, indicators `1: Symbol`.
fn meta_symbol(meta: Option<&Value>) -> Option<Ticker> {
    let meta = meta?.as_object()?;
    meta.iter()
        .find(|(k, _)| k.ends_with("Symbol"))
        .and_then(|(_, v)| v.as_str())
        .and_then(|s| Ticker::parse(s).ok())
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
