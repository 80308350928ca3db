//! Parsing recorded provider payloads, and forecasting from them.

use serde_json::Value;
use tickercast_core::data::{parse_series, DataError};
use tickercast_core::{forecast, SeriesKind, Ticker};

fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&text).unwrap()
}

fn ibm() -> Ticker {
    Ticker::parse("IBM").unwrap()
}

#[test]
fn daily_fixture_parses_newest_first() {
    let s = parse_series(&ibm(), SeriesKind::Daily, &fixture("ibm_daily.json")).unwrap();
    assert_eq!(s.len(), 8);
    assert_eq!(s.latest().unwrap().value, 195.95);
    let values = s.values_newest_first(None);
    assert_eq!(values.last().copied(), Some(185.30));
}

#[test]
fn intraday_fixture_parses() {
    let s = parse_series(&ibm(), SeriesKind::Intraday, &fixture("ibm_intraday.json")).unwrap();
    assert_eq!(s.len(), 5);
    assert_eq!(
        s.latest().unwrap().timestamp.format("%H:%M").to_string(),
        "19:55"
    );
}

#[test]
fn rsi_fixture_parses() {
    let s = parse_series(&ibm(), SeriesKind::Rsi, &fixture("ibm_rsi.json")).unwrap();
    assert_eq!(s.len(), 6);
    assert_eq!(s.symbol.as_str(), "IBM");
    let (lo, hi) = s.value_range().unwrap();
    assert!(lo >= 0.0 && hi <= 100.0);
}

#[test]
fn daily_fixture_forecast_is_displayable() {
    let s = parse_series(&ibm(), SeriesKind::Daily, &fixture("ibm_daily.json")).unwrap();
    let f = forecast(&s.values_newest_first(Some(100))).unwrap();
    assert!(f.fit.prediction.is_finite());
    assert_eq!(f.fit.last_observed, 195.95);
    // Display values carry at most 2 and 1 decimals.
    let price = f.display_price();
    assert!((price * 100.0 - (price * 100.0).round()).abs() < 1e-6);
    let pct = f.display_return_pct();
    assert!((pct * 10.0 - (pct * 10.0).round()).abs() < 1e-6);
}

#[test]
fn rate_limit_fixture_is_throttled() {
    let err = parse_series(&ibm(), SeriesKind::Daily, &fixture("rate_limited.json")).unwrap_err();
    assert!(matches!(err, DataError::RateLimited(_)));
    assert_eq!(err.category(), "network");
}
