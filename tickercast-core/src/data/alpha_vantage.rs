//! Alpha Vantage data provider.
//!
//! One blocking GET per series against the query endpoint. The provider never
//! retries: a failed request is reported once and the caller decides what to
//! show. Throttling shows up as a 200 with a `Note`/`Information` body, which
//! the parser maps to `RateLimited`.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::config::ProviderConfig;
use super::parse::parse_series;
use super::provider::{DataError, SeriesProvider};
use super::request::RequestBuilder;
use crate::domain::{SeriesKind, Ticker, TimeSeries};

/// Alpha Vantage data provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl AlphaVantageProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn get_json(&self, symbol: &Ticker, kind: SeriesKind) -> Result<Value, DataError> {
        let builder = RequestBuilder::new(&self.config);
        let url = builder.url(symbol, kind)?;
        debug!(symbol = %symbol, series = %kind, url = %builder.redacted_url(symbol, kind), "requesting series");

        let resp = self.client.get(url).send().map_err(|e| {
            warn!(symbol = %symbol, series = %kind, "request failed: {e}");
            DataError::NetworkUnreachable(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(symbol = %symbol, series = %kind, %status, "provider returned an error status");
            return Err(DataError::Http {
                status: status.as_u16(),
            });
        }

        resp.json::<Value>().map_err(|e| {
            DataError::ResponseFormatChanged(format!(
                "failed to parse {kind} response for {symbol}: {e}"
            ))
        })
    }
}

impl SeriesProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch(&self, symbol: &Ticker, kind: SeriesKind) -> Result<TimeSeries, DataError> {
        let payload = self.get_json(symbol, kind)?;
        let series = parse_series(symbol, kind, &payload)?;
        debug!(symbol = %symbol, series = %kind, points = series.len(), "series parsed");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let provider = AlphaVantageProvider::new(ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "alpha_vantage");
        assert_eq!(provider.config().intraday_interval, "5min");
    }

    #[test]
    fn unreachable_host_is_network_error() {
        // Port 9 on localhost (discard) is closed on test machines; connection is refused.
        let cfg = ProviderConfig {
            base_url: "http://127.0.0.1:9/query".into(),
            timeout_secs: 2,
            ..ProviderConfig::default()
        };
        let provider = AlphaVantageProvider::new(cfg).unwrap();
        let err = provider
            .fetch(&Ticker::parse("IBM").unwrap(), SeriesKind::Daily)
            .unwrap_err();
        assert!(matches!(err, DataError::NetworkUnreachable(_)));
    }
}
