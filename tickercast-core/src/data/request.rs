//! Query URL construction for the three series a dashboard needs.

use reqwest::Url;

use super::config::ProviderConfig;
use super::provider::DataError;
use crate::domain::{SeriesKind, Ticker};

/// Builds provider URLs from an explicit configuration.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    config: &'a ProviderConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ProviderConfig) -> Self {
        Self { config }
    }

    /// Query parameters for a request, in a stable order.
    pub fn params(&self, symbol: &Ticker, kind: SeriesKind) -> Vec<(&'static str, String)> {
        let cfg = self.config;
        let mut params = vec![
            ("function", kind.function().to_string()),
            ("symbol", symbol.as_str().to_string()),
        ];
        match kind {
            SeriesKind::Intraday => {
                params.push(("interval", cfg.intraday_interval.clone()));
                params.push(("outputsize", cfg.output_size.as_str().to_string()));
            }
            SeriesKind::Daily => {
                params.push(("outputsize", cfg.output_size.as_str().to_string()));
            }
            SeriesKind::Rsi => {
                params.push(("interval", cfg.rsi.interval.clone()));
                params.push(("time_period", cfg.rsi.time_period.to_string()));
                params.push(("series_type", cfg.rsi.series_type.clone()));
            }
        }
        params.push(("apikey", cfg.api_key.clone()));
        params
    }

    pub fn url(&self, symbol: &Ticker, kind: SeriesKind) -> Result<Url, DataError> {
        let params = self.params(symbol, kind);
        Url::parse_with_params(&self.config.base_url, &params)
            .map_err(|e| DataError::InvalidRequest(format!("bad base_url '{}': {e}", self.config.base_url)))
    }

    /// The URL with the API key masked, for logs and error messages.
    pub fn redacted_url(&self, symbol: &Ticker, kind: SeriesKind) -> String {
        let params: Vec<(&str, String)> = self
            .params(symbol, kind)
            .into_iter()
            .map(|(k, v)| if k == "apikey" { (k, "***".to_string()) } else { (k, v) })
            .collect();
        match Url::parse_with_params(&self.config.base_url, &params) {
            Ok(url) => url.to_string(),
            Err(_) => self.config.base_url.clone(),
        }
    }
}
