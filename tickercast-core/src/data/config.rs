//! Provider configuration: endpoint, key and indicator parameters.
//!
//! Passed explicitly to the request builder. Loaded from the `[provider]`
//! table of the app's TOML config; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How much history the provider returns per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    /// Latest 100 data points.
    #[default]
    Compact,
    /// Full available history.
    Full,
}

impl OutputSize {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Parameters for the RSI indicator request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub interval: String,
    pub time_period: u32,
    pub series_type: String,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            interval: "daily".into(),
            time_period: 14,
            series_type: "close".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    /// Bar interval for intraday requests (`1min`, `5min`, `15min`, `30min`, `60min`).
    pub intraday_interval: String,
    pub output_size: OutputSize,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub rsi: RsiParams,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: "demo".into(),
            intraday_interval: "5min".into(),
            output_size: OutputSize::Compact,
            timeout_secs: 30,
            user_agent: concat!("tickercast/", env!("CARGO_PKG_VERSION")).into(),
            rsi: RsiParams::default(),
        }
    }
}

const INTRADAY_INTERVALS: [&str; 5] = ["1min", "5min", "15min", "30min", "60min"];

impl ProviderConfig {
    /// Load a provider config from a standalone TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a provider config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply the API key environment override, if set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.base_url is empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.api_key is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be > 0".into()));
        }
        if !INTRADAY_INTERVALS.contains(&self.intraday_interval.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "provider.intraday_interval '{}' is not one of {}",
                self.intraday_interval,
                INTRADAY_INTERVALS.join(", ")
            )));
        }
        if self.rsi.time_period < 2 {
            return Err(ConfigError::Invalid(
                "provider.rsi.time_period must be >= 2".into(),
            ));
        }
        Ok(())
    }
}
