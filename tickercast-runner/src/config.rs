//! Application configuration loaded from `tickercast.toml`.
//!
//! Two tables: `[provider]` (see `ProviderConfig`) and `[forecast]`, which
//! selects the series the forecaster reads and how much history it uses.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tickercast_core::data::{ConfigError, ProviderConfig};
use tickercast_core::SeriesKind;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tickercast.toml";

/// Which price series feeds the forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    #[default]
    Daily,
    Intraday,
}

impl ForecastSource {
    pub fn kind(self) -> SeriesKind {
        match self {
            ForecastSource::Daily => SeriesKind::Daily,
            ForecastSource::Intraday => SeriesKind::Intraday,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ForecastSource::Daily => "daily",
            ForecastSource::Intraday => "intraday",
        }
    }
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(ForecastSource::Daily),
            "intraday" => Ok(ForecastSource::Intraday),
            other => Err(format!(
                "unknown forecast source '{other}' (expected daily or intraday)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub source: ForecastSource,
    /// Most recent observations fed to the forecaster.
    pub window: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            source: ForecastSource::Daily,
            window: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub forecast: ForecastSettings,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path` if given, else `tickercast.toml` in the working directory
    /// if it exists, else defaults. The API key env override applies last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(AppConfig {
            provider: cfg.provider.with_env_overrides(),
            forecast: cfg.forecast,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()?;
        if self.forecast.window < 2 {
            return Err(ConfigError::Invalid(format!(
                "forecast.window must be >= 2, got {}",
                self.forecast.window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.forecast.source, ForecastSource::Daily);
        assert_eq!(cfg.forecast.window, 100);
    }

    #[test]
    fn nested_provider_tables() {
        let cfg = AppConfig::from_toml(
            r#"
[provider]
api_key = "K"
intraday_interval = "15min"

[provider.rsi]
time_period = 9

[forecast]
source = "intraday"
window = 50
"#,
        )
        .unwrap();
        assert_eq!(cfg.provider.api_key, "K");
        assert_eq!(cfg.provider.intraday_interval, "15min");
        assert_eq!(cfg.provider.rsi.time_period, 9);
        assert_eq!(cfg.forecast.source, ForecastSource::Intraday);
        assert_eq!(cfg.forecast.window, 50);
    }

    #[test]
    fn window_below_two_is_rejected() {
        let err = AppConfig::from_toml("[forecast]\nwindow = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("window")));
    }

    #[test]
    fn provider_validation_applies() {
        assert!(AppConfig::from_toml("[provider]\ntimeout_secs = 0").is_err());
    }

    #[test]
    fn to_toml_reloads_identically() {
        let mut cfg = AppConfig::default();
        cfg.forecast.window = 30;
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("[provider.rsi]"));
        assert_eq!(AppConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[forecast]\nwindow = 20\n").unwrap();
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.forecast.window, 20);
    }

    #[test]
    fn source_from_str() {
        assert_eq!("Daily".parse::<ForecastSource>(), Ok(ForecastSource::Daily));
        assert_eq!(ForecastSource::Intraday.kind(), SeriesKind::Intraday);
        assert!("rsi".parse::<ForecastSource>().is_err());
    }
}
