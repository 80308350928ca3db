//! Data access: provider configuration, request building, payload parsing, providers.

pub mod alpha_vantage;
pub mod config;
pub mod parse;
pub mod provider;
pub mod request;

pub use alpha_vantage::AlphaVantageProvider;
pub use config::{ConfigError, OutputSize, ProviderConfig, RsiParams, API_KEY_ENV};
pub use parse::parse_series;
pub use provider::{DataError, SeriesProvider};
pub use request::RequestBuilder;
