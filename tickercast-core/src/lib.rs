//! Tickercast Core: domain types, forecaster, and data access.
//!
//! This crate contains everything that does not depend on a front-end:
//! - Domain types (tickers, observations, newest-first time series)
//! - The AR(1) forecaster: closed-form OLS over consecutive observations
//! - Provider configuration, request URL building, and payload parsing
//! - The `SeriesProvider` trait and its Alpha Vantage implementation

pub mod data;
pub mod domain;
pub mod forecast;

pub use domain::{Observation, SeriesKind, Ticker, TickerError, TimeSeries};
pub use forecast::{fit_ar1, forecast, predict_next, Ar1Fit, Direction, Forecast, ForecastError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the dashboard hands across threads is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Ticker>();
        require_sync::<Ticker>();
        require_send::<TimeSeries>();
        require_sync::<TimeSeries>();
        require_send::<Forecast>();
        require_sync::<Forecast>();
        require_send::<ForecastError>();
        require_sync::<ForecastError>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::ProviderConfig>();
        require_sync::<data::ProviderConfig>();
        require_send::<data::AlphaVantageProvider>();
        require_sync::<data::AlphaVantageProvider>();
    }

    /// The provider trait object must be shareable between the dashboard's tasks.
    #[test]
    fn series_provider_is_object_safe_and_shareable() {
        fn _takes_shared(_p: &(dyn data::SeriesProvider + Sync)) {}
    }
}
