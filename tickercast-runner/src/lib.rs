//! Tickercast Runner: dashboard orchestration, app config, export.
//!
//! This crate builds on `tickercast-core` to provide:
//! - The three-section dashboard run with event reporting through a sink
//! - Display-ready forecast summaries
//! - The TOML application config shared by the CLI and TUI
//! - CSV and JSON export

pub mod config;
pub mod dashboard;
pub mod export;

pub use config::{AppConfig, ForecastSettings, ForecastSource, DEFAULT_CONFIG_FILE};
pub use dashboard::{
    forecast_series, run_dashboard, ChannelSink, DashboardEvent, DashboardOptions, DashboardSink,
    DashboardSummary, ForecastSummary, Section, SectionOutcome, REQUEST_FAILED_MESSAGE,
};
pub use export::{write_series_csv, write_summary_json, ExportError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn events_cross_threads() {
        assert_send::<DashboardEvent>();
        assert_send::<DashboardSummary>();
        assert_sync::<DashboardSummary>();
    }

    #[test]
    fn sinks_are_shareable() {
        assert_send::<ChannelSink>();
        assert_sync::<ChannelSink>();
    }
}
