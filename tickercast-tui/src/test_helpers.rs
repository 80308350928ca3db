//! Test helpers for building app state and series without a network.

use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{NaiveDate, Utc};
use tickercast_core::{forecast, Observation, SeriesKind, Ticker, TimeSeries};
use tickercast_runner::{
    DashboardEvent, DashboardSummary, ForecastSource, ForecastSummary, Section, SectionOutcome,
};

use crate::app::AppState;
use crate::worker::WorkerCommand;

pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<DashboardEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    (AppState::new(cmd_tx, event_rx), cmd_rx, event_tx)
}

/// Daily series for IBM from oldest-first values, one day apart.
pub fn daily_series(oldest_first: &[f64]) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let observations = oldest_first
        .iter()
        .enumerate()
        .map(|(i, &value)| Observation {
            timestamp: (start + chrono::Duration::days(i as i64))
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            value,
        })
        .collect();
    TimeSeries::new(Ticker::parse("IBM").unwrap(), SeriesKind::Daily, observations)
}

/// Forecast summary for the ramp 100..=103 (next 104.00, up).
pub fn ramp_forecast() -> ForecastSummary {
    let f = forecast(&[103.0, 102.0, 101.0, 100.0]).unwrap();
    ForecastSummary::from_forecast(ForecastSource::Daily, &f)
}

pub fn summary_for(ticker: &str) -> DashboardSummary {
    DashboardSummary {
        ticker: Ticker::parse(ticker).unwrap(),
        started_at: Utc::now(),
        elapsed_ms: 42,
        sections: Section::ALL
            .iter()
            .map(|&section| SectionOutcome {
                section,
                points: 4,
                latest_value: Some(103.0),
                latest_timestamp: None,
                error: None,
            })
            .collect(),
        forecast: Some(ramp_forecast()),
        forecast_error: None,
    }
}
