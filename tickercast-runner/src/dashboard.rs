//! Dashboard orchestration: three independent series fetches and a forecast.
//!
//! A dashboard run fetches the intraday, daily and RSI series for one ticker.
//! Each fetch runs on its own scoped thread and reports its own outcome
//! through the sink as soon as it finishes, and a failure in one never blocks
//! or alters the others. The task whose series is the configured forecast
//! source also reports the forecast. The only join is the final `Finished`
//! event, which front-ends use to re-enable their Graph action.

use std::fmt;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tickercast_core::data::{DataError, SeriesProvider};
use tickercast_core::{forecast, Direction, Forecast, ForecastError, SeriesKind, Ticker, TimeSeries};

use crate::config::{ForecastSettings, ForecastSource};

/// Shown to the user whenever a provider request fails.
pub const REQUEST_FAILED_MESSAGE: &str = "There was an error requesting data from the Alpha Vantage service. Please check the ticker again or try again later.";

/// One chart panel of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Intraday,
    Daily,
    Rsi,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Intraday, Section::Daily, Section::Rsi];

    pub fn kind(self) -> SeriesKind {
        match self {
            Section::Intraday => SeriesKind::Intraday,
            Section::Daily => SeriesKind::Daily,
            Section::Rsi => SeriesKind::Rsi,
        }
    }

    pub fn from_kind(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Intraday => Section::Intraday,
            SeriesKind::Daily => Section::Daily,
            SeriesKind::Rsi => Section::Rsi,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Intraday => "Intraday",
            Section::Daily => "Daily",
            Section::Rsi => "RSI",
        }
    }

    /// Position in `ALL`, for front-ends that keep per-section state in arrays.
    pub fn index(self) -> usize {
        match self {
            Section::Intraday => 0,
            Section::Daily => 1,
            Section::Rsi => 2,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl From<ForecastSource> for Section {
    fn from(source: ForecastSource) -> Self {
        Section::from_kind(source.kind())
    }
}

/// Forecast ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub source: ForecastSource,
    pub last_close: f64,
    pub predicted: f64,
    /// Unrounded percentage change.
    pub expected_return_pct: f64,
    /// Predicted price with two decimals, e.g. `"104.00"`.
    pub price_text: String,
    /// Signed percentage with one decimal, e.g. `"+1.5%"`.
    pub return_text: String,
    pub direction: Direction,
    pub slope: f64,
    pub intercept: f64,
    pub observations: usize,
}

impl ForecastSummary {
    pub fn from_forecast(source: ForecastSource, forecast: &Forecast) -> Self {
        let pct = forecast.display_return_pct();
        // Avoid printing "-0.0%".
        let pct = if pct == 0.0 { 0.0 } else { pct };
        Self {
            source,
            last_close: forecast.fit.last_observed,
            predicted: forecast.fit.prediction,
            expected_return_pct: forecast.expected_return_pct,
            price_text: format!("{:.2}", forecast.display_price()),
            return_text: format!("{pct:+.1}%"),
            direction: forecast.direction(),
            slope: forecast.fit.slope,
            intercept: forecast.fit.intercept,
            observations: forecast.fit.observations,
        }
    }
}

/// Forecast the most recent `window` observations of a series.
pub fn forecast_series(series: &TimeSeries, window: usize) -> Result<Forecast, ForecastError> {
    forecast(&series.values_newest_first(Some(window)))
}

/// Progress and results reported by a dashboard run.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    SectionStarted {
        section: Section,
    },
    SeriesReady {
        section: Section,
        series: TimeSeries,
    },
    SectionFailed {
        section: Section,
        error: DataError,
    },
    ForecastReady(ForecastSummary),
    ForecastUnavailable {
        reason: String,
    },
    Finished(DashboardSummary),
}

/// Receives dashboard events. Called from worker threads, in completion order.
pub trait DashboardSink: Send + Sync {
    fn emit(&self, event: DashboardEvent);
}

impl<F> DashboardSink for F
where
    F: Fn(DashboardEvent) + Send + Sync,
{
    fn emit(&self, event: DashboardEvent) {
        self(event)
    }
}

/// Forwards events over an mpsc channel. A dropped receiver is ignored.
pub struct ChannelSink {
    tx: mpsc::Sender<DashboardEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<DashboardEvent>) -> Self {
        Self { tx }
    }
}

impl DashboardSink for ChannelSink {
    fn emit(&self, event: DashboardEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub source: ForecastSource,
    pub window: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from(&ForecastSettings::default())
    }
}

impl From<&ForecastSettings> for DashboardOptions {
    fn from(settings: &ForecastSettings) -> Self {
        Self {
            source: settings.source,
            window: settings.window,
        }
    }
}

/// Per-section result recorded in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub section: Section,
    pub points: usize,
    pub latest_value: Option<f64>,
    pub latest_timestamp: Option<chrono::NaiveDateTime>,
    pub error: Option<String>,
}

impl SectionOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub ticker: Ticker,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// Always in `Section::ALL` order.
    pub sections: Vec<SectionOutcome>,
    pub forecast: Option<ForecastSummary>,
    pub forecast_error: Option<String>,
}

impl DashboardSummary {
    pub fn all_succeeded(&self) -> bool {
        self.sections.iter().all(SectionOutcome::succeeded)
    }

    pub fn section(&self, section: Section) -> Option<&SectionOutcome> {
        self.sections.iter().find(|s| s.section == section)
    }
}

struct SectionReport {
    outcome: SectionOutcome,
    forecast: Option<Result<ForecastSummary, String>>,
}

/// Fetch all three sections for `ticker` and forecast the configured source.
///
/// Blocks until every section has reported; events reach `sink` as they happen.
pub fn run_dashboard<P>(
    provider: &P,
    ticker: &Ticker,
    options: &DashboardOptions,
    sink: &dyn DashboardSink,
) -> DashboardSummary
where
    P: SeriesProvider + ?Sized,
{
    let started_at = Utc::now();
    let clock = Instant::now();
    info!(ticker = %ticker, provider = provider.name(), "dashboard started");

    // One OS thread per section; a stalled fetch never delays the others.
    let reports: Vec<SectionReport> = thread::scope(|s| {
        let handles: Vec<_> = Section::ALL
            .iter()
            .map(|&section| {
                let handle = s.spawn(move || run_section(provider, ticker, section, options, sink));
                (section, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(section, handle)| {
                handle.join().unwrap_or_else(|_| {
                    let error = DataError::Other(format!("{section} task panicked"));
                    failed_section(ticker, section, error, options, sink)
                })
            })
            .collect()
    });

    let mut forecast = None;
    let mut forecast_error = None;
    let mut sections = Vec::with_capacity(reports.len());
    for report in reports {
        match report.forecast {
            Some(Ok(summary)) => forecast = Some(summary),
            Some(Err(reason)) => forecast_error = Some(reason),
            None => {}
        }
        sections.push(report.outcome);
    }

    let summary = DashboardSummary {
        ticker: ticker.clone(),
        started_at,
        elapsed_ms: clock.elapsed().as_millis() as u64,
        sections,
        forecast,
        forecast_error,
    };
    info!(
        ticker = %ticker,
        elapsed_ms = summary.elapsed_ms,
        ok = summary.all_succeeded(),
        "dashboard finished"
    );
    sink.emit(DashboardEvent::Finished(summary.clone()));
    summary
}

fn run_section<P>(
    provider: &P,
    ticker: &Ticker,
    section: Section,
    options: &DashboardOptions,
    sink: &dyn DashboardSink,
) -> SectionReport
where
    P: SeriesProvider + ?Sized,
{
    sink.emit(DashboardEvent::SectionStarted { section });
    let is_source = Section::from(options.source) == section;

    match provider.fetch(ticker, section.kind()) {
        Ok(series) => {
            info!(ticker = %ticker, section = %section, points = series.len(), "section ready");
            let outcome = SectionOutcome {
                section,
                points: series.len(),
                latest_value: series.latest().map(|o| o.value),
                latest_timestamp: series.latest().map(|o| o.timestamp),
                error: None,
            };
            let forecast = is_source.then(|| {
                forecast_series(&series, options.window)
                    .map(|f| ForecastSummary::from_forecast(options.source, &f))
                    .map_err(|e| e.to_string())
            });
            sink.emit(DashboardEvent::SeriesReady { section, series });
            match &forecast {
                Some(Ok(summary)) => sink.emit(DashboardEvent::ForecastReady(summary.clone())),
                Some(Err(reason)) => {
                    warn!(ticker = %ticker, "forecast unavailable: {reason}");
                    sink.emit(DashboardEvent::ForecastUnavailable {
                        reason: reason.clone(),
                    });
                }
                None => {}
            }
            SectionReport { outcome, forecast }
        }
        Err(error) => failed_section(ticker, section, error, options, sink),
    }
}

/// Report a failed section, and the forecast too when it was the source.
fn failed_section(
    ticker: &Ticker,
    section: Section,
    error: DataError,
    options: &DashboardOptions,
    sink: &dyn DashboardSink,
) -> SectionReport {
    warn!(ticker = %ticker, section = %section, category = error.category(), "section failed: {error}");
    let message = error.to_string();
    sink.emit(DashboardEvent::SectionFailed { section, error });
    let forecast = (Section::from(options.source) == section).then(|| {
        let reason = format!("{section} series unavailable: {message}");
        sink.emit(DashboardEvent::ForecastUnavailable {
            reason: reason.clone(),
        });
        Err(reason)
    });
    SectionReport {
        outcome: SectionOutcome {
            section,
            points: 0,
            latest_value: None,
            latest_timestamp: None,
            error: Some(message),
        },
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickercast_core::Ar1Fit;

    fn fc(last: f64, prediction: f64) -> Forecast {
        Forecast {
            fit: Ar1Fit {
                slope: 1.0,
                intercept: prediction - last,
                last_observed: last,
                prediction,
                observations: 4,
            },
            expected_return_pct: (prediction - last) / last * 100.0,
        }
    }

    #[test]
    fn summary_text_up() {
        let s = ForecastSummary::from_forecast(ForecastSource::Daily, &fc(100.0, 101.5));
        assert_eq!(s.price_text, "101.50");
        assert_eq!(s.return_text, "+1.5%");
        assert_eq!(s.direction, Direction::Up);
    }

    #[test]
    fn summary_text_down() {
        let s = ForecastSummary::from_forecast(ForecastSource::Daily, &fc(200.0, 197.0));
        assert_eq!(s.price_text, "197.00");
        assert_eq!(s.return_text, "-1.5%");
        assert_eq!(s.direction, Direction::Down);
    }

    #[test]
    fn tiny_negative_move_prints_unsigned_zero() {
        let s = ForecastSummary::from_forecast(ForecastSource::Daily, &fc(100.0, 99.99));
        assert_eq!(s.return_text, "+0.0%");
        assert_eq!(s.direction, Direction::Flat);
    }

    #[test]
    fn section_mapping() {
        assert_eq!(Section::from(ForecastSource::Daily), Section::Daily);
        assert_eq!(Section::from(ForecastSource::Intraday), Section::Intraday);
        for (i, s) in Section::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Section::from_kind(s.kind()), *s);
        }
    }

    #[test]
    fn channel_sink_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ChannelSink::new(tx).emit(DashboardEvent::ForecastUnavailable {
            reason: "x".into(),
        });
    }
}
