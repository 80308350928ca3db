//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! `apply_event` folds each dashboard event into the panel it belongs to.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use tickercast_core::data::DataError;
use tickercast_core::{Ticker, TickerError, TimeSeries};
use tickercast_runner::{DashboardEvent, ForecastSummary, Section, REQUEST_FAILED_MESSAGE};

use crate::worker::WorkerCommand;

const MAX_ERRORS: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_data_error(err: &DataError) -> Self {
        match err.category() {
            "network" => ErrorCategory::Network,
            "data" => ErrorCategory::Data,
            _ => ErrorCategory::Other,
        }
    }
}

/// What one chart panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState {
    Empty,
    Loading,
    Ready(TimeSeries),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastState {
    Empty,
    Pending,
    Ready(ForecastSummary),
    Unavailable(String),
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Input
    pub ticker_input: String,
    /// Ticker of the most recent Graph action.
    pub last_ticker: Option<Ticker>,
    /// True from Graph until `Finished`; Graph is disabled meanwhile.
    pub in_flight: bool,

    // Panels, indexed by `Section::index`
    pub sections: [SectionState; 3],
    pub forecast: ForecastState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<DashboardEvent>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<DashboardEvent>) -> Self {
        Self {
            running: true,
            ticker_input: String::new(),
            last_ticker: None,
            in_flight: false,
            sections: [SectionState::Empty, SectionState::Empty, SectionState::Empty],
            forecast: ForecastState::Empty,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn section(&self, section: Section) -> &SectionState {
        &self.sections[section.index()]
    }

    fn set_section(&mut self, section: Section, state: SectionState) {
        self.sections[section.index()] = state;
    }

    /// The Graph action: validate the input and hand the ticker to the worker.
    pub fn request_graph(&mut self) {
        if self.in_flight {
            self.set_warning("Graphing ...");
            return;
        }
        let ticker = match Ticker::parse(&self.ticker_input) {
            Ok(t) => t,
            Err(e @ TickerError::Empty) => {
                self.push_error(ErrorCategory::Input, e.to_string(), String::new());
                return;
            }
            Err(e) => {
                let input = self.ticker_input.clone();
                self.push_error(ErrorCategory::Input, e.to_string(), input);
                return;
            }
        };

        if self
            .worker_tx
            .send(WorkerCommand::Graph {
                ticker: ticker.clone(),
            })
            .is_err()
        {
            self.push_error(
                ErrorCategory::Other,
                "background worker is not running".into(),
                ticker.to_string(),
            );
            return;
        }

        self.ticker_input = ticker.to_string();
        self.last_ticker = Some(ticker);
        self.in_flight = true;
        self.sections = [SectionState::Loading, SectionState::Loading, SectionState::Loading];
        self.forecast = ForecastState::Pending;
        self.set_status("Graphing ...");
    }

    /// Fold one dashboard event into the state.
    pub fn apply_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SectionStarted { section } => {
                self.set_section(section, SectionState::Loading);
            }
            DashboardEvent::SeriesReady { section, series } => {
                self.set_section(section, SectionState::Ready(series));
            }
            DashboardEvent::SectionFailed { section, error } => {
                self.set_section(section, SectionState::Failed(error.to_string()));
                let ticker = self
                    .last_ticker
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                self.push_error(
                    ErrorCategory::from_data_error(&error),
                    REQUEST_FAILED_MESSAGE.into(),
                    format!("{ticker} {section}: {error}"),
                );
            }
            DashboardEvent::ForecastReady(summary) => {
                self.forecast = ForecastState::Ready(summary);
            }
            DashboardEvent::ForecastUnavailable { reason } => {
                self.forecast = ForecastState::Unavailable(reason);
            }
            DashboardEvent::Finished(summary) => {
                self.in_flight = false;
                if summary.all_succeeded() {
                    self.set_status(format!(
                        "{} graphed in {} ms",
                        summary.ticker, summary.elapsed_ms
                    ));
                }
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERRORS {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
