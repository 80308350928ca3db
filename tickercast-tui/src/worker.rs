//! Background worker thread: dashboard runs happen here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each Graph
//! command runs one dashboard; its events go straight back through the
//! `ChannelSink` and are drained by the main loop every frame.

use std::io;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use tickercast_core::data::SeriesProvider;
use tickercast_core::Ticker;
use tickercast_runner::{run_dashboard, ChannelSink, DashboardOptions};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Graph { ticker: Ticker },
    Shutdown,
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    sink: ChannelSink,
    provider: Box<dyn SeriesProvider>,
    options: DashboardOptions,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tickercast-worker".into())
        .spawn(move || worker_loop(rx, sink, provider, options))
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    sink: ChannelSink,
    provider: Box<dyn SeriesProvider>,
    options: DashboardOptions,
) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCommand::Graph { ticker } => {
                run_dashboard(provider.as_ref(), &ticker, &options, &sink);
            }
            WorkerCommand::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;
    use tickercast_core::data::DataError;
    use tickercast_core::{SeriesKind, TimeSeries};
    use tickercast_runner::DashboardEvent;

    use crate::test_helpers::daily_series;

    struct FixedProvider;

    impl SeriesProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(&self, _symbol: &Ticker, kind: SeriesKind) -> Result<TimeSeries, DataError> {
            match kind {
                SeriesKind::Rsi => Err(DataError::Http { status: 503 }),
                _ => Ok(daily_series(&[100.0, 101.0, 102.0, 103.0])),
            }
        }
    }

    #[test]
    fn graph_runs_dashboard_until_finished() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let handle = spawn_worker(
            cmd_rx,
            ChannelSink::new(event_tx),
            Box::new(FixedProvider),
            DashboardOptions::default(),
        )
        .unwrap();

        cmd_tx
            .send(WorkerCommand::Graph {
                ticker: Ticker::parse("IBM").unwrap(),
            })
            .unwrap();

        let mut saw_failure = false;
        loop {
            match event_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
                DashboardEvent::SectionFailed { .. } => saw_failure = true,
                DashboardEvent::Finished(summary) => {
                    assert!(summary.forecast.is_some());
                    break;
                }
                _ => {}
            }
        }
        assert!(saw_failure);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn dropped_sender_stops_worker() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (event_tx, _event_rx) = mpsc::channel();
        let handle = spawn_worker(
            cmd_rx,
            ChannelSink::new(event_tx),
            Box::new(FixedProvider),
            DashboardOptions::default(),
        )
        .unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
