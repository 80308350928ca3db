//! Tickercast TUI: type a ticker, graph intraday, daily and RSI series, and
//! read the next-close forecast.
//!
//! Usage: `tickercast-tui [CONFIG]`. Without a path, `tickercast.toml` in the
//! working directory is used when present.

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use tickercast_core::data::AlphaVantageProvider;
use tickercast_runner::{AppConfig, ChannelSink, DashboardOptions};

use crate::app::AppState;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Config and provider come first so errors print on a normal terminal.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading config")?;
    let provider = AlphaVantageProvider::new(config.provider.clone())
        .context("building Alpha Vantage client")?;
    let options = DashboardOptions::from(&config.forecast);

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickercast")
        .join("state.json");
    let persisted = persistence::load(&state_path);

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(
        cmd_rx,
        ChannelSink::new(event_tx),
        Box::new(provider),
        options,
    )?;

    let mut app = AppState::new(cmd_tx.clone(), event_rx);
    persistence::apply(&mut app, persisted);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // A run in progress finishes before the worker sees Shutdown.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(event) = app.worker_rx.try_recv() {
            app.apply_event(event);
        }

        // 50ms poll, ~20 FPS
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
