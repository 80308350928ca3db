//! Top-level UI layout: input line, three chart panels, forecast box, status bar.
//!
//! ```text
//! ┌ Ticker ─────────────────────────────────────┐
//! ├ Intraday ──────────────┬ Daily ─────────────┤
//! ├ RSI ───────────────────┼ Forecast ──────────┤
//! └ status ─────────────────────────────────────┘
//! ```

pub mod chart_panel;
pub mod forecast_panel;
pub mod input_bar;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use tickercast_runner::Section;

use crate::app::{AppState, Overlay};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    input_bar::render(f, chunks[0], app);
    draw_panels(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, chunks[1]),
        Overlay::ErrorHistory => overlays::render_error_history(f, chunks[1], app),
        Overlay::None => {}
    }
}

fn draw_panels(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    chart_panel::render(f, top[0], Section::Intraday, app.section(Section::Intraday));
    chart_panel::render(f, top[1], Section::Daily, app.section(Section::Daily));
    chart_panel::render(f, bottom[0], Section::Rsi, app.section(Section::Rsi));
    forecast_panel::render(f, bottom[1], &app.forecast);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
