//! Overlay widgets: help and error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Key reference, also shown once on first run.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Tickercast ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Keys");
    key(&mut lines, "A-Z 0-9 .", "Type a ticker symbol");
    key(&mut lines, "Enter", "Graph intraday, daily and RSI, then forecast");
    key(&mut lines, "Backspace", "Delete the last character");
    key(&mut lines, "Ctrl+U", "Clear the input");
    key(&mut lines, "Ctrl+E", "Open error history");
    key(&mut lines, "?", "Show this help");
    key(&mut lines, "Esc / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Forecast");
    lines.push(Line::from(Span::styled(
        "  Next close from an AR(1) fit of the most recent closes.",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  Green is up, pink is down. Not investment advice.",
        theme::muted(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::neutral(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &'static str, desc: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<14}"), theme::accent()),
        Span::styled(desc, theme::text()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible = inner.height as usize;
    let start = app.error_scroll.min(app.error_history.len() - 1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(start) {
        if lines.len() >= visible {
            break;
        }
        let style = if i == start {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorCategory;
    use crate::test_helpers::test_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn help_names_forecast_colours() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_help(f, f.area())).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("pink is down"));
        assert!(!screen.contains("red is down"));
    }

    #[test]
    fn error_history_lists_messages() {
        let (mut app, _rx, _tx) = test_app();
        app.push_error(
            ErrorCategory::Network,
            "Request failed.".into(),
            "IBM Daily".into(),
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_error_history(f, f.area(), &app))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Request failed."));
        assert!(screen.contains("[NET]"));
        assert!(screen.contains("IBM Daily"));
    }
}
