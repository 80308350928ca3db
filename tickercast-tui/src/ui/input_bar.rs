//! Ticker input line with the Graph action.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let editable = !app.in_flight;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(editable))
        .title(" Ticker ")
        .title_style(theme::panel_title(editable));

    let action = if app.in_flight {
        Span::styled("  Graphing ...", theme::muted())
    } else {
        Span::styled("  [Enter] Graph", theme::accent_bold())
    };

    let line = Line::from(vec![
        Span::styled("> ", theme::accent()),
        Span::styled(app.ticker_input.as_str(), theme::text()),
        Span::styled("_", theme::accent()),
        action,
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}
