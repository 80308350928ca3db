//! Line chart for one dashboard section.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;
use tickercast_core::TimeSeries;
use tickercast_runner::Section;

use crate::app::SectionState;
use crate::theme;

/// RSI overbought/oversold bands.
const RSI_BANDS: [f64; 2] = [30.0, 70.0];

pub fn render(f: &mut Frame, area: Rect, section: Section, state: &SectionState) {
    let title = match state {
        SectionState::Ready(series) => format!(" {} {} ", series.symbol, section.title()),
        _ => format!(" {} ", section.title()),
    };
    let ready = matches!(state, SectionState::Ready(_));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(ready))
        .title(title)
        .title_style(theme::panel_title(ready));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match state {
        SectionState::Ready(series) if !series.is_empty() => {
            render_chart(f, inner, section, series)
        }
        SectionState::Ready(_) => render_message(f, inner, "No observations.", theme::muted()),
        SectionState::Empty => render_message(
            f,
            inner,
            "Type a ticker and press Enter to graph.",
            theme::muted(),
        ),
        SectionState::Loading => render_message(f, inner, "Loading ...", theme::accent()),
        SectionState::Failed(reason) => render_message(f, inner, reason, theme::negative()),
    }
}

fn render_message(f: &mut Frame, area: Rect, msg: &str, style: Style) {
    let para = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(msg, style))])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

/// Y bounds padded by 5% of the range; RSI is pinned to 0..100.
fn y_bounds(section: Section, series: &TimeSeries) -> [f64; 2] {
    if section == Section::Rsi {
        return [0.0, 100.0];
    }
    let (lo, hi) = series.value_range().unwrap_or((0.0, 1.0));
    let padding = ((hi - lo).abs() * 0.05).max(0.01);
    [lo - padding, hi + padding]
}

fn render_chart(f: &mut Frame, area: Rect, section: Section, series: &TimeSeries) {
    let points = series.oldest_first();
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, o)| (i as f64, o.value))
        .collect();
    let x_max = (data.len().saturating_sub(1) as f64).max(1.0);
    let [y_min, y_max] = y_bounds(section, series);

    let stamp_format = if section == Section::Intraday {
        "%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };
    let first = points
        .first()
        .map(|o| o.timestamp.format(stamp_format).to_string())
        .unwrap_or_default();
    let last = points
        .last()
        .map(|o| o.timestamp.format(stamp_format).to_string())
        .unwrap_or_default();

    let bands: Vec<Vec<(f64, f64)>> = if section == Section::Rsi {
        RSI_BANDS
            .iter()
            .map(|&level| vec![(0.0, level), (x_max, level)])
            .collect()
    } else {
        Vec::new()
    };

    let mut datasets = vec![Dataset::default()
        .name(section.kind().label())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::THEME.series_color(section)))
        .graph_type(GraphType::Line)
        .data(&data)];
    for band in &bands {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .style(theme::neutral())
                .graph_type(GraphType::Line)
                .data(band),
        );
    }

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
