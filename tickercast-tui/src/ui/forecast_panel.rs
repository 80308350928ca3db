//! Forecast box: predicted next price and expected return, coloured by direction.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tickercast_core::Direction;

use crate::app::ForecastState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, state: &ForecastState) {
    let border = match state {
        ForecastState::Ready(s) => theme::direction(s.direction),
        ForecastState::Unavailable(_) => theme::warning(),
        _ => theme::muted(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Forecast ")
        .title_style(theme::accent_bold());

    let lines = match state {
        ForecastState::Empty => vec![
            Line::from(""),
            Line::from(Span::styled("No forecast yet.", theme::muted())),
        ],
        ForecastState::Pending => vec![
            Line::from(""),
            Line::from(Span::styled("Calculating ...", theme::accent())),
        ],
        ForecastState::Unavailable(reason) => vec![
            Line::from(""),
            Line::from(Span::styled("Prediction unavailable", theme::warning())),
            Line::from(Span::styled(reason.as_str(), theme::muted())),
        ],
        ForecastState::Ready(s) => {
            let style = theme::direction(s.direction);
            let arrow = match s.direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Flat => "■",
            };
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("Next close  ", theme::muted()),
                    Span::styled(s.price_text.as_str(), style),
                ]),
                Line::from(vec![
                    Span::styled("Expected    ", theme::muted()),
                    Span::styled(format!("{arrow} {}", s.return_text), style),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "last {:.2} | {} | {} obs",
                        s.last_close, s.source, s.observations
                    ),
                    theme::muted(),
                )),
            ]
        }
    };

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
