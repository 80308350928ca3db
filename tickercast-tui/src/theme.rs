//! Parrot/neon theme tokens for the Tickercast TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, input, info status)
//! - **Positive**: Neon green (upward forecast)
//! - **Negative**: Hot pink (downward forecast, errors)
//! - **Warning**: Neon orange (warnings, error categories)
//! - **Neutral**: Cool purple (flat forecast, RSI bands)
//! - **Muted**: Steel blue (hints, axes, secondary text)

use ratatui::style::{Color, Modifier, Style};
use tickercast_core::Direction;
use tickercast_runner::Section;

/// Parrot/neon theme for the Tickercast TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Forecast direction colour: green up, pink down, purple flat.
    pub fn direction_color(&self, direction: Direction) -> Color {
        match direction {
            Direction::Up => self.positive,
            Direction::Down => self.negative,
            Direction::Flat => self.neutral,
        }
    }

    /// Line colour for each chart panel.
    pub fn series_color(&self, section: Section) -> Color {
        match section {
            Section::Intraday => self.accent,
            Section::Daily => self.positive,
            Section::Rsi => self.warning,
        }
    }
}

pub const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn direction(direction: Direction) -> Style {
    Style::default()
        .fg(THEME.direction_color(direction))
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
