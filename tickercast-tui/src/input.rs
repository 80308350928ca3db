//! Keyboard input dispatch: overlays → global keys → ticker input line.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tickercast_core::domain::ticker::MAX_TICKER_LEN;

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('e') if ctrl => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('u') if ctrl => {
            app.ticker_input.clear();
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Enter => {
            app.request_graph();
            return;
        }
        _ => {}
    }

    // 3. Ticker input line.
    match key.code {
        KeyCode::Backspace => {
            app.ticker_input.pop();
        }
        KeyCode::Char(c) if !ctrl && !c.is_whitespace() => {
            if app.ticker_input.chars().count() < MAX_TICKER_LEN {
                app.ticker_input.push(c.to_ascii_uppercase());
            }
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorCategory;
    use crate::test_helpers::test_app;
    use crate::worker::WorkerCommand;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_upper_cases_and_backspace_deletes() {
        let (mut app, _rx, _tx) = test_app();
        type_str(&mut app, "msfx");
        handle_key(&mut app, press(KeyCode::Backspace));
        type_str(&mut app, "t");
        assert_eq!(app.ticker_input, "MSFT");
    }

    #[test]
    fn letter_e_is_input_not_overlay() {
        let (mut app, _rx, _tx) = test_app();
        type_str(&mut app, "e");
        assert_eq!(app.ticker_input, "E");
        assert_eq!(app.overlay, Overlay::None);
        handle_key(&mut app, ctrl('e'));
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn input_is_capped() {
        let (mut app, _rx, _tx) = test_app();
        type_str(&mut app, "ABCDEFGHIJKLMNOP");
        assert_eq!(app.ticker_input.len(), MAX_TICKER_LEN);
    }

    #[test]
    fn enter_graphs() {
        let (mut app, rx, _tx) = test_app();
        type_str(&mut app, "ibm");
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::Graph { .. })));
        assert!(app.in_flight);
    }

    #[test]
    fn enter_on_bad_ticker_records_input_error() {
        let (mut app, rx, _tx) = test_app();
        type_str(&mut app, "IB/M");
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
    }

    #[test]
    fn help_overlay_closes_on_any_key() {
        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.ticker_input.is_empty());
    }

    #[test]
    fn quit_keys() {
        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.running);

        let (mut app, _rx, _tx) = test_app();
        handle_key(&mut app, ctrl('c'));
        assert!(!app.running);
    }
}
