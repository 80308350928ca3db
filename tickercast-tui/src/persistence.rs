//! App state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tickercast_core::Ticker;

use crate::app::{AppState, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_ticker: Option<String>,
    pub help_dismissed: bool,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_ticker: app.last_ticker.as_ref().map(|t| t.to_string()),
        help_dismissed: app.overlay != Overlay::Help,
    }
}

/// Apply persisted state to AppState. First run opens the help overlay.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(ticker) = state.last_ticker.as_deref().and_then(|t| Ticker::parse(t).ok()) {
        app.ticker_input = ticker.to_string();
    }
    if !state.help_dismissed {
        app.overlay = Overlay::Help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickercast").join("state.json");

        let state = PersistedState {
            last_ticker: Some("MSFT".into()),
            help_dismissed: true,
        };
        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.last_ticker.as_deref(), Some("MSFT"));
        assert!(loaded.help_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.last_ticker.is_none());
        assert!(!loaded.help_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.last_ticker.is_none());
    }

    #[test]
    fn apply_restores_input_and_first_run_help() {
        let (mut app, _rx, _tx) = test_app();
        apply(
            &mut app,
            PersistedState {
                last_ticker: Some("ibm".into()),
                help_dismissed: false,
            },
        );
        assert_eq!(app.ticker_input, "IBM");
        assert_eq!(app.overlay, Overlay::Help);
    }

    #[test]
    fn extract_takes_last_graphed_ticker() {
        let (mut app, _rx, _tx) = test_app();
        app.ticker_input = "aapl".into();
        app.request_graph();
        let state = extract(&app);
        assert_eq!(state.last_ticker.as_deref(), Some("AAPL"));
        assert!(state.help_dismissed);
    }
}
