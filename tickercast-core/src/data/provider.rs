//! Series provider trait and structured error types.
//!
//! The SeriesProvider trait abstracts over data sources so the dashboard can be
//! driven by the HTTP provider in production and by stubs in tests.

use thiserror::Error;

use crate::domain::{SeriesKind, Ticker, TimeSeries};

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from provider")]
    Http { status: u16 },

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// Short category tag for error listings.
    pub fn category(&self) -> &'static str {
        match self {
            DataError::NetworkUnreachable(_) | DataError::Http { .. } | DataError::RateLimited(_) => {
                "network"
            }
            DataError::ResponseFormatChanged(_) | DataError::SymbolNotFound { .. } => "data",
            DataError::InvalidRequest(_) | DataError::Other(_) => "other",
        }
    }
}

/// Trait for series providers.
///
/// One call is one request: no caching, no retry.
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch one series for a symbol, newest observation first.
    fn fetch(&self, symbol: &Ticker, kind: SeriesKind) -> Result<TimeSeries, DataError>;
}

impl<P: SeriesProvider + ?Sized> SeriesProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, symbol: &Ticker, kind: SeriesKind) -> Result<TimeSeries, DataError> {
        (**self).fetch(symbol, kind)
    }
}

impl<P: SeriesProvider + ?Sized> SeriesProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, symbol: &Ticker, kind: SeriesKind) -> Result<TimeSeries, DataError> {
        (**self).fetch(symbol, kind)
    }
}
