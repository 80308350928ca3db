//! Ticker: a validated, upper-cased instrument symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest symbol accepted (covers exchange suffixes like `BRK-B` or `SHOP.TRT`).
pub const MAX_TICKER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("Please choose a ticker first.")]
    Empty,

    #[error("ticker '{0}' is longer than {max} characters", max = MAX_TICKER_LEN)]
    TooLong(String),

    #[error("ticker '{ticker}' contains invalid character '{ch}'")]
    InvalidCharacter { ticker: String, ch: char },
}

/// A short code identifying a publicly traded instrument.
///
/// Always trimmed and upper-cased; only ASCII alphanumerics, `.` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self, TickerError> {
        let symbol = raw.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(TickerError::Empty);
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(TickerError::TooLong(symbol));
        }
        if let Some(ch) = symbol
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(TickerError::InvalidCharacter { ticker: symbol, ch });
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
