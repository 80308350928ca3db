//! Domain types: tickers and time series.

pub mod series;
pub mod ticker;

pub use series::{Observation, SeriesKind, TimeSeries};
pub use ticker::{Ticker, TickerError};
