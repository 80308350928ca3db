//! One-step AR(1) price forecast.
//!
//! Fits `y = alpha + B·x` by closed-form ordinary least squares, where each `x`
//! is an observation and `y` is the observation that immediately follows it.
//!
//! B     = Σ(x − x̄)(y − ȳ) / Σ(x − x̄)²
//! alpha = ȳ − B·x̄
//! next  = alpha + B·last
//!
//! Input is newest-first (the order the data source delivers). The caller's
//! slice is never reordered; the chronological copy is internal.
//!
//! Edge cases: fewer than two observations → `InsufficientData`; all `x`
//! identical → `DegenerateInput`. No non-finite number ever leaves this module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("insufficient data: need at least 2 observations, got {observations}")]
    InsufficientData { observations: usize },

    #[error("insufficient variance: all regressor values are identical, no prediction available")]
    DegenerateInput,

    #[error("non-finite value at position {index} of the series")]
    NonFiniteInput { index: usize },

    #[error("fit produced a non-finite value")]
    NonFiniteResult,

    #[error("last observed value is zero; percentage change is undefined")]
    ZeroBaseline,
}

/// Fitted one-lag linear model plus the prediction it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ar1Fit {
    pub slope: f64,
    pub intercept: f64,
    /// Most recent observed value.
    pub last_observed: f64,
    /// `intercept + slope · last_observed`.
    pub prediction: f64,
    /// Number of observations the fit used.
    pub observations: usize,
}

/// Sign of the expected move, used for positive/negative display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// A fit together with the implied percentage return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub fit: Ar1Fit,
    /// Unrounded `(prediction − last) / last · 100`.
    pub expected_return_pct: f64,
}

impl Forecast {
    /// Predicted price rounded to cents.
    pub fn display_price(&self) -> f64 {
        round_to(self.fit.prediction, 2)
    }

    /// Expected return rounded to one decimal place.
    pub fn display_return_pct(&self) -> f64 {
        round_to(self.expected_return_pct, 1)
    }

    pub fn direction(&self) -> Direction {
        let r = self.display_return_pct();
        if r > 0.0 {
            Direction::Up
        } else if r < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

/// Predict the value following the most recent observation.
pub fn predict_next(series: &[f64]) -> Result<f64, ForecastError> {
    fit_ar1(series).map(|fit| fit.prediction)
}

/// Fit the AR(1) model to a newest-first series.
pub fn fit_ar1(series: &[f64]) -> Result<Ar1Fit, ForecastError> {
    let n = series.len();
    if n < 2 {
        return Err(ForecastError::InsufficientData { observations: n });
    }
    if let Some(index) = series.iter().position(|v| !v.is_finite()) {
        return Err(ForecastError::NonFiniteInput { index });
    }

    let chronological: Vec<f64> = series.iter().rev().copied().collect();
    let x = &chronological[..n - 1];
    let y = &chronological[1..];

    // Exact check first: summing identical floats does not always reproduce them.
    if x.iter().all(|&v| v == x[0]) {
        return Err(ForecastError::DegenerateInput);
    }

    let avg_x = mean(x);
    let avg_y = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - avg_x;
        sxy += dx * (yi - avg_y);
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        return Err(ForecastError::DegenerateInput);
    }

    let slope = sxy / sxx;
    let intercept = avg_y - slope * avg_x;
    let last_observed = chronological[n - 1];
    let prediction = intercept + slope * last_observed;

    if !(slope.is_finite() && intercept.is_finite() && prediction.is_finite()) {
        return Err(ForecastError::NonFiniteResult);
    }

    Ok(Ar1Fit {
        slope,
        intercept,
        last_observed,
        prediction,
        observations: n,
    })
}

/// Percentage change from `last_observed` to `prediction`.
pub fn expected_return_pct(prediction: f64, last_observed: f64) -> Result<f64, ForecastError> {
    if last_observed == 0.0 {
        return Err(ForecastError::ZeroBaseline);
    }
    let pct = (prediction - last_observed) / last_observed * 100.0;
    if !pct.is_finite() {
        return Err(ForecastError::NonFiniteResult);
    }
    Ok(pct)
}

/// Fit and derive the expected return in one step.
pub fn forecast(series: &[f64]) -> Result<Forecast, ForecastError> {
    let fit = fit_ar1(series)?;
    let expected_return_pct = expected_return_pct(fit.prediction, fit.last_observed)?;
    Ok(Forecast {
        fit,
        expected_return_pct,
    })
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
