//! Export: series as CSV, dashboard summaries as JSON.
//!
//! CSV rows are oldest-first so spreadsheets plot left to right; the file
//! always has a `timestamp,value` header.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tickercast_core::TimeSeries;

use crate::dashboard::DashboardSummary;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Render a series as CSV text.
pub fn series_csv(series: &TimeSeries) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["timestamp", "value"])?;
    for obs in series.oldest_first() {
        wtr.write_record([
            obs.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            obs.value.to_string(),
        ])?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Write a series to `path` as CSV, creating parent directories.
pub fn write_series_csv(path: &Path, series: &TimeSeries) -> Result<(), ExportError> {
    let text = series_csv(series)?;
    write_file(path, text.as_bytes())
}

/// Write a dashboard summary to `path` as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &DashboardSummary) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(summary)?;
    write_file(path, json.as_bytes())
}

/// File name used for a series inside an export directory, e.g. `IBM_daily.csv`.
pub fn series_file_name(series: &TimeSeries) -> String {
    format!(
        "{}_{}.csv",
        series.symbol,
        series.kind.label().to_ascii_lowercase()
    )
}

/// Path of the summary file for a ticker inside an export directory.
pub fn summary_path(dir: &Path, summary: &DashboardSummary) -> PathBuf {
    dir.join(format!("{}_summary.json", summary.ticker))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let mut file = fs::File::create(path).map_err(io_err(path))?;
    file.write_all(bytes).map_err(io_err(path))?;
    Ok(())
}
