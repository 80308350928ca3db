//! Tickercast CLI: forecast, fetch, dashboard and config commands.
//!
//! Commands:
//! - `forecast`: fetch the source series and print the next-value forecast
//! - `fetch`: fetch one series, print it, optionally save it as CSV
//! - `dashboard`: run all three series fetches and the forecast
//! - `config init`: write a default `tickercast.toml`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tickercast_core::data::{AlphaVantageProvider, SeriesProvider};
use tickercast_core::{SeriesKind, Ticker, TimeSeries};
use tickercast_runner::export::{series_file_name, summary_path};
use tickercast_runner::{
    forecast_series, run_dashboard, write_series_csv, write_summary_json, AppConfig,
    DashboardEvent, DashboardOptions, ForecastSource, ForecastSummary, DEFAULT_CONFIG_FILE,
    REQUEST_FAILED_MESSAGE,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "tickercast",
    version,
    about = "Tickercast: stock series from Alpha Vantage with a one-step AR(1) forecast"
)]
struct Cli {
    /// Config file. Defaults to ./tickercast.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log requests and section progress to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the source series and print the forecast for the next value.
    Forecast {
        /// Ticker symbol (e.g., IBM).
        ticker: Option<String>,

        /// Series the forecaster reads. Defaults to the config's forecast.source.
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Most recent observations to use. Defaults to the config's forecast.window.
        #[arg(long)]
        window: Option<usize>,
    },
    /// Fetch one series and print it oldest-first.
    Fetch {
        /// Ticker symbol (e.g., IBM).
        ticker: Option<String>,

        /// Which series to fetch.
        #[arg(long, value_enum)]
        series: SeriesArg,

        /// Also write the series as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Keep only the N most recent observations.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fetch intraday, daily and RSI series and forecast the next price.
    Dashboard {
        /// Ticker symbol (e.g., IBM).
        ticker: Option<String>,

        /// Write each series as CSV plus a JSON summary into this directory.
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config.
    Init {
        /// Target path. Defaults to ./tickercast.toml.
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Daily,
    Intraday,
}

impl From<SourceArg> for ForecastSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Daily => ForecastSource::Daily,
            SourceArg::Intraday => ForecastSource::Intraday,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesArg {
    Intraday,
    Daily,
    Rsi,
}

impl From<SeriesArg> for SeriesKind {
    fn from(arg: SeriesArg) -> Self {
        match arg {
            SeriesArg::Intraday => SeriesKind::Intraday,
            SeriesArg::Daily => SeriesKind::Daily,
            SeriesArg::Rsi => SeriesKind::Rsi,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .compact()
        .init();

    if let Commands::Config {
        action: ConfigAction::Init { path, force },
    } = &cli.command
    {
        return run_config_init(path.as_deref(), *force);
    }

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Forecast {
            ticker,
            source,
            window,
        } => run_forecast(&config, ticker.as_deref(), source, window),
        Commands::Fetch {
            ticker,
            series,
            csv,
            limit,
        } => run_fetch(&config, ticker.as_deref(), series.into(), csv, limit),
        Commands::Dashboard { ticker, export_dir } => {
            run_dashboard_cmd(&config, ticker.as_deref(), export_dir)
        }
        Commands::Config { .. } => Ok(()),
    }
}

fn parse_ticker(raw: Option<&str>) -> Result<Ticker> {
    Ok(Ticker::parse(raw.unwrap_or(""))?)
}

fn build_provider(config: &AppConfig) -> Result<AlphaVantageProvider> {
    Ok(AlphaVantageProvider::new(config.provider.clone())?)
}

fn fetch_or_exit(provider: &dyn SeriesProvider, ticker: &Ticker, kind: SeriesKind) -> TimeSeries {
    match provider.fetch(ticker, kind) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("{REQUEST_FAILED_MESSAGE}");
            eprintln!("Cause: {e}");
            std::process::exit(1);
        }
    }
}

fn run_forecast(
    config: &AppConfig,
    raw_ticker: Option<&str>,
    source: Option<SourceArg>,
    window: Option<usize>,
) -> Result<()> {
    let ticker = parse_ticker(raw_ticker)?;
    let source = source.map(ForecastSource::from).unwrap_or(config.forecast.source);
    let window = window.unwrap_or(config.forecast.window);
    if window < 2 {
        bail!("--window must be at least 2");
    }

    let provider = build_provider(config)?;
    let series = fetch_or_exit(&provider, &ticker, source.kind());

    println!();
    println!("=== {} forecast ({} series) ===", ticker, source);
    if let Some(latest) = series.latest() {
        println!("Last close:     {:.2} ({})", latest.value, latest.timestamp);
    }
    match forecast_series(&series, window) {
        Ok(f) => print_forecast(&ForecastSummary::from_forecast(source, &f)),
        Err(e) => println!("prediction unavailable: {e}"),
    }
    Ok(())
}

fn print_forecast(summary: &ForecastSummary) {
    println!("Next price:     {}", summary.price_text);
    println!("Expected:       {}", summary.return_text);
    println!(
        "Fit:            y = {:.4} + {:.4}·x over {} observations",
        summary.intercept, summary.slope, summary.observations
    );
}

fn run_fetch(
    config: &AppConfig,
    raw_ticker: Option<&str>,
    kind: SeriesKind,
    csv: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let ticker = parse_ticker(raw_ticker)?;
    let provider = build_provider(config)?;
    let mut series = fetch_or_exit(&provider, &ticker, kind);
    if let Some(n) = limit {
        series.truncate(n);
    }

    println!("{} {} ({} observations)", series.symbol, kind, series.len());
    for obs in series.oldest_first() {
        println!("{}  {:>10.4}", obs.timestamp, obs.value);
    }

    if let Some(path) = csv {
        write_series_csv(&path, &series)?;
        println!("CSV saved to: {}", path.display());
    }
    Ok(())
}

fn run_dashboard_cmd(
    config: &AppConfig,
    raw_ticker: Option<&str>,
    export_dir: Option<PathBuf>,
) -> Result<()> {
    let ticker = parse_ticker(raw_ticker)?;
    let provider = build_provider(config)?;
    let options = DashboardOptions::from(&config.forecast);

    let collected: Mutex<Vec<TimeSeries>> = Mutex::new(Vec::new());
    let sink = |event: DashboardEvent| match event {
        DashboardEvent::SectionStarted { .. } | DashboardEvent::Finished(_) => {}
        DashboardEvent::SeriesReady { section, series } => {
            match series.latest() {
                Some(latest) => println!(
                    "[{section}] {} points, latest {:.2} at {}",
                    series.len(),
                    latest.value,
                    latest.timestamp
                ),
                None => println!("[{section}] no points"),
            }
            if let Ok(mut all) = collected.lock() {
                all.push(series);
            }
        }
        DashboardEvent::SectionFailed { section, error } => {
            println!("[{section}] failed: {error}");
        }
        DashboardEvent::ForecastReady(summary) => {
            println!(
                "[Forecast] next {} {} ({} series)",
                summary.price_text, summary.return_text, summary.source
            );
        }
        DashboardEvent::ForecastUnavailable { reason } => {
            println!("[Forecast] prediction unavailable: {reason}");
        }
    };

    let summary = run_dashboard(&provider, &ticker, &options, &sink);
    println!(
        "Finished in {} ms ({} of {} sections ok)",
        summary.elapsed_ms,
        summary.sections.iter().filter(|s| s.succeeded()).count(),
        summary.sections.len()
    );

    if let Some(dir) = export_dir {
        let series = collected.into_inner().unwrap_or_default();
        for s in &series {
            write_series_csv(&dir.join(series_file_name(s)), s)?;
        }
        write_summary_json(&summary_path(&dir, &summary), &summary)?;
        println!("Exported {} series to: {}", series.len(), dir.display());
    }

    if !summary.all_succeeded() {
        eprintln!("{REQUEST_FAILED_MESSAGE}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_config_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let text = AppConfig::default().to_toml()?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Config written to: {}", path.display());
    Ok(())
}
