//! CLI argument definitions for earnlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `report` | Full disclosure-reaction report for one ticker |
//! | `dates` | Past and next expected disclosure dates |
//! | `range` | Trailing 52-week trading range |
//! | `check` | Ticker verification and provider preflight |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Serve deterministic offline fixtures |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Reaction report over the last twelve periodic reports
//! earnlens report GOOG
//!
//! # Machine-readable disclosure dates
//! earnlens dates AAPL --format json --pretty
//!
//! # Offline smoke run without touching any provider
//! earnlens report MSFT --mock
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// earnlens - earnings-disclosure price-reaction tracker
///
/// Correlates a company's past and upcoming earnings-disclosure dates with
/// daily closing prices and reports the short-window log return around each
/// disclosure.
#[derive(Debug, Parser)]
#[command(
    name = "earnlens",
    author,
    version,
    about = "Earnings-disclosure price-reaction tracker",
    long_about = "earnlens fetches a company's past disclosure dates (SEC EDGAR), its next \
expected earnings date (Yahoo Finance), and its daily price history (Alpha Vantage), \
then reports the short-window log return around each disclosure together with \
summary statistics.\n\
\n\
Use 'earnlens <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: label-column text for the terminal (default)
    /// - json: single JSON object
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve deterministic offline fixtures instead of live feeds.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text tables for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full disclosure-reaction report for one ticker.
    ///
    /// Verifies the ticker, fetches prices and disclosure dates, aligns them,
    /// and prints the reaction table, summary statistics, and the 52-week
    /// range.
    ///
    /// # Examples
    ///
    ///   earnlens report GOOG
    ///   earnlens report AAPL --lookback 8 --format json
    Report(ReportArgs),

    /// Past and next expected disclosure dates.
    ///
    /// # Examples
    ///
    ///   earnlens dates AAPL
    ///   earnlens dates MSFT --lookback 20
    Dates(DatesArgs),

    /// Trailing 52-week trading range.
    ///
    /// # Examples
    ///
    ///   earnlens range GOOG
    Range(RangeArgs),

    /// Ticker verification and provider reachability preflight.
    ///
    /// # Examples
    ///
    ///   earnlens check AAPL
    Check(CheckArgs),
}

/// Arguments for the `report` command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Ticker symbol (e.g. GOOG).
    pub symbol: String,

    /// Number of past periodic reports to include.
    #[arg(long, default_value_t = 12)]
    pub lookback: usize,

    /// Number of daily sessions of price history to fetch.
    #[arg(long, default_value_t = 5_040)]
    pub sessions: usize,
}

/// Arguments for the `dates` command.
#[derive(Debug, Args)]
pub struct DatesArgs {
    /// Ticker symbol.
    pub symbol: String,

    /// Number of past periodic reports to include.
    #[arg(long, default_value_t = 12)]
    pub lookback: usize,
}

/// Arguments for the `range` command.
#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Ticker symbol.
    pub symbol: String,
}

/// Arguments for the `check` command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Ticker symbol.
    pub symbol: String,
}
