//! Command-line parsing for the yield dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the series/statistics code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{ComboKind, Tenor};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "yc", version, about = "US Treasury yield-curve dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the yield curve for a date plus the per-maturity stats table.
    Curve(CurveArgs),
    /// Print summary statistics for a derived combination, optionally export.
    Stats(StatsArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same loading/derivation pipeline as `yc curve` and
    /// `yc stats`, but renders results in a terminal UI using Ratatui.
    Tui(DashArgs),
}

/// Options shared by every subcommand: data source, windows, band settings.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Load yields from a header-less spreadsheet export (CSV).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Fetch live DGS series from FRED (requires FRED_API_KEY).
    #[arg(long, conflicts_with = "csv")]
    pub fred: bool,

    /// Business days of synthetic history (used when neither --csv nor --fred).
    #[arg(long, default_value_t = 750)]
    pub days: usize,

    /// Random seed for synthetic history.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Chart window start (YYYY-MM-DD; default: first observation).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Chart window end (YYYY-MM-DD; default: last observation).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Statistics window start (default: chart window start).
    #[arg(long = "stats-start")]
    pub stats_start: Option<NaiveDate>,

    /// Statistics window end (default: chart window end).
    #[arg(long = "stats-end")]
    pub stats_end: Option<NaiveDate>,

    /// Trailing window length for the moving average / bands.
    #[arg(long, default_value_t = crate::stats::DEFAULT_WINDOW)]
    pub window: usize,

    /// Band half-width in standard deviations.
    #[arg(long = "band-k", default_value_t = crate::stats::DEFAULT_BAND_K)]
    pub band_k: f64,
}

/// Options for `yc curve`.
#[derive(Debug, Parser)]
pub struct CurveArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Curve date (YYYY-MM-DD; default: most recent in the chart window).
    /// Must match an observation date exactly.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Options for `yc stats`.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Which combination to compute.
    #[arg(long, value_enum, default_value_t = ComboKind::Spread)]
    pub combo: ComboKind,

    /// Combination legs in order (e.g. `--legs 2y 10y`); count must match
    /// the combination's arity and legs must be distinct.
    #[arg(long, value_enum, num_args = 1..=4, default_values_t = [Tenor::Y2, Tenor::Y10])]
    pub legs: Vec<Tenor>,

    /// Export the derived series + bands to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the summary statistics to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}
