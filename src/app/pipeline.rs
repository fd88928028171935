//! Shared recompute pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> date-range filter -> derived series -> rolling bands -> statistics
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::NaiveDate;

use crate::combo;
use crate::data;
use crate::domain::{ComboSpec, DashConfig, DataSource, DateWindow, Tenor, TimeSeries};
use crate::error::{AppError, SeriesError};
use crate::io::ingest;
use crate::stats::{self, BandPoint, SummaryStats};

/// The loaded table plus the resolved windows and per-maturity statistics.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Full (unfiltered) observation table.
    pub full: TimeSeries,
    /// Table restricted to the chart window.
    pub filtered: TimeSeries,
    pub chart_window: DateWindow,
    pub stats_window: DateWindow,
    /// Summary stats per maturity over the stats window.
    pub maturity_stats: Vec<(Tenor, SummaryStats)>,
}

/// One derived series prepared for display: values over the chart window,
/// band overlays, and summary stats over the (independent) stats window.
#[derive(Debug, Clone)]
pub struct ComboView {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub bands: Vec<BandPoint>,
    pub stats: SummaryStats,
    pub stats_n: usize,
}

/// Load the observation table from the configured source.
pub fn load_series(config: &DashConfig) -> Result<TimeSeries, AppError> {
    match config.source {
        DataSource::Csv => {
            let path = config
                .csv_path
                .as_ref()
                .ok_or_else(|| AppError::new(2, "CSV source selected but no path given."))?;
            Ok(ingest::load_csv(path)?)
        }
        DataSource::Fred => {
            let client = data::FredClient::from_env()?;
            client.fetch_history(config.end)
        }
        DataSource::Sample => data::generate_sample(config.sample_days, config.sample_seed),
    }
}

/// Execute the full pipeline: load, resolve windows, filter, summarize.
pub fn run(config: &DashConfig) -> Result<RunOutput, AppError> {
    let full = load_series(config)?;
    run_with_series(config, full)
}

/// Execute the pipeline with a pre-loaded table.
///
/// This is what the TUI uses when the user changes a window or a leg: the
/// source is loaded once and every interaction re-runs only the cheap part.
pub fn run_with_series(config: &DashConfig, full: TimeSeries) -> Result<RunOutput, AppError> {
    let (min_date, max_date) = series_bounds(&full)?;

    let chart_window = DateWindow::new(
        config.start.unwrap_or(min_date),
        config.end.unwrap_or(max_date),
    )?;
    let stats_window = DateWindow::new(
        config.stats_start.unwrap_or(chart_window.start()),
        config.stats_end.unwrap_or(chart_window.end()),
    )?;

    let filtered = full.between(chart_window.start(), chart_window.end())?;
    if filtered.is_empty() {
        return Err(SeriesError::EmptySeries.into());
    }

    let stats_series = full.between(stats_window.start(), stats_window.end())?;
    let mut maturity_stats = Vec::with_capacity(Tenor::ALL.len());
    for tenor in Tenor::ALL {
        let values: Vec<f64> = stats_series
            .observations()
            .iter()
            .map(|o| o.value(tenor))
            .collect();
        maturity_stats.push((tenor, stats::summary_stats(&values)?));
    }

    Ok(RunOutput {
        full,
        filtered,
        chart_window,
        stats_window,
        maturity_stats,
    })
}

/// Prepare one derived series for display.
///
/// `points` and `bands` cover the chart window; `stats` covers the stats
/// window. The two windows are independent by design.
pub fn combo_view(
    run: &RunOutput,
    spec: &ComboSpec,
    window: usize,
    band_k: f64,
) -> Result<ComboView, SeriesError> {
    let points = combo::compute_combo(&run.filtered, spec);
    let bands = stats::rolling_bands(&points, window, band_k)?;

    let stats_series = run
        .full
        .between(run.stats_window.start(), run.stats_window.end())?;
    let stat_values: Vec<f64> = combo::compute_combo(&stats_series, spec)
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    let stats = stats::summary_stats(&stat_values)?;

    Ok(ComboView {
        label: spec.label(),
        points,
        bands,
        stats,
        stats_n: stat_values.len(),
    })
}

fn series_bounds(series: &TimeSeries) -> Result<(NaiveDate, NaiveDate), AppError> {
    match (series.min_date(), series.max_date()) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(SeriesError::EmptySeries.into()),
    }
}
