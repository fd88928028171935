//! Export derived series and statistics to files.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts: a flat CSV for the series + bands, and a small JSON document for
//! the summary statistics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::stats::{BandPoint, SummaryStats};

/// Write a derived series with its rolling bands to CSV.
///
/// Band columns are empty for indexes where the trailing window is not yet
/// full, mirroring the "no value" contract of the statistics engine.
pub fn write_series_csv(
    path: &Path,
    label: &str,
    points: &[(NaiveDate, f64)],
    bands: &[BandPoint],
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "date,{label},ma,upper,lower")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (point, band) in points.iter().zip(bands) {
        let (ma, upper, lower) = match band.bands {
            Some(b) => (
                format!("{:.6}", b.moving_average),
                format!("{:.6}", b.upper),
                format!("{:.6}", b.lower),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writeln!(file, "{},{:.6},{ma},{upper},{lower}", point.0, point.1)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// A saved statistics file (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct StatsFile {
    pub tool: String,
    pub series: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub n: usize,
    pub stats: SummaryStats,
}

/// Write summary statistics to a JSON file.
pub fn write_stats_json(path: &Path, stats: &StatsFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create stats JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, stats)
        .map_err(|e| AppError::new(2, format!("Failed to write stats JSON: {e}")))?;
    Ok(())
}
