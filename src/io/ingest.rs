//! Tabular ingest and normalization.
//!
//! This module turns a header-less spreadsheet export of daily Treasury
//! yields into a clean, date-sorted [`TimeSeries`] that is safe to chart.
//!
//! Design goals:
//! - **Positional schema**: column semantics are assigned once, here, and the
//!   rest of the code only ever sees named fields
//! - **Row-level filtering**: rows without a parseable date are dropped
//!   (the source sheet has stray header/footer rows), but a retained row with
//!   a bad yield cell is an error, never a silent skip
//! - **Deterministic behavior**: output is sorted ascending by date and
//!   duplicate dates are rejected
//! - **Separation of concerns**: no statistics or navigation logic here

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Observation, TimeSeries};
use crate::error::SeriesError;

/// Positional column layout of the source sheet.
///
/// The export carries no header row; the first cell is a weekday label and
/// the yield columns arrive in the (historical) order 10Y, 2Y, 5Y, 30Y.
const COL_DATE: usize = 1;
const COL_10Y: usize = 2;
const COL_2Y: usize = 3;
const COL_5Y: usize = 4;
const COL_30Y: usize = 5;

/// Minimum cells per usable row (label + date + four yields).
const MIN_COLS: usize = 6;

/// Date formats the sheet has been seen to use.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y"];

/// Load and normalize raw rows of cells into a [`TimeSeries`].
///
/// This is the abstract entry point: any tabular reader (CSV, a spreadsheet
/// library, a test fixture) can produce `rows`. Rows whose date cell fails to
/// parse are dropped; everything else must validate.
pub fn load_rows(rows: &[Vec<String>]) -> Result<TimeSeries, SeriesError> {
    let mut observations = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        // 1-based for messages, matching how people count sheet rows.
        let line = idx + 1;

        // Rows too short to even hold a date cell are spacer rows; anything
        // with a parseable date is a data row and must validate in full.
        let Some(date) = row.get(COL_DATE).and_then(|cell| parse_date(cell)) else {
            continue;
        };

        if row.len() < MIN_COLS {
            return Err(SeriesError::Load(format!(
                "row {line}: dated row has {} cells, expected at least {MIN_COLS}",
                row.len()
            )));
        }

        let observation = Observation {
            date,
            y2: parse_yield(&row[COL_2Y], "2Y", line)?,
            y5: parse_yield(&row[COL_5Y], "5Y", line)?,
            y10: parse_yield(&row[COL_10Y], "10Y", line)?,
            y30: parse_yield(&row[COL_30Y], "30Y", line)?,
        };
        observations.push(observation);
    }

    if observations.is_empty() {
        return Err(SeriesError::Load(
            "no rows with a parseable date remain in the source".to_string(),
        ));
    }

    observations.sort_by_key(|o| o.date);

    if let Some(w) = observations.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(SeriesError::Load(format!(
            "duplicate observation date {} in the source",
            w[0].date
        )));
    }

    Ok(TimeSeries::from_observations(observations))
}

/// Load a CSV export from disk and feed it through [`load_rows`].
pub fn load_csv(path: &Path) -> Result<TimeSeries, SeriesError> {
    let file = File::open(path)
        .map_err(|e| SeriesError::Load(format!("failed to open '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SeriesError::Load(format!("CSV parse error: {e}")))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    load_rows(&rows)
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            // Spreadsheet exports sometimes carry a datetime with a T separator.
            chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn parse_yield(cell: &str, tenor_label: &str, line: usize) -> Result<f64, SeriesError> {
    let trimmed = cell.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        SeriesError::Load(format!(
            "row {line}: non-numeric {tenor_label} value '{trimmed}'"
        ))
    })?;
    if !value.is_finite() {
        return Err(SeriesError::Load(format!(
            "row {line}: non-finite {tenor_label} value '{trimmed}'"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_and_sorts_positional_rows() {
        // Columns: label, date, 10Y, 2Y, 5Y, 30Y. Deliberately out of date order.
        let rows = vec![
            row(&["Tue", "2024-01-03", "4.4", "4.1", "4.3", "4.6"]),
            row(&["Mon", "2024-01-02", "4.3", "4.0", "4.2", "4.5"]),
        ];
        let series = load_rows(&rows).unwrap();
        assert_eq!(series.len(), 2);

        let first = &series.observations()[0];
        assert_eq!(first.date, date(2024, 1, 2));
        assert_eq!(first.y2, 4.0);
        assert_eq!(first.y5, 4.2);
        assert_eq!(first.y10, 4.3);
        assert_eq!(first.y30, 4.5);
        assert!(series.observations()[0].date < series.observations()[1].date);
    }

    #[test]
    fn drops_rows_without_a_parseable_date() {
        let rows = vec![
            row(&["", "US Yields", "", "", "", ""]),
            row(&["Mon", "2024-01-02", "4.3", "4.0", "4.2", "4.5"]),
            row(&["", "", "", "", "", ""]),
        ];
        let series = load_rows(&rows).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn fails_when_no_rows_remain() {
        let rows = vec![row(&["", "not a date", "1", "2", "3", "4"])];
        let err = load_rows(&rows).unwrap_err();
        assert!(matches!(err, SeriesError::Load(_)));
    }

    #[test]
    fn fails_on_truncated_dated_row() {
        let rows = vec![
            row(&["Mon", "2024-01-02", "4.3", "4.0", "4.2"]),
            row(&["Tue", "2024-01-03", "4.4", "4.1", "4.3", "4.6"]),
        ];
        let err = load_rows(&rows).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 1"), "unexpected message: {msg}");
    }

    #[test]
    fn fails_on_non_numeric_yield_in_retained_row() {
        let rows = vec![row(&["Mon", "2024-01-02", "4.3", "n/a", "4.2", "4.5"])];
        let err = load_rows(&rows).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2Y"), "unexpected message: {msg}");
    }

    #[test]
    fn fails_on_non_finite_yield() {
        let rows = vec![row(&["Mon", "2024-01-02", "4.3", "4.0", "inf", "4.5"])];
        assert!(load_rows(&rows).is_err());
    }

    #[test]
    fn fails_on_duplicate_dates() {
        let rows = vec![
            row(&["Mon", "2024-01-02", "4.3", "4.0", "4.2", "4.5"]),
            row(&["Mon", "2024-01-02", "4.4", "4.1", "4.3", "4.6"]),
        ];
        let err = load_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn accepts_alternate_date_formats() {
        let rows = vec![
            row(&["Mon", "01/02/2024", "4.3", "4.0", "4.2", "4.5"]),
            row(&["Tue", "2024-01-03 00:00:00", "4.4", "4.1", "4.3", "4.6"]),
        ];
        let series = load_rows(&rows).unwrap();
        assert_eq!(series.min_date().unwrap(), date(2024, 1, 2));
        assert_eq!(series.max_date().unwrap(), date(2024, 1, 3));
    }
}
