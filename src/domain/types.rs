//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the derived-series and statistics engines
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One of the four fixed Treasury maturities tracked by the dashboard.
///
/// No other tenors are valid input to any combination operation; there is no
/// interpolation between these points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tenor {
    #[value(name = "2y")]
    Y2,
    #[value(name = "5y")]
    Y5,
    #[value(name = "10y")]
    Y10,
    #[value(name = "30y")]
    Y30,
}

impl Tenor {
    /// All tenors in curve order (short end first).
    pub const ALL: [Tenor; 4] = [Tenor::Y2, Tenor::Y5, Tenor::Y10, Tenor::Y30];

    /// Human-readable label for terminal output and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Tenor::Y2 => "2Y",
            Tenor::Y5 => "5Y",
            Tenor::Y10 => "10Y",
            Tenor::Y30 => "30Y",
        }
    }

    /// Maturity in years, used as the x-coordinate of the curve panel.
    pub fn years(self) -> f64 {
        match self {
            Tenor::Y2 => 2.0,
            Tenor::Y5 => 5.0,
            Tenor::Y10 => 10.0,
            Tenor::Y30 => 30.0,
        }
    }
}

/// One dated yield-curve observation: a yield (in percent) per tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub y2: f64,
    pub y5: f64,
    pub y10: f64,
    pub y30: f64,
}

impl Observation {
    pub fn value(&self, tenor: Tenor) -> f64 {
        match tenor {
            Tenor::Y2 => self.y2,
            Tenor::Y5 => self.y5,
            Tenor::Y10 => self.y10,
            Tenor::Y30 => self.y30,
        }
    }

    /// The curve as `(years, yield)` points in tenor order.
    pub fn curve_points(&self) -> [(f64, f64); 4] {
        [
            (Tenor::Y2.years(), self.y2),
            (Tenor::Y5.years(), self.y5),
            (Tenor::Y10.years(), self.y10),
            (Tenor::Y30.years(), self.y30),
        ]
    }
}

/// An ordered, validated sequence of observations.
///
/// Invariants (enforced by the loader, not re-checked here):
/// - dates strictly increasing, no duplicates
/// - every yield finite
///
/// The series is immutable after construction; [`TimeSeries::between`]
/// produces a new series rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Wrap pre-validated observations. Callers (loader, data generators)
    /// must supply date-sorted, duplicate-free, finite data.
    pub(crate) fn from_observations(observations: Vec<Observation>) -> Self {
        debug_assert!(
            observations.windows(2).all(|w| w[0].date < w[1].date),
            "observations must be strictly increasing by date"
        );
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Index of the first observation on exactly `date`.
    pub fn index_of_date(&self, date: NaiveDate) -> Result<usize, SeriesError> {
        self.observations
            .iter()
            .position(|o| o.date == date)
            .ok_or(SeriesError::DateNotFound(date))
    }

    /// Yields for one tenor as `(date, value)` pairs, in series order.
    pub fn outright(&self, tenor: Tenor) -> Vec<(NaiveDate, f64)> {
        self.observations
            .iter()
            .map(|o| (o.date, o.value(tenor)))
            .collect()
    }

    /// Restrict to observations with `start <= date <= end`.
    ///
    /// Fails with [`SeriesError::InvalidRange`] when `start > end`. An empty
    /// result is legal (no observations in range); downstream statistics
    /// reject it via [`SeriesError::EmptySeries`].
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Result<TimeSeries, SeriesError> {
        let window = DateWindow::new(start, end)?;
        let observations = self
            .observations
            .iter()
            .filter(|o| window.contains(o.date))
            .copied()
            .collect();
        Ok(TimeSeries { observations })
    }
}

/// A validated `start <= end` pair of calendar dates.
///
/// Used both for the chart's active range and, independently, for the
/// statistics sub-range; the two are not required to coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which derived combination to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComboKind {
    /// A single maturity's yield series, unmodified.
    Outright,
    /// `r2 - r1`.
    Spread,
    /// `r1 + r3 - 2*r2` (r2 is the center).
    Fly,
    /// `r4 - 3*r3 + 3*r2 - r1`.
    Condor,
}

impl ComboKind {
    /// Number of distinct legs this combination requires.
    pub fn arity(self) -> usize {
        match self {
            ComboKind::Outright => 1,
            ComboKind::Spread => 2,
            ComboKind::Fly => 3,
            ComboKind::Condor => 4,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComboKind::Outright => "Outright",
            ComboKind::Spread => "Spread",
            ComboKind::Fly => "Fly",
            ComboKind::Condor => "Condor",
        }
    }
}

/// A fully specified derived series: kind + ordered legs.
///
/// Construction validates arity and leg distinctness, so a `ComboSpec` in
/// hand is always safe to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboSpec {
    kind: ComboKind,
    legs: Vec<Tenor>,
}

impl ComboSpec {
    pub fn new(kind: ComboKind, legs: Vec<Tenor>) -> Result<Self, SeriesError> {
        if legs.len() != kind.arity() {
            return Err(SeriesError::InvalidCombo(format!(
                "{} requires {} tenor(s), got {}",
                kind.display_name(),
                kind.arity(),
                legs.len()
            )));
        }
        let has_duplicate = legs
            .iter()
            .enumerate()
            .any(|(i, t)| legs[i + 1..].contains(t));
        if has_duplicate {
            return Err(SeriesError::DuplicateTenors { legs });
        }
        Ok(Self { kind, legs })
    }

    pub fn outright(tenor: Tenor) -> Self {
        Self {
            kind: ComboKind::Outright,
            legs: vec![tenor],
        }
    }

    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    pub fn legs(&self) -> &[Tenor] {
        &self.legs
    }

    /// Render the combination in its sign convention, e.g. `10Y - 2Y` or
    /// `2Y + 10Y - 2*5Y`.
    pub fn label(&self) -> String {
        let l = |i: usize| self.legs[i].label();
        match self.kind {
            ComboKind::Outright => l(0).to_string(),
            ComboKind::Spread => format!("{} - {}", l(1), l(0)),
            ComboKind::Fly => format!("{} + {} - 2*{}", l(0), l(2), l(1)),
            ComboKind::Condor => format!("{} - 3*{} + 3*{} - {}", l(3), l(2), l(1), l(0)),
        }
    }
}

/// Where the observation table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSource {
    /// Positional spreadsheet export (CSV) — see `io::ingest`.
    Csv,
    /// FRED DGS constant-maturity series (requires `FRED_API_KEY`).
    Fred,
    /// Deterministic synthetic history (no file, no network).
    Sample,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashConfig {
    pub source: DataSource,
    pub csv_path: Option<PathBuf>,

    /// Chart window; `None` means the series' own min/max date.
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,

    /// Statistics window; falls back to the chart window when unset.
    pub stats_start: Option<NaiveDate>,
    pub stats_end: Option<NaiveDate>,

    /// Trailing window length for the moving average / bands.
    pub window: usize,
    /// Band half-width in standard deviations.
    pub band_k: f64,

    /// Synthetic sample settings (ignored for other sources).
    pub sample_days: usize,
    pub sample_seed: u64,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(d: NaiveDate, y2: f64, y5: f64, y10: f64, y30: f64) -> Observation {
        Observation {
            date: d,
            y2,
            y5,
            y10,
            y30,
        }
    }

    fn sample_series() -> TimeSeries {
        TimeSeries::from_observations(vec![
            obs(date(2024, 1, 2), 4.0, 4.2, 4.3, 4.5),
            obs(date(2024, 1, 3), 4.1, 4.3, 4.4, 4.6),
            obs(date(2024, 1, 4), 4.2, 4.4, 4.5, 4.7),
        ])
    }

    #[test]
    fn between_full_range_is_identity() {
        let series = sample_series();
        let filtered = series
            .between(series.min_date().unwrap(), series.max_date().unwrap())
            .unwrap();
        assert_eq!(filtered, series);
    }

    #[test]
    fn between_rejects_inverted_range() {
        let series = sample_series();
        let err = series
            .between(date(2024, 1, 4), date(2024, 1, 2))
            .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidRange { .. }));
    }

    #[test]
    fn between_empty_result_is_legal() {
        let series = sample_series();
        let filtered = series
            .between(date(2025, 1, 1), date(2025, 12, 31))
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn index_of_date_requires_exact_match() {
        let series = sample_series();
        assert_eq!(series.index_of_date(date(2024, 1, 3)).unwrap(), 1);
        let err = series.index_of_date(date(2024, 1, 5)).unwrap_err();
        assert_eq!(err, SeriesError::DateNotFound(date(2024, 1, 5)));
    }

    #[test]
    fn combo_spec_rejects_duplicate_legs() {
        let err = ComboSpec::new(ComboKind::Fly, vec![Tenor::Y2, Tenor::Y5, Tenor::Y5]).unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateTenors { .. }));
    }

    #[test]
    fn combo_spec_rejects_wrong_arity() {
        assert!(ComboSpec::new(ComboKind::Spread, vec![Tenor::Y2]).is_err());
        assert!(ComboSpec::new(ComboKind::Condor, vec![Tenor::Y2, Tenor::Y5, Tenor::Y10]).is_err());
    }

    #[test]
    fn labels_follow_sign_conventions() {
        let spread = ComboSpec::new(ComboKind::Spread, vec![Tenor::Y2, Tenor::Y10]).unwrap();
        assert_eq!(spread.label(), "10Y - 2Y");

        let fly = ComboSpec::new(ComboKind::Fly, vec![Tenor::Y2, Tenor::Y5, Tenor::Y10]).unwrap();
        assert_eq!(fly.label(), "2Y + 10Y - 2*5Y");

        let condor = ComboSpec::new(
            ComboKind::Condor,
            vec![Tenor::Y2, Tenor::Y5, Tenor::Y10, Tenor::Y30],
        )
        .unwrap();
        assert_eq!(condor.label(), "30Y - 3*10Y + 3*5Y - 2Y");
    }
}
