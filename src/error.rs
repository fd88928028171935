//! Error types.
//!
//! Two layers:
//!
//! - [`SeriesError`] — typed, recoverable conditions raised by the core
//!   (loader, combo engine, statistics, date filter, navigation cursor).
//!   Front-ends decide how to surface these (status line, stderr, ...).
//! - [`AppError`] — the application-boundary error carrying a process exit
//!   code. Everything the binary can fail with is eventually an `AppError`.

use chrono::NaiveDate;

use crate::domain::Tenor;

/// A recoverable, typed failure from the core engines.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The tabular source produced no usable observations, or a retained row
    /// was malformed (non-numeric / non-finite yield, duplicate date).
    Load(String),
    /// A combination spec repeats a tenor (e.g., a fly with two 5Y legs).
    DuplicateTenors { legs: Vec<Tenor> },
    /// A combination spec with the wrong number of legs for its kind.
    InvalidCombo(String),
    /// A date window with `start > end`.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// Statistics requested on a zero-length series.
    EmptySeries,
    /// A date-picker lookup found no observation on that exact date.
    DateNotFound(NaiveDate),
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Load(msg) => write!(f, "load error: {msg}"),
            SeriesError::DuplicateTenors { legs } => {
                let labels: Vec<&str> = legs.iter().map(|t| t.label()).collect();
                write!(f, "duplicate tenors in combination: [{}]", labels.join(", "))
            }
            SeriesError::InvalidCombo(msg) => write!(f, "invalid combination: {msg}"),
            SeriesError::InvalidRange { start, end } => {
                write!(f, "invalid date range: start {start} is after end {end}")
            }
            SeriesError::EmptySeries => write!(f, "statistics requested on an empty series"),
            SeriesError::DateNotFound(date) => {
                write!(f, "no observation found for date {date}")
            }
        }
    }
}

impl std::error::Error for SeriesError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        // Exit codes: 2 = bad input/selection, 3 = data problem.
        let exit_code = match err {
            SeriesError::Load(_) | SeriesError::EmptySeries => 3,
            SeriesError::DuplicateTenors { .. }
            | SeriesError::InvalidCombo(_)
            | SeriesError::InvalidRange { .. }
            | SeriesError::DateNotFound(_) => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}
