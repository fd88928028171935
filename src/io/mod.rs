//! Input/output helpers.
//!
//! - tabular ingest + validation (`ingest`)
//! - stats/series exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
