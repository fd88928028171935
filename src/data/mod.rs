//! Data sources for the observation table.
//!
//! - `fred`: live Treasury constant-maturity yields from the FRED API
//! - `sample`: deterministic synthetic history for offline use

pub mod fred;
pub mod sample;

pub use fred::*;
pub use sample::*;
