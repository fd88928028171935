//! Domain model for the yield dashboard.

pub mod types;

pub use types::*;
