//! `yield-curves` library crate.
//!
//! The binary (`yc`) is a thin wrapper around this library so that:
//!
//! - core logic (loading, derived series, statistics, navigation) is testable
//!   without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod combo;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod nav;
pub mod report;
pub mod stats;
pub mod tui;
