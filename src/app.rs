//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the observation table (CSV / FRED / synthetic)
//! - runs the filter/derive/statistics pipeline
//! - prints reports
//! - writes optional exports
//! - hands off to the TUI

use clap::Parser;

use crate::cli::{Command, CurveArgs, DashArgs, StatsArgs};
use crate::domain::{ComboSpec, DashConfig, DataSource};
use crate::error::AppError;
use crate::io::export;
use crate::report;

pub mod pipeline;

/// Entry point for the `yc` binary.
pub fn run() -> Result<(), AppError> {
    // We want `yc` and `yc -f yields.csv` to behave like `yc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Curve(args) => handle_curve(args),
        Command::Stats(args) => handle_stats(args),
        Command::Tui(args) => crate::tui::run(dash_config_from_args(&args, None, None)?),
    }
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(&args.dash, None, None)?;
    let run = pipeline::run(&config)?;

    let index = match args.date {
        Some(date) => run.filtered.index_of_date(date)?,
        None => run.filtered.len() - 1,
    };
    let observation = &run.filtered.observations()[index];
    println!("{}", report::format_curve(observation));

    let rows: Vec<(String, _)> = run
        .maturity_stats
        .iter()
        .map(|(tenor, stats)| (tenor.label().to_string(), *stats))
        .collect();
    println!("{}", report::format_stats_table(run.stats_window, &rows));

    Ok(())
}

fn handle_stats(args: StatsArgs) -> Result<(), AppError> {
    let config = dash_config_from_args(
        &args.dash,
        args.export.clone(),
        args.export_json.clone(),
    )?;
    let run = pipeline::run(&config)?;

    let spec = ComboSpec::new(args.combo, args.legs.clone())?;
    let view = pipeline::combo_view(&run, &spec, config.window, config.band_k)?;

    let rows = vec![(view.label.clone(), view.stats)];
    println!("{}", report::format_stats_table(run.stats_window, &rows));

    if let Some(path) = &config.export_csv {
        export::write_series_csv(path, &view.label, &view.points, &view.bands)?;
        println!("Wrote series CSV: {}", path.display());
    }
    if let Some(path) = &config.export_json {
        let stats_file = export::StatsFile {
            tool: "yc".to_string(),
            series: view.label.clone(),
            start: run.stats_window.start(),
            end: run.stats_window.end(),
            n: view.stats_n,
            stats: view.stats,
        };
        export::write_stats_json(path, &stats_file)?;
        println!("Wrote stats JSON: {}", path.display());
    }

    Ok(())
}

pub fn dash_config_from_args(
    args: &DashArgs,
    export_csv: Option<std::path::PathBuf>,
    export_json: Option<std::path::PathBuf>,
) -> Result<DashConfig, AppError> {
    if args.window == 0 {
        return Err(AppError::new(2, "Rolling window must be >= 1."));
    }
    if !(args.band_k.is_finite() && args.band_k >= 0.0) {
        return Err(AppError::new(2, "Band multiplier must be a non-negative number."));
    }

    let source = if args.csv.is_some() {
        DataSource::Csv
    } else if args.fred {
        DataSource::Fred
    } else {
        DataSource::Sample
    };

    Ok(DashConfig {
        source,
        csv_path: args.csv.clone(),
        start: args.start,
        end: args.end,
        stats_start: args.stats_start,
        stats_end: args.stats_end,
        window: args.window,
        band_k: args.band_k,
        sample_days: args.days,
        sample_seed: args.seed,
        export_csv,
        export_json,
    })
}

/// Rewrite argv so `yc` defaults to `yc tui`.
///
/// Rules:
/// - `yc`                      -> `yc tui`
/// - `yc -f yields.csv ...`    -> `yc tui -f yields.csv ...`
/// - `yc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "curve" | "stats" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["yc"])), argv(&["yc", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["yc", "-f", "yields.csv"])),
            argv(&["yc", "tui", "-f", "yields.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["yc", "stats", "--combo", "fly"])),
            argv(&["yc", "stats", "--combo", "fly"])
        );
        assert_eq!(rewrite_args(argv(&["yc", "--help"])), argv(&["yc", "--help"]));
    }

    #[test]
    fn zero_window_is_rejected_at_the_boundary() {
        let args = DashArgs {
            csv: None,
            fred: false,
            days: 100,
            seed: 42,
            start: None,
            end: None,
            stats_start: None,
            stats_end: None,
            window: 0,
            band_k: 2.0,
        };
        assert!(dash_config_from_args(&args, None, None).is_err());
    }
}
