//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the statistics/navigation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{DateWindow, Observation, Tenor};
use crate::stats::SummaryStats;

/// Format one date's yield curve for terminal output.
pub fn format_curve(observation: &Observation) -> String {
    let mut out = String::new();
    out.push_str(&format!("Yield curve on {}\n", observation.date));
    for tenor in Tenor::ALL {
        out.push_str(&format!(
            "  {:>3}: {:>6.3}%\n",
            tenor.label(),
            observation.value(tenor)
        ));
    }
    out
}

/// Format a labeled statistics table (one row per series).
pub fn format_stats_table(window: DateWindow, rows: &[(String, SummaryStats)]) -> String {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0)
        .max("Series".len());

    let mut out = String::new();
    out.push_str(&format!(
        "Statistics over {} .. {}\n",
        window.start(),
        window.end()
    ));
    out.push_str(&format!(
        "{:<label_width$}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}\n",
        "Series", "Mean", "StdDev", "MAD", "Min", "Max",
    ));
    for (label, s) in rows {
        out.push_str(&format!(
            "{label:<label_width$}  {:>8.3}  {:>8.3}  {:>8.3}  {:>8.3}  {:>8.3}\n",
            s.mean, s.std_dev, s.mean_abs_dev, s.min, s.max,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn curve_lists_all_four_tenors() {
        let obs = Observation {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            y2: 4.0,
            y5: 4.2,
            y10: 4.3,
            y30: 4.5,
        };
        let text = format_curve(&obs);
        for label in ["2Y", "5Y", "10Y", "30Y"] {
            assert!(text.contains(label), "missing {label} in:\n{text}");
        }
        assert!(text.contains("2024-01-02"));
    }

    #[test]
    fn stats_table_has_header_and_rows() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
        )
        .unwrap();
        let stats = SummaryStats {
            mean: 4.25,
            std_dev: 0.12,
            mean_abs_dev: 0.1,
            min: 4.0,
            max: 4.5,
        };
        let text = format_stats_table(window, &[("10Y - 2Y".to_string(), stats)]);
        assert!(text.contains("Mean"));
        assert!(text.contains("10Y - 2Y"));
        assert!(text.contains("4.250"));
    }
}
