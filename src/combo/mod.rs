//! Derived series engine: outrights, spreads, flies, and condors.
//!
//! Every combination is a linear form over one observation's four yields.
//! Sign conventions (applied uniformly, including in labels):
//!
//! - Spread(t1, t2)        = t2 - t1
//! - Fly(t1, t2, t3)       = t1 + t3 - 2*t2   (t2 is the center)
//! - Condor(t1, t2, t3, t4) = t4 - 3*t3 + 3*t2 - t1
//!
//! Evaluation is pure: results are fresh `(date, value)` vectors in series
//! order, never views into mutable state.

use chrono::NaiveDate;

use crate::domain::{ComboKind, ComboSpec, Observation, Tenor, TimeSeries};
use crate::error::SeriesError;

/// Evaluate one combination on a single observation.
pub fn combo_value(observation: &Observation, spec: &ComboSpec) -> f64 {
    let v = |i: usize| observation.value(spec.legs()[i]);
    match spec.kind() {
        ComboKind::Outright => v(0),
        ComboKind::Spread => v(1) - v(0),
        ComboKind::Fly => v(0) + v(2) - 2.0 * v(1),
        ComboKind::Condor => v(3) - 3.0 * v(2) + 3.0 * v(1) - v(0),
    }
}

/// Compute a derived series over the whole table, preserving date order.
pub fn compute_combo(series: &TimeSeries, spec: &ComboSpec) -> Vec<(NaiveDate, f64)> {
    series
        .observations()
        .iter()
        .map(|o| (o.date, combo_value(o, spec)))
        .collect()
}

/// Validate raw legs and compute in one step.
///
/// Duplicate tenors are rejected here rather than degrading to an empty
/// result; the UI surfaces the error as a user-facing message.
pub fn compute(
    series: &TimeSeries,
    kind: ComboKind,
    legs: Vec<Tenor>,
) -> Result<Vec<(NaiveDate, f64)>, SeriesError> {
    let spec = ComboSpec::new(kind, legs)?;
    Ok(compute_combo(series, &spec))
}

/// Every distinct spread pair, in tenor order.
pub fn all_spreads() -> Vec<ComboSpec> {
    let mut out = Vec::new();
    for (i, &t1) in Tenor::ALL.iter().enumerate() {
        for &t2 in &Tenor::ALL[i + 1..] {
            out.push(ComboSpec::new(ComboKind::Spread, vec![t1, t2]).unwrap());
        }
    }
    out
}

/// Every distinct fly triple (ascending legs), in tenor order.
pub fn all_flies() -> Vec<ComboSpec> {
    let mut out = Vec::new();
    let all = Tenor::ALL;
    for i in 0..all.len() {
        for j in i + 1..all.len() {
            for k in j + 1..all.len() {
                out.push(ComboSpec::new(ComboKind::Fly, vec![all[i], all[j], all[k]]).unwrap());
            }
        }
    }
    out
}

/// The single distinct condor over four tenors.
pub fn all_condors() -> Vec<ComboSpec> {
    vec![ComboSpec::new(ComboKind::Condor, Tenor::ALL.to_vec()).unwrap()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> TimeSeries {
        let rows = vec![
            vec![
                "Mon".to_string(),
                "2024-01-02".to_string(),
                "4.3".to_string(),
                "4.0".to_string(),
                "4.2".to_string(),
                "4.5".to_string(),
            ],
            vec![
                "Tue".to_string(),
                "2024-01-03".to_string(),
                "4.4".to_string(),
                "4.1".to_string(),
                "4.3".to_string(),
                "4.6".to_string(),
            ],
        ];
        crate::io::ingest::load_rows(&rows).unwrap()
    }

    #[test]
    fn spread_2y_10y_scenario() {
        let series = sample_series();
        let points = compute(&series, ComboKind::Spread, vec![Tenor::Y2, Tenor::Y10]).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, date(2024, 1, 2));
        assert!((points[0].1 - 0.3).abs() < 1e-12);
        assert!((points[1].1 - 0.3).abs() < 1e-12);
    }

    #[test]
    fn spread_is_antisymmetric() {
        let series = sample_series();
        for (i, &t1) in Tenor::ALL.iter().enumerate() {
            for &t2 in &Tenor::ALL[i + 1..] {
                let fwd = compute(&series, ComboKind::Spread, vec![t1, t2]).unwrap();
                let rev = compute(&series, ComboKind::Spread, vec![t2, t1]).unwrap();
                for (a, b) in fwd.iter().zip(&rev) {
                    assert_eq!(a.0, b.0);
                    assert!((a.1 + b.1).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn fly_2y_5y_10y_scenario() {
        let series = sample_series();
        let points = compute(
            &series,
            ComboKind::Fly,
            vec![Tenor::Y2, Tenor::Y5, Tenor::Y10],
        )
        .unwrap();
        // 4.0 + 4.3 - 2*4.2 = -0.1
        assert!((points[0].1 - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn fly_is_symmetric_in_outer_legs() {
        let series = sample_series();
        let fwd = compute(
            &series,
            ComboKind::Fly,
            vec![Tenor::Y2, Tenor::Y5, Tenor::Y10],
        )
        .unwrap();
        let swapped = compute(
            &series,
            ComboKind::Fly,
            vec![Tenor::Y10, Tenor::Y5, Tenor::Y2],
        )
        .unwrap();
        for (a, b) in fwd.iter().zip(&swapped) {
            assert!((a.1 - b.1).abs() < 1e-12);
        }
    }

    #[test]
    fn condor_formula() {
        let series = sample_series();
        let points = compute(&series, ComboKind::Condor, Tenor::ALL.to_vec()).unwrap();
        // 4.5 - 3*4.3 + 3*4.2 - 4.0 = 0.2
        assert!((points[0].1 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn outright_is_identity() {
        let series = sample_series();
        let points = compute(&series, ComboKind::Outright, vec![Tenor::Y30]).unwrap();
        assert_eq!(points, series.outright(Tenor::Y30));
    }

    #[test]
    fn duplicate_legs_are_rejected_not_degraded() {
        let series = sample_series();
        let err = compute(&series, ComboKind::Spread, vec![Tenor::Y5, Tenor::Y5]).unwrap_err();
        assert!(matches!(err, SeriesError::DuplicateTenors { .. }));
    }

    #[test]
    fn enumerations_cover_all_distinct_combos() {
        assert_eq!(all_spreads().len(), 6);
        assert_eq!(all_flies().len(), 4);
        assert_eq!(all_condors().len(), 1);
    }
}
