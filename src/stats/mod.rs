//! Statistics engine: summary statistics and rolling Bollinger-style bands.
//!
//! Rolling bands use a single forward pass with running sum / sum-of-squares
//! accumulators, which matches the naive per-index window rescan within
//! floating-point tolerance at O(n) total cost. Windows are strictly
//! trailing: index `i` sees values `i - window + 1 ..= i`, never ahead.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// Default trailing window length for the moving average / bands.
pub const DEFAULT_WINDOW: usize = 20;

/// Default band half-width in standard deviations.
pub const DEFAULT_BAND_K: f64 = 2.0;

/// Point statistics over a value series, rounded to 3 decimal places for
/// display (the dashboard quotes yields to bp precision).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator).
    pub std_dev: f64,
    /// Mean of |x - mean(x)|.
    pub mean_abs_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// One rolling-band output point. `bands` is `None` for the first
/// `window - 1` indexes, where the trailing window is not yet full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub date: NaiveDate,
    pub bands: Option<Bands>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub moving_average: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Compute summary statistics for a non-empty series.
pub fn summary_stats(values: &[f64]) -> Result<SummaryStats, SeriesError> {
    if values.is_empty() {
        return Err(SeriesError::EmptySeries);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let std_dev = if values.len() < 2 {
        0.0
    } else {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    };

    let mean_abs_dev = values.iter().map(|v| (v - mean).abs()).sum::<f64>() / n;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }

    Ok(SummaryStats {
        mean: round3(mean),
        std_dev: round3(std_dev),
        mean_abs_dev: round3(mean_abs_dev),
        min: round3(min),
        max: round3(max),
    })
}

/// Compute the trailing moving average and mean +/- k*sigma bands.
///
/// Output has one [`BandPoint`] per input point, in order; the first
/// `window - 1` points carry no band values.
pub fn rolling_bands(
    points: &[(NaiveDate, f64)],
    window: usize,
    k: f64,
) -> Result<Vec<BandPoint>, SeriesError> {
    assert!(window >= 1, "rolling window must be >= 1");
    if points.is_empty() {
        return Err(SeriesError::EmptySeries);
    }

    let mut out = Vec::with_capacity(points.len());
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for (i, &(date, value)) in points.iter().enumerate() {
        sum += value;
        sum_sq += value * value;

        if i >= window {
            let (_, leaving) = points[i - window];
            sum -= leaving;
            sum_sq -= leaving * leaving;
        }

        if i + 1 < window {
            out.push(BandPoint { date, bands: None });
            continue;
        }

        let n = window as f64;
        let moving_average = sum / n;
        let std_dev = if window < 2 {
            0.0
        } else {
            // Sample variance; clamp tiny negative values from float cancellation.
            let variance = ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0);
            variance.sqrt()
        };
        let width = k * std_dev;

        out.push(BandPoint {
            date,
            bands: Some(Bands {
                moving_average,
                upper: moving_average + width,
                lower: moving_average - width,
            }),
        });
    }

    Ok(out)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn dated(values: &[f64]) -> Vec<(NaiveDate, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (date(i as u32 + 1), v))
            .collect()
    }

    #[test]
    fn summary_of_constant_series() {
        let stats = summary_stats(&[4.2; 5]).unwrap();
        assert_eq!(stats.mean, 4.2);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean_abs_dev, 0.0);
        assert_eq!(stats.min, 4.2);
        assert_eq!(stats.max, 4.2);
    }

    #[test]
    fn summary_uses_sample_std_dev() {
        // Values 1..=5: mean 3, sample variance 2.5, std dev ~1.581.
        let stats = summary_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.std_dev, 1.581);
        assert_eq!(stats.mean_abs_dev, 1.2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn summary_rejects_empty_series() {
        assert_eq!(summary_stats(&[]).unwrap_err(), SeriesError::EmptySeries);
    }

    #[test]
    fn single_value_summary_has_zero_dispersion() {
        let stats = summary_stats(&[2.5]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean_abs_dev, 0.0);
    }

    #[test]
    fn bands_undefined_before_window_fills() {
        let points = dated(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bands = rolling_bands(&points, 3, 2.0).unwrap();
        assert_eq!(bands.len(), 5);
        assert!(bands[0].bands.is_none());
        assert!(bands[1].bands.is_none());
        assert!(bands[2].bands.is_some());
    }

    #[test]
    fn window_longer_than_series_yields_no_bands() {
        let points = dated(&[4.0, 4.1, 4.2]);
        let bands = rolling_bands(&points, 5, 2.0).unwrap();
        assert_eq!(bands.len(), points.len());
        for (point, band) in points.iter().zip(&bands) {
            assert_eq!(band.date, point.0);
            assert!(band.bands.is_none());
        }
    }

    #[test]
    fn window_one_degenerates_to_series_with_zero_width() {
        let points = dated(&[1.5, 2.5, 3.5]);
        let bands = rolling_bands(&points, 1, 2.0).unwrap();
        for (point, band) in points.iter().zip(&bands) {
            let b = band.bands.expect("window=1 defines every index");
            assert!((b.moving_average - point.1).abs() < 1e-12);
            assert!((b.upper - point.1).abs() < 1e-12);
            assert!((b.lower - point.1).abs() < 1e-12);
        }
    }

    #[test]
    fn bands_match_naive_trailing_window() {
        let values = [4.0, 4.1, 3.9, 4.3, 4.2, 4.5, 4.4, 4.1];
        let points = dated(&values);
        let window = 3;
        let k = 2.0;
        let bands = rolling_bands(&points, window, k).unwrap();

        for i in (window - 1)..values.len() {
            let slice = &values[i + 1 - window..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (window as f64 - 1.0);
            let expected_width = k * variance.sqrt();

            let b = bands[i].bands.unwrap();
            assert!((b.moving_average - mean).abs() < 1e-9);
            assert!((b.upper - (mean + expected_width)).abs() < 1e-9);
            assert!((b.lower - (mean - expected_width)).abs() < 1e-9);
        }
    }

    #[test]
    fn bands_reject_empty_input() {
        assert_eq!(
            rolling_bands(&[], 20, 2.0).unwrap_err(),
            SeriesError::EmptySeries
        );
    }
}
