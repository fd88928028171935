//! FRED API integration for Treasury constant-maturity yield series.
//!
//! Fetches the four DGS series, joins them on their common observation
//! dates, and produces a validated [`TimeSeries`] equivalent to loading a
//! local spreadsheet export.

use std::collections::HashMap;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{Observation, Tenor, TimeSeries};
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const OBS_LIMIT: usize = 10000;

const SERIES_2Y: &str = "DGS2";
const SERIES_5Y: &str = "DGS5";
const SERIES_10Y: &str = "DGS10";
const SERIES_30Y: &str = "DGS30";

fn series_id(tenor: Tenor) -> &'static str {
    match tenor {
        Tenor::Y2 => SERIES_2Y,
        Tenor::Y5 => SERIES_5Y,
        Tenor::Y10 => SERIES_10Y,
        Tenor::Y30 => SERIES_30Y,
    }
}

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::new(2, "Missing FRED_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch the full history of all four tenors, keeping only dates where
    /// every series has a value (FRED marks holidays with "." per series).
    pub fn fetch_history(&self, end_date: Option<NaiveDate>) -> Result<TimeSeries, AppError> {
        let mut maps: HashMap<Tenor, HashMap<NaiveDate, f64>> = HashMap::new();
        for tenor in Tenor::ALL {
            let obs = self.fetch_series(series_id(tenor), end_date)?;
            if obs.is_empty() {
                return Err(AppError::new(
                    4,
                    format!("No observations returned for series {}.", series_id(tenor)),
                ));
            }
            maps.insert(tenor, obs.into_iter().collect());
        }

        // Intersect dates across the four series.
        let mut dates: Vec<NaiveDate> = maps[&Tenor::Y2]
            .keys()
            .filter(|d| Tenor::ALL.iter().all(|t| maps[t].contains_key(d)))
            .copied()
            .collect();
        dates.sort();

        if dates.is_empty() {
            return Err(AppError::new(
                4,
                "No common observation date across DGS series.",
            ));
        }

        let observations = dates
            .into_iter()
            .map(|date| Observation {
                date,
                y2: maps[&Tenor::Y2][&date],
                y5: maps[&Tenor::Y5][&date],
                y10: maps[&Tenor::Y10][&date],
                y30: maps[&Tenor::Y30][&date],
            })
            .collect();

        Ok(TimeSeries::from_observations(observations))
    }

    fn fetch_series(
        &self,
        series_id: &str,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<(NaiveDate, f64)>, AppError> {
        let mut req = self.client.get(BASE_URL).query(&[
            ("series_id", series_id),
            ("api_key", &self.api_key),
            ("file_type", "json"),
            ("sort_order", "desc"),
            ("limit", &OBS_LIMIT.to_string()),
        ]);

        if let Some(date) = end_date {
            req = req.query(&[("observation_end", &date.to_string())]);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(4, format!("FRED request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("FRED request failed with status {}.", resp.status()),
            ));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse FRED response: {e}")))?;

        let mut out = Vec::new();
        for obs in body.observations {
            let value = match parse_value(&obs.value) {
                Some(v) => v,
                None => continue,
            };
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
                .map_err(|e| AppError::new(4, format!("Invalid FRED date '{}': {e}", obs.date)))?;
            // DGS series are quoted in percent, same unit as the dashboard.
            out.push((date, value));
        }

        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<FredObservation>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    date: String,
    value: String,
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_skipped_not_zeroed() {
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value(" 4.31 "), Some(4.31));
        assert_eq!(parse_value("nan"), None);
    }
}
