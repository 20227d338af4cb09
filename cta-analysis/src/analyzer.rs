//! Per-city analysis: rolling anomalies, seasonal profile, trend and
//! summary statistics.

use crate::profile::{seasonal_profile, SeasonalProfile};
use crate::rolling::{mean, rolling_stats, sample_std};
use crate::trend::ols_slope;
use crate::ROLLING_WINDOW;
use chrono::Datelike;
use cta_records::record::TemperatureRecord;
use cta_records::season::season_of;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors that can occur during per-city analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("series has {have} records, need at least {need}")]
    InsufficientData { have: usize, need: usize },
}

/// One record enriched with its season tag and trailing-window statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    pub record: TemperatureRecord,
    pub season: u32,
    pub rolling_mean: Option<f64>,
    pub rolling_std: Option<f64>,
    pub anomalous: bool,
}

/// Full analysis output for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub city: String,
    pub average_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub seasonal_profile: SeasonalProfile,
    /// OLS slope of temperature against record index, in degrees per step.
    pub trend: f64,
    /// Flagged records in original series order.
    pub anomalies: Vec<AnalyzedRecord>,
}

/// Descriptive statistics over one city's full series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize a temperature series. Meaningful for non-empty input.
pub fn describe(records: &[TemperatureRecord]) -> DescriptiveStats {
    let temperatures: Vec<f64> = records.iter().map(|record| record.temperature).collect();
    DescriptiveStats {
        count: temperatures.len(),
        mean: mean(&temperatures),
        std: sample_std(&temperatures),
        min: temperatures.iter().copied().fold(f64::INFINITY, f64::min),
        max: temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Tag each record with its season and trailing-window statistics, and
/// flag records lying strictly outside mean ± 2 std of their window.
///
/// The first `ROLLING_WINDOW - 1` positions have no window and are
/// never flagged.
pub fn tag_records(records: &[TemperatureRecord]) -> Vec<AnalyzedRecord> {
    let temperatures: Vec<f64> = records.iter().map(|record| record.temperature).collect();
    let windows = rolling_stats(&temperatures, ROLLING_WINDOW);
    records
        .iter()
        .zip(windows)
        .map(|(record, window)| {
            let (rolling_mean, rolling_std) = match window {
                Some((window_mean, window_std)) => (Some(window_mean), Some(window_std)),
                None => (None, None),
            };
            let anomalous = match (rolling_mean, rolling_std) {
                (Some(window_mean), Some(window_std)) => {
                    record.temperature > window_mean + 2.0 * window_std
                        || record.temperature < window_mean - 2.0 * window_std
                }
                _ => false,
            };
            AnalyzedRecord {
                record: record.clone(),
                season: season_of(record.timestamp.month()),
                rolling_mean,
                rolling_std,
                anomalous,
            }
        })
        .collect()
}

/// Analyze one city's time-ordered temperature series.
///
/// The input must be sorted ascending by timestamp. Series shorter than
/// [`ROLLING_WINDOW`] (including empty ones) are rejected. Purely
/// functional over its input: the same series always yields the same
/// result.
pub fn analyze_city(records: &[TemperatureRecord]) -> Result<AnalysisResult, AnalysisError> {
    if records.len() < ROLLING_WINDOW {
        return Err(AnalysisError::InsufficientData {
            have: records.len(),
            need: ROLLING_WINDOW,
        });
    }

    let tagged = tag_records(records);
    let anomalies: Vec<AnalyzedRecord> = tagged
        .into_iter()
        .filter(|record| record.anomalous)
        .collect();

    let temperatures: Vec<f64> = records.iter().map(|record| record.temperature).collect();
    let city = records[0].city.clone();
    debug!(
        "{city}: {} anomalies in {} records",
        anomalies.len(),
        records.len()
    );

    Ok(AnalysisResult {
        city,
        average_temp: mean(&temperatures),
        min_temp: temperatures.iter().copied().fold(f64::INFINITY, f64::min),
        max_temp: temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
        seasonal_profile: seasonal_profile(records),
        trend: ols_slope(&temperatures),
        anomalies,
    })
}

/// Analyze every city in a grouped record set, skipping cities whose
/// series are too short. Cities are analyzed independently; results are
/// keyed by city name.
pub fn analyze_all(
    series: &HashMap<String, Vec<TemperatureRecord>>,
) -> BTreeMap<String, AnalysisResult> {
    let mut results = BTreeMap::new();
    for (city, records) in series {
        match analyze_city(records) {
            Ok(result) => {
                results.insert(city.clone(), result);
            }
            Err(error) => warn!("skipping {city}: {error}"),
        }
    }
    results
}
