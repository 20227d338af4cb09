//! Seasonal aggregate statistics and live-reading classification.

use crate::rolling::{mean, sample_std};
use chrono::Datelike;
use cta_records::record::TemperatureRecord;
use cta_records::season::season_of;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate temperature statistics for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub mean: f64,
    /// Sample standard deviation; 0.0 when the season has a single record.
    pub std: f64,
}

/// Per-season aggregates keyed by season id (1-4). Seasons absent from
/// the data are omitted.
pub type SeasonalProfile = BTreeMap<u32, SeasonStats>;

/// Group records by season and compute mean and std of temperature for
/// each season present in the data.
pub fn seasonal_profile(records: &[TemperatureRecord]) -> SeasonalProfile {
    let mut by_season: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in records {
        let season = season_of(record.timestamp.month());
        by_season.entry(season).or_default().push(record.temperature);
    }
    by_season
        .into_iter()
        .map(|(season, temperatures)| {
            (
                season,
                SeasonStats {
                    mean: mean(&temperatures),
                    std: sample_std(&temperatures),
                },
            )
        })
        .collect()
}

/// Season id of the most recent record in a series, if any.
///
/// The "current" season is anchored to the last row of the loaded
/// series, not to today's date. A live reading is therefore judged
/// against the season the history ends in, even when the history is
/// stale.
pub fn current_season(records: &[TemperatureRecord]) -> Option<u32> {
    records
        .last()
        .map(|record| season_of(record.timestamp.month()))
}

/// Verdict for a live reading compared against a seasonal profile entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Normal,
    Anomalous,
}

/// Classify a live temperature against one season's profile entry.
///
/// Normal iff the reading lies strictly inside mean ± 2 std; a reading
/// exactly two standard deviations out is anomalous.
pub fn classify_current(stats: &SeasonStats, current_temp: f64) -> Classification {
    let low = stats.mean - 2.0 * stats.std;
    let high = stats.mean + 2.0 * stats.std;
    if current_temp > low && current_temp < high {
        Classification::Normal
    } else {
        Classification::Anomalous
    }
}

#[cfg(test)]
mod tests {
    use super::{
        classify_current, current_season, seasonal_profile, Classification, SeasonStats,
    };
    use chrono::NaiveDate;
    use cta_records::record::TemperatureRecord;

    fn record(year: i32, month: u32, day: u32, temperature: f64) -> TemperatureRecord {
        TemperatureRecord {
            city: "Testville".to_string(),
            timestamp: NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            temperature,
        }
    }

    #[test]
    fn test_seasonal_profile_grouping() {
        let records = vec![
            record(2023, 1, 10, -4.0),
            record(2023, 1, 20, -6.0),
            record(2023, 4, 10, 8.0),
            record(2023, 7, 10, 24.0),
            record(2023, 7, 20, 26.0),
        ];
        let profile = seasonal_profile(&records);
        // only winter, spring and summer appear
        assert_eq!(profile.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!((profile[&1].mean - (-5.0)).abs() < 1e-12);
        assert!((profile[&3].mean - 25.0).abs() < 1e-12);
        // single-record season reports zero spread
        assert_eq!(profile[&2].std, 0.0);
    }

    #[test]
    fn test_seasonal_profile_empty() {
        assert!(seasonal_profile(&[]).is_empty());
    }

    #[test]
    fn test_current_season_from_last_record() {
        let records = vec![record(2023, 1, 10, -4.0), record(2023, 10, 2, 11.0)];
        assert_eq!(current_season(&records), Some(4));
        assert_eq!(current_season(&[]), None);
    }

    #[test]
    fn test_classify_current_inside_band() {
        let stats = SeasonStats { mean: 10.0, std: 2.0 };
        assert_eq!(classify_current(&stats, 10.0), Classification::Normal);
        assert_eq!(classify_current(&stats, 13.9), Classification::Normal);
    }

    #[test]
    fn test_classify_current_bounds_are_strict() {
        let stats = SeasonStats { mean: 10.0, std: 2.0 };
        // exactly two standard deviations out is anomalous
        assert_eq!(classify_current(&stats, 14.0), Classification::Anomalous);
        assert_eq!(classify_current(&stats, 6.0), Classification::Anomalous);
        assert_eq!(classify_current(&stats, 20.0), Classification::Anomalous);
    }

    #[test]
    fn test_classify_current_zero_spread_never_normal() {
        let stats = SeasonStats { mean: 10.0, std: 0.0 };
        assert_eq!(classify_current(&stats, 10.0), Classification::Anomalous);
        assert_eq!(classify_current(&stats, 10.1), Classification::Anomalous);
    }
}
