use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashMap};

/// A single historical temperature reading for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub city: String,
    pub timestamp: NaiveDateTime,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl Ord for TemperatureRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.city.cmp(&other.city))
    }
}

impl Eq for TemperatureRecord {}

impl PartialEq for TemperatureRecord {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.city == other.city
    }
}

impl PartialOrd for TemperatureRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Group records by city, sorting each city's series ascending by
/// timestamp. Analysis assumes sorted series.
pub fn series_by_city(
    records: Vec<TemperatureRecord>,
) -> HashMap<String, Vec<TemperatureRecord>> {
    let mut result: HashMap<String, Vec<TemperatureRecord>> = HashMap::new();
    for record in records {
        result.entry(record.city.clone()).or_default().push(record);
    }
    for series in result.values_mut() {
        series.sort();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{series_by_city, TemperatureRecord};
    use chrono::NaiveDate;

    fn record(city: &str, day: u32, temperature: f64) -> TemperatureRecord {
        TemperatureRecord {
            city: city.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2023, 1, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            temperature,
        }
    }

    #[test]
    fn test_series_by_city_groups_and_sorts() {
        let records = vec![
            record("Moscow", 3, -5.0),
            record("Berlin", 1, 2.0),
            record("Moscow", 1, -7.0),
            record("Moscow", 2, -6.0),
        ];
        let series = series_by_city(records);
        assert_eq!(series.len(), 2);
        let moscow = &series["Moscow"];
        assert_eq!(moscow.len(), 3);
        assert!(moscow[0].timestamp < moscow[1].timestamp);
        assert!(moscow[1].timestamp < moscow[2].timestamp);
        assert_eq!(series["Berlin"].len(), 1);
    }

    #[test]
    fn test_record_ordering_by_timestamp() {
        let earlier = record("Moscow", 1, 0.0);
        let later = record("Moscow", 2, 0.0);
        assert!(earlier < later);
    }
}
