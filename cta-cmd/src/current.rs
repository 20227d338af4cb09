//! Live temperature check against the seasonal profile.

use cta_analysis::profile::{classify_current, current_season, seasonal_profile, Classification};
use cta_owm::current::{default_client, fetch_current_temperature};
use cta_records::ingest::records_from_path;
use cta_records::record::series_by_city;
use cta_records::season::name_of;
use log::info;
use std::path::Path;

/// Fetch the live temperature for a city and classify it against the
/// seasonal profile built from the history CSV.
///
/// The reference season is the season of the last historical record for
/// the city, not today's date.
pub async fn run_current(history_csv: &str, city: &str, api_key: &str) -> anyhow::Result<()> {
    let records = records_from_path(Path::new(history_csv))?;
    info!("loaded {} records from {}", records.len(), history_csv);
    let series = series_by_city(records);
    let records = series
        .get(city)
        .ok_or_else(|| anyhow::anyhow!("no records for city {city:?} in {history_csv}"))?;

    let client = default_client()?;
    let current_temp = fetch_current_temperature(&client, city, api_key).await?;
    println!("current temperature in {city}: {current_temp:.2} C");

    let season = current_season(records)
        .ok_or_else(|| anyhow::anyhow!("no records for city {city:?}"))?;
    let profile = seasonal_profile(records);
    let stats = profile.get(&season).ok_or_else(|| {
        anyhow::anyhow!(
            "no historical records for season {} in {city:?}",
            name_of(season)
        )
    })?;

    match classify_current(stats, current_temp) {
        Classification::Normal => {
            println!("temperature in {city} is normal for {}", name_of(season));
        }
        Classification::Anomalous => {
            println!("temperature in {city} is anomalous for {}", name_of(season));
        }
    }
    Ok(())
}
