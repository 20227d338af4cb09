//! Offline analysis of a historical temperature CSV.

use cta_analysis::analyzer::{analyze_all, analyze_city, describe, AnalysisResult};
use cta_records::ingest::records_from_path;
use cta_records::record::{series_by_city, TemperatureRecord};
use cta_records::season::name_of;
use log::info;
use std::path::Path;

/// Analyze one city or every city in the history CSV and print tables.
pub fn run_analyze(history_csv: &str, city: Option<&str>) -> anyhow::Result<()> {
    let records = records_from_path(Path::new(history_csv))?;
    info!("loaded {} records from {}", records.len(), history_csv);
    let series = series_by_city(records);

    match city {
        Some(name) => {
            let records = series.get(name).ok_or_else(|| {
                anyhow::anyhow!("no records for city {name:?} in {history_csv}")
            })?;
            let result = analyze_city(records)?;
            print_city_report(records, &result);
        }
        None => {
            let results = analyze_all(&series);
            if results.is_empty() {
                anyhow::bail!("no city in {history_csv} has enough records to analyze");
            }
            for (name, result) in &results {
                print_city_report(&series[name], result);
            }
        }
    }
    Ok(())
}

fn print_city_report(records: &[TemperatureRecord], result: &AnalysisResult) {
    let stats = describe(records);
    println!("== {} ==", result.city);
    println!("records: {:>8}", stats.count);
    println!("mean:    {:>8.2} C", stats.mean);
    println!("std:     {:>8.2} C", stats.std);
    println!("min:     {:>8.2} C", stats.min);
    println!("max:     {:>8.2} C", stats.max);
    println!("trend:   {:>+8.4} C/step", result.trend);
    println!();
    println!("season        mean      std");
    for (season, season_stats) in &result.seasonal_profile {
        println!(
            "{:<10} {:>8.2} {:>8.2}",
            name_of(*season),
            season_stats.mean,
            season_stats.std
        );
    }
    println!();
    if result.anomalies.is_empty() {
        println!("no anomalies");
    } else {
        println!("anomalies ({}):", result.anomalies.len());
        println!("timestamp               temp  season    window mean  window std");
        for anomaly in &result.anomalies {
            println!(
                "{}  {:>7.2}  {:<8} {:>11.2} {:>11.2}",
                anomaly.record.timestamp,
                anomaly.record.temperature,
                name_of(anomaly.season),
                anomaly.rolling_mean.unwrap_or(f64::NAN),
                anomaly.rolling_std.unwrap_or(f64::NAN),
            );
        }
    }
    println!();
}
