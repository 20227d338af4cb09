//! Statistical analysis of historical city temperature series.
//!
//! This crate transforms ingested temperature records into per-city
//! analysis results: trailing-window anomaly flags, per-season
//! mean/std profiles, an OLS trend, and summary statistics.

pub mod analyzer;
pub mod profile;
pub mod rolling;
pub mod trend;

/// Number of consecutive records covered by the trailing statistics
/// window. Series shorter than this cannot be analyzed.
pub const ROLLING_WINDOW: usize = 30;
