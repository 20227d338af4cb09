//! Current temperature fetch from the OpenWeatherMap API.
//!
//! One GET per call, no caching and no retry; failures are surfaced to
//! the caller with the provider's own message where one exists.

use log::info;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// OpenWeatherMap current-weather endpoint.
const CURRENT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Offset between Kelvin and Celsius.
const KELVIN_OFFSET: f64 = 273.15;

/// Timeout imposed on every current-weather request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching the current temperature.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network failure or timeout while reaching the provider.
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success response; carries the provider's message verbatim.
    #[error("weather service error: {0}")]
    RemoteService(String),
    /// Success response without the expected temperature field.
    #[error("malformed weather response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    main: MainReading,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    /// Temperature in Kelvin.
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build a reqwest client with the timeout used for weather fetches.
pub fn default_client() -> Result<Client, WeatherError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Convert a Kelvin reading to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Interpret a current-weather response body for the given status code.
///
/// Success bodies must carry `main.temp` in Kelvin. Failure bodies may
/// carry a `message` field, which is passed through unchanged; a generic
/// message mentioning the status is used when it is absent.
pub fn temperature_from_response(status: StatusCode, body: &str) -> Result<f64, WeatherError> {
    if status.is_success() {
        let parsed: CurrentWeatherBody = serde_json::from_str(body)
            .map_err(|error| WeatherError::MalformedResponse(error.to_string()))?;
        Ok(kelvin_to_celsius(parsed.main.temp))
    } else {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(WeatherError::RemoteService(message))
    }
}

/// Fetch the current temperature for a city, in Celsius.
pub async fn fetch_current_temperature(
    client: &Client,
    city: &str,
    api_key: &str,
) -> Result<f64, WeatherError> {
    let url = format!("{CURRENT_WEATHER_URL}?q={city}&appid={api_key}");
    info!("fetching current weather for {city}");
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    temperature_from_response(status, &body)
}
