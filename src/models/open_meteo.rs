//! Open-Meteo API response structures
//!
//! Wire formats only; normalization into the internal models lives with
//! those models. Forecast arrays are parallel and indexed by the `time`
//! array; every value slot is optional because the provider may return
//! nulls for individual hours.

use chrono::NaiveDateTime;
use serde::Deserialize;

/// Forecast response (current conditions + hourly + daily blocks)
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub current: Option<CurrentData>,
    pub hourly: Option<HourlyData>,
    pub daily: Option<DailyData>,
}

/// Current conditions block
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: f32,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: u8,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: f32,
    pub weather_code: u8,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f32,
}

/// Hourly parallel arrays
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f32>>>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Option<Vec<Option<u8>>>,
    #[serde(rename = "apparent_temperature")]
    pub feels_like: Option<Vec<Option<f32>>>,
    pub weather_code: Option<Vec<Option<u8>>>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Option<Vec<Option<f32>>>,
}

/// Daily parallel arrays (only the first sunrise/sunset entry is used)
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Option<Vec<Option<u8>>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f32>>>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Option<Vec<Option<f32>>>,
    pub sunrise: Option<Vec<String>>,
    pub sunset: Option<Vec<String>>,
}

/// Geocoding response
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingResult>>,
}

/// One geocoding candidate
#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub admin1: Option<String>,
    pub country: Option<String>,
}

/// Geolocation response from the IP lookup endpoint
#[derive(Debug, Deserialize)]
pub struct IpLocationResponse {
    pub status: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub message: Option<String>,
}

/// Parse a provider timestamp. With `timezone=auto` the API returns
/// local wall-clock times without a UTC offset ("2026-08-25T06:12"),
/// sometimes with seconds.
#[must_use]
pub fn parse_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}
