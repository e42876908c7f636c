//! Current-conditions snapshot model

use crate::conditions;
use crate::error::SkyviewError;
use crate::i18n::Language;
use crate::models::open_meteo::{self, ForecastResponse};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current weather reading for one location
///
/// Immutable; replaced wholesale on each fetch. Condition text and icon
/// are baked in with the language that was active at fetch time, so a
/// snapshot and the catalog it was fetched under always agree.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Display name of the location this reading describes
    pub name: String,
    /// Air temperature in °C
    pub temperature: f32,
    /// Apparent temperature in °C
    pub feels_like: f32,
    /// Relative humidity percent
    pub humidity: u8,
    /// Wind speed as reported by the provider
    pub wind_speed: f32,
    /// WMO weather code
    pub weather_code: u8,
    /// Localized condition description
    pub description: String,
    /// OpenWeatherMap-compatible icon id
    pub icon: String,
    /// Sunrise, local wall-clock time at the location (first daily entry)
    pub sunrise: Option<NaiveDateTime>,
    /// Sunset, local wall-clock time at the location (first daily entry)
    pub sunset: Option<NaiveDateTime>,
}

impl WeatherSnapshot {
    /// Build a snapshot from a forecast response's current block
    ///
    /// Sunrise and sunset come from the first entry of the daily block
    /// and stay `None` when that block is missing. A response without a
    /// current block is a fetch error.
    pub fn from_open_meteo(
        response: &ForecastResponse,
        display_name: &str,
        language: Language,
    ) -> crate::Result<Self> {
        let current = response.current.as_ref().ok_or_else(|| {
            SkyviewError::weather_fetch(None, "response contained no current conditions block")
        })?;

        let sunrise = first_daily_time(response, |daily| daily.sunrise.as_ref());
        let sunset = first_daily_time(response, |daily| daily.sunset.as_ref());

        Ok(Self {
            name: display_name.to_string(),
            temperature: current.temperature,
            feels_like: current.feels_like,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            weather_code: current.weather_code,
            description: conditions::describe(current.weather_code, language).to_string(),
            icon: conditions::icon_for(current.weather_code).to_string(),
            sunrise,
            sunset,
        })
    }
}

fn first_daily_time<F>(response: &ForecastResponse, pick: F) -> Option<NaiveDateTime>
where
    F: Fn(&open_meteo::DailyData) -> Option<&Vec<String>>,
{
    response
        .daily
        .as_ref()
        .and_then(pick)
        .and_then(|times| times.first())
        .and_then(|value| open_meteo::parse_time(value))
}
