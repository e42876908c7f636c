//! Forecast series model and normalization from the wire format

use crate::conditions;
use crate::i18n::Language;
use crate::models::open_meteo::{self, ForecastResponse};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One forecast point from the hourly series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Local wall-clock time at the location
    pub timestamp: NaiveDateTime,
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
}

/// Time-ascending forecast series covering the provider's full hourly window
///
/// The series itself is never filtered; callers pick their own window
/// with [`ForecastSeries::first_hours`] and [`ForecastSeries::sampled`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ForecastSeries {
    /// Forecast points, in provider order (time-ascending)
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Normalize the hourly block of a forecast response
    ///
    /// Values are parallel arrays indexed by the `time` array; missing
    /// slots fall back to neutral defaults, entries with unparseable
    /// timestamps are dropped. A response without an hourly block
    /// yields an empty series.
    #[must_use]
    pub fn from_open_meteo(response: &ForecastResponse, language: Language) -> Self {
        let Some(hourly) = &response.hourly else {
            return Self::default();
        };

        let points = hourly
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, time)| {
                let timestamp = open_meteo::parse_time(time)?;

                let temperature = value_at(&hourly.temperature, i).unwrap_or(0.0);
                let feels_like = value_at(&hourly.feels_like, i).unwrap_or(temperature);
                let humidity = value_at(&hourly.humidity, i).unwrap_or(0);
                let wind_speed = value_at(&hourly.wind_speed, i).unwrap_or(0.0);
                let weather_code = value_at(&hourly.weather_code, i).unwrap_or(0);

                Some(ForecastPoint {
                    timestamp,
                    temperature,
                    feels_like,
                    humidity,
                    wind_speed,
                    weather_code,
                    description: conditions::describe(weather_code, language).to_string(),
                    icon: conditions::icon_for(weather_code).to_string(),
                })
            })
            .collect();

        Self { points }
    }

    /// The leading points of the series, at most `n`
    #[must_use]
    pub fn first_hours(&self, n: usize) -> &[ForecastPoint] {
        &self.points[..n.min(self.points.len())]
    }

    /// Every `step`-th point, at most `limit` of them
    #[must_use]
    pub fn sampled(&self, step: usize, limit: usize) -> Vec<&ForecastPoint> {
        self.points.iter().step_by(step.max(1)).take(limit).collect()
    }

    /// Number of points in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn value_at<T: Copy>(values: &Option<Vec<Option<T>>>, index: usize) -> Option<T> {
    values
        .as_ref()
        .and_then(|values| values.get(index))
        .and_then(|value| *value)
}
