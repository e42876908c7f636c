//! HTTP client for the Open-Meteo endpoints
//!
//! One [`OpenMeteoClient`] serves both remote operations the pipeline
//! needs: the combined current/hourly/daily forecast request and the
//! free-text geocoding search. Every request is a single attempt; a
//! failure is mapped into a [`SkyviewError`] at the call site and
//! surfaced to the caller.

use crate::Result;
use crate::config::SkyviewConfig;
use crate::error::SkyviewError;
use crate::i18n::Language;
use crate::models::Coordinates;
use crate::models::open_meteo::{ForecastResponse, GeocodingResponse, GeocodingResult};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Remote weather operations, seam for the resolver and fetcher
///
/// Implemented by [`OpenMeteoClient`] for production and by in-memory
/// fakes in tests.
pub trait WeatherProvider {
    /// One forecast request: current conditions, the full hourly
    /// series, and the daily series, with server-side time zone
    /// resolution.
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        language: Language,
    ) -> Result<ForecastResponse>;

    /// Free-text location search, at most five candidates in the
    /// requested language.
    async fn geocode(&self, query: &str, language: Language) -> Result<Vec<GeocodingResult>>;
}

/// Current-conditions fields requested from the forecast endpoint
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
/// Hourly fields, identical set so snapshot and series stay comparable
const HOURLY_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
/// Daily fields; only the first sunrise/sunset entry is consumed
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

/// Maximum geocoding candidates per search
const GEOCODE_COUNT: u8 = 5;

/// HTTP client for the Open-Meteo forecast and geocoding APIs
pub struct OpenMeteoClient {
    client: reqwest::Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Create a client with the configured endpoints and timeout
    pub fn new(config: &SkyviewConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skyview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkyviewError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            forecast_url: config.api.forecast_url.clone(),
            geocoding_url: config.api.geocoding_url.clone(),
        })
    }

    fn forecast_request_url(&self, coordinates: Coordinates, language: Language) -> String {
        format!(
            "{}?latitude={}&longitude={}&current={CURRENT_FIELDS}&hourly={HOURLY_FIELDS}&daily={DAILY_FIELDS}&timezone=auto&language={}",
            self.forecast_url,
            coordinates.latitude,
            coordinates.longitude,
            language.code()
        )
    }

    fn geocode_request_url(&self, query: &str, language: Language) -> String {
        format!(
            "{}?name={}&count={GEOCODE_COUNT}&language={}",
            self.geocoding_url,
            urlencoding::encode(query),
            language.code()
        )
    }
}

impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = coordinates.latitude, lon = coordinates.longitude))]
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        language: Language,
    ) -> Result<ForecastResponse> {
        let url = self.forecast_request_url(coordinates, language);
        debug!("Forecast request URL: {url}");
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SkyviewError::weather_fetch(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Forecast request failed with status {status}: {body}");
            return Err(SkyviewError::weather_fetch(
                Some(status.as_u16()),
                format!("Weather API error: {} {body}", status.as_u16()),
            ));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response: {e}");
            SkyviewError::weather_fetch(None, "Invalid weather data received from the forecast API")
        })?;

        info!(
            "Forecast for {:.4}, {:.4} retrieved in {:.3}s",
            coordinates.latitude,
            coordinates.longitude,
            start.elapsed().as_secs_f64()
        );

        Ok(forecast)
    }

    #[instrument(skip(self), fields(query))]
    async fn geocode(&self, query: &str, language: Language) -> Result<Vec<GeocodingResult>> {
        let url = self.geocode_request_url(query, language);
        debug!("Geocoding request URL: {url}");
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SkyviewError::geocoding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Geocoding request failed with status {status}: {body}");
            return Err(SkyviewError::geocoding(format!(
                "Geocoding API error: {} {body}",
                status.as_u16()
            )));
        }

        let geocoding: GeocodingResponse = response.json().await.map_err(|e| {
            error!("Failed to parse geocoding response for '{query}': {e}");
            SkyviewError::geocoding("Invalid geocoding data received from the search API")
        })?;

        let results = geocoding.results.unwrap_or_default();
        if results.is_empty() {
            warn!("No geocoding results for '{query}'");
        } else {
            info!(
                "Found {} geocoding results for '{query}' in {:.3}s",
                results.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(results)
    }
}
