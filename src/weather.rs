//! Weather retrieval pipeline
//!
//! One call fetches the combined forecast for a location and normalizes
//! it into the display models: the current-conditions snapshot and the
//! hourly series. Both come from the same response, so they always
//! describe the same moment.

use crate::Result;
use crate::api::WeatherProvider;
use crate::i18n::Language;
use crate::models::{Coordinates, ForecastSeries, WeatherSnapshot};
use tracing::debug;

/// Fetch and normalize the forecast for a location.
///
/// `display_name` becomes the snapshot's location name; the condition
/// description and icon are derived from the WMO code in the requested
/// language.
pub async fn fetch<P: WeatherProvider>(
    provider: &P,
    coordinates: Coordinates,
    display_name: &str,
    language: Language,
) -> Result<(WeatherSnapshot, ForecastSeries)> {
    debug!("Fetching weather for '{display_name}' at {}", coordinates.format());

    let response = provider.fetch_forecast(coordinates, language).await?;

    let snapshot = WeatherSnapshot::from_open_meteo(&response, display_name, language)?;
    let series = ForecastSeries::from_open_meteo(&response, language);

    debug!(
        "Weather for '{display_name}': {} ({} hourly points)",
        snapshot.description,
        series.len()
    );

    Ok((snapshot, series))
}
