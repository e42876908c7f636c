//! IP-based device positioning
//!
//! The app needs a position before the user has typed anything. With no
//! GPS available we ask an IP geolocation service where the machine
//! appears to be; the answer is city-level at best, which is plenty for
//! a weather forecast.

use crate::Result;
use crate::config::SkyviewConfig;
use crate::error::SkyviewError;
use crate::models::Coordinates;
use crate::models::open_meteo::IpLocationResponse;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Source of the device's current position, seam for the resolver
///
/// Implemented by [`IpApiLocator`] for production and by in-memory
/// fakes in tests.
pub trait Geolocator {
    /// Best-effort coordinates of the device.
    async fn current_position(&self) -> Result<Coordinates>;
}

/// Geolocator backed by the ip-api.com JSON endpoint
pub struct IpApiLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiLocator {
    /// Create a locator for the configured endpoint
    ///
    /// An empty endpoint is allowed; lookups will then fail with
    /// [`SkyviewError::GeolocationUnsupported`] so the caller can fall
    /// back to an explicit search.
    pub fn new(config: &SkyviewConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skyview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkyviewError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.api.geolocation_url.clone(),
        })
    }
}

impl Geolocator for IpApiLocator {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinates> {
        if self.endpoint.is_empty() {
            return Err(SkyviewError::GeolocationUnsupported);
        }

        debug!("Geolocation request URL: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SkyviewError::geolocation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkyviewError::geolocation(format!(
                "Geolocation API error: {}",
                status.as_u16()
            )));
        }

        let location: IpLocationResponse = response
            .json()
            .await
            .map_err(|e| SkyviewError::geolocation(format!("Invalid geolocation data: {e}")))?;

        if location.status != "success" {
            let message = location
                .message
                .unwrap_or_else(|| "Lookup refused by the geolocation service".to_string());
            return Err(SkyviewError::geolocation(message));
        }

        match (location.lat, location.lon) {
            (Some(lat), Some(lon)) => {
                info!("Device position resolved to {lat:.4}, {lon:.4}");
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(SkyviewError::geolocation(
                "Geolocation response carried no coordinates",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_uses_configured_endpoint() {
        let config = SkyviewConfig::default();
        let locator = IpApiLocator::new(&config).unwrap();
        assert_eq!(locator.endpoint, "http://ip-api.com/json");
    }

    #[tokio::test]
    async fn test_empty_endpoint_is_unsupported() {
        let mut config = SkyviewConfig::default();
        config.api.geolocation_url = String::new();
        let locator = IpApiLocator::new(&config).unwrap();

        let err = locator.current_position().await.unwrap_err();
        assert!(matches!(err, SkyviewError::GeolocationUnsupported));
    }
}
