//! Location models: coordinates and cached location records

use crate::models::open_meteo::GeocodingResult;
use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90..=90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180..=180)
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a "lat, lon" string
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A resolved location as stored in the location cache
///
/// The `name` field is the canonical display name and doubles as the
/// store key. The record keeps the raw geocoding parts (`admin1`,
/// `country`) alongside the synthesized name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationRecord {
    /// Display name (synthesized for geocoding results)
    pub name: String,
    /// Geographic position
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// Administrative region, when the geocoder reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    /// Country name, when the geocoder reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl LocationRecord {
    /// Create a record with no region metadata (used for the synthetic
    /// current-location entry)
    #[must_use]
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self {
            name,
            coordinates,
            admin1: None,
            country: None,
        }
    }

    /// Synthesize the display name for a geocoding result: the place
    /// name, then the administrative region, then the country when it
    /// is present and differs from the region.
    #[must_use]
    pub fn format_display_name(
        name: &str,
        admin1: Option<&str>,
        country: Option<&str>,
    ) -> String {
        let mut formatted = name.to_string();
        if let Some(admin1) = admin1 {
            formatted.push_str(", ");
            formatted.push_str(admin1);
        }
        if let Some(country) = country {
            if admin1 != Some(country) {
                formatted.push_str(", ");
                formatted.push_str(country);
            }
        }
        formatted
    }
}

impl From<GeocodingResult> for LocationRecord {
    fn from(result: GeocodingResult) -> Self {
        let name = Self::format_display_name(
            &result.name,
            result.admin1.as_deref(),
            result.country.as_deref(),
        );
        Self {
            name,
            coordinates: Coordinates::new(result.latitude, result.longitude),
            admin1: result.admin1,
            country: result.country,
        }
    }
}
