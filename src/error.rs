//! Error types and handling for the `SkyView` application

use crate::i18n::Translations;
use thiserror::Error;

/// Main error type for the `SkyView` application
#[derive(Error, Debug)]
pub enum SkyviewError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No usable geolocation capability on this host
    #[error("Geolocation is not supported in this environment")]
    GeolocationUnsupported,

    /// Position lookup failed (denied, timed out, or errored)
    #[error("Geolocation error: {message}")]
    Geolocation { message: String },

    /// Geocoding request failed (network error or non-success status)
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Geocoding returned no candidates for the query
    #[error("No locations found for '{query}'")]
    NoResults { query: String },

    /// Weather fetch failed (network error or non-success status)
    #[error("Weather fetch error: {message}")]
    WeatherFetch {
        status: Option<u16>,
        message: String,
    },

    /// Durable storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SkyviewError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new geolocation error
    pub fn geolocation<S: Into<String>>(message: S) -> Self {
        Self::Geolocation {
            message: message.into(),
        }
    }

    /// Create a new geocoding error
    pub fn geocoding<S: Into<String>>(message: S) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a no-results error for a search query
    pub fn no_results<S: Into<String>>(query: S) -> Self {
        Self::NoResults {
            query: query.into(),
        }
    }

    /// Create a weather fetch error, keeping the HTTP status when there is one
    pub fn weather_fetch<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::WeatherFetch {
            status,
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Get a user-facing notice in the active display language
    #[must_use]
    pub fn user_message(&self, t: &Translations) -> String {
        match self {
            SkyviewError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SkyviewError::GeolocationUnsupported => t.location_not_supported.to_string(),
            SkyviewError::Geolocation { .. } => t.location_error.to_string(),
            SkyviewError::Geocoding { .. } => t.search_error.to_string(),
            SkyviewError::WeatherFetch { .. } => t.weather_fetch_error.to_string(),
            SkyviewError::NoResults { query } => {
                format!("{query} {}", t.location_not_found)
            }
            SkyviewError::Storage { .. } => {
                "Storage operation failed. Please check file permissions.".to_string()
            }
            SkyviewError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_error_creation() {
        let geo_err = SkyviewError::geolocation("permission denied");
        assert!(matches!(geo_err, SkyviewError::Geolocation { .. }));

        let geocoding_err = SkyviewError::geocoding("status 500");
        assert!(matches!(geocoding_err, SkyviewError::Geocoding { .. }));

        let fetch_err = SkyviewError::weather_fetch(Some(502), "Bad Gateway");
        assert!(matches!(
            fetch_err,
            SkyviewError::WeatherFetch {
                status: Some(502),
                ..
            }
        ));
    }

    #[test]
    fn test_user_messages_localized() {
        let en = Translations::for_language(Language::En);
        let zh = Translations::for_language(Language::Zh);

        let err = SkyviewError::geolocation("denied");
        assert_eq!(err.user_message(en), "Location Error");
        assert_eq!(err.user_message(zh), "位置错误");

        let err = SkyviewError::geocoding("status 502");
        assert_eq!(err.user_message(en), "Search Error");
        assert_eq!(err.user_message(zh), "搜索错误");

        let err = SkyviewError::weather_fetch(None, "connection refused");
        assert_eq!(
            err.user_message(en),
            "Failed to fetch weather data. Please try again."
        );
        assert_eq!(err.user_message(zh), "获取天气数据失败。请重试。");
    }

    #[test]
    fn test_no_results_names_the_query() {
        let en = Translations::for_language(Language::En);
        let err = SkyviewError::no_results("Atlantis");
        assert_eq!(
            err.user_message(en),
            "Atlantis not found. Please try a different search term."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SkyviewError = io_err.into();
        assert!(matches!(err, SkyviewError::Io { .. }));
    }
}
