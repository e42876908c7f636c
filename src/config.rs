//! Configuration management for the `SkyView` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SkyviewError;
use crate::i18n::Language;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `SkyView` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyviewConfig {
    /// Remote endpoint configuration
    pub api: ApiConfig,
    /// Application settings
    pub app: AppConfig,
}

/// Remote endpoint configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// IP geolocation endpoint; set empty to disable geolocation
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default display language
    #[serde(default)]
    pub language: Language,
    /// Override for the saved-locations data directory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// Default value functions
fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl Default for SkyviewConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                forecast_url: default_forecast_url(),
                geocoding_url: default_geocoding_url(),
                geolocation_url: default_geolocation_url(),
                timeout_seconds: default_timeout(),
            },
            app: AppConfig {
                language: Language::default(),
                data_dir: None,
            },
        }
    }
}

impl SkyviewConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SKYVIEW_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SKYVIEW")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkyviewConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skyview").join("config.toml"))
    }

    /// Directory holding the saved-locations documents
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.app.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("skyview"))
            .ok_or_else(|| SkyviewError::config("Unable to determine data directory").into())
    }

    /// Apply default values to missing configuration fields
    ///
    /// An empty geolocation URL is deliberate (geolocation disabled)
    /// and is left alone.
    pub fn apply_defaults(&mut self) {
        if self.api.forecast_url.is_empty() {
            self.api.forecast_url = default_forecast_url();
        }
        if self.api.geocoding_url.is_empty() {
            self.api.geocoding_url = default_geocoding_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(SkyviewError::config("Request timeout cannot exceed 300 seconds").into());
        }
        Ok(())
    }

    /// Validate endpoint URLs
    fn validate_urls(&self) -> Result<()> {
        for (label, url) in [
            ("forecast", &self.api.forecast_url),
            ("geocoding", &self.api.geocoding_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SkyviewError::config(format!(
                    "The {label} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if !self.api.geolocation_url.is_empty()
            && !self.api.geolocation_url.starts_with("http://")
            && !self.api.geolocation_url.starts_with("https://")
        {
            return Err(SkyviewError::config(
                "The geolocation URL must be a valid HTTP or HTTPS URL, or empty to disable",
            )
            .into());
        }

        Ok(())
    }
}
