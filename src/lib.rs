//! `SkyView` - Client-side weather lookup for the terminal
//!
//! This library provides the core functionality for resolving locations
//! (free-text search, saved names, or the device's IP position), fetching
//! Open-Meteo forecasts, and presenting them in English or Chinese.

pub mod api;
pub mod app;
pub mod conditions;
pub mod config;
pub mod error;
pub mod geolocate;
pub mod i18n;
pub mod models;
pub mod resolver;
pub mod store;
pub mod weather;

// Re-export core types for public API
pub use api::{OpenMeteoClient, WeatherProvider};
pub use app::{Notice, SearchOutcome, ViewState, WeatherApp};
pub use config::SkyviewConfig;
pub use error::SkyviewError;
pub use geolocate::{Geolocator, IpApiLocator};
pub use i18n::{Language, Translations};
pub use models::{Coordinates, ForecastPoint, ForecastSeries, LocationRecord, WeatherSnapshot};
pub use resolver::{LocationResolver, Resolution};
pub use store::LocationStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkyviewError>;
