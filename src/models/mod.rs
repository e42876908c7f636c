//! Data models for the SkyView application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and cached location records
//! - Weather: The current-conditions snapshot
//! - Forecast: The hourly forecast series and its windowing helpers
//! - `open_meteo`: wire-format response structures

pub mod forecast;
pub mod location;
pub mod open_meteo;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{ForecastPoint, ForecastSeries};
pub use location::{Coordinates, LocationRecord};
pub use weather::WeatherSnapshot;
