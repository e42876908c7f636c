//! Location resolution for free-text queries and the device position
//!
//! A search query goes store-first: a record whose display name matches
//! the query (case-insensitive, trimmed) is reused without touching the
//! geocoder. Only a miss reaches the network; one result is adopted
//! immediately, several are handed back as candidates.

use crate::Result;
use crate::api::WeatherProvider;
use crate::error::SkyviewError;
use crate::geolocate::Geolocator;
use crate::i18n::{Language, Translations};
use crate::models::LocationRecord;
use crate::store::{CURRENT_LOCATION_KEY, LocationStore};
use tracing::debug;

/// Outcome of resolving a free-text query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The query was blank; nothing happened
    Ignored,
    /// Exactly one location matched; it is already in the store
    Resolved(LocationRecord),
    /// Several locations matched; the caller must pick one
    Candidates(Vec<LocationRecord>),
}

/// Service for resolving location inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve the device position into the current-location record and
    /// persist it under the fixed store key.
    ///
    /// The record's display name is the localized "current location"
    /// label, so the store carries whatever language was active when the
    /// position was resolved.
    pub async fn resolve_current<G: Geolocator>(
        geolocator: &G,
        store: &mut LocationStore,
        language: Language,
    ) -> Result<LocationRecord> {
        let coordinates = geolocator.current_position().await?;
        debug!("Device position: {}", coordinates.format());

        let label = Translations::for_language(language).current_location;
        let record = LocationRecord::new(label.to_string(), coordinates);
        store.put(CURRENT_LOCATION_KEY, record.clone());

        Ok(record)
    }

    /// Resolve a search query, store-first, then via the geocoder.
    ///
    /// A store hit never rewrites the store. A single geocoding result
    /// is recorded under its synthesized display name before it is
    /// returned; candidate lists are not recorded until one is chosen.
    pub async fn resolve_query<P: WeatherProvider>(
        provider: &P,
        store: &mut LocationStore,
        query: &str,
        language: Language,
    ) -> Result<Resolution> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Resolution::Ignored);
        }

        if let Some(record) = store.match_query(trimmed) {
            debug!("Store hit for '{trimmed}': {}", record.name);
            return Ok(Resolution::Resolved(record.clone()));
        }

        debug!("Geocoding query: {trimmed}");
        let mut records: Vec<LocationRecord> = provider
            .geocode(trimmed, language)
            .await?
            .into_iter()
            .map(LocationRecord::from)
            .collect();

        match records.len() {
            0 => Err(SkyviewError::no_results(trimmed)),
            1 => {
                let record = records.remove(0);
                debug!("Single geocoding result for '{trimmed}': {}", record.name);
                store.put(&record.name, record.clone());
                Ok(Resolution::Resolved(record))
            }
            n => {
                debug!("{n} geocoding candidates for '{trimmed}'");
                Ok(Resolution::Candidates(records))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::models::open_meteo::{ForecastResponse, GeocodingResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct ScriptedGeocoder {
        results: Vec<GeocodingResult>,
        calls: AtomicUsize,
    }

    impl ScriptedGeocoder {
        fn new(results: Vec<GeocodingResult>) -> Self {
            Self {
                results,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl WeatherProvider for ScriptedGeocoder {
        async fn fetch_forecast(
            &self,
            _coordinates: Coordinates,
            _language: Language,
        ) -> Result<ForecastResponse> {
            unreachable!("the resolver never fetches forecasts")
        }

        async fn geocode(
            &self,
            _query: &str,
            _language: Language,
        ) -> Result<Vec<GeocodingResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    struct FixedPosition(Coordinates);

    impl Geolocator for FixedPosition {
        async fn current_position(&self) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    fn candidate(name: &str, latitude: f64, longitude: f64) -> GeocodingResult {
        GeocodingResult {
            name: name.to_string(),
            latitude,
            longitude,
            admin1: Some("Region".to_string()),
            country: Some("Country".to_string()),
        }
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        let provider = ScriptedGeocoder::new(vec![candidate("Paris", 48.85, 2.35)]);

        let resolution =
            LocationResolver::resolve_query(&provider, &mut store, "   ", Language::En)
                .await
                .unwrap();

        assert_eq!(resolution, Resolution::Ignored);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_hit_skips_geocoder() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        store.put(
            "Paris, Region, Country",
            LocationRecord::new("Paris, Region, Country".to_string(), Coordinates::new(48.85, 2.35)),
        );
        let provider = ScriptedGeocoder::new(vec![]);

        let resolution = LocationResolver::resolve_query(
            &provider,
            &mut store,
            "  paris, region, COUNTRY ",
            Language::En,
        )
        .await
        .unwrap();

        match resolution {
            Resolution::Resolved(record) => assert_eq!(record.name, "Paris, Region, Country"),
            other => panic!("expected a resolved record, got {other:?}"),
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_result_is_recorded() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        let provider = ScriptedGeocoder::new(vec![candidate("Paris", 48.85, 2.35)]);

        let resolution =
            LocationResolver::resolve_query(&provider, &mut store, "Paris", Language::En)
                .await
                .unwrap();

        let record = match resolution {
            Resolution::Resolved(record) => record,
            other => panic!("expected a resolved record, got {other:?}"),
        };
        assert_eq!(record.name, "Paris, Region, Country");
        assert_eq!(provider.calls(), 1);
        assert!(store.get("Paris, Region, Country").is_some());
    }

    #[tokio::test]
    async fn test_multiple_results_become_candidates() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        let provider = ScriptedGeocoder::new(vec![
            candidate("Springfield", 39.80, -89.64),
            candidate("Springfield", 42.10, -72.59),
            candidate("Springfield", 37.21, -93.29),
        ]);

        let resolution =
            LocationResolver::resolve_query(&provider, &mut store, "Springfield", Language::En)
                .await
                .unwrap();

        match resolution {
            Resolution::Candidates(records) => assert_eq!(records.len(), 3),
            other => panic!("expected candidates, got {other:?}"),
        }
        assert_eq!(store.entries().count(), 0);
    }

    #[tokio::test]
    async fn test_no_results_is_an_error() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        let provider = ScriptedGeocoder::new(vec![]);

        let err = LocationResolver::resolve_query(&provider, &mut store, "Atlantis", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, SkyviewError::NoResults { ref query } if query == "Atlantis"));
    }

    #[tokio::test]
    async fn test_current_location_is_localized_and_stored() {
        let dir = tempdir().unwrap();
        let mut store = LocationStore::open(dir.path().to_path_buf());
        let geolocator = FixedPosition(Coordinates::new(31.23, 121.47));

        let record = LocationResolver::resolve_current(&geolocator, &mut store, Language::Zh)
            .await
            .unwrap();

        assert_eq!(record.name, "当前位置");
        assert_eq!(record.coordinates, Coordinates::new(31.23, 121.47));
        let stored = store.get(CURRENT_LOCATION_KEY).unwrap();
        assert_eq!(stored.name, "当前位置");
    }
}
