//! Application controller
//!
//! Owns the view state and drives the resolver and fetch pipeline. All
//! failures are converted into localized notices here; nothing below the
//! controller surfaces raw errors to the user, and a failure never
//! clears previously displayed weather.

use crate::api::WeatherProvider;
use crate::error::SkyviewError;
use crate::geolocate::Geolocator;
use crate::i18n::{Language, Translations};
use crate::models::{Coordinates, ForecastSeries, LocationRecord, WeatherSnapshot};
use crate::resolver::{LocationResolver, Resolution};
use crate::store::LocationStore;
use crate::weather;
use tracing::warn;

/// What the UI should currently show
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing fetched yet
    Idle,
    /// A resolution or fetch is in flight
    Loading,
    /// Snapshot and series are current
    Loaded,
    /// The last operation failed; the message is already localized
    Error(String),
}

/// A transient, localized notice for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
}

/// How a search call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank; nothing happened
    Ignored,
    /// A single location resolved and its weather is loaded
    Fetched,
    /// Several locations matched; pick one via `select_candidate`
    Candidates,
    /// Resolution or fetch failed; the state carries the notice
    Failed,
}

/// The weather application: resolver, fetcher and store behind one
/// state machine
pub struct WeatherApp<P: WeatherProvider, G: Geolocator> {
    provider: P,
    geolocator: G,
    store: LocationStore,
    language: Language,
    state: ViewState,
    snapshot: Option<WeatherSnapshot>,
    forecast: Option<ForecastSeries>,
    candidates: Vec<LocationRecord>,
    active_location: Option<String>,
}

impl<P: WeatherProvider, G: Geolocator> WeatherApp<P, G> {
    /// Create an idle controller over an already-opened store
    pub fn new(provider: P, geolocator: G, store: LocationStore, language: Language) -> Self {
        Self {
            provider,
            geolocator,
            store,
            language,
            state: ViewState::Idle,
            snapshot: None,
            forecast: None,
            candidates: Vec::new(),
            active_location: None,
        }
    }

    /// Resolve the device position and load its weather
    pub async fn use_current_location(&mut self) {
        self.state = ViewState::Loading;

        match LocationResolver::resolve_current(&self.geolocator, &mut self.store, self.language)
            .await
        {
            Ok(record) => {
                self.fetch_into_state(record.coordinates, &record.name).await;
            }
            Err(e) => {
                warn!("Current-location resolution failed: {e}");
                self.fail(&e);
            }
        }
    }

    /// Search for a location by free text
    ///
    /// Candidate lists from earlier searches stay selectable until a
    /// fetch succeeds.
    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Ignored;
        }

        self.state = ViewState::Loading;

        match LocationResolver::resolve_query(&self.provider, &mut self.store, query, self.language)
            .await
        {
            Ok(Resolution::Ignored) => {
                self.settle();
                SearchOutcome::Ignored
            }
            Ok(Resolution::Resolved(record)) => {
                self.fetch_into_state(record.coordinates, &record.name).await;
                if self.state == ViewState::Loaded {
                    SearchOutcome::Fetched
                } else {
                    SearchOutcome::Failed
                }
            }
            Ok(Resolution::Candidates(records)) => {
                self.candidates = records;
                self.settle();
                SearchOutcome::Candidates
            }
            Err(e) => {
                warn!("Search for '{query}' failed: {e}");
                self.fail(&e);
                SearchOutcome::Failed
            }
        }
    }

    /// Pick one entry from the current candidate list
    ///
    /// Records the choice in the store and fetches its weather. Returns
    /// whether the fetch succeeded; an out-of-range index changes
    /// nothing. The chosen name becomes the active location even when
    /// the fetch fails, matching the selection-then-fetch order of the
    /// save flow.
    pub async fn select_candidate(&mut self, index: usize) -> bool {
        let Some(record) = self.candidates.get(index).cloned() else {
            return false;
        };

        self.store.put(&record.name, record.clone());
        self.fetch_into_state(record.coordinates, &record.name).await;
        self.active_location = Some(record.name);

        self.state == ViewState::Loaded
    }

    /// Add the active location to the saved list
    ///
    /// Returns `None` when no location is active; otherwise a localized
    /// "saved" or "already saved" notice. Duplicates leave the list and
    /// its on-disk document untouched.
    pub fn save_active(&mut self) -> Option<Notice> {
        let name = self.active_location.clone()?;
        let t = self.translations();

        let notice = if self.store.save_name(&name) {
            Notice {
                title: t.location_saved.to_string(),
                detail: format!("{name} {}", t.location_saved_desc),
            }
        } else {
            Notice {
                title: t.already_saved.to_string(),
                detail: format!("{name} {}", t.already_saved_desc),
            }
        };
        Some(notice)
    }

    /// Remove a name from the saved list
    ///
    /// The location record itself stays in the store so the name keeps
    /// resolving without a network round-trip. The notice is produced
    /// whether or not the name was present.
    pub fn remove_saved(&mut self, name: &str) -> Notice {
        self.store.remove_name(name);
        let t = self.translations();
        Notice {
            title: t.location_removed.to_string(),
            detail: format!("{name} {}", t.location_removed_desc),
        }
    }

    /// Load weather for a saved location by its display name
    ///
    /// Uses the stored coordinates when the record is known; otherwise
    /// falls back to a fresh search.
    pub async fn load_saved(&mut self, name: &str) -> SearchOutcome {
        if let Some(record) = self.store.find_by_name(name).cloned() {
            self.fetch_into_state(record.coordinates, &record.name).await;
            if self.state == ViewState::Loaded {
                SearchOutcome::Fetched
            } else {
                SearchOutcome::Failed
            }
        } else {
            self.search(name).await
        }
    }

    /// Switch the display language and refresh the active weather
    ///
    /// With a snapshot on display: a store record matching the active
    /// display name is re-fetched at the same coordinates, so condition
    /// text arrives in the new language. Without a record match, an
    /// active current-location label (new catalog's or the English one)
    /// re-runs device positioning instead. The label comparison is
    /// fragile across repeated mid-flow language switches; it mirrors
    /// the store's naming of the current-location record.
    pub async fn set_language(&mut self, language: Language) {
        self.language = language;

        if self.snapshot.is_none() {
            return;
        }
        let Some(active) = self.active_location.clone() else {
            return;
        };

        if let Some(record) = self.store.find_by_name(&active).cloned() {
            self.fetch_into_state(record.coordinates, &record.name).await;
        } else {
            let t = Translations::for_language(language);
            if active == t.current_location || active == "Current Location" {
                self.use_current_location().await;
            }
        }
    }

    /// Fetch weather for the given coordinates and make it the active
    /// display state. Failures keep the previous snapshot and series.
    async fn fetch_into_state(&mut self, coordinates: Coordinates, display_name: &str) {
        self.state = ViewState::Loading;

        match weather::fetch(&self.provider, coordinates, display_name, self.language).await {
            Ok((snapshot, series)) => {
                self.snapshot = Some(snapshot);
                self.forecast = Some(series);
                self.active_location = Some(display_name.to_string());
                self.candidates.clear();
                self.state = ViewState::Loaded;
            }
            Err(e) => {
                warn!("Weather fetch for '{display_name}' failed: {e}");
                self.fail(&e);
            }
        }
    }

    /// Localize an error and park it in the view state
    fn fail(&mut self, error: &SkyviewError) {
        self.state = ViewState::Error(error.user_message(self.translations()));
    }

    /// Clear a loading state without new data
    fn settle(&mut self) {
        self.state = if self.snapshot.is_some() {
            ViewState::Loaded
        } else {
            ViewState::Idle
        };
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        self.forecast.as_ref()
    }

    pub fn candidates(&self) -> &[LocationRecord] {
        &self.candidates
    }

    pub fn saved_names(&self) -> &[String] {
        self.store.saved_names()
    }

    pub fn active_location(&self) -> Option<&str> {
        self.active_location.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &'static Translations {
        Translations::for_language(self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::open_meteo::{ForecastResponse, GeocodingResult};
    use crate::Result;
    use tempfile::tempdir;

    struct OfflineProvider;

    impl WeatherProvider for OfflineProvider {
        async fn fetch_forecast(
            &self,
            _coordinates: Coordinates,
            _language: Language,
        ) -> Result<ForecastResponse> {
            Err(SkyviewError::weather_fetch(None, "offline"))
        }

        async fn geocode(
            &self,
            _query: &str,
            _language: Language,
        ) -> Result<Vec<GeocodingResult>> {
            Err(SkyviewError::geocoding("offline"))
        }
    }

    struct NoPosition;

    impl Geolocator for NoPosition {
        async fn current_position(&self) -> Result<Coordinates> {
            Err(SkyviewError::GeolocationUnsupported)
        }
    }

    fn offline_app(dir: &std::path::Path) -> WeatherApp<OfflineProvider, NoPosition> {
        let store = LocationStore::open(dir.to_path_buf());
        WeatherApp::new(OfflineProvider, NoPosition, store, Language::En)
    }

    #[test]
    fn test_new_app_is_idle() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());
        assert_eq!(*app.state(), ViewState::Idle);
        assert!(app.snapshot().is_none());
        assert!(app.candidates().is_empty());
        assert!(app.active_location().is_none());
    }

    #[test]
    fn test_save_without_active_location_is_noop() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        assert!(app.save_active().is_none());
        assert!(app.saved_names().is_empty());
    }

    #[test]
    fn test_remove_notice_is_localized() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        let notice = app.remove_saved("Paris, Île-de-France, France");
        assert_eq!(notice.title, "Location Removed");
        assert!(notice.detail.starts_with("Paris, Île-de-France, France "));
    }

    #[tokio::test]
    async fn test_blank_search_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        let outcome = app.search("   ").await;
        assert_eq!(outcome, SearchOutcome::Ignored);
        assert_eq!(*app.state(), ViewState::Idle);
    }

    #[tokio::test]
    async fn test_unsupported_geolocation_becomes_localized_error() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        app.use_current_location().await;
        assert_eq!(
            *app.state(),
            ViewState::Error("Geolocation Not Supported".to_string())
        );
        assert!(app.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_language_switch_without_snapshot_only_switches_catalog() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        app.set_language(Language::Zh).await;
        assert_eq!(app.language(), Language::Zh);
        assert_eq!(*app.state(), ViewState::Idle);
        assert_eq!(app.translations().app_title, "天气预报");
    }

    #[tokio::test]
    async fn test_select_candidate_out_of_range() {
        let dir = tempdir().unwrap();
        let mut app = offline_app(dir.path());
        assert!(!app.select_candidate(0).await);
        assert_eq!(*app.state(), ViewState::Idle);
    }
}
