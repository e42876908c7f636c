//! Durable location storage
//!
//! Two JSON documents under the data directory back the store: the
//! ordered saved-location name list and the display-name keyed record
//! map. Both are loaded once when the store is opened and rewritten
//! synchronously after every mutation. Persistence failures never
//! disturb the in-memory state; they are logged and the session keeps
//! working with what it has.

use crate::models::LocationRecord;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reserved record key for the device's own position. The record stored
/// under this key carries the localized current-location label as its
/// name and is overwritten on every successful geolocation.
pub const CURRENT_LOCATION_KEY: &str = "CurrentLocation";

const RECORDS_FILE: &str = "location_cache.json";
const SAVED_FILE: &str = "saved_locations.json";

/// Durable map from display name to [`LocationRecord`], plus the
/// ordered saved-names list
pub struct LocationStore {
    dir: PathBuf,
    records: BTreeMap<String, LocationRecord>,
    saved: Vec<String>,
}

impl LocationStore {
    /// Open the store rooted at `dir`, loading both documents
    ///
    /// Missing or unreadable documents degrade to empty state so a
    /// first run (or a corrupted file) never blocks the application.
    #[must_use]
    pub fn open(dir: PathBuf) -> Self {
        let records = load_document(&dir.join(RECORDS_FILE)).unwrap_or_default();
        let saved = load_document(&dir.join(SAVED_FILE)).unwrap_or_default();
        Self { dir, records, saved }
    }

    /// Look up a record by its exact store key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocationRecord> {
        self.records.get(key)
    }

    /// Insert or overwrite the record under `key` and persist the map
    pub fn put(&mut self, key: &str, record: LocationRecord) {
        self.records.insert(key.to_string(), record);
        self.persist_records();
    }

    /// All stored records
    pub fn entries(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.values()
    }

    /// Find a record whose name matches `query` after trimming and
    /// case-folding both sides
    ///
    /// Matching runs against record names rather than store keys so the
    /// synthetic current-location entry is found by its localized label.
    #[must_use]
    pub fn match_query(&self, query: &str) -> Option<&LocationRecord> {
        let wanted = query.trim().to_lowercase();
        self.records
            .values()
            .find(|record| record.name.to_lowercase() == wanted)
    }

    /// Find a record by its exact name field
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&LocationRecord> {
        self.records.values().find(|record| record.name == name)
    }

    /// The saved display names, in save order
    #[must_use]
    pub fn saved_names(&self) -> &[String] {
        &self.saved
    }

    /// Append `name` to the saved list unless it is already present
    ///
    /// Returns false for a duplicate; the list and its document are
    /// left untouched in that case.
    pub fn save_name(&mut self, name: &str) -> bool {
        if self.saved.iter().any(|saved| saved == name) {
            return false;
        }
        self.saved.push(name.to_string());
        self.persist_saved();
        true
    }

    /// Filter `name` out of the saved list and persist it
    ///
    /// The record map is deliberately left alone: a removed location
    /// stays resolvable from the store. Returns whether the name was
    /// present.
    pub fn remove_name(&mut self, name: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|saved| saved != name);
        self.persist_saved();
        self.saved.len() != before
    }

    fn persist_records(&self) {
        persist_document(&self.dir, RECORDS_FILE, &self.records);
    }

    fn persist_saved(&self) {
        persist_document(&self.dir, SAVED_FILE, &self.saved);
    }
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        debug!("No stored document at {}", path.display());
        return None;
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unparseable document {}: {e}", path.display());
            None
        }
    }
}

fn persist_document<T: Serialize>(dir: &Path, file: &str, value: &T) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("Failed to create data directory {}: {e}", dir.display());
        return;
    }

    let path = dir.join(file);
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize {file}: {e}");
            return;
        }
    };

    if let Err(e) = std::fs::write(&path, json) {
        warn!("Failed to write {}: {e}", path.display());
    }
}
