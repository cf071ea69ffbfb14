//! Saved locations.
//!
//! Favorites are kept as one JSON array under [`FAVORITES_KEY`], newest
//! first, and the whole list is rewritten on every change.

use crate::storage::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key holding the list.
pub const FAVORITES_KEY: &str = "digipin_favorites";

/// A named, saved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Creation time in milliseconds since the Unix epoch
    pub id: i64,
    /// User label
    pub label: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// DIGIPIN of the location
    pub pin: String,
}

/// Favorites list over a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Uses `store` for persistence.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current list. Missing or unreadable data gives an empty list.
    pub fn load(&self) -> Vec<FavoriteItem> {
        let Some(raw) = self.store.get(FAVORITES_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring corrupt favorites");
            Vec::new()
        })
    }

    /// Replaces the stored list. Storage is left untouched when it already
    /// reads back as `items`, so saving what [`load`](Self::load) returned
    /// never rewrites a missing or corrupt entry.
    pub fn save(&mut self, items: &[FavoriteItem]) -> Result<(), StorageError> {
        if self.load() == items {
            return Ok(());
        }
        let json = serde_json::to_string(items)?;
        self.store.set(FAVORITES_KEY, &json)
    }

    /// Saves a new favorite at the front of the list. A blank label falls
    /// back to the pin.
    pub fn add(&mut self, label: &str, lat: f64, lng: f64, pin: &str) -> Result<FavoriteItem, StorageError> {
        let mut items = self.load();

        let label = label.trim();
        let item = FavoriteItem {
            id: next_id(&items),
            label: if label.is_empty() { pin.to_string() } else { label.to_string() },
            lat,
            lng,
            pin: pin.to_string(),
        };

        items.insert(0, item.clone());
        self.save(&items)?;
        Ok(item)
    }

    /// Deletes the favorite with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: i64) -> Result<bool, StorageError> {
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.id != id);

        if items.len() == before {
            return Ok(false);
        }
        self.save(&items)?;
        Ok(true)
    }
}

/// Current time in milliseconds, bumped past the newest id when two adds
/// land in the same millisecond.
fn next_id(items: &[FavoriteItem]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    match items.iter().map(|item| item.id).max() {
        Some(newest) if newest >= now => newest + 1,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn store() -> FavoritesStore<MemoryStore> {
        FavoritesStore::new(MemoryStore::new())
    }

    #[test]
    fn test_load_empty_when_absent() {
        assert!(store().load().is_empty());
    }

    #[test]
    fn test_load_empty_when_corrupt() {
        let mut memory = MemoryStore::new();
        memory.set(FAVORITES_KEY, "{not json").unwrap();
        assert!(FavoritesStore::new(memory).load().is_empty());

        let mut memory = MemoryStore::new();
        memory.set(FAVORITES_KEY, r#"{"id": 1}"#).unwrap();
        assert!(FavoritesStore::new(memory).load().is_empty());
    }

    #[test]
    fn test_add_prepends() {
        let mut favorites = store();
        favorites.add("Home", 28.6139, 77.209, "39J-438-TJC7").unwrap();
        let office = favorites.add("Office", 19.076, 72.8777, "4FK-595-8823").unwrap();

        let items = favorites.load();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], office);
        assert_eq!(items[1].label, "Home");
        assert!(items[0].id > items[1].id);
    }

    #[test]
    fn test_blank_label_defaults_to_pin() {
        let mut favorites = store();
        let item = favorites.add("   ", 28.6139, 77.209, "39J-438-TJC7").unwrap();
        assert_eq!(item.label, "39J-438-TJC7");
    }

    #[test]
    fn test_id_is_current_time() {
        let before = chrono::Utc::now().timestamp_millis();
        let item = store().add("x", 20.0, 80.0, "pin").unwrap();
        let after = chrono::Utc::now().timestamp_millis();
        assert!((before..=after).contains(&item.id));
    }

    #[test]
    fn test_remove() {
        let mut favorites = store();
        let home = favorites.add("Home", 28.6139, 77.209, "39J-438-TJC7").unwrap();
        let office = favorites.add("Office", 19.076, 72.8777, "4FK-595-8823").unwrap();

        assert!(favorites.remove(home.id).unwrap());
        let items = favorites.load();
        assert_eq!(items, vec![office]);
        assert!(!favorites.remove(home.id).unwrap());
    }

    #[test]
    fn test_save_of_load_leaves_storage_unchanged() {
        let mut favorites = store();
        favorites.add("Home", 28.6139, 77.209, "39J-438-TJC7").unwrap();
        favorites.add("", 19.076, 72.8777, "4FK-595-8823").unwrap();

        let before = favorites.store().get(FAVORITES_KEY);
        let loaded = favorites.load();
        favorites.save(&loaded).unwrap();
        assert_eq!(favorites.store().get(FAVORITES_KEY), before);
    }

    #[test]
    fn test_save_of_load_keeps_absent_key_absent() {
        let mut favorites = store();
        let loaded = favorites.load();
        favorites.save(&loaded).unwrap();
        assert_eq!(favorites.store().get(FAVORITES_KEY), None);
    }

    #[test]
    fn test_save_of_load_keeps_corrupt_value() {
        let mut memory = MemoryStore::new();
        memory.set(FAVORITES_KEY, "{not json").unwrap();
        let mut favorites = FavoritesStore::new(memory);

        let loaded = favorites.load();
        favorites.save(&loaded).unwrap();
        assert_eq!(favorites.store().get(FAVORITES_KEY).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_remove_unknown_id_does_not_write() {
        let mut favorites = store();
        assert!(!favorites.remove(42).unwrap());
        assert_eq!(favorites.store().get(FAVORITES_KEY), None);

        let mut memory = MemoryStore::new();
        memory.set(FAVORITES_KEY, "{not json").unwrap();
        let mut favorites = FavoritesStore::new(memory);
        assert!(!favorites.remove(42).unwrap());
        assert_eq!(favorites.store().get(FAVORITES_KEY).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_save_writes_changed_list() {
        let mut favorites = store();
        let item = FavoriteItem {
            id: 1,
            label: "Gate".to_string(),
            lat: 28.6139,
            lng: 77.209,
            pin: "39J-438-TJC7".to_string(),
        };
        favorites.save(std::slice::from_ref(&item)).unwrap();
        assert_eq!(favorites.load(), vec![item]);

        favorites.save(&[]).unwrap();
        assert_eq!(favorites.store().get(FAVORITES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_reads_browser_written_json() {
        let mut memory = MemoryStore::new();
        memory
            .set(
                FAVORITES_KEY,
                r#"[{"id":1700000000000,"label":"Gate","lat":28.6139,"lng":77.209,"pin":"39J-438-TJC7"}]"#,
            )
            .unwrap();
        let items = FavoritesStore::new(memory).load();
        assert_eq!(items[0].id, 1_700_000_000_000);
        assert_eq!(items[0].label, "Gate");
    }

    #[test]
    fn test_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");

        let mut favorites = FavoritesStore::new(FileStore::new(&path));
        let item = favorites.add("Home", 28.6139, 77.209, "39J-438-TJC7").unwrap();

        let reopened = FavoritesStore::new(FileStore::new(&path));
        assert_eq!(reopened.load(), vec![item]);
    }
}
