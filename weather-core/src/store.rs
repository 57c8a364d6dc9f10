//! Durable key/value storage for the last selected city.

use directories::ProjectDirs;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::StoreError;

/// Key holding the last selected city name.
pub const CITY_KEY: &str = "city";

pub trait PreferenceStore: Send + Sync + Debug {
    /// Absent keys and unreadable storage both read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Persisted non-empty city, or `fallback`.
pub fn resolve_city(store: &dyn PreferenceStore, fallback: &str) -> String {
    store
        .get(CITY_KEY)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Flat TOML table of string values on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.toml` in the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join("preferences.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read preferences");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "discarding unreadable preferences");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&values)?)?;
        Ok(())
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(city: &str) -> Self {
        let store = Self::default();
        store.values.lock().insert(CITY_KEY.to_string(), city.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrips_city() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("preferences.toml"));

        assert_eq!(store.get(CITY_KEY), None);
        store.set(CITY_KEY, "Paris").unwrap();
        assert_eq!(store.get(CITY_KEY).as_deref(), Some("Paris"));

        // A fresh handle sees the same value, as after a restart.
        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get(CITY_KEY).as_deref(), Some("Paris"));
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("preferences.toml"));

        store.set("other", "x").unwrap();
        store.set(CITY_KEY, "Paris").unwrap();
        assert_eq!(store.get("other").as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_file_reads_as_absent_and_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(CITY_KEY), None);

        store.set(CITY_KEY, "Paris").unwrap();
        assert_eq!(store.get(CITY_KEY).as_deref(), Some("Paris"));
    }

    #[test]
    fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = FileStore::new(blocker.join("preferences.toml"));
        assert!(matches!(store.set(CITY_KEY, "Paris"), Err(StoreError::Io(_))));
    }

    #[test]
    fn resolve_city_falls_back() {
        assert_eq!(resolve_city(&MemoryStore::new(), "lagos"), "lagos");
        assert_eq!(resolve_city(&MemoryStore::with_city("  "), "lagos"), "lagos");
        assert_eq!(resolve_city(&MemoryStore::with_city("Paris"), "lagos"), "Paris");
    }
}
