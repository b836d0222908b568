//! Durable string-keyed storage for reader state.
//!
//! Every value is a whole JSON document written in one shot; there are no
//! partial updates and no versioning scheme. The trait exists so tests can
//! inject an in-memory fake instead of touching the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Store key for the favorited surah numbers.
pub const KEY_FAVORITES: &str = "favorites";
/// Store key for the last-read position.
pub const KEY_LAST_READ: &str = "last_read";
/// Store key for the preferred prayer-times province.
pub const KEY_PRAYER_PROVINCE: &str = "prayer_province";
/// Store key for the preferred prayer-times city.
pub const KEY_PRAYER_CITY: &str = "prayer_city";

/// Synchronous key-value storage. Writes are best-effort: failures are logged
/// and swallowed so the UI stays responsive.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Filesystem-backed store: one file per key under a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), "Failed to create state dir: {err}");
            return;
        }
        let path = self.key_path(key);
        if let Err(err) = fs::write(&path, value) {
            warn!(path = %path.display(), "Failed to persist value: {err}");
        } else {
            debug!(key, "Persisted value");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.key_path(key);
        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), "Failed to remove value: {err}");
            }
        }
    }
}

/// In-memory store used as a test double for the trackers.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("store lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().expect("store lock").remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        store.set("favorites", "[1,2,3]");
        assert_eq!(store.get("favorites").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn file_store_remove_deletes_backing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        store.set("last_read", "{}");
        store.remove("last_read");
        assert!(store.get("last_read").is_none());
        assert!(!dir.path().join("last_read.json").exists());
    }

    #[test]
    fn removing_missing_key_is_quiet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        store.remove("never_set");
        assert!(store.get("never_set").is_none());
    }

    #[test]
    fn memory_store_is_isolated_per_instance() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        a.set("favorites", "[36]");
        assert!(b.get("favorites").is_none());
    }
}
