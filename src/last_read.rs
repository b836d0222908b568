//! Last-read position persisted through the key-value store.
//!
//! A single record of (surah, verse) replaced wholesale on every write. The
//! store is the source of truth; the in-memory copy is a write-through cache.

use crate::store::{KEY_LAST_READ, KeyValueStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRead {
    pub surah_number: u32,
    pub surah_name: String,
    pub ayah_number: u32,
}

#[derive(Default)]
pub struct LastReadTracker {
    position: Option<LastRead>,
}

impl LastReadTracker {
    /// Load the persisted position; absent or unparsable data yields none.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let position = match store.get(KEY_LAST_READ) {
            Some(raw) => match serde_json::from_str::<LastRead>(&raw) {
                Ok(position) => Some(position),
                Err(err) => {
                    warn!("Failed to parse stored last-read position: {err}");
                    None
                }
            },
            None => None,
        };
        Self { position }
    }

    pub fn position(&self) -> Option<&LastRead> {
        self.position.as_ref()
    }

    /// Replace the position and persist it.
    pub fn set(&mut self, position: LastRead, store: &dyn KeyValueStore) {
        info!(
            surah = position.surah_number,
            ayah = position.ayah_number,
            "Marked last-read position"
        );
        match serde_json::to_string(&position) {
            Ok(serialized) => store.set(KEY_LAST_READ, &serialized),
            Err(err) => warn!("Failed to serialize last-read position: {err}"),
        }
        self.position = Some(position);
    }

    /// Drop the position and remove the stored value.
    pub fn clear(&mut self, store: &dyn KeyValueStore) {
        info!("Cleared last-read position");
        self.position = None;
        store.remove(KEY_LAST_READ);
    }
}
