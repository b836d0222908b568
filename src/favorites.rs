//! Favorite surah tracking persisted through the key-value store.
//!
//! The set is an insertion-ordered list of unique surah numbers. Every
//! mutation rewrites the whole serialized list; there is no incremental
//! patching.

use crate::store::{KEY_FAVORITES, KeyValueStore};
use tracing::{debug, warn};

pub struct FavoritesTracker {
    ids: Vec<u32>,
}

impl FavoritesTracker {
    /// Load the persisted set; absent or unparsable data yields an empty set.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let ids = match store.get(KEY_FAVORITES) {
            Some(raw) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(ids) => ids,
                Err(err) => {
                    warn!("Failed to parse stored favorites; starting empty: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let mut tracker = Self { ids };
        tracker.dedup_in_place();
        tracker
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Add or remove the id, then write the whole set through to the store.
    pub fn toggle(&mut self, id: u32, store: &dyn KeyValueStore) {
        if let Some(pos) = self.ids.iter().position(|fav| *fav == id) {
            self.ids.remove(pos);
            debug!(surah = id, "Removed favorite");
        } else {
            self.ids.push(id);
            debug!(surah = id, "Added favorite");
        }
        self.persist(store);
    }

    fn persist(&self, store: &dyn KeyValueStore) {
        match serde_json::to_string(&self.ids) {
            Ok(serialized) => store.set(KEY_FAVORITES, &serialized),
            Err(err) => warn!("Failed to serialize favorites: {err}"),
        }
    }

    // Stored data predating this process could carry duplicates; membership
    // checks assume there are none.
    fn dedup_in_place(&mut self) {
        let mut seen = Vec::with_capacity(self.ids.len());
        self.ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn toggle_adds_then_removes() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesTracker::load(&store);
        favorites.toggle(36, &store);
        assert_eq!(favorites.ids(), &[36]);
        favorites.toggle(36, &store);
        assert!(favorites.ids().is_empty());
    }

    #[test]
    fn toggle_twice_is_idempotent_on_membership() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesTracker::load(&store);
        favorites.toggle(2, &store);
        let was_favorite = favorites.is_favorite(114);
        favorites.toggle(114, &store);
        favorites.toggle(114, &store);
        assert_eq!(favorites.is_favorite(114), was_favorite);
        assert!(favorites.is_favorite(2));
    }

    #[test]
    fn no_duplicates_under_any_toggle_sequence() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesTracker::load(&store);
        for id in [1u32, 2, 1, 3, 2, 2, 1, 1] {
            favorites.toggle(id, &store);
            let mut sorted = favorites.ids().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), favorites.ids().len());
        }
    }

    #[test]
    fn persists_across_instances() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesTracker::load(&store);
        favorites.toggle(36, &store);
        favorites.toggle(2, &store);

        let reloaded = FavoritesTracker::load(&store);
        assert_eq!(reloaded.ids(), &[36, 2]);
    }

    #[test]
    fn unparsable_data_degrades_to_empty() {
        let store = MemoryStore::new();
        store.set(KEY_FAVORITES, "not json");
        let favorites = FavoritesTracker::load(&store);
        assert!(favorites.ids().is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesTracker::load(&store);
        for id in [114u32, 1, 36] {
            favorites.toggle(id, &store);
        }
        assert_eq!(favorites.ids(), &[114, 1, 36]);
    }
}
