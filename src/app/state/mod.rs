mod library;
mod playback;
mod prayer;
mod reader;

use crate::api::quran::SURAH_COUNT;
use crate::config::AppConfig;
use crate::favorites::FavoritesTracker;
use crate::last_read::LastReadTracker;
use crate::store::KeyValueStore;
use iced::Task;
use iced::widget::scrollable::Id as ScrollId;
use iced::widget::scrollable::RelativeOffset;
use once_cell::sync::Lazy;
use tracing::info;

use super::messages::Message;
use super::update::Effect;

pub(in crate::app) use library::{LibraryState, SORT_KEYS};
pub use library::{SortKey, project};
pub(in crate::app) use playback::{PlaybackLifecycle, PlaybackState};
pub(in crate::app) use prayer::PrayerState;
pub(in crate::app) use reader::ReaderState;

pub(crate) static VERSE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("verse-scroll"));

/// In-app navigation target (the routing surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Library,
    Surah(u32),
    Favorites,
    PrayerTimes,
    NotFound(u32),
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) screen: Screen,
    pub(super) config: AppConfig,
    pub(super) store: Box<dyn KeyValueStore>,
    pub(super) favorites: FavoritesTracker,
    pub(super) last_read: LastReadTracker,
    pub(super) library: LibraryState,
    pub(super) reader: ReaderState,
    pub(super) playback: PlaybackState,
    pub(super) prayer: PrayerState,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        store: Box<dyn KeyValueStore>,
    ) -> (App, Task<Message>) {
        let favorites = FavoritesTracker::load(store.as_ref());
        let last_read = LastReadTracker::load(store.as_ref());
        info!(
            favorites = favorites.ids().len(),
            has_last_read = last_read.position().is_some(),
            "Initialized app state from store"
        );

        let mut app = App {
            screen: Screen::Library,
            config,
            store,
            favorites,
            last_read,
            library: LibraryState::new(),
            reader: ReaderState::new(),
            playback: PlaybackState::new(),
            prayer: PrayerState::new(),
        };
        let init_task = app.run_effect(Effect::FetchSurahList);
        (app, init_task)
    }

    pub(super) fn surah_exists(nomor: u32) -> bool {
        (1..=SURAH_COUNT).contains(&nomor)
    }

    /// Relative scroll target for a 1-based verse number within the currently
    /// loaded surah.
    pub(super) fn scroll_offset_for_verse(&self, verse: u32) -> Option<RelativeOffset> {
        let total = self.reader.total_verses();
        if total == 0 || verse == 0 {
            return None;
        }
        let y = if total == 1 {
            0.0
        } else {
            (verse.min(total) - 1) as f32 / (total - 1) as f32
        };
        Some(RelativeOffset {
            x: 0.0,
            y: y.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use super::*;
    use crate::store::MemoryStore;

    pub(in crate::app) fn test_app() -> App {
        let (app, _task) =
            App::bootstrap(AppConfig::default(), Box::new(MemoryStore::new()));
        app
    }

    #[test]
    fn scroll_offset_spans_the_verse_range() {
        let mut app = test_app();
        app.reader.detail = Some(crate::api::quran::SurahDetail {
            nomor: 36,
            nama: "يس".to_string(),
            nama_latin: "Yasin".to_string(),
            jumlah_ayat: 83,
            tempat_turun: "Mekah".to_string(),
            arti: "Yasin".to_string(),
            deskripsi: String::new(),
            audio_full: Default::default(),
            ayat: Vec::new(),
        });

        assert_eq!(app.scroll_offset_for_verse(1).map(|o| o.y), Some(0.0));
        assert_eq!(app.scroll_offset_for_verse(83).map(|o| o.y), Some(1.0));
        let mid = app.scroll_offset_for_verse(42).map(|o| o.y).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn scroll_offset_absent_without_loaded_surah() {
        let app = test_app();
        assert!(app.scroll_offset_for_verse(5).is_none());
    }

    #[test]
    fn surah_id_range_is_validated() {
        assert!(App::surah_exists(1));
        assert!(App::surah_exists(114));
        assert!(!App::surah_exists(0));
        assert!(!App::surah_exists(115));
    }
}
