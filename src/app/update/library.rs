//! Library and favorites handlers: index loading, filter state, and the
//! last-read shortcuts surfaced at the top of the list.

use super::Effect;
use crate::api::quran::SurahSummary;
use crate::app::state::{App, Screen};
use tracing::{debug, warn};

/// Sentinel pick-list entry meaning "no place filter".
pub(in crate::app) const ALL_PLACES: &str = "All places";

impl App {
    pub(super) fn open_library(&mut self, effects: &mut Vec<Effect>) {
        self.leave_reading_view();
        self.screen = Screen::Library;
        if self.library.surahs.is_empty() && !self.library.loading {
            effects.push(Effect::FetchSurahList);
        }
    }

    pub(super) fn open_favorites(&mut self) {
        self.leave_reading_view();
        self.screen = Screen::Favorites;
    }

    pub(super) fn on_surah_list_loaded(
        &mut self,
        request_id: u64,
        result: Result<Vec<SurahSummary>, String>,
    ) {
        if request_id != self.library.request_id {
            debug!(request_id, "Ignoring stale surah index");
            return;
        }
        self.library.loading = false;
        match result {
            Ok(surahs) => {
                self.library.surahs = surahs;
                self.library.error = None;
            }
            Err(err) => {
                warn!("Surah index fetch failed: {err}");
                self.library.error = Some(err);
            }
        }
    }

    pub(super) fn set_place_filter(&mut self, place: String) {
        self.library.place_filter = if place == ALL_PLACES {
            None
        } else {
            Some(place)
        };
    }

    pub(super) fn toggle_favorite(&mut self, nomor: u32) {
        self.favorites.toggle(nomor, self.store.as_ref());
    }

    pub(super) fn continue_reading(&mut self, effects: &mut Vec<Effect>) {
        let Some(surah) = self.last_read.position().map(|p| p.surah_number) else {
            return;
        };
        self.open_surah(surah, effects);
    }
}
