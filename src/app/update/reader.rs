//! Reading-view message handlers: opening a surah, applying fetched detail,
//! and marking the last-read position.

use super::Effect;
use crate::api::quran::SurahDetail;
use crate::app::state::{App, Screen};
use crate::last_read::LastRead;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn open_surah(&mut self, nomor: u32, effects: &mut Vec<Effect>) {
        self.leave_reading_view();
        if !App::surah_exists(nomor) {
            warn!(surah = nomor, "Requested surah is out of range");
            self.screen = Screen::NotFound(nomor);
            return;
        }
        self.screen = Screen::Surah(nomor);
        effects.push(Effect::FetchSurah(nomor));
    }

    pub(super) fn on_surah_loaded(
        &mut self,
        nomor: u32,
        request_id: u64,
        result: Result<SurahDetail, String>,
        effects: &mut Vec<Effect>,
    ) {
        if request_id != self.reader.request_id {
            debug!(surah = nomor, request_id, "Ignoring stale surah detail");
            return;
        }
        if self.screen != Screen::Surah(nomor) {
            debug!(surah = nomor, "Surah detail arrived after navigating away");
            return;
        }
        self.reader.loading = false;
        match result {
            Ok(detail) => {
                // Content is laid out now, so a stored position can be
                // restored immediately instead of after a guessed delay.
                if let Some(position) = self.last_read.position() {
                    if position.surah_number == nomor {
                        info!(
                            surah = nomor,
                            ayah = position.ayah_number,
                            "Restoring last-read position"
                        );
                        effects.push(Effect::SnapToVerse(position.ayah_number));
                    }
                }
                self.reader.detail = Some(detail);
            }
            Err(err) => {
                warn!(surah = nomor, "Surah detail fetch failed: {err}");
                self.reader.error = Some(err);
            }
        }
    }

    pub(super) fn mark_last_read(&mut self, verse: u32) {
        let Some(detail) = &self.reader.detail else {
            return;
        };
        self.last_read.set(
            LastRead {
                surah_number: detail.nomor,
                surah_name: detail.nama_latin.clone(),
                ayah_number: verse,
            },
            self.store.as_ref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_app;

    #[test]
    fn out_of_range_surah_routes_to_not_found() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.open_surah(115, &mut effects);
        assert_eq!(app.screen, Screen::NotFound(115));
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_detail_result_is_dropped() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.open_surah(36, &mut effects);
        app.reader.request_id = 7;

        app.on_surah_loaded(36, 6, Err("late".to_string()), &mut Vec::new());
        assert!(app.reader.error.is_none());
    }

    #[test]
    fn detail_for_another_screen_is_dropped() {
        let mut app = test_app();
        app.open_surah(36, &mut Vec::new());
        app.open_library(&mut Vec::new());

        let request_id = app.reader.request_id;
        app.on_surah_loaded(36, request_id, Err("late".to_string()), &mut Vec::new());
        assert!(app.reader.error.is_none());
    }
}
