mod library;
mod playback;
mod prayer;
mod reader;

pub(in crate::app) use library::ALL_PLACES;

use super::messages::Message;
use super::state::{App, Screen, VERSE_SCROLL_ID};
use crate::api::{prayer as prayer_api, quran as quran_api};
use crate::audio;
use chrono::Datelike;
use iced::{Subscription, Task, time};
use playback::PlaybackEvent;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Side effects produced by message handlers; executed by `run_effect`.
pub(in crate::app) enum Effect {
    FetchSurahList,
    FetchSurah(u32),
    FetchVerseAudio { verse: u32, url: String },
    FetchFullTrack { url: String, autoplay: bool },
    PauseAudio,
    ResumeAudio,
    StopAudio,
    SnapToVerse(u32),
    Seek(Duration),
    FetchProvinces,
    FetchCities { province: String },
    FetchSchedule { province: String, city: String },
}

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        // The cursor only needs refreshing while audio is actually running.
        if app.playback.is_playing() {
            time::every(Duration::from_millis(200)).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut effects: Vec<Effect> = Vec::new();

        match message {
            Message::OpenLibrary => self.open_library(&mut effects),
            Message::OpenFavorites => self.open_favorites(),
            Message::OpenPrayerTimes => self.open_prayer_times(&mut effects),
            Message::OpenSurah(nomor) => self.open_surah(nomor, &mut effects),
            Message::ToggleTheme => {
                self.config.theme = match self.config.theme {
                    crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
                    crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
                };
                info!(theme = ?self.config.theme, "Toggled theme");
            }

            Message::SurahListLoaded { request_id, result } => {
                self.on_surah_list_loaded(request_id, result);
            }
            Message::SearchChanged(query) => self.library.search = query,
            Message::PlaceFilterChanged(place) => self.set_place_filter(place),
            Message::SortChanged(sort_key) => {
                debug!(?sort_key, "Sort key changed");
                self.library.sort_key = sort_key;
            }
            Message::ToggleFavoritesOnly => {
                self.library.favorites_only = !self.library.favorites_only;
            }
            Message::ToggleFavorite(nomor) => self.toggle_favorite(nomor),
            Message::ContinueReading => self.continue_reading(&mut effects),
            Message::ClearLastRead => self.last_read.clear(self.store.as_ref()),

            Message::SurahLoaded {
                nomor,
                request_id,
                result,
            } => self.on_surah_loaded(nomor, request_id, result, &mut effects),
            Message::MarkLastRead(verse) => self.mark_last_read(verse),

            Message::PlayVerse(verse) => {
                self.apply_playback_event(PlaybackEvent::PlayVerse(verse), &mut effects);
            }
            Message::TogglePlayPause => {
                self.apply_playback_event(PlaybackEvent::TogglePlayPause, &mut effects);
            }
            Message::ToggleAutoAdvance => {
                self.apply_playback_event(PlaybackEvent::ToggleAutoAdvance, &mut effects);
            }
            Message::SeekTo(seconds) => {
                self.apply_playback_event(PlaybackEvent::Seek(seconds), &mut effects);
            }
            Message::VerseAudioReady {
                verse,
                request_id,
                result,
            } => self.on_verse_audio_ready(verse, request_id, result),
            Message::FullTrackReady { request_id, result } => {
                self.on_full_track_ready(request_id, result);
            }
            Message::Tick(_) => self.on_tick(&mut effects),

            Message::ProvincesLoaded { request_id, result } => {
                self.on_provinces_loaded(request_id, result, &mut effects);
            }
            Message::ProvinceSelected(province) => self.select_province(province, &mut effects),
            Message::CitiesLoaded { request_id, result } => {
                self.on_cities_loaded(request_id, result, &mut effects);
            }
            Message::CitySelected(city) => self.select_city(city, &mut effects),
            Message::ScheduleLoaded { request_id, result } => {
                self.on_schedule_loaded(request_id, result);
            }
        }

        let tasks: Vec<Task<Message>> = effects
            .into_iter()
            .map(|effect| self.run_effect(effect))
            .collect();
        Task::batch(tasks)
    }

    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchSurahList => {
                self.library.loading = true;
                self.library.error = None;
                self.library.request_id = self.library.request_id.wrapping_add(1);
                let request_id = self.library.request_id;
                let base = self.config.quran_api_base.clone();
                info!(request_id, "Dispatching surah index fetch");
                Task::perform(
                    async move {
                        let result = quran_api::fetch_surah_list(&base)
                            .await
                            .map_err(|err| err.to_string());
                        Message::SurahListLoaded { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::FetchSurah(nomor) => {
                self.reader.reset_for();
                self.reader.request_id = self.reader.request_id.wrapping_add(1);
                let request_id = self.reader.request_id;
                let base = self.config.quran_api_base.clone();
                info!(surah = nomor, request_id, "Dispatching surah detail fetch");
                Task::perform(
                    async move {
                        let result = quran_api::fetch_surah_detail(&base, nomor)
                            .await
                            .map_err(|err| err.to_string());
                        Message::SurahLoaded {
                            nomor,
                            request_id,
                            result,
                        }
                    },
                    |message| message,
                )
            }
            Effect::FetchVerseAudio { verse, url } => {
                let request_id = self.playback.next_request_id();
                let cache_dir = PathBuf::from(&self.config.audio_cache_dir);
                Task::perform(
                    async move {
                        let result = audio::fetch_audio(&cache_dir, &url)
                            .await
                            .map_err(|err| err.to_string());
                        Message::VerseAudioReady {
                            verse,
                            request_id,
                            result,
                        }
                    },
                    |message| message,
                )
            }
            Effect::FetchFullTrack { url, autoplay } => {
                let request_id = self.playback.next_request_id();
                let cache_dir = PathBuf::from(&self.config.audio_cache_dir);
                self.playback.pending_autoplay = autoplay;
                Task::perform(
                    async move {
                        let result = audio::fetch_audio(&cache_dir, &url)
                            .await
                            .map_err(|err| err.to_string());
                        Message::FullTrackReady { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::PauseAudio => {
                if let Some(playback) = &self.playback.playback {
                    playback.pause();
                }
                Task::none()
            }
            Effect::ResumeAudio => {
                if let Some(playback) = &self.playback.playback {
                    if !playback.is_finished() {
                        playback.resume();
                        return Task::none();
                    }
                }
                // Nothing loaded (or the source ran out): start the
                // full-surah track from the top.
                let url = self
                    .reader
                    .detail
                    .as_ref()
                    .and_then(|detail| detail.full_audio_url(&self.config.reciter))
                    .map(str::to_string);
                match url {
                    Some(url) => self.run_effect(Effect::FetchFullTrack {
                        url,
                        autoplay: true,
                    }),
                    None => Task::none(),
                }
            }
            Effect::StopAudio => {
                self.playback.stop_audio();
                Task::none()
            }
            Effect::SnapToVerse(verse) => match self.scroll_offset_for_verse(verse) {
                Some(offset) => {
                    iced::widget::scrollable::snap_to(VERSE_SCROLL_ID.clone(), offset)
                }
                None => Task::none(),
            },
            Effect::Seek(position) => {
                if let Some(playback) = &self.playback.playback {
                    playback.seek(position);
                    self.playback.elapsed = position;
                }
                Task::none()
            }
            Effect::FetchProvinces => {
                self.prayer.loading = true;
                self.prayer.error = None;
                let request_id = self.prayer.next_request_id();
                let base = self.config.prayer_api_base.clone();
                Task::perform(
                    async move {
                        let result = prayer_api::fetch_provinces(&base)
                            .await
                            .map_err(|err| err.to_string());
                        Message::ProvincesLoaded { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::FetchCities { province } => {
                self.prayer.loading = true;
                self.prayer.error = None;
                let request_id = self.prayer.next_request_id();
                let base = self.config.prayer_api_base.clone();
                Task::perform(
                    async move {
                        let result = prayer_api::fetch_cities(&base, &province)
                            .await
                            .map_err(|err| err.to_string());
                        Message::CitiesLoaded { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::FetchSchedule { province, city } => {
                self.prayer.loading = true;
                self.prayer.error = None;
                let request_id = self.prayer.next_request_id();
                let base = self.config.prayer_api_base.clone();
                let today = chrono::Local::now();
                let month = today.month();
                let year = today.year() as u32;
                Task::perform(
                    async move {
                        let result = prayer_api::fetch_monthly_schedule(
                            &base, &province, &city, month, year,
                        )
                        .await
                        .map_err(|err| err.to_string());
                        Message::ScheduleLoaded { request_id, result }
                    },
                    |message| message,
                )
            }
        }
    }

    /// Shared teardown when the reading view stops being the active screen.
    /// Bumping the request id makes any in-flight audio result stale.
    pub(in crate::app) fn leave_reading_view(&mut self) {
        if matches!(self.screen, Screen::Surah(_)) {
            self.playback.reset_to_idle();
            self.playback.next_request_id();
        }
    }
}
