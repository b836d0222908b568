//! Verse playback state machine.
//!
//! `transition` is pure: it mutates only the in-memory playback model and
//! returns the actions the runtime must carry out. All audio and scroll I/O
//! happens later, when the actions are mapped onto effects.

use super::Effect;
use crate::app::state::{App, PlaybackLifecycle, PlaybackState, Screen};
use crate::audio;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PlaybackEvent {
    PlayVerse(u32),
    AudioEnded,
    ToggleAutoAdvance,
    TogglePlayPause,
    Seek(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PlaybackAction {
    StartVerse(u32),
    LoadFullTrack,
    Pause,
    Resume,
    SeekTo(Duration),
    Stop,
}

/// Advance the playback model by one event.
pub(super) fn transition(
    state: &mut PlaybackState,
    event: PlaybackEvent,
    total_verses: u32,
) -> Vec<PlaybackAction> {
    match event {
        PlaybackEvent::PlayVerse(verse) => {
            state.lifecycle = PlaybackLifecycle::Playing;
            state.active_verse = Some(verse);
            vec![PlaybackAction::StartVerse(verse)]
        }
        PlaybackEvent::AudioEnded => match state.lifecycle {
            // A late end event after teardown must not restart anything.
            PlaybackLifecycle::Idle => Vec::new(),
            _ => match state.active_verse {
                Some(verse) if state.auto_advance && verse < total_verses => {
                    let next = verse + 1;
                    state.active_verse = Some(next);
                    vec![PlaybackAction::StartVerse(next)]
                }
                _ => {
                    state.lifecycle = PlaybackLifecycle::Idle;
                    state.active_verse = None;
                    state.auto_advance = false;
                    vec![PlaybackAction::Stop]
                }
            },
        },
        PlaybackEvent::ToggleAutoAdvance => {
            if state.auto_advance {
                state.auto_advance = false;
                state.lifecycle = PlaybackLifecycle::Idle;
                state.active_verse = None;
                vec![PlaybackAction::Stop, PlaybackAction::LoadFullTrack]
            } else {
                state.auto_advance = true;
                match state.active_verse {
                    Some(_) => Vec::new(),
                    None => {
                        state.lifecycle = PlaybackLifecycle::Playing;
                        state.active_verse = Some(1);
                        vec![PlaybackAction::StartVerse(1)]
                    }
                }
            }
        }
        PlaybackEvent::TogglePlayPause => match state.lifecycle {
            PlaybackLifecycle::Playing => {
                state.lifecycle = PlaybackLifecycle::Paused;
                vec![PlaybackAction::Pause]
            }
            PlaybackLifecycle::Paused | PlaybackLifecycle::Idle => {
                state.lifecycle = PlaybackLifecycle::Playing;
                vec![PlaybackAction::Resume]
            }
        },
        PlaybackEvent::Seek(seconds) => {
            if state.playback.is_some() {
                vec![PlaybackAction::SeekTo(Duration::from_secs_f32(
                    seconds.max(0.0),
                ))]
            } else {
                Vec::new()
            }
        }
    }
}

impl App {
    pub(super) fn apply_playback_event(
        &mut self,
        event: PlaybackEvent,
        effects: &mut Vec<Effect>,
    ) {
        let total = self.reader.total_verses();
        let actions = transition(&mut self.playback, event, total);
        for action in actions {
            match action {
                PlaybackAction::StartVerse(verse) => {
                    let url = self
                        .reader
                        .detail
                        .as_ref()
                        .and_then(|detail| detail.verse_audio_url(verse, &self.config.reciter))
                        .map(str::to_string);
                    match url {
                        Some(url) => {
                            effects.push(Effect::FetchVerseAudio { verse, url });
                            if self.playback.auto_advance {
                                effects.push(Effect::SnapToVerse(verse));
                            }
                        }
                        None => {
                            warn!(verse, "No audio track for verse; keeping current source");
                        }
                    }
                }
                PlaybackAction::LoadFullTrack => {
                    let url = self
                        .reader
                        .detail
                        .as_ref()
                        .and_then(|detail| detail.full_audio_url(&self.config.reciter))
                        .map(str::to_string);
                    if let Some(url) = url {
                        effects.push(Effect::FetchFullTrack {
                            url,
                            autoplay: false,
                        });
                    }
                }
                PlaybackAction::Pause => effects.push(Effect::PauseAudio),
                PlaybackAction::Resume => effects.push(Effect::ResumeAudio),
                PlaybackAction::SeekTo(position) => effects.push(Effect::Seek(position)),
                PlaybackAction::Stop => effects.push(Effect::StopAudio),
            }
        }
    }

    pub(super) fn on_verse_audio_ready(
        &mut self,
        verse: u32,
        request_id: u64,
        result: Result<PathBuf, String>,
    ) {
        if request_id != self.playback.request_id {
            debug!(verse, request_id, "Ignoring stale verse audio result");
            return;
        }
        if !matches!(self.screen, Screen::Surah(_)) {
            debug!(verse, "Verse audio arrived after leaving the reading view");
            return;
        }
        match result {
            Ok(path) => match audio::play_file(&path) {
                Ok(playback) => {
                    self.playback.duration = playback.duration().unwrap_or(Duration::ZERO);
                    self.playback.elapsed = Duration::ZERO;
                    self.playback.playback = Some(playback);
                }
                Err(err) => {
                    warn!(verse, "Verse playback failed, keeping previous source: {err:#}");
                }
            },
            Err(err) => {
                warn!(verse, "Verse audio fetch failed, keeping previous source: {err}");
            }
        }
    }

    pub(super) fn on_full_track_ready(&mut self, request_id: u64, result: Result<PathBuf, String>) {
        if request_id != self.playback.request_id {
            debug!(request_id, "Ignoring stale full-track result");
            return;
        }
        let autoplay = std::mem::take(&mut self.playback.pending_autoplay);
        if !matches!(self.screen, Screen::Surah(_)) {
            debug!("Full track arrived after leaving the reading view");
            return;
        }
        match result {
            Ok(path) => match audio::play_file(&path) {
                Ok(playback) => {
                    if !autoplay {
                        playback.pause();
                    }
                    self.playback.duration = playback.duration().unwrap_or(Duration::ZERO);
                    self.playback.elapsed = Duration::ZERO;
                    self.playback.playback = Some(playback);
                    self.playback.active_verse = None;
                    self.playback.lifecycle = if autoplay {
                        PlaybackLifecycle::Playing
                    } else {
                        PlaybackLifecycle::Idle
                    };
                }
                Err(err) => warn!("Full-track playback failed: {err:#}"),
            },
            Err(err) => warn!("Full-track fetch failed: {err}"),
        }
    }

    /// Refresh the progress cursor and detect end-of-track while playing.
    pub(super) fn on_tick(&mut self, effects: &mut Vec<Effect>) {
        let Some(playback) = &self.playback.playback else {
            return;
        };
        self.playback.elapsed = playback.position();
        if let Some(duration) = playback.duration() {
            self.playback.duration = duration;
        }
        if playback.is_finished() && self.playback.is_playing() {
            // Drop the spent sink before advancing: the next verse may still
            // be downloading, and until its sink is installed a later tick
            // must not see a finished source and fire the end event again.
            self.playback.stop_audio();
            self.apply_playback_event(PlaybackEvent::AudioEnded, effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_verse_marks_it_active_and_playing() {
        let mut state = PlaybackState::new();
        let actions = transition(&mut state, PlaybackEvent::PlayVerse(7), 83);
        assert_eq!(actions, vec![PlaybackAction::StartVerse(7)]);
        assert_eq!(state.active_verse, Some(7));
        assert!(state.is_playing());
    }

    #[test]
    fn auto_advance_visits_each_verse_once_then_idles() {
        let total = 3;
        let mut state = PlaybackState::new();
        let mut visited = Vec::new();

        for action in transition(&mut state, PlaybackEvent::ToggleAutoAdvance, total) {
            if let PlaybackAction::StartVerse(verse) = action {
                visited.push(verse);
            }
        }
        loop {
            let actions = transition(&mut state, PlaybackEvent::AudioEnded, total);
            let mut advanced = false;
            for action in actions {
                if let PlaybackAction::StartVerse(verse) = action {
                    visited.push(verse);
                    advanced = true;
                }
            }
            if !advanced {
                break;
            }
        }

        assert_eq!(visited, vec![1, 2, 3]);
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
        assert_eq!(state.active_verse, None);
        assert!(!state.auto_advance);
    }

    #[test]
    fn ended_while_idle_is_a_no_op() {
        let mut state = PlaybackState::new();
        let actions = transition(&mut state, PlaybackEvent::AudioEnded, 83);
        assert!(actions.is_empty());
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
    }

    #[test]
    fn ended_without_auto_advance_returns_to_idle() {
        let mut state = PlaybackState::new();
        transition(&mut state, PlaybackEvent::PlayVerse(5), 83);
        let actions = transition(&mut state, PlaybackEvent::AudioEnded, 83);
        assert_eq!(actions, vec![PlaybackAction::Stop]);
        assert_eq!(state.active_verse, None);
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
    }

    #[test]
    fn enabling_auto_advance_mid_verse_keeps_the_current_verse() {
        let mut state = PlaybackState::new();
        transition(&mut state, PlaybackEvent::PlayVerse(5), 83);
        let actions = transition(&mut state, PlaybackEvent::ToggleAutoAdvance, 83);
        assert!(actions.is_empty());
        assert!(state.auto_advance);
        assert_eq!(state.active_verse, Some(5));
    }

    #[test]
    fn disabling_auto_advance_stops_and_restores_the_full_track() {
        let mut state = PlaybackState::new();
        transition(&mut state, PlaybackEvent::ToggleAutoAdvance, 83);
        let actions = transition(&mut state, PlaybackEvent::ToggleAutoAdvance, 83);
        assert_eq!(
            actions,
            vec![PlaybackAction::Stop, PlaybackAction::LoadFullTrack]
        );
        assert!(!state.auto_advance);
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
        assert_eq!(state.active_verse, None);
    }

    #[test]
    fn play_pause_toggle_cycles_the_lifecycle() {
        let mut state = PlaybackState::new();
        transition(&mut state, PlaybackEvent::PlayVerse(1), 83);

        let actions = transition(&mut state, PlaybackEvent::TogglePlayPause, 83);
        assert_eq!(actions, vec![PlaybackAction::Pause]);
        assert_eq!(state.lifecycle, PlaybackLifecycle::Paused);

        let actions = transition(&mut state, PlaybackEvent::TogglePlayPause, 83);
        assert_eq!(actions, vec![PlaybackAction::Resume]);
        assert!(state.is_playing());
    }

    #[test]
    fn toggle_from_idle_resumes_rather_than_starting_a_verse() {
        let mut state = PlaybackState::new();
        let actions = transition(&mut state, PlaybackEvent::TogglePlayPause, 83);
        assert_eq!(actions, vec![PlaybackAction::Resume]);
        assert!(state.is_playing());
        assert_eq!(state.active_verse, None);
    }

    #[test]
    fn seek_without_a_loaded_source_is_a_no_op() {
        let mut state = PlaybackState::new();
        let actions = transition(&mut state, PlaybackEvent::Seek(12.5), 83);
        assert!(actions.is_empty());
    }

    mod sequencing {
        use super::*;
        use crate::api::quran::{Ayah, SurahDetail};
        use crate::app::state::tests::test_app;
        use std::collections::BTreeMap;

        fn detail(verses: u32) -> SurahDetail {
            let ayat = (1..=verses)
                .map(|n| Ayah {
                    nomor_ayat: n,
                    teks_arab: String::new(),
                    teks_latin: String::new(),
                    teks_indonesia: String::new(),
                    audio: BTreeMap::from([(
                        "05".to_string(),
                        format!("https://cdn.example/36/{n}.mp3"),
                    )]),
                })
                .collect();
            SurahDetail {
                nomor: 36,
                nama: "يس".to_string(),
                nama_latin: "Yasin".to_string(),
                jumlah_ayat: verses,
                tempat_turun: "Mekah".to_string(),
                arti: "Yasin".to_string(),
                deskripsi: String::new(),
                audio_full: BTreeMap::new(),
                ayat,
            }
        }

        #[test]
        fn tick_does_not_refire_while_the_next_verse_is_loading() {
            let mut app = test_app();
            app.reader.detail = Some(detail(3));
            app.playback.lifecycle = PlaybackLifecycle::Playing;
            app.playback.active_verse = Some(2);
            app.playback.auto_advance = true;

            // The finished sink has been dropped and verse 2's download is
            // still in flight; ticks in this window must not advance the
            // sequence past it.
            let mut effects = Vec::new();
            app.on_tick(&mut effects);
            app.on_tick(&mut effects);

            assert_eq!(app.playback.active_verse, Some(2));
            assert!(app.playback.is_playing());
            assert!(effects.is_empty());
        }

        #[test]
        fn audio_ended_advances_exactly_one_verse() {
            let mut app = test_app();
            app.reader.detail = Some(detail(3));
            app.playback.lifecycle = PlaybackLifecycle::Playing;
            app.playback.active_verse = Some(1);
            app.playback.auto_advance = true;

            let mut effects = Vec::new();
            app.apply_playback_event(PlaybackEvent::AudioEnded, &mut effects);

            assert_eq!(app.playback.active_verse, Some(2));
            let fetched: Vec<u32> = effects
                .iter()
                .filter_map(|effect| match effect {
                    Effect::FetchVerseAudio { verse, .. } => Some(*verse),
                    _ => None,
                })
                .collect();
            assert_eq!(fetched, vec![2]);
        }
    }
}
