use crate::audio::AudioPlayback;
use std::time::Duration;

/// Where the verse player currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLifecycle {
    Idle,
    Playing,
    Paused,
}

/// Transient audio cursor for the reading view; never persisted.
pub struct PlaybackState {
    pub(in crate::app) lifecycle: PlaybackLifecycle,
    pub(in crate::app) active_verse: Option<u32>,
    pub(in crate::app) auto_advance: bool,
    pub(in crate::app) playback: Option<AudioPlayback>,
    pub(in crate::app) elapsed: Duration,
    pub(in crate::app) duration: Duration,
    /// Whether the next full-track load should start playing immediately.
    pub(in crate::app) pending_autoplay: bool,
    pub(in crate::app) request_id: u64,
}

impl PlaybackState {
    pub(in crate::app) fn new() -> Self {
        Self {
            lifecycle: PlaybackLifecycle::Idle,
            active_verse: None,
            auto_advance: false,
            playback: None,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            pending_autoplay: false,
            request_id: 0,
        }
    }

    pub(in crate::app) fn is_playing(&self) -> bool {
        matches!(self.lifecycle, PlaybackLifecycle::Playing)
    }

    pub(in crate::app) fn stop_audio(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    /// Full reset used on view teardown and sequence completion.
    pub(in crate::app) fn reset_to_idle(&mut self) {
        self.stop_audio();
        self.lifecycle = PlaybackLifecycle::Idle;
        self.active_verse = None;
        self.auto_advance = false;
    }

    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }
}
