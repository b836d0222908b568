use crate::api::prayer::MonthlySchedule;
use crate::api::quran::{SurahDetail, SurahSummary};
use crate::app::state::SortKey;
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI and by background fetch tasks.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    OpenLibrary,
    OpenFavorites,
    OpenPrayerTimes,
    OpenSurah(u32),
    ToggleTheme,

    // Library
    SurahListLoaded {
        request_id: u64,
        result: Result<Vec<SurahSummary>, String>,
    },
    SearchChanged(String),
    PlaceFilterChanged(String),
    SortChanged(SortKey),
    ToggleFavoritesOnly,
    ToggleFavorite(u32),
    ContinueReading,
    ClearLastRead,

    // Reading view
    SurahLoaded {
        nomor: u32,
        request_id: u64,
        result: Result<SurahDetail, String>,
    },
    MarkLastRead(u32),

    // Verse playback
    PlayVerse(u32),
    TogglePlayPause,
    ToggleAutoAdvance,
    SeekTo(f32),
    VerseAudioReady {
        verse: u32,
        request_id: u64,
        result: Result<PathBuf, String>,
    },
    FullTrackReady {
        request_id: u64,
        result: Result<PathBuf, String>,
    },
    Tick(Instant),

    // Prayer times
    ProvincesLoaded {
        request_id: u64,
        result: Result<Vec<String>, String>,
    },
    ProvinceSelected(String),
    CitiesLoaded {
        request_id: u64,
        result: Result<Vec<String>, String>,
    },
    CitySelected(String),
    ScheduleLoaded {
        request_id: u64,
        result: Result<MonthlySchedule, String>,
    },
}
