//! Configuration loading for the Quran viewer.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_arabic_font_size")]
    pub arabic_font_size: u32,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_quran_api_base")]
    pub quran_api_base: String,
    #[serde(default = "default_prayer_api_base")]
    pub prayer_api_base: String,
    /// Reciter key inside the per-verse and full-surah audio maps.
    #[serde(default = "default_reciter")]
    pub reciter: String,
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
    #[serde(default = "default_audio_cache_dir")]
    pub audio_cache_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            font_size: default_font_size(),
            arabic_font_size: default_arabic_font_size(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            quran_api_base: default_quran_api_base(),
            prayer_api_base: default_prayer_api_base(),
            reciter: default_reciter(),
            state_dir: default_state_dir(),
            audio_cache_dir: default_audio_cache_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

/// Log verbosity, mapped onto a tracing filter string.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

fn default_font_size() -> u32 {
    16
}

fn default_arabic_font_size() -> u32 {
    30
}

fn default_window_width() -> f32 {
    1100.0
}

fn default_window_height() -> f32 {
    800.0
}

fn default_quran_api_base() -> String {
    "https://equran.id/api/v2".to_string()
}

fn default_prayer_api_base() -> String {
    "https://equran.id/api/v2".to_string()
}

fn default_reciter() -> String {
    "05".to_string()
}

fn default_state_dir() -> String {
    ".state".to_string()
}

fn default_audio_cache_dir() -> String {
    ".cache/audio".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Load configuration from the given path, falling back to defaults when the
/// file is missing or malformed.
pub fn load_config(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    "Invalid config TOML; falling back to defaults: {err}"
                );
                AppConfig::default()
            }
        },
        Err(err) => {
            debug!(
                path = %path.display(),
                "No config file ({err}); using defaults"
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig =
            toml::from_str("font_size = 20\nreciter = \"01\"").expect("partial config parses");
        assert_eq!(config.font_size, 20);
        assert_eq!(config.reciter, "01");
        assert_eq!(config.quran_api_base, default_quran_api_base());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/quran-viewer/config.toml"));
        assert_eq!(config.font_size, default_font_size());
        assert_eq!(config.theme, ThemeMode::Day);
    }
}
