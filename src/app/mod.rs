mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::store::KeyValueStore;
use iced::{Size, Theme, window};

/// Launch the GUI with the loaded config and an injected store.
pub fn run_app(config: AppConfig, store: Box<dyn KeyValueStore>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Quran Viewer", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, store))
}
