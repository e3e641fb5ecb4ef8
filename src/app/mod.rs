mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::provider::PlanProvider;
use iced::{Size, Theme, window};
use std::sync::Arc;

/// Launch the viewer with the given config and data provider.
pub fn run_app(config: AppConfig, provider: Arc<dyn PlanProvider>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        min_size: Some(Size::new(320.0, 480.0)),
        ..window::Settings::default()
    };

    iced::application("Plan Stories", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, provider))
}
