mod starter;
mod viewer;

use crate::cache::{MAX_RECENT_PLANS, list_recent_plans};
use crate::config::{AppConfig, ThemeMode, defaults};
use crate::provider::PlanProvider;
use iced::task::Handle;
use iced::{Point, Task};
use std::sync::Arc;

use super::messages::{Message, ViewerId};

pub(in crate::app) use starter::StarterState;
pub(in crate::app) use viewer::{SlideImage, ViewerScreen};

/// Core application state: the starter screen plus at most one open viewer.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) provider: Arc<dyn PlanProvider>,
    pub(super) starter: StarterState,
    pub(super) viewer: Option<ViewerScreen>,
    pub(super) next_viewer_id: ViewerId,
    pub(super) surface_width: f32,
    pub(super) cursor: Point,
    pub(super) advance_handle: Option<Handle>,
}

impl App {
    pub(super) fn new(mut config: AppConfig, provider: Arc<dyn PlanProvider>) -> App {
        clamp_config(&mut config);
        App {
            surface_width: config.window_width,
            config,
            provider,
            starter: StarterState {
                plan_input: String::new(),
                recent: list_recent_plans(MAX_RECENT_PLANS),
                notice: None,
            },
            viewer: None,
            next_viewer_id: 0,
            cursor: Point::ORIGIN,
            advance_handle: None,
        }
    }

    pub(super) fn bootstrap(
        config: AppConfig,
        provider: Arc<dyn PlanProvider>,
    ) -> (App, Task<Message>) {
        let app = App::new(config, provider);
        tracing::info!(
            night_mode = matches!(app.config.theme, ThemeMode::Night),
            recent = app.starter.recent.len(),
            "Initialized app state"
        );
        let init_task = match app.config.default_plan_id.clone() {
            Some(plan_id) => Task::done(Message::OpenPlan(plan_id)),
            None => Task::none(),
        };
        (app, init_task)
    }

    /// The open viewer, if it is the one `id` refers to.
    pub(super) fn viewer_mut(&mut self, id: ViewerId) -> Option<&mut ViewerScreen> {
        self.viewer.as_mut().filter(|screen| screen.id == id)
    }

    pub(super) fn refresh_recent_plans(&mut self) {
        self.starter.recent = list_recent_plans(MAX_RECENT_PLANS);
    }
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: String) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback;
        } else {
            *value = normalized;
        }
    }

    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config.viewer_id = config.viewer_id.trim().to_string();
    if config.viewer_id.is_empty() {
        config.viewer_id = defaults::default_viewer_id();
    }
    normalize_key_binding(&mut config.key_next_slide, defaults::default_key_next_slide());
    normalize_key_binding(&mut config.key_prev_slide, defaults::default_key_prev_slide());
    normalize_key_binding(&mut config.key_toggle_hold, defaults::default_key_toggle_hold());
    normalize_key_binding(
        &mut config.key_toggle_comments,
        defaults::default_key_toggle_comments(),
    );
    normalize_key_binding(&mut config.key_toggle_like, defaults::default_key_toggle_like());
    normalize_key_binding(
        &mut config.key_close_viewer,
        defaults::default_key_close_viewer(),
    );
    normalize_key_binding(&mut config.key_safe_quit, defaults::default_key_safe_quit());
}
