use super::defaults;
use super::models::{AppConfig, LogLevel, ProviderKind, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `conf/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    gestures: GesturesConfig,
    #[serde(default)]
    provider: ProviderConfig,
    #[serde(default)]
    session: SessionConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            window_width: tables.window.window_width,
            window_height: tables.window.window_height,
            slide_duration_ms: tables.playback.slide_duration_ms,
            progress_tick_ms: tables.playback.progress_tick_ms,
            hold_delay_ms: tables.gestures.hold_delay_ms,
            swipe_dismiss_distance: tables.gestures.swipe_dismiss_distance,
            provider_kind: tables.provider.kind,
            base_url: tables.provider.base_url,
            fixture_path: tables.provider.fixture_path,
            fixture_latency_ms: tables.provider.fixture_latency_ms,
            request_timeout_secs: tables.provider.request_timeout_secs,
            viewer_id: tables.session.viewer_id,
            default_plan_id: tables.session.default_plan_id,
            log_level: tables.logging.log_level,
            key_next_slide: tables.keys.key_next_slide,
            key_prev_slide: tables.keys.key_prev_slide,
            key_toggle_hold: tables.keys.key_toggle_hold,
            key_toggle_comments: tables.keys.key_toggle_comments,
            key_toggle_like: tables.keys.key_toggle_like,
            key_close_viewer: tables.keys.key_close_viewer,
            key_safe_quit: tables.keys.key_safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
            },
            window: WindowConfig {
                window_width: config.window_width,
                window_height: config.window_height,
            },
            playback: PlaybackConfig {
                slide_duration_ms: config.slide_duration_ms,
                progress_tick_ms: config.progress_tick_ms,
            },
            gestures: GesturesConfig {
                hold_delay_ms: config.hold_delay_ms,
                swipe_dismiss_distance: config.swipe_dismiss_distance,
            },
            provider: ProviderConfig {
                kind: config.provider_kind,
                base_url: config.base_url.clone(),
                fixture_path: config.fixture_path.clone(),
                fixture_latency_ms: config.fixture_latency_ms,
                request_timeout_secs: config.request_timeout_secs,
            },
            session: SessionConfig {
                viewer_id: config.viewer_id.clone(),
                default_plan_id: config.default_plan_id.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                key_next_slide: config.key_next_slide.clone(),
                key_prev_slide: config.key_prev_slide.clone(),
                key_toggle_hold: config.key_toggle_hold.clone(),
                key_toggle_comments: config.key_toggle_comments.clone(),
                key_toggle_like: config.key_toggle_like.clone(),
                key_close_viewer: config.key_close_viewer.clone(),
                key_safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default = "defaults::default_slide_duration_ms")]
    slide_duration_ms: u64,
    #[serde(default = "defaults::default_progress_tick_ms")]
    progress_tick_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            slide_duration_ms: defaults::default_slide_duration_ms(),
            progress_tick_ms: defaults::default_progress_tick_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct GesturesConfig {
    #[serde(default = "defaults::default_hold_delay_ms")]
    hold_delay_ms: u64,
    #[serde(default = "defaults::default_swipe_dismiss_distance")]
    swipe_dismiss_distance: f32,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        GesturesConfig {
            hold_delay_ms: defaults::default_hold_delay_ms(),
            swipe_dismiss_distance: defaults::default_swipe_dismiss_distance(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ProviderConfig {
    #[serde(default)]
    kind: ProviderKind,
    #[serde(default = "defaults::default_base_url")]
    base_url: String,
    #[serde(default = "defaults::default_fixture_path")]
    fixture_path: String,
    #[serde(default = "defaults::default_fixture_latency_ms")]
    fixture_latency_ms: u64,
    #[serde(default = "defaults::default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            kind: ProviderKind::default(),
            base_url: defaults::default_base_url(),
            fixture_path: defaults::default_fixture_path(),
            fixture_latency_ms: defaults::default_fixture_latency_ms(),
            request_timeout_secs: defaults::default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SessionConfig {
    #[serde(default = "defaults::default_viewer_id")]
    viewer_id: String,
    #[serde(default)]
    default_plan_id: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            viewer_id: defaults::default_viewer_id(),
            default_plan_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next_slide")]
    key_next_slide: String,
    #[serde(default = "defaults::default_key_prev_slide")]
    key_prev_slide: String,
    #[serde(default = "defaults::default_key_toggle_hold")]
    key_toggle_hold: String,
    #[serde(default = "defaults::default_key_toggle_comments")]
    key_toggle_comments: String,
    #[serde(default = "defaults::default_key_toggle_like")]
    key_toggle_like: String,
    #[serde(default = "defaults::default_key_close_viewer")]
    key_close_viewer: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    key_safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            key_next_slide: defaults::default_key_next_slide(),
            key_prev_slide: defaults::default_key_prev_slide(),
            key_toggle_hold: defaults::default_key_toggle_hold(),
            key_toggle_comments: defaults::default_key_toggle_comments(),
            key_toggle_like: defaults::default_key_toggle_like(),
            key_close_viewer: defaults::default_key_close_viewer(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
