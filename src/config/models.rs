use crate::story::GestureConfig;
use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_slide_duration_ms")]
    pub slide_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_progress_tick_ms")]
    pub progress_tick_ms: u64,
    #[serde(default = "crate::config::defaults::default_hold_delay_ms")]
    pub hold_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_swipe_dismiss_distance")]
    pub swipe_dismiss_distance: f32,
    #[serde(default)]
    pub provider_kind: ProviderKind,
    #[serde(default = "crate::config::defaults::default_base_url")]
    pub base_url: String,
    #[serde(default = "crate::config::defaults::default_fixture_path")]
    pub fixture_path: String,
    #[serde(default = "crate::config::defaults::default_fixture_latency_ms")]
    pub fixture_latency_ms: u64,
    #[serde(default = "crate::config::defaults::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "crate::config::defaults::default_viewer_id")]
    pub viewer_id: String,
    #[serde(default)]
    pub default_plan_id: Option<String>,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_next_slide")]
    pub key_next_slide: String,
    #[serde(default = "crate::config::defaults::default_key_prev_slide")]
    pub key_prev_slide: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_hold")]
    pub key_toggle_hold: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_comments")]
    pub key_toggle_comments: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_like")]
    pub key_toggle_like: String,
    #[serde(default = "crate::config::defaults::default_key_close_viewer")]
    pub key_close_viewer: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            slide_duration_ms: crate::config::defaults::default_slide_duration_ms(),
            progress_tick_ms: crate::config::defaults::default_progress_tick_ms(),
            hold_delay_ms: crate::config::defaults::default_hold_delay_ms(),
            swipe_dismiss_distance: crate::config::defaults::default_swipe_dismiss_distance(),
            provider_kind: ProviderKind::Fixture,
            base_url: crate::config::defaults::default_base_url(),
            fixture_path: crate::config::defaults::default_fixture_path(),
            fixture_latency_ms: crate::config::defaults::default_fixture_latency_ms(),
            request_timeout_secs: crate::config::defaults::default_request_timeout_secs(),
            viewer_id: crate::config::defaults::default_viewer_id(),
            default_plan_id: None,
            log_level: crate::config::defaults::default_log_level(),
            key_next_slide: crate::config::defaults::default_key_next_slide(),
            key_prev_slide: crate::config::defaults::default_key_prev_slide(),
            key_toggle_hold: crate::config::defaults::default_key_toggle_hold(),
            key_toggle_comments: crate::config::defaults::default_key_toggle_comments(),
            key_toggle_like: crate::config::defaults::default_key_toggle_like(),
            key_close_viewer: crate::config::defaults::default_key_close_viewer(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    /// Zero durations would make the viewer skip every slide at once.
    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms.max(1))
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.clamp(10, 1000))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn fixture_latency(&self) -> Duration {
        Duration::from_millis(self.fixture_latency_ms)
    }

    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            hold_delay: Duration::from_millis(self.hold_delay_ms),
            swipe_dismiss_distance: self.swipe_dismiss_distance.max(1.0),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Where plan data comes from.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    Http,
    Fixture,
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::Fixture
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProviderKind::Http => "http",
            ProviderKind::Fixture => "fixture",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
