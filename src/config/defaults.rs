pub(crate) fn default_window_width() -> f32 {
    480.0
}

pub(crate) fn default_window_height() -> f32 {
    860.0
}

pub(crate) fn default_slide_duration_ms() -> u64 {
    6000
}

pub(crate) fn default_progress_tick_ms() -> u64 {
    50
}

pub(crate) fn default_hold_delay_ms() -> u64 {
    180
}

pub(crate) fn default_swipe_dismiss_distance() -> f32 {
    120.0
}

pub(crate) fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

pub(crate) fn default_fixture_path() -> String {
    "conf/fixture.json".to_string()
}

pub(crate) fn default_fixture_latency_ms() -> u64 {
    350
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_viewer_id() -> String {
    "viewer-1".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_next_slide() -> String {
    "right".to_string()
}

pub(crate) fn default_key_prev_slide() -> String {
    "left".to_string()
}

pub(crate) fn default_key_toggle_hold() -> String {
    "space".to_string()
}

pub(crate) fn default_key_toggle_comments() -> String {
    "c".to_string()
}

pub(crate) fn default_key_toggle_like() -> String {
    "l".to_string()
}

pub(crate) fn default_key_close_viewer() -> String {
    "escape".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "ctrl+q".to_string()
}
