use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config tables")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ProviderKind, ThemeMode};
    use std::time::Duration;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("").expect("empty config parses");
        assert_eq!(config.slide_duration_ms, 6000);
        assert_eq!(config.hold_delay_ms, 180);
        assert_eq!(config.swipe_dismiss_distance, 120.0);
        assert_eq!(config.provider_kind, ProviderKind::Fixture);
        assert_eq!(config.theme, ThemeMode::Night);
    }

    #[test]
    fn tables_override_individual_fields() {
        let config = parse_config(
            r#"
            [playback]
            slide_duration_ms = 4000

            [gestures]
            hold_delay_ms = 250

            [provider]
            kind = "http"
            base_url = "https://plans.example.com/api"

            [session]
            viewer_id = "u-42"
            default_plan_id = "kyoto"

            [logging]
            log_level = "warn"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.slide_duration(), Duration::from_secs(4));
        assert_eq!(config.progress_tick_ms, 50);
        assert_eq!(config.gesture_config().hold_delay, Duration::from_millis(250));
        assert_eq!(config.provider_kind, ProviderKind::Http);
        assert_eq!(config.base_url, "https://plans.example.com/api");
        assert_eq!(config.viewer_id, "u-42");
        assert_eq!(config.default_plan_id.as_deref(), Some("kyoto"));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn invalid_enum_is_an_error() {
        assert!(parse_config("[provider]\nkind = \"carrier-pigeon\"").is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.slide_duration_ms = 3210;
        config.key_toggle_like = "ctrl+l".to_string();
        let text = serialize_config(&config).expect("serializes");
        let parsed = parse_config(&text).expect("parses");
        assert_eq!(parsed.slide_duration_ms, 3210);
        assert_eq!(parsed.key_toggle_like, "ctrl+l");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/tripstory/config.toml"));
        assert_eq!(config.viewer_id, "viewer-1");
    }
}
