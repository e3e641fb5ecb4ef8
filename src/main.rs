//! Entry point for the plan story viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Build the plan provider and launch the GUI.

mod app;
mod cache;
mod comments;
mod config;
mod engagement;
mod provider;
mod schedule;
mod story;

use crate::app::run_app;
use crate::config::{load_config, serialize_config};
use crate::provider::provider_from_config;
use anyhow::{Context, Result, bail};
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Consume a pending Ctrl+C request.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::AcqRel)
}

struct CliArgs {
    plan_id: Option<String>,
    print_config: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let mut config = load_config(Path::new("conf/config.toml"));
    if args.print_config {
        print!("{}", serialize_config(&config)?);
        return Ok(());
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());
    if let Some(plan_id) = args.plan_id {
        config.default_plan_id = Some(plan_id);
    }
    info!(
        level = %config.log_level,
        provider = %config.provider_kind,
        viewer_id = %config.viewer_id,
        plan = ?config.default_plan_id,
        "Starting plan story viewer"
    );
    info!(
        slide_duration_ms = config.slide_duration_ms,
        hold_delay_ms = config.hold_delay_ms,
        swipe_dismiss_distance = config.swipe_dismiss_distance,
        "Active playback configuration"
    );

    if let Err(err) = ctrlc::set_handler(|| {
        SIGINT_REQUESTED.store(true, Ordering::Release);
    }) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
    }

    let provider = provider_from_config(&config)?;
    run_app(config, provider).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs {
        plan_id: None,
        print_config: false,
    };
    for arg in args {
        match arg.as_str() {
            "--print-config" => parsed.print_config = true,
            flag if flag.starts_with("--") => {
                bail!("Unknown flag {flag}\nUsage: tripstory [--print-config] [plan-id]")
            }
            _ if parsed.plan_id.is_some() => {
                bail!("Usage: tripstory [--print-config] [plan-id]")
            }
            _ => {
                let trimmed = arg.trim();
                if !trimmed.is_empty() {
                    parsed.plan_id = Some(trimmed.to_string());
                }
            }
        }
    }
    Ok(parsed)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn positional_plan_id_is_optional() {
        let parsed = parse_args(args(&[])).expect("no args");
        assert!(parsed.plan_id.is_none());
        let parsed = parse_args(args(&["kyoto"])).expect("plan id");
        assert_eq!(parsed.plan_id.as_deref(), Some("kyoto"));
        assert!(!parsed.print_config);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_positionals() {
        assert!(parse_args(args(&["--verbose"])).is_err());
        assert!(parse_args(args(&["a", "b"])).is_err());
        assert!(parse_args(args(&["--print-config"])).expect("flag").print_config);
    }
}
