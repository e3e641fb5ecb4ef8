//! Recently opened plan ids for the starter screen.
//!
//! Stored as a small TOML file under `.cache/`. Newest first, deduplicated,
//! capped at [`MAX_RECENT_PLANS`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";
pub const MAX_RECENT_PLANS: usize = 16;

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentEntries {
    #[serde(default)]
    plans: Vec<String>,
}

fn recent_path() -> PathBuf {
    Path::new(CACHE_DIR).join("recent_plans.toml")
}

pub fn list_recent_plans(limit: usize) -> Vec<String> {
    list_recent_plans_in(&recent_path(), limit)
}

/// Move `plan_id` to the front of the list. Failures only log.
pub fn remember_plan(plan_id: &str) {
    if let Err(err) = remember_plan_in(&recent_path(), plan_id) {
        warn!(plan_id, "Failed to update recent plans: {err:#}");
    }
}

fn list_recent_plans_in(path: &Path, limit: usize) -> Vec<String> {
    let Ok(data) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match toml::from_str::<RecentEntries>(&data) {
        Ok(entries) => entries.plans.into_iter().take(limit).collect(),
        Err(err) => {
            warn!(path = %path.display(), "Ignoring malformed recent plans cache: {err}");
            Vec::new()
        }
    }
}

fn remember_plan_in(path: &Path, plan_id: &str) -> Result<()> {
    let plan_id = plan_id.trim();
    if plan_id.is_empty() {
        return Ok(());
    }
    let mut plans = list_recent_plans_in(path, MAX_RECENT_PLANS);
    plans.retain(|existing| existing != plan_id);
    plans.insert(0, plan_id.to_string());
    plans.truncate(MAX_RECENT_PLANS);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents =
        toml::to_string(&RecentEntries { plans }).context("Failed to encode recent plans")?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(plan_id, "Remembered recent plan");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir()
            .join(format!("tripstory-{name}-{}-{nanos}", std::process::id()))
            .join("recent_plans.toml")
    }

    #[test]
    fn newest_plan_moves_to_front_without_duplicates() {
        let path = scratch_file("recent-order");
        remember_plan_in(&path, "kyoto").expect("write");
        remember_plan_in(&path, "lisbon").expect("write");
        remember_plan_in(&path, "kyoto").expect("write");
        assert_eq!(list_recent_plans_in(&path, 10), vec!["kyoto", "lisbon"]);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn list_is_capped() {
        let path = scratch_file("recent-cap");
        for idx in 0..(MAX_RECENT_PLANS + 4) {
            remember_plan_in(&path, &format!("plan-{idx}")).expect("write");
        }
        let plans = list_recent_plans_in(&path, usize::MAX);
        assert_eq!(plans.len(), MAX_RECENT_PLANS);
        assert_eq!(plans[0], format!("plan-{}", MAX_RECENT_PLANS + 3));
        assert_eq!(list_recent_plans_in(&path, 2).len(), 2);
        let _ = fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn missing_or_blank_input_is_harmless() {
        let path = scratch_file("recent-blank");
        assert!(list_recent_plans_in(&path, 5).is_empty());
        remember_plan_in(&path, "   ").expect("blank ignored");
        assert!(!path.exists());
    }
}
