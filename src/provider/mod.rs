//! Plan data sources.
//!
//! The viewer only talks to [`PlanProvider`]. Calls are blocking; the app
//! runs each one on tokio's blocking pool so the UI loop never waits on the
//! network.

pub(crate) mod fixture;
mod http;

pub use fixture::FixtureProvider;
pub use http::HttpProvider;

use crate::comments::Comment;
use crate::config::{AppConfig, ProviderKind};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// `http(s)://` URL or local file path of one slide.
pub type ImageRef = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(default)]
    pub slides: Vec<ImageRef>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location_label: String,
}

pub trait PlanProvider: Send + Sync {
    fn fetch_plan_detail(&self, plan_id: &str, viewer_id: &str) -> Result<PlanDetail>;

    fn fetch_comments(&self, plan_id: &str) -> Result<Vec<Comment>>;

    fn post_comment(
        &self,
        plan_id: &str,
        viewer_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<()>;

    fn delete_comment(&self, plan_id: &str, comment_id: &str, viewer_id: &str) -> Result<()>;

    fn like(&self, plan_id: &str, viewer_id: &str) -> Result<()>;

    fn unlike(&self, plan_id: &str, viewer_id: &str) -> Result<()>;

    fn load_image(&self, image_ref: &str) -> Result<Vec<u8>>;
}

pub fn provider_from_config(config: &AppConfig) -> Result<Arc<dyn PlanProvider>> {
    info!(kind = %config.provider_kind, "Creating plan provider");
    let provider: Arc<dyn PlanProvider> = match config.provider_kind {
        ProviderKind::Http => Arc::new(HttpProvider::new(
            &config.base_url,
            config.request_timeout(),
        )?),
        ProviderKind::Fixture => Arc::new(
            FixtureProvider::load(Path::new(&config.fixture_path))?
                .with_latency(config.fixture_latency()),
        ),
    };
    Ok(provider)
}

pub(crate) fn is_remote_ref(image_ref: &str) -> bool {
    image_ref.starts_with("http://") || image_ref.starts_with("https://")
}
