use super::http::fetch_remote_image;
use super::{ImageRef, PlanDetail, PlanProvider, is_remote_ref};
use crate::comments::Comment;
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixturePlan {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location_label: String,
    #[serde(default)]
    pub slides: Vec<ImageRef>,
    /// Viewer ids that like the plan.
    #[serde(default)]
    pub likes: BTreeSet<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub plans: BTreeMap<String, FixturePlan>,
}

#[derive(Debug, Default)]
struct Store {
    data: FixtureData,
    next_comment_id: u64,
}

/// In-memory provider seeded from a JSON file.
pub struct FixtureProvider {
    store: Mutex<Store>,
    asset_root: PathBuf,
    latency: Duration,
    fail_engagement: AtomicBool,
    fail_comment_mutations: AtomicBool,
}

impl FixtureProvider {
    pub fn new(data: FixtureData, asset_root: PathBuf) -> Self {
        Self {
            store: Mutex::new(Store {
                data,
                next_comment_id: 0,
            }),
            asset_root,
            latency: Duration::ZERO,
            fail_engagement: AtomicBool::new(false),
            fail_comment_mutations: AtomicBool::new(false),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let data: FixtureData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        info!(
            path = %path.display(),
            plans = data.plans.len(),
            "Loaded plan fixture"
        );
        let asset_root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(data, asset_root))
    }

    /// Artificial delay applied to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn set_fail_engagement(&self, fail: bool) {
        self.fail_engagement.store(fail, Ordering::Release);
    }

    pub fn set_fail_comment_mutations(&self, fail: bool) {
        self.fail_comment_mutations.store(fail, Ordering::Release);
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }

    fn with_plan<T>(&self, plan_id: &str, f: impl FnOnce(&mut Store, &str) -> Result<T>) -> Result<T> {
        self.simulate_latency();
        let mut store = self
            .store
            .lock()
            .map_err(|_| anyhow!("fixture store lock poisoned"))?;
        if !store.data.plans.contains_key(plan_id) {
            bail!("plan {plan_id} not found");
        }
        f(&mut store, plan_id)
    }
}

fn plan_mut<'a>(store: &'a mut Store, plan_id: &str) -> Result<&'a mut FixturePlan> {
    store
        .data
        .plans
        .get_mut(plan_id)
        .ok_or_else(|| anyhow!("plan {plan_id} not found"))
}

fn unix_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{secs}")
}

impl PlanProvider for FixtureProvider {
    fn fetch_plan_detail(&self, plan_id: &str, viewer_id: &str) -> Result<PlanDetail> {
        self.with_plan(plan_id, |store, plan_id| {
            let plan = plan_mut(store, plan_id)?;
            Ok(PlanDetail {
                slides: plan.slides.clone(),
                like_count: plan.likes.len() as u64,
                liked: plan.likes.contains(viewer_id),
                comment_count: plan.comments.len() as u64,
                title: plan.title.clone(),
                location_label: plan.location_label.clone(),
            })
        })
    }

    fn fetch_comments(&self, plan_id: &str) -> Result<Vec<Comment>> {
        self.with_plan(plan_id, |store, plan_id| {
            Ok(plan_mut(store, plan_id)?.comments.clone())
        })
    }

    fn post_comment(
        &self,
        plan_id: &str,
        viewer_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<()> {
        if self.fail_comment_mutations.load(Ordering::Acquire) {
            bail!("comment service unavailable");
        }
        self.with_plan(plan_id, |store, plan_id| {
            store.next_comment_id += 1;
            let id = format!("fx-{}", store.next_comment_id);
            let plan = plan_mut(store, plan_id)?;
            if let Some(parent) = parent_id {
                let parent_is_root = plan
                    .comments
                    .iter()
                    .any(|c| c.id == parent && c.is_root());
                if !parent_is_root {
                    bail!("parent {parent} is not a root comment");
                }
            }
            debug!(plan_id, %id, parent = ?parent_id, "Fixture stored comment");
            plan.comments.push(Comment {
                id,
                parent_id: parent_id.map(str::to_string),
                author_id: viewer_id.to_string(),
                author_name: viewer_id.to_string(),
                avatar_ref: None,
                content: content.to_string(),
                created_at: unix_timestamp(),
            });
            Ok(())
        })
    }

    fn delete_comment(&self, plan_id: &str, comment_id: &str, viewer_id: &str) -> Result<()> {
        if self.fail_comment_mutations.load(Ordering::Acquire) {
            bail!("comment service unavailable");
        }
        self.with_plan(plan_id, |store, plan_id| {
            let plan = plan_mut(store, plan_id)?;
            let Some(position) = plan.comments.iter().position(|c| c.id == comment_id) else {
                bail!("comment {comment_id} not found");
            };
            if plan.comments[position].author_id != viewer_id {
                bail!("comment {comment_id} belongs to another author");
            }
            plan.comments.remove(position);
            Ok(())
        })
    }

    fn like(&self, plan_id: &str, viewer_id: &str) -> Result<()> {
        if self.fail_engagement.load(Ordering::Acquire) {
            bail!("engagement service unavailable");
        }
        self.with_plan(plan_id, |store, plan_id| {
            plan_mut(store, plan_id)?.likes.insert(viewer_id.to_string());
            Ok(())
        })
    }

    fn unlike(&self, plan_id: &str, viewer_id: &str) -> Result<()> {
        if self.fail_engagement.load(Ordering::Acquire) {
            bail!("engagement service unavailable");
        }
        self.with_plan(plan_id, |store, plan_id| {
            plan_mut(store, plan_id)?.likes.remove(viewer_id);
            Ok(())
        })
    }

    fn load_image(&self, image_ref: &str) -> Result<Vec<u8>> {
        if is_remote_ref(image_ref) {
            return fetch_remote_image(image_ref);
        }
        let path = self.asset_root.join(image_ref);
        fs::read(&path).with_context(|| format!("Failed to read slide {}", path.display()))
    }
}

#[cfg(test)]
pub(crate) fn sample_provider() -> FixtureProvider {
    use crate::comments::sample_comment;

    let mut plans = BTreeMap::new();
    plans.insert(
        "kyoto".to_string(),
        FixturePlan {
            title: "Three days in Kyoto".to_string(),
            location_label: "Kyoto, Japan".to_string(),
            slides: vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()],
            likes: BTreeSet::from(["someone-else".to_string()]),
            comments: vec![
                sample_comment("1", None),
                sample_comment("2", None),
                sample_comment("3", Some("1")),
            ],
        },
    );
    plans.insert("empty".to_string(), FixturePlan::default());
    FixtureProvider::new(FixtureData { plans }, PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_reflects_viewer_like_state() {
        let provider = sample_provider();
        let detail = provider.fetch_plan_detail("kyoto", "viewer").expect("detail");
        assert_eq!(detail.slides.len(), 3);
        assert_eq!(detail.like_count, 1);
        assert!(!detail.liked);
        assert_eq!(detail.comment_count, 3);

        provider.like("kyoto", "viewer").expect("like");
        let detail = provider.fetch_plan_detail("kyoto", "viewer").expect("detail");
        assert!(detail.liked);
        assert_eq!(detail.like_count, 2);
    }

    #[test]
    fn unknown_plan_is_an_error() {
        let provider = sample_provider();
        assert!(provider.fetch_comments("nowhere").is_err());
    }

    #[test]
    fn replies_must_target_roots() {
        let provider = sample_provider();
        provider
            .post_comment("kyoto", "viewer", "nice", Some("1"))
            .expect("reply to root");
        assert!(
            provider
                .post_comment("kyoto", "viewer", "nested", Some("3"))
                .is_err()
        );
        let comments = provider.fetch_comments("kyoto").expect("comments");
        let posted = comments.last().expect("posted");
        assert_eq!(posted.parent_id.as_deref(), Some("1"));
        assert_eq!(posted.author_id, "viewer");
    }

    #[test]
    fn only_author_can_delete_and_replies_survive() {
        let provider = sample_provider();
        assert!(provider.delete_comment("kyoto", "1", "viewer").is_err());
        provider
            .delete_comment("kyoto", "1", "author-1")
            .expect("author deletes");
        let comments = provider.fetch_comments("kyoto").expect("comments");
        assert!(comments.iter().any(|c| c.id == "3"));
        assert!(comments.iter().all(|c| c.id != "1"));
    }

    #[test]
    fn injected_failures_are_reported() {
        let provider = sample_provider();
        provider.set_fail_engagement(true);
        assert!(provider.like("kyoto", "viewer").is_err());
        provider.set_fail_comment_mutations(true);
        assert!(provider.post_comment("kyoto", "viewer", "hi", None).is_err());
    }
}
