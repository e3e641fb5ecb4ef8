use super::{PlanDetail, PlanProvider, is_remote_ref};
use crate::comments::Comment;
use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::Lazy;
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("tripstory/", env!("CARGO_PKG_VERSION"));

static IMAGE_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Download a remote slide image with the shared client.
pub(super) fn fetch_remote_image(url: &str) -> Result<Vec<u8>> {
    let response = IMAGE_CLIENT
        .get(url)
        .send()
        .with_context(|| format!("Failed to request image {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("Image request {url} failed with HTTP {status}");
    }
    let bytes = response
        .bytes()
        .with_context(|| format!("Failed to read image body {url}"))?;
    Ok(bytes.to_vec())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostCommentBody<'a> {
    viewer_id: &'a str,
    content: &'a str,
    parent_id: Option<&'a str>,
}

/// REST backend client.
pub struct HttpProvider {
    base_url: Url,
    client: Client,
}

impl HttpProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid provider base URL {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("Provider base URL {base_url} cannot carry a path");
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow!("Provider base URL cannot carry a path"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Vec<u8>> {
        let response = request
            .send()
            .with_context(|| format!("{what}: request failed"))?;
        let status = response.status();
        let body = response
            .bytes()
            .with_context(|| format!("{what}: failed to read response body"))?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            bail!("{what}: HTTP {status}: {}", text.trim());
        }
        debug!(what, status = status.as_u16(), bytes = body.len(), "Provider request completed");
        Ok(body.to_vec())
    }
}

impl PlanProvider for HttpProvider {
    fn fetch_plan_detail(&self, plan_id: &str, viewer_id: &str) -> Result<PlanDetail> {
        let url = self.endpoint(&["plans", plan_id])?;
        let request = self.client.get(url).query(&[("viewerId", viewer_id)]);
        let body = self.send(request, "fetch plan detail")?;
        serde_json::from_slice(&body).context("Failed to parse plan detail")
    }

    fn fetch_comments(&self, plan_id: &str) -> Result<Vec<Comment>> {
        let url = self.endpoint(&["plans", plan_id, "comments"])?;
        let body = self.send(self.client.get(url), "fetch comments")?;
        serde_json::from_slice(&body).context("Failed to parse comment list")
    }

    fn post_comment(
        &self,
        plan_id: &str,
        viewer_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<()> {
        let url = self.endpoint(&["plans", plan_id, "comments"])?;
        let payload = serde_json::to_vec(&PostCommentBody {
            viewer_id,
            content,
            parent_id,
        })
        .context("Failed to encode comment")?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.send(request, "post comment").map(|_| ())
    }

    fn delete_comment(&self, plan_id: &str, comment_id: &str, viewer_id: &str) -> Result<()> {
        let url = self.endpoint(&["plans", plan_id, "comments", comment_id])?;
        let request = self.client.delete(url).query(&[("viewerId", viewer_id)]);
        self.send(request, "delete comment").map(|_| ())
    }

    fn like(&self, plan_id: &str, viewer_id: &str) -> Result<()> {
        let url = self.endpoint(&["plans", plan_id, "likes"])?;
        let request = self.client.post(url).query(&[("viewerId", viewer_id)]);
        self.send(request, "like plan").map(|_| ())
    }

    fn unlike(&self, plan_id: &str, viewer_id: &str) -> Result<()> {
        let url = self.endpoint(&["plans", plan_id, "likes"])?;
        let request = self.client.delete(url).query(&[("viewerId", viewer_id)]);
        self.send(request, "unlike plan").map(|_| ())
    }

    fn load_image(&self, image_ref: &str) -> Result<Vec<u8>> {
        if is_remote_ref(image_ref) {
            let request = self.client.get(image_ref);
            return self.send(request, "load slide image");
        }
        let url = self.base_url.join(image_ref).context("Invalid slide image path")?;
        self.send(self.client.get(url), "load slide image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_extend_base_path_and_escape_ids() {
        let provider =
            HttpProvider::new("https://plans.example.com/api/", Duration::from_secs(1))
                .expect("provider");
        let url = provider
            .endpoint(&["plans", "a b/c", "comments"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://plans.example.com/api/plans/a%20b%2Fc/comments"
        );
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        assert!(HttpProvider::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
    }
}
