use super::thread::{build_thread, reply_counts, reply_parent_for};
use super::{Comment, CommentId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Root a new reply will be attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub parent_id: CommentId,
    pub author_name: String,
}

/// Text ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSubmission {
    pub content: String,
    pub parent_id: Option<CommentId>,
}

/// Modal comment overlay state. Expansion is transient and cleared on close.
#[derive(Debug, Default)]
pub struct CommentPanel {
    open: bool,
    comments: Vec<Comment>,
    expanded: HashSet<CommentId>,
    draft: String,
    reply_target: Option<ReplyTarget>,
    loading: bool,
    last_error: Option<String>,
}

impl CommentPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.expanded.clear();
        self.reply_target = None;
        self.draft.clear();
        self.last_error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Replace the list wholesale with the provider's view.
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.loading = false;
        self.comments = comments;
        let present: HashSet<&str> = self
            .comments
            .iter()
            .filter(|c| c.is_root())
            .map(|c| c.id.as_str())
            .collect();
        self.expanded.retain(|id| present.contains(id.as_str()));
        if let Some(target) = &self.reply_target {
            if !present.contains(target.parent_id.as_str()) {
                debug!(parent_id = %target.parent_id, "Reply target vanished; clearing");
                self.reply_target = None;
            }
        }
    }

    pub fn load_failed(&mut self, error: String) {
        self.loading = false;
        warn!(%error, "Comment list could not be loaded");
        self.last_error = Some(error);
    }

    pub fn thread(&self) -> Vec<&Comment> {
        build_thread(&self.comments, &self.expanded)
    }

    pub fn reply_count(&self, root_id: &str) -> usize {
        reply_counts(&self.comments)
            .get(root_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn is_expanded(&self, root_id: &str) -> bool {
        self.expanded.contains(root_id)
    }

    /// Only roots can be expanded; anything else is ignored.
    pub fn toggle_expanded(&mut self, root_id: &str) {
        let is_root = self
            .comment(root_id)
            .map(Comment::is_root)
            .unwrap_or(false);
        if !is_root {
            return;
        }
        if !self.expanded.remove(root_id) {
            self.expanded.insert(root_id.to_string());
        }
    }

    pub fn begin_reply(&mut self, comment_id: &str) {
        let Some(target) = self.comment(comment_id) else {
            return;
        };
        let reply = ReplyTarget {
            parent_id: reply_parent_for(target),
            author_name: target.author_name.clone(),
        };
        // Make the new reply visible once the list is refetched.
        self.expanded.insert(reply.parent_id.clone());
        self.reply_target = Some(reply);
    }

    pub fn cancel_reply(&mut self) {
        self.reply_target = None;
    }

    pub fn reply_target(&self) -> Option<&ReplyTarget> {
        self.reply_target.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    /// Consume the draft. Blank drafts yield nothing and are kept.
    pub fn take_submission(&mut self) -> Option<CommentSubmission> {
        let content = self.draft.trim();
        if content.is_empty() {
            return None;
        }
        let submission = CommentSubmission {
            content: content.to_string(),
            parent_id: self.reply_target.take().map(|target| target.parent_id),
        };
        self.draft.clear();
        Some(submission)
    }

    /// Post/delete outcome. Failures are kept for display until the next
    /// success or until the panel closes.
    pub fn record_mutation(&mut self, action: &str, outcome: &Result<(), String>) {
        match outcome {
            Ok(()) => self.last_error = None,
            Err(error) => {
                warn!(action, %error, "Comment mutation failed");
                self.last_error = Some(format!("Could not {action} comment: {error}"));
            }
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::sample_comment;

    fn panel() -> CommentPanel {
        let mut panel = CommentPanel::new();
        panel.open();
        panel.set_comments(vec![
            sample_comment("1", None),
            sample_comment("2", None),
            sample_comment("3", Some("1")),
        ]);
        panel
    }

    fn thread_ids(panel: &CommentPanel) -> Vec<String> {
        panel.thread().iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn toggling_twice_restores_collapsed_view() {
        let mut panel = panel();
        panel.toggle_expanded("1");
        assert_eq!(thread_ids(&panel), vec!["1", "3", "2"]);
        panel.toggle_expanded("1");
        assert_eq!(thread_ids(&panel), vec!["1", "2"]);
    }

    #[test]
    fn replies_cannot_be_expanded() {
        let mut panel = panel();
        panel.toggle_expanded("3");
        assert!(!panel.is_expanded("3"));
    }

    #[test]
    fn replying_to_a_reply_posts_under_its_root() {
        let mut panel = panel();
        panel.begin_reply("3");
        panel.set_draft("  me too ".to_string());
        let submission = panel.take_submission().expect("submission");
        assert_eq!(submission.parent_id.as_deref(), Some("1"));
        assert_eq!(submission.content, "me too");
        assert_eq!(panel.draft(), "");
        assert!(panel.reply_target().is_none());
    }

    #[test]
    fn blank_draft_is_not_submitted() {
        let mut panel = panel();
        panel.set_draft("   ".to_string());
        assert!(panel.take_submission().is_none());
    }

    #[test]
    fn closing_clears_expansion() {
        let mut panel = panel();
        panel.toggle_expanded("1");
        panel.close();
        panel.open();
        assert!(!panel.is_expanded("1"));
    }

    #[test]
    fn mutation_failure_is_surfaced_until_success() {
        let mut panel = panel();
        panel.record_mutation("post", &Err("timeout".to_string()));
        assert_eq!(panel.last_error(), Some("Could not post comment: timeout"));
        panel.record_mutation("post", &Ok(()));
        assert_eq!(panel.last_error(), None);
    }

    #[test]
    fn deleted_root_drops_expansion_and_hides_replies() {
        let mut panel = panel();
        panel.toggle_expanded("1");
        panel.set_comments(vec![sample_comment("2", None), sample_comment("3", Some("1"))]);
        assert!(!panel.is_expanded("1"));
        assert_eq!(thread_ids(&panel), vec!["2"]);
    }
}
