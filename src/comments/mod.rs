//! Two-level comment threads for a plan.

mod panel;
mod thread;

pub use panel::{CommentPanel, CommentSubmission, ReplyTarget};
pub use thread::{build_thread, reply_counts, reply_parent_for};

use serde::{Deserialize, Serialize};

pub type CommentId = String;

/// A root comment has no parent; a reply points at a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub avatar_ref: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
pub(crate) fn sample_comment(id: &str, parent_id: Option<&str>) -> Comment {
    Comment {
        id: id.to_string(),
        parent_id: parent_id.map(str::to_string),
        author_id: format!("author-{id}"),
        author_name: format!("Author {id}"),
        avatar_ref: None,
        content: format!("comment {id}"),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let payload = r#"{
            "id": "3",
            "parentId": "1",
            "authorId": "u7",
            "authorName": "Mina",
            "content": "Great view!",
            "createdAt": "2026-05-02T10:00:00Z"
        }"#;
        let comment: Comment = serde_json::from_str(payload).expect("valid comment");
        assert_eq!(comment.parent_id.as_deref(), Some("1"));
        assert_eq!(comment.avatar_ref, None);
        assert!(!comment.is_root());
    }
}
