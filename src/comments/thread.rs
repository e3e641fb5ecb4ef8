use super::{Comment, CommentId};
use std::collections::{HashMap, HashSet};

/// Display order for a flat comment list: each root in its original order,
/// followed by its replies (also in original order) when the root is in
/// `expanded`. Replies whose root is absent are never shown.
pub fn build_thread<'a>(comments: &'a [Comment], expanded: &HashSet<CommentId>) -> Vec<&'a Comment> {
    let mut roots = Vec::new();
    let mut replies_by_parent: HashMap<&str, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        match comment.parent_id.as_deref() {
            None => roots.push(comment),
            Some(parent) => replies_by_parent.entry(parent).or_default().push(comment),
        }
    }

    let mut output = Vec::with_capacity(comments.len());
    for root in roots {
        output.push(root);
        if expanded.contains(&root.id) {
            if let Some(replies) = replies_by_parent.get(root.id.as_str()) {
                output.extend(replies.iter().copied());
            }
        }
    }
    output
}

/// Number of replies attached to each root id.
pub fn reply_counts(comments: &[Comment]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for parent in comments.iter().filter_map(|c| c.parent_id.as_deref()) {
        *counts.entry(parent).or_insert(0) += 1;
    }
    counts
}

/// Parent id for a reply to `target`. Replies always attach to the root so
/// threads never grow past two levels.
pub fn reply_parent_for(target: &Comment) -> CommentId {
    target
        .parent_id
        .clone()
        .unwrap_or_else(|| target.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::sample_comment;

    fn ids(thread: &[&Comment]) -> Vec<String> {
        thread.iter().map(|c| c.id.clone()).collect()
    }

    fn fixture() -> Vec<Comment> {
        vec![
            sample_comment("1", None),
            sample_comment("2", None),
            sample_comment("3", Some("1")),
        ]
    }

    #[test]
    fn collapsed_shows_only_roots() {
        let comments = fixture();
        let thread = build_thread(&comments, &HashSet::new());
        assert_eq!(ids(&thread), vec!["1", "2"]);
    }

    #[test]
    fn expanded_root_inlines_its_replies() {
        let comments = fixture();
        let expanded = HashSet::from(["1".to_string()]);
        let thread = build_thread(&comments, &expanded);
        assert_eq!(ids(&thread), vec!["1", "3", "2"]);
    }

    #[test]
    fn replies_keep_original_relative_order() {
        let comments = vec![
            sample_comment("r2", Some("a")),
            sample_comment("a", None),
            sample_comment("b", None),
            sample_comment("r1", Some("a")),
            sample_comment("r3", Some("b")),
        ];
        let expanded = HashSet::from(["a".to_string(), "b".to_string()]);
        let thread = build_thread(&comments, &expanded);
        assert_eq!(ids(&thread), vec!["a", "r2", "r1", "b", "r3"]);
    }

    #[test]
    fn output_length_counts_expanded_replies_only() {
        let comments = vec![
            sample_comment("a", None),
            sample_comment("b", None),
            sample_comment("a1", Some("a")),
            sample_comment("a2", Some("a")),
            sample_comment("b1", Some("b")),
        ];
        let expanded = HashSet::from(["a".to_string()]);
        assert_eq!(build_thread(&comments, &expanded).len(), 2 + 2);
    }

    #[test]
    fn build_is_deterministic() {
        let comments = fixture();
        let expanded = HashSet::from(["1".to_string()]);
        let first = ids(&build_thread(&comments, &expanded));
        let second = ids(&build_thread(&comments, &expanded));
        assert_eq!(first, second);
    }

    #[test]
    fn orphaned_replies_are_hidden() {
        let comments = vec![sample_comment("2", None), sample_comment("3", Some("1"))];
        let expanded = HashSet::from(["1".to_string(), "2".to_string()]);
        assert_eq!(ids(&build_thread(&comments, &expanded)), vec!["2"]);
    }

    #[test]
    fn reply_to_a_reply_targets_its_root() {
        let comments = fixture();
        assert_eq!(reply_parent_for(&comments[2]), "1");
        assert_eq!(reply_parent_for(&comments[1]), "2");
    }

    #[test]
    fn counts_replies_per_root() {
        let comments = fixture();
        let counts = reply_counts(&comments);
        assert_eq!(counts.get("1"), Some(&1));
        assert_eq!(counts.get("2"), None);
    }
}
