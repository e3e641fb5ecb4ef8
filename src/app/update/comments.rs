use super::super::messages::{CommentAction, ViewerId};
use super::super::state::App;
use super::Effect;
use crate::comments::{Comment, CommentId};
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_toggle_comments(&mut self, effects: &mut Vec<Effect>) {
        let panel_open = self.viewer.as_ref().map(|screen| screen.panel.is_open());
        match panel_open {
            Some(true) => self.close_comments(effects),
            Some(false) => self.open_comments(effects),
            None => {}
        }
    }

    fn open_comments(&mut self, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        let Some(controller) = screen.controller.as_mut() else {
            return;
        };
        let playback = controller.open_panel(now);
        screen.panel.open();
        screen.panel.set_loading();
        screen.gestures.set_suppressed(true);
        let viewer = screen.id;
        info!(viewer, plan_id = %screen.plan_id, "Opened comment panel");
        effects.push(Effect::FetchComments {
            viewer,
            plan_id: screen.plan_id.clone(),
        });
        self.apply_playback_effects(viewer, playback, effects);
    }

    pub(super) fn close_comments(&mut self, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        if !screen.panel.is_open() {
            return;
        }
        screen.panel.close();
        screen.gestures.set_suppressed(false);
        let viewer = screen.id;
        info!(viewer, "Closed comment panel");
        let playback = screen
            .controller
            .as_mut()
            .map(|controller| controller.close_panel(now));
        if let Some(playback) = playback {
            self.apply_playback_effects(viewer, playback, effects);
        }
    }

    pub(super) fn handle_comments_loaded(
        &mut self,
        viewer: ViewerId,
        result: Result<Vec<Comment>, String>,
    ) {
        let Some(screen) = self.viewer_mut(viewer) else {
            debug!(viewer, "Discarding comments for a closed viewer");
            return;
        };
        match result {
            Ok(comments) => {
                debug!(viewer, count = comments.len(), "Comments loaded");
                screen.comment_count = comments.len() as u64;
                screen.panel.set_comments(comments);
            }
            Err(error) => {
                warn!(viewer, "Failed to load comments: {error}");
                screen.panel.load_failed(error);
            }
        }
    }

    pub(super) fn handle_toggle_replies(&mut self, root_id: CommentId) {
        if let Some(screen) = self.viewer.as_mut() {
            screen.panel.toggle_expanded(&root_id);
        }
    }

    pub(super) fn handle_begin_reply(&mut self, comment_id: CommentId) {
        if let Some(screen) = self.viewer.as_mut() {
            screen.panel.begin_reply(&comment_id);
        }
    }

    pub(super) fn handle_cancel_reply(&mut self) {
        if let Some(screen) = self.viewer.as_mut() {
            screen.panel.cancel_reply();
        }
    }

    pub(super) fn handle_draft_changed(&mut self, draft: String) {
        if let Some(screen) = self.viewer.as_mut() {
            screen.panel.set_draft(draft);
        }
    }

    pub(super) fn handle_dismiss_comment_error(&mut self) {
        if let Some(screen) = self.viewer.as_mut() {
            screen.panel.dismiss_error();
        }
    }

    pub(super) fn handle_submit_comment(&mut self, effects: &mut Vec<Effect>) {
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        if !screen.panel.is_open() {
            return;
        }
        let Some(submission) = screen.panel.take_submission() else {
            return;
        };
        info!(
            viewer = screen.id,
            parent = ?submission.parent_id,
            chars = submission.content.chars().count(),
            "Posting comment"
        );
        effects.push(Effect::PostComment {
            viewer: screen.id,
            plan_id: screen.plan_id.clone(),
            submission,
        });
    }

    pub(super) fn handle_delete_comment(&mut self, comment_id: CommentId, effects: &mut Vec<Effect>) {
        let viewer_id = self.config.viewer_id.clone();
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        let own = screen
            .panel
            .comment(&comment_id)
            .is_some_and(|comment| comment.author_id == viewer_id);
        if !own {
            debug!(%comment_id, "Ignoring delete for a comment owned by someone else");
            return;
        }
        info!(viewer = screen.id, %comment_id, "Deleting comment");
        effects.push(Effect::DeleteComment {
            viewer: screen.id,
            plan_id: screen.plan_id.clone(),
            comment_id,
        });
    }

    /// Outcome of a post or delete. The list is re-fetched either way.
    pub(super) fn handle_comment_mutation_finished(
        &mut self,
        viewer: ViewerId,
        action: CommentAction,
        result: Result<(), String>,
        effects: &mut Vec<Effect>,
    ) {
        let Some(screen) = self.viewer_mut(viewer) else {
            return;
        };
        screen.panel.record_mutation(action.verb(), &result);
        screen.panel.set_loading();
        effects.push(Effect::FetchComments {
            viewer,
            plan_id: screen.plan_id.clone(),
        });
    }
}
