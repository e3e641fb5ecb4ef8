use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::story::GestureCommand;
use tracing::info;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::OpenPlanInputChanged(input) => self.starter.plan_input = input,
            Message::OpenPlanRequested => self.handle_open_plan_requested(&mut effects),
            Message::OpenPlan(plan_id) => self.open_plan(plan_id, &mut effects),
            Message::PlanLoaded { viewer, result } => {
                self.handle_plan_loaded(viewer, result, &mut effects)
            }
            Message::SlideImageLoaded {
                viewer,
                index,
                result,
            } => self.handle_slide_image_loaded(viewer, index, result),
            Message::CommentsLoaded { viewer, result } => {
                self.handle_comments_loaded(viewer, result)
            }
            Message::AdvanceDue { viewer, stamp } => {
                self.handle_advance_due(viewer, stamp, &mut effects)
            }
            Message::HoldCheckDue { viewer, stamp } => {
                self.handle_hold_check_due(viewer, stamp, &mut effects)
            }
            Message::Pointer { phase, position } => {
                self.handle_pointer(phase, position, &mut effects)
            }
            Message::Tick(now) => self.handle_tick(now),
            Message::NextSlide => self.handle_playback_command(GestureCommand::TapRight, &mut effects),
            Message::PreviousSlide => {
                self.handle_playback_command(GestureCommand::TapLeft, &mut effects)
            }
            Message::ToggleHold => self.handle_toggle_hold(&mut effects),
            Message::ToggleComments => self.handle_toggle_comments(&mut effects),
            Message::CloseComments => self.close_comments(&mut effects),
            Message::ToggleReplies(root_id) => self.handle_toggle_replies(root_id),
            Message::BeginReply(comment_id) => self.handle_begin_reply(comment_id),
            Message::CancelReply => self.handle_cancel_reply(),
            Message::DraftChanged(draft) => self.handle_draft_changed(draft),
            Message::SubmitComment => self.handle_submit_comment(&mut effects),
            Message::DeleteComment(comment_id) => {
                self.handle_delete_comment(comment_id, &mut effects)
            }
            Message::DismissCommentError => self.handle_dismiss_comment_error(),
            Message::CommentMutationFinished {
                viewer,
                action,
                result,
            } => self.handle_comment_mutation_finished(viewer, action, result, &mut effects),
            Message::ToggleLike => self.handle_toggle_like(&mut effects),
            Message::LikeResolved {
                viewer,
                ticket,
                result,
            } => self.handle_like_resolved(viewer, ticket, result),
            Message::CloseViewer => self.close_viewer(&mut effects),
            Message::WindowResized { width, height } => {
                self.surface_width = width;
                tracing::debug!(width, height, "Window resized");
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }

    fn handle_open_plan_requested(&mut self, effects: &mut Vec<Effect>) {
        let plan_id = self.starter.plan_input.trim().to_string();
        if plan_id.is_empty() {
            return;
        }
        info!(%plan_id, "Opening plan from starter input");
        self.open_plan(plan_id, effects);
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Received Ctrl+C; quitting");
            effects.push(Effect::QuitSafely);
        }
    }
}
