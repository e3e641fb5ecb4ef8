use super::messages::ViewerId;
use crate::comments::{CommentId, CommentSubmission};
use crate::engagement::EngagementRequest;
use crate::schedule::ScheduledTask;

mod comments;
mod core;
mod engagement;
mod playback;
mod viewer;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    FetchPlan {
        viewer: ViewerId,
        plan_id: String,
    },
    FetchComments {
        viewer: ViewerId,
        plan_id: String,
    },
    LoadSlideImage {
        viewer: ViewerId,
        index: usize,
        image_ref: String,
    },
    ScheduleAdvance {
        viewer: ViewerId,
        task: ScheduledTask,
    },
    CancelAdvance,
    ScheduleHoldCheck {
        viewer: ViewerId,
        task: ScheduledTask,
    },
    PostComment {
        viewer: ViewerId,
        plan_id: String,
        submission: CommentSubmission,
    },
    DeleteComment {
        viewer: ViewerId,
        plan_id: String,
        comment_id: CommentId,
    },
    SendEngagement {
        viewer: ViewerId,
        plan_id: String,
        request: EngagementRequest,
    },
    RememberPlan(String),
    QuitSafely,
}
