use crate::comments::{Comment, CommentId};
use crate::provider::PlanDetail;
use crate::schedule::Stamp;
use iced::Point;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Per-open counter; responses tagged with another id are stale.
pub type ViewerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Moved,
    Up,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Post,
    Delete,
}

impl CommentAction {
    pub fn verb(self) -> &'static str {
        match self {
            CommentAction::Post => "post",
            CommentAction::Delete => "delete",
        }
    }
}

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    OpenPlanInputChanged(String),
    OpenPlanRequested,
    OpenPlan(String),
    PlanLoaded {
        viewer: ViewerId,
        result: Result<PlanDetail, String>,
    },
    SlideImageLoaded {
        viewer: ViewerId,
        index: usize,
        result: Result<Vec<u8>, String>,
    },
    CommentsLoaded {
        viewer: ViewerId,
        result: Result<Vec<Comment>, String>,
    },
    AdvanceDue {
        viewer: ViewerId,
        stamp: Stamp,
    },
    HoldCheckDue {
        viewer: ViewerId,
        stamp: Stamp,
    },
    /// Mouse button events carry no position; the last cursor is used.
    Pointer {
        phase: PointerPhase,
        position: Option<Point>,
    },
    Tick(Instant),
    NextSlide,
    PreviousSlide,
    ToggleHold,
    ToggleComments,
    CloseComments,
    ToggleReplies(CommentId),
    BeginReply(CommentId),
    CancelReply,
    DraftChanged(String),
    SubmitComment,
    DeleteComment(CommentId),
    DismissCommentError,
    CommentMutationFinished {
        viewer: ViewerId,
        action: CommentAction,
        result: Result<(), String>,
    },
    ToggleLike,
    LikeResolved {
        viewer: ViewerId,
        ticket: u64,
        result: Result<(), String>,
    },
    CloseViewer,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    PollSystemSignals,
    SafeQuit,
}
