use crate::app::messages::ViewerId;
use crate::comments::CommentPanel;
use crate::engagement::{EngagementMutator, EngagementState};
use crate::provider::PlanDetail;
use crate::story::{GestureConfig, GestureInterpreter, PlaybackController};
use iced::widget::image;
use std::collections::HashMap;

pub enum SlideImage {
    Loading,
    Ready(image::Handle),
    Failed(String),
}

/// Everything owned by one open story viewer. Dropped when it closes.
pub struct ViewerScreen {
    pub(in crate::app) id: ViewerId,
    pub(in crate::app) plan_id: String,
    pub(in crate::app) detail: Option<PlanDetail>,
    pub(in crate::app) load_error: Option<String>,
    pub(in crate::app) controller: Option<PlaybackController>,
    pub(in crate::app) gestures: GestureInterpreter,
    pub(in crate::app) panel: CommentPanel,
    pub(in crate::app) engagement: EngagementMutator,
    pub(in crate::app) comment_count: u64,
    pub(in crate::app) images: HashMap<usize, SlideImage>,
}

impl ViewerScreen {
    pub(in crate::app) fn new(id: ViewerId, plan_id: String, gestures: GestureConfig) -> Self {
        Self {
            id,
            plan_id,
            detail: None,
            load_error: None,
            controller: None,
            gestures: GestureInterpreter::new(gestures),
            panel: CommentPanel::new(),
            engagement: EngagementMutator::new(EngagementState::default()),
            comment_count: 0,
            images: HashMap::new(),
        }
    }

    pub(in crate::app) fn is_loading(&self) -> bool {
        self.detail.is_none() && self.load_error.is_none()
    }

    pub(in crate::app) fn slide_ref(&self, index: usize) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|detail| detail.slides.get(index))
            .map(String::as_str)
    }

    pub(in crate::app) fn current_index(&self) -> Option<usize> {
        self.controller
            .as_ref()
            .and_then(PlaybackController::current_index)
    }
}
