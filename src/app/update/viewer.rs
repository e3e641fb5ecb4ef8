use super::super::messages::ViewerId;
use super::super::state::{App, SlideImage, ViewerScreen};
use super::Effect;
use crate::engagement::{EngagementMutator, EngagementState};
use crate::provider::PlanDetail;
use crate::story::PlaybackController;
use iced::widget::image;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Slides fetched ahead of the one on screen.
const PREFETCH_AHEAD: usize = 1;

impl App {
    pub(super) fn open_plan(&mut self, plan_id: String, effects: &mut Vec<Effect>) {
        let plan_id = plan_id.trim().to_string();
        if plan_id.is_empty() {
            return;
        }
        if self.viewer.is_some() {
            self.close_viewer(effects);
        }
        self.next_viewer_id += 1;
        let id = self.next_viewer_id;
        self.viewer = Some(ViewerScreen::new(
            id,
            plan_id.clone(),
            self.config.gesture_config(),
        ));
        self.starter.notice = None;
        info!(viewer = id, %plan_id, "Opening plan viewer");
        effects.push(Effect::FetchPlan {
            viewer: id,
            plan_id: plan_id.clone(),
        });
        effects.push(Effect::RememberPlan(plan_id));
    }

    pub(super) fn handle_plan_loaded(
        &mut self,
        viewer: ViewerId,
        result: Result<PlanDetail, String>,
        effects: &mut Vec<Effect>,
    ) {
        let slide_duration = self.config.slide_duration();
        let Some(screen) = self.viewer_mut(viewer) else {
            debug!(viewer, "Discarding plan detail for a closed viewer");
            return;
        };
        let detail = match result {
            Ok(detail) => detail,
            Err(error) => {
                warn!(viewer, plan_id = %screen.plan_id, "Failed to load plan: {error}");
                screen.load_error = Some(error);
                return;
            }
        };

        info!(
            viewer,
            plan_id = %screen.plan_id,
            slides = detail.slides.len(),
            likes = detail.like_count,
            comments = detail.comment_count,
            "Plan loaded"
        );
        screen.engagement =
            EngagementMutator::new(EngagementState::new(detail.liked, detail.like_count));
        screen.comment_count = detail.comment_count;
        let (controller, playback) =
            PlaybackController::start(detail.slides.len(), slide_duration, Instant::now());
        let notice = detail
            .slides
            .is_empty()
            .then(|| format!("Plan {} has no slides yet.", screen.plan_id));
        screen.controller = Some(controller);
        screen.detail = Some(detail);
        if notice.is_some() {
            self.starter.notice = notice;
        }
        self.apply_playback_effects(viewer, playback, effects);
    }

    pub(super) fn handle_slide_image_loaded(
        &mut self,
        viewer: ViewerId,
        index: usize,
        result: Result<Vec<u8>, String>,
    ) {
        let Some(screen) = self.viewer_mut(viewer) else {
            return;
        };
        let image = match result {
            Ok(bytes) => {
                debug!(viewer, index, bytes = bytes.len(), "Slide image ready");
                SlideImage::Ready(image::Handle::from_bytes(bytes))
            }
            Err(error) => {
                warn!(viewer, index, "Failed to load slide image: {error}");
                SlideImage::Failed(error)
            }
        };
        screen.images.insert(index, image);
    }

    /// Request the active slide and the next one unless already requested.
    pub(super) fn request_slide_images(
        &mut self,
        viewer: ViewerId,
        index: usize,
        effects: &mut Vec<Effect>,
    ) {
        let Some(screen) = self.viewer_mut(viewer) else {
            return;
        };
        for idx in index..=index + PREFETCH_AHEAD {
            if screen.images.contains_key(&idx) {
                continue;
            }
            let Some(image_ref) = screen.slide_ref(idx).map(str::to_string) else {
                break;
            };
            screen.images.insert(idx, SlideImage::Loading);
            effects.push(Effect::LoadSlideImage {
                viewer,
                index: idx,
                image_ref,
            });
        }
    }

    pub(super) fn close_viewer(&mut self, effects: &mut Vec<Effect>) {
        let Some(screen) = self.viewer.take() else {
            return;
        };
        info!(
            viewer = screen.id,
            plan_id = %screen.plan_id,
            index = ?screen.current_index(),
            "Closing plan viewer"
        );
        effects.push(Effect::CancelAdvance);
        self.refresh_recent_plans();
    }
}
