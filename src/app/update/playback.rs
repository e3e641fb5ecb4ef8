use super::super::messages::{PointerPhase, ViewerId};
use super::super::state::App;
use super::Effect;
use crate::schedule::Stamp;
use crate::story::{GestureCommand, PlaybackController, PlaybackEffect, PlaybackState};
use iced::Point;
use std::time::Instant;
use tracing::trace;

impl App {
    /// Run `f` against the controller of viewer `viewer`, if it is open and
    /// its slides have loaded.
    pub(super) fn with_controller<T>(
        &mut self,
        viewer: ViewerId,
        f: impl FnOnce(&mut PlaybackController) -> T,
    ) -> Option<T> {
        self.viewer_mut(viewer)
            .and_then(|screen| screen.controller.as_mut())
            .map(f)
    }

    pub(super) fn apply_playback_effects(
        &mut self,
        viewer: ViewerId,
        playback: Vec<PlaybackEffect>,
        effects: &mut Vec<Effect>,
    ) {
        let mut close = false;
        for effect in playback {
            match effect {
                PlaybackEffect::ScheduleAdvance(task) => {
                    effects.push(Effect::ScheduleAdvance { viewer, task })
                }
                PlaybackEffect::CancelAdvance => effects.push(Effect::CancelAdvance),
                PlaybackEffect::SlideChanged(index) => {
                    self.request_slide_images(viewer, index, effects)
                }
                PlaybackEffect::CloseViewer => close = true,
            }
        }
        if close && self.viewer_mut(viewer).is_some() {
            self.close_viewer(effects);
        }
    }

    pub(super) fn handle_advance_due(
        &mut self,
        viewer: ViewerId,
        stamp: Stamp,
        effects: &mut Vec<Effect>,
    ) {
        let now = Instant::now();
        if let Some(playback) = self.with_controller(viewer, |c| c.advance_due(stamp, now)) {
            self.apply_playback_effects(viewer, playback, effects);
        }
    }

    pub(super) fn handle_hold_check_due(
        &mut self,
        viewer: ViewerId,
        stamp: Stamp,
        effects: &mut Vec<Effect>,
    ) {
        let command = self
            .viewer_mut(viewer)
            .and_then(|screen| screen.gestures.hold_check_due(stamp));
        if let Some(command) = command {
            self.apply_gesture(viewer, command, effects);
        }
    }

    pub(super) fn handle_pointer(
        &mut self,
        phase: PointerPhase,
        position: Option<Point>,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(position) = position {
            self.cursor = position;
        }
        let point = self.cursor;
        let surface_width = self.surface_width;
        let Some(screen) = self.viewer.as_mut() else {
            return;
        };
        if screen.controller.is_none() {
            return;
        }
        let viewer = screen.id;
        let command = match phase {
            PointerPhase::Down => {
                if let Some(task) = screen.gestures.pointer_down(point) {
                    effects.push(Effect::ScheduleHoldCheck { viewer, task });
                }
                None
            }
            PointerPhase::Moved => screen.gestures.pointer_moved(point),
            PointerPhase::Up => screen.gestures.pointer_up(point, surface_width),
            PointerPhase::Lost => screen.gestures.pointer_lost(),
        };
        if let Some(command) = command {
            trace!(viewer, ?command, "Gesture recognized");
            self.apply_gesture(viewer, command, effects);
        }
    }

    pub(super) fn handle_tick(&mut self, now: Instant) {
        if let Some(controller) = self
            .viewer
            .as_mut()
            .and_then(|screen| screen.controller.as_mut())
        {
            controller.tick(now);
        }
    }

    /// Keyboard equivalents of the touch gestures.
    pub(super) fn handle_playback_command(
        &mut self,
        command: GestureCommand,
        effects: &mut Vec<Effect>,
    ) {
        let Some(screen) = self.viewer.as_ref() else {
            return;
        };
        if screen.panel.is_open() {
            return;
        }
        let viewer = screen.id;
        self.apply_gesture(viewer, command, effects);
    }

    pub(super) fn handle_toggle_hold(&mut self, effects: &mut Vec<Effect>) {
        let held = self
            .viewer
            .as_ref()
            .and_then(|screen| screen.controller.as_ref())
            .map(|controller| matches!(controller.state(), PlaybackState::HeldPaused { .. }));
        match held {
            Some(true) => self.handle_playback_command(GestureCommand::Release, effects),
            Some(false) => self.handle_playback_command(GestureCommand::Hold, effects),
            None => {}
        }
    }

    fn apply_gesture(&mut self, viewer: ViewerId, command: GestureCommand, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let playback = self.with_controller(viewer, |controller| match command {
            GestureCommand::Hold => controller.hold(now),
            GestureCommand::Release => controller.release(now),
            GestureCommand::TapLeft => controller.tap_left(now),
            GestureCommand::TapRight => controller.tap_right(now),
            GestureCommand::SwipeDismiss => controller.swipe_dismiss(),
        });
        if let Some(playback) = playback {
            self.apply_playback_effects(viewer, playback, effects);
        }
    }
}
