use super::progress::{PROGRESS_COMPLETE, ProgressBank};
use crate::schedule::{Generation, ScheduledTask, Stamp};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Linear progress animation of the active slide, from `from_percent` to
/// 100 over `duration` starting at `started_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    from_percent: u8,
    started_at: Instant,
    duration: Duration,
}

impl Segment {
    fn new(from_percent: u8, started_at: Instant, duration: Duration) -> Self {
        Self {
            from_percent: from_percent.min(PROGRESS_COMPLETE),
            started_at,
            duration,
        }
    }

    pub fn percent_at(&self, now: Instant) -> u8 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() || elapsed >= self.duration {
            return PROGRESS_COMPLETE;
        }
        let span = u128::from(PROGRESS_COMPLETE - self.from_percent);
        let gained = span * elapsed.as_nanos() / self.duration.as_nanos();
        // gained < span, so this fits in u8
        self.from_percent + gained as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing { index: usize, segment: Segment },
    HeldPaused { index: usize, progress: u8 },
    PanelPaused { index: usize, progress: u8 },
    Finished,
}

/// Work the host must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEffect {
    ScheduleAdvance(ScheduledTask),
    CancelAdvance,
    SlideChanged(usize),
    CloseViewer,
}

/// Flat read-only view of the controller for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSession {
    pub current_index: usize,
    pub paused_progress_percent: u8,
    pub is_holding: bool,
    pub is_panel_open: bool,
    pub generation: u64,
}

pub struct PlaybackController {
    state: PlaybackState,
    slide_count: usize,
    slide_duration: Duration,
    progress: ProgressBank,
    generation: Generation,
}

impl PlaybackController {
    /// Begin playback at the first slide. An empty deck finishes at once and
    /// asks the host to close the viewer.
    pub fn start(
        slide_count: usize,
        slide_duration: Duration,
        now: Instant,
    ) -> (Self, Vec<PlaybackEffect>) {
        let mut controller = Self {
            state: PlaybackState::Finished,
            slide_count,
            slide_duration,
            progress: ProgressBank::new(slide_count),
            generation: Generation::new(),
        };
        let mut effects = Vec::new();
        if slide_count == 0 {
            info!("Slide list is empty; closing viewer");
            effects.push(PlaybackEffect::CloseViewer);
        } else {
            info!(
                slide_count,
                slide_duration_ms = slide_duration.as_millis() as u64,
                "Starting story playback"
            );
            controller.start_slide(0, now, &mut effects);
        }
        (controller, effects)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn slide_duration(&self) -> Duration {
        self.slide_duration
    }

    pub fn progress(&self) -> &ProgressBank {
        &self.progress
    }

    pub fn generation(&self) -> Stamp {
        self.generation.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Playing { index, .. }
            | PlaybackState::HeldPaused { index, .. }
            | PlaybackState::PanelPaused { index, .. } => Some(index),
            PlaybackState::Finished => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, PlaybackState::Finished)
    }

    pub fn session(&self) -> PlaybackSession {
        let (current_index, paused_progress_percent, is_holding, is_panel_open) = match self.state
        {
            PlaybackState::Playing { index, .. } => (index, 0, false, false),
            PlaybackState::HeldPaused { index, progress } => (index, progress, true, false),
            PlaybackState::PanelPaused { index, progress } => (index, progress, false, true),
            PlaybackState::Finished => (self.slide_count.saturating_sub(1), 0, false, false),
        };
        PlaybackSession {
            current_index,
            paused_progress_percent,
            is_holding,
            is_panel_open,
            generation: self.generation.value(),
        }
    }

    /// Refresh the active slide's tracker from the animation clock.
    pub fn tick(&mut self, now: Instant) {
        if let PlaybackState::Playing { index, segment } = self.state {
            self.progress.set(index, segment.percent_at(now));
        }
    }

    /// Scheduled advance fired. Ignored unless `stamp` is the current
    /// generation.
    pub fn advance_due(&mut self, stamp: Stamp, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if !self.generation.is_current(stamp) {
            debug!(
                %stamp,
                current = self.generation.value(),
                "Dropping stale advance"
            );
            return effects;
        }
        if let PlaybackState::Playing { index, .. } = self.state {
            self.progress.set(index, PROGRESS_COMPLETE);
            self.advance_from(index, now, &mut effects);
        }
        effects
    }

    pub fn hold(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if let PlaybackState::Playing { index, segment } = self.state {
            let progress = segment.percent_at(now);
            self.progress.set(index, progress);
            self.generation.bump();
            self.state = PlaybackState::HeldPaused { index, progress };
            debug!(index, progress, "Holding slide");
            effects.push(PlaybackEffect::CancelAdvance);
        }
        effects
    }

    pub fn release(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if let PlaybackState::HeldPaused { index, progress } = self.state {
            debug!(index, progress, "Releasing hold");
            self.resume(index, progress, now, &mut effects);
        }
        effects
    }

    pub fn tap_right(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        match self.state {
            PlaybackState::Playing { index, .. } | PlaybackState::HeldPaused { index, .. } => {
                effects.push(PlaybackEffect::CancelAdvance);
                self.advance_from(index, now, &mut effects);
            }
            PlaybackState::PanelPaused { .. } | PlaybackState::Finished => {}
        }
        effects
    }

    /// Step back one slide. On the first slide this does nothing and the
    /// running timer keeps going.
    pub fn tap_left(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        match self.state {
            PlaybackState::Playing { index, .. } | PlaybackState::HeldPaused { index, .. }
                if index > 0 =>
            {
                effects.push(PlaybackEffect::CancelAdvance);
                self.start_slide(index - 1, now, &mut effects);
            }
            _ => {}
        }
        effects
    }

    pub fn swipe_dismiss(&mut self) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if !self.is_finished() {
            info!(index = ?self.current_index(), "Viewer dismissed by swipe");
            self.finish(&mut effects);
        }
        effects
    }

    pub fn open_panel(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        let captured = match self.state {
            PlaybackState::Playing { index, segment } => {
                let progress = segment.percent_at(now);
                self.progress.set(index, progress);
                Some((index, progress))
            }
            PlaybackState::HeldPaused { index, progress } => Some((index, progress)),
            PlaybackState::PanelPaused { .. } | PlaybackState::Finished => None,
        };
        if let Some((index, progress)) = captured {
            self.generation.bump();
            self.state = PlaybackState::PanelPaused { index, progress };
            debug!(index, progress, "Paused for comment panel");
            effects.push(PlaybackEffect::CancelAdvance);
        }
        effects
    }

    pub fn close_panel(&mut self, now: Instant) -> Vec<PlaybackEffect> {
        let mut effects = Vec::new();
        if let PlaybackState::PanelPaused { index, progress } = self.state {
            if progress >= PROGRESS_COMPLETE {
                debug!(index, "Slide completed while panel was open; advancing");
                self.advance_from(index, now, &mut effects);
            } else {
                debug!(index, progress, "Resuming after comment panel");
                self.resume(index, progress, now, &mut effects);
            }
        }
        effects
    }

    fn start_slide(&mut self, index: usize, now: Instant, effects: &mut Vec<PlaybackEffect>) {
        let stamp = self.generation.bump();
        self.progress.activate(index);
        self.progress.reset(index);
        self.state = PlaybackState::Playing {
            index,
            segment: Segment::new(0, now, self.slide_duration),
        };
        debug!(index, %stamp, "Started slide");
        effects.push(PlaybackEffect::SlideChanged(index));
        effects.push(PlaybackEffect::ScheduleAdvance(ScheduledTask::new(
            stamp,
            self.slide_duration,
        )));
    }

    fn resume(
        &mut self,
        index: usize,
        progress: u8,
        now: Instant,
        effects: &mut Vec<PlaybackEffect>,
    ) {
        let remaining = self.remaining_after(progress);
        let stamp = self.generation.bump();
        self.state = PlaybackState::Playing {
            index,
            segment: Segment::new(progress, now, remaining),
        };
        effects.push(PlaybackEffect::ScheduleAdvance(ScheduledTask::new(
            stamp, remaining,
        )));
    }

    fn advance_from(&mut self, index: usize, now: Instant, effects: &mut Vec<PlaybackEffect>) {
        if index + 1 < self.slide_count {
            self.start_slide(index + 1, now, effects);
        } else {
            info!(index, "Reached end of story");
            self.progress.set(index, PROGRESS_COMPLETE);
            self.finish(effects);
        }
    }

    fn finish(&mut self, effects: &mut Vec<PlaybackEffect>) {
        self.generation.bump();
        self.state = PlaybackState::Finished;
        effects.push(PlaybackEffect::CancelAdvance);
        effects.push(PlaybackEffect::CloseViewer);
    }

    fn remaining_after(&self, progress: u8) -> Duration {
        let left = u32::from(PROGRESS_COMPLETE - progress.min(PROGRESS_COMPLETE));
        self.slide_duration * left / u32::from(PROGRESS_COMPLETE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(6000);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn scheduled(effects: &[PlaybackEffect]) -> ScheduledTask {
        effects
            .iter()
            .find_map(|effect| match effect {
                PlaybackEffect::ScheduleAdvance(task) => Some(*task),
                _ => None,
            })
            .expect("advance scheduled")
    }

    fn closes(effects: &[PlaybackEffect]) -> bool {
        effects
            .iter()
            .any(|effect| matches!(effect, PlaybackEffect::CloseViewer))
    }

    #[test]
    fn starts_at_first_slide_with_zero_progress() {
        let t0 = Instant::now();
        let (controller, effects) = PlaybackController::start(3, D, t0);
        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.progress().get(0), 0);
        assert!(effects.contains(&PlaybackEffect::SlideChanged(0)));
        assert_eq!(scheduled(&effects).after, D);
    }

    #[test]
    fn empty_deck_closes_immediately() {
        let (controller, effects) = PlaybackController::start(0, D, Instant::now());
        assert!(controller.is_finished());
        assert_eq!(effects, vec![PlaybackEffect::CloseViewer]);
    }

    #[test]
    fn uninterrupted_run_finishes_after_n_times_duration() {
        let t0 = Instant::now();
        let count = 4;
        let (mut controller, mut effects) = PlaybackController::start(count, D, t0);
        let mut elapsed = Duration::ZERO;
        while !controller.is_finished() {
            let task = scheduled(&effects);
            elapsed += task.after;
            effects = controller.advance_due(task.stamp, t0 + elapsed);
        }
        assert!(closes(&effects));
        assert_eq!(elapsed, D * count as u32);
        assert_eq!(controller.progress().values(), &[100, 100, 100, 100]);
    }

    #[test]
    fn advancing_marks_earlier_slides_viewed() {
        let t0 = Instant::now();
        let (mut controller, effects) = PlaybackController::start(3, D, t0);
        let effects = controller.advance_due(scheduled(&effects).stamp, t0 + D);
        assert_eq!(controller.current_index(), Some(1));
        assert!(effects.contains(&PlaybackEffect::SlideChanged(1)));
        assert_eq!(controller.progress().values(), &[100, 0, 0]);
    }

    #[test]
    fn hold_freezes_progress_and_release_resumes_remaining_time() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(2, D, t0);
        controller.tick(t0 + ms(3000));
        assert_eq!(controller.progress().get(0), 50);

        controller.hold(t0 + ms(3000));
        assert!(controller.session().is_holding);
        assert_eq!(controller.session().paused_progress_percent, 50);

        controller.tick(t0 + ms(9000));
        assert_eq!(controller.progress().get(0), 50);

        let effects = controller.release(t0 + ms(9000));
        assert_eq!(scheduled(&effects).after, ms(3000));
        controller.tick(t0 + ms(10_500));
        assert_eq!(controller.progress().get(0), 75);
    }

    #[test]
    fn progress_is_monotonic_while_playing() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(1, D, t0);
        let mut last = 0;
        for step in 0..=70 {
            controller.tick(t0 + ms(step * 100));
            let value = controller.progress().get(0);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn stale_advance_is_ignored_after_hold() {
        let t0 = Instant::now();
        let (mut controller, effects) = PlaybackController::start(2, D, t0);
        let stale = scheduled(&effects).stamp;
        controller.hold(t0 + ms(1000));

        let effects = controller.advance_due(stale, t0 + D);
        assert!(effects.is_empty());
        assert!(matches!(
            controller.state(),
            PlaybackState::HeldPaused { index: 0, .. }
        ));
    }

    #[test]
    fn tap_right_on_last_slide_finishes() {
        let t0 = Instant::now();
        let (mut controller, effects) = PlaybackController::start(2, D, t0);
        controller.advance_due(scheduled(&effects).stamp, t0 + D);
        assert_eq!(controller.current_index(), Some(1));

        let effects = controller.tap_right(t0 + D + ms(10));
        assert!(controller.is_finished());
        assert!(closes(&effects));
    }

    #[test]
    fn tap_right_from_hold_skips_forward() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(3, D, t0);
        controller.hold(t0 + ms(500));
        controller.tap_right(t0 + ms(600));
        assert_eq!(controller.current_index(), Some(1));
        assert!(controller.is_playing());
    }

    #[test]
    fn tap_left_steps_back_and_restarts_previous() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(3, D, t0);
        controller.tap_right(t0 + ms(100));
        let effects = controller.tap_left(t0 + ms(200));
        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.progress().values(), &[0, 0, 0]);
        assert_eq!(scheduled(&effects).after, D);
    }

    #[test]
    fn tap_left_on_first_slide_keeps_timer_running() {
        let t0 = Instant::now();
        let (mut controller, effects) = PlaybackController::start(3, D, t0);
        let stamp = scheduled(&effects).stamp;
        controller.tick(t0 + ms(1200));

        let effects = controller.tap_left(t0 + ms(1200));
        assert!(effects.is_empty());
        assert_eq!(controller.progress().get(0), 20);
        assert_eq!(controller.generation(), stamp);
    }

    #[test]
    fn swipe_dismiss_finishes_from_every_state() {
        let t0 = Instant::now();

        let (mut playing, _) = PlaybackController::start(3, D, t0);
        assert!(closes(&playing.swipe_dismiss()));
        assert!(playing.is_finished());

        let (mut held, _) = PlaybackController::start(3, D, t0);
        held.hold(t0 + ms(10));
        assert!(closes(&held.swipe_dismiss()));

        let (mut panel, _) = PlaybackController::start(3, D, t0);
        panel.open_panel(t0 + ms(10));
        assert!(closes(&panel.swipe_dismiss()));

        assert!(panel.swipe_dismiss().is_empty());
    }

    #[test]
    fn panel_pause_resumes_from_captured_progress() {
        let t0 = Instant::now();
        let (mut controller, effects) = PlaybackController::start(2, D, t0);
        let before = scheduled(&effects).stamp;

        let effects = controller.open_panel(t0 + ms(1500));
        assert!(effects.contains(&PlaybackEffect::CancelAdvance));
        assert!(controller.session().is_panel_open);
        assert_eq!(controller.session().paused_progress_percent, 25);
        assert!(controller.advance_due(before, t0 + D).is_empty());
        assert!(controller.tap_right(t0 + ms(2000)).is_empty());

        let effects = controller.close_panel(t0 + ms(20_000));
        assert_eq!(scheduled(&effects).after, ms(4500));
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn closing_panel_on_completed_slide_advances_immediately() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(2, D, t0);
        controller.open_panel(t0 + D + ms(5));
        assert_eq!(controller.session().paused_progress_percent, 100);

        let effects = controller.close_panel(t0 + D + ms(50));
        assert_eq!(controller.current_index(), Some(1));
        assert!(effects.contains(&PlaybackEffect::SlideChanged(1)));
    }

    #[test]
    fn every_command_bumps_generation() {
        let t0 = Instant::now();
        let (mut controller, _) = PlaybackController::start(3, D, t0);
        let mut last = controller.generation();
        controller.hold(t0 + ms(10));
        assert!(controller.generation() > last);
        last = controller.generation();
        controller.release(t0 + ms(20));
        assert!(controller.generation() > last);
        last = controller.generation();
        controller.open_panel(t0 + ms(30));
        assert!(controller.generation() > last);
        last = controller.generation();
        controller.close_panel(t0 + ms(40));
        assert!(controller.generation() > last);
    }
}
