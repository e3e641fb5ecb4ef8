use crate::schedule::{Generation, ScheduledTask, Stamp};
use iced::Point;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Press duration after which a contact becomes a hold.
    pub hold_delay: Duration,
    /// Downward travel, in logical pixels, that dismisses the viewer.
    pub swipe_dismiss_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_delay: Duration::from_millis(180),
            swipe_dismiss_distance: 120.0,
        }
    }
}

/// Commands understood by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommand {
    Hold,
    Release,
    TapLeft,
    TapRight,
    SwipeDismiss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Contact {
    Idle,
    Pressed { origin_y: f32, hold_engaged: bool },
    Dismissed,
}

pub struct GestureInterpreter {
    config: GestureConfig,
    contact: Contact,
    generation: Generation,
    suppressed: bool,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            contact: Contact::Idle,
            generation: Generation::new(),
            suppressed: false,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_holding(&self) -> bool {
        matches!(
            self.contact,
            Contact::Pressed {
                hold_engaged: true,
                ..
            }
        )
    }

    /// While suppressed every pointer event is ignored. Entering suppression
    /// drops the contact in progress.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        if suppressed && !self.suppressed {
            self.contact = Contact::Idle;
            self.generation.bump();
        }
        self.suppressed = suppressed;
    }

    /// Starts a contact and returns the hold check the host must schedule.
    pub fn pointer_down(&mut self, position: Point) -> Option<ScheduledTask> {
        if self.suppressed {
            return None;
        }
        let stamp = self.generation.bump();
        self.contact = Contact::Pressed {
            origin_y: position.y,
            hold_engaged: false,
        };
        trace!(x = position.x, y = position.y, %stamp, "Pointer down");
        Some(ScheduledTask::new(stamp, self.config.hold_delay))
    }

    pub fn hold_check_due(&mut self, stamp: Stamp) -> Option<GestureCommand> {
        if self.suppressed || !self.generation.is_current(stamp) {
            trace!(%stamp, "Dropping stale hold check");
            return None;
        }
        match self.contact {
            Contact::Pressed {
                origin_y,
                hold_engaged: false,
            } => {
                self.contact = Contact::Pressed {
                    origin_y,
                    hold_engaged: true,
                };
                debug!("Hold engaged");
                Some(GestureCommand::Hold)
            }
            _ => None,
        }
    }

    pub fn pointer_moved(&mut self, position: Point) -> Option<GestureCommand> {
        if self.suppressed {
            return None;
        }
        let Contact::Pressed { origin_y, .. } = self.contact else {
            return None;
        };
        let travel = position.y - origin_y;
        if travel > self.config.swipe_dismiss_distance {
            self.contact = Contact::Dismissed;
            self.generation.bump();
            debug!(travel, "Swipe dismiss recognized");
            return Some(GestureCommand::SwipeDismiss);
        }
        None
    }

    /// Ends the contact. `surface_width` is the width of the touch surface
    /// the position is measured against.
    pub fn pointer_up(&mut self, position: Point, surface_width: f32) -> Option<GestureCommand> {
        if self.suppressed {
            return None;
        }
        let contact = std::mem::replace(&mut self.contact, Contact::Idle);
        match contact {
            Contact::Pressed {
                hold_engaged: true, ..
            } => Some(GestureCommand::Release),
            Contact::Pressed {
                hold_engaged: false,
                ..
            } => {
                self.generation.bump();
                if position.x >= surface_width / 2.0 {
                    Some(GestureCommand::TapRight)
                } else {
                    Some(GestureCommand::TapLeft)
                }
            }
            Contact::Idle | Contact::Dismissed => None,
        }
    }

    /// The platform cancelled the contact (e.g. a lost touch).
    pub fn pointer_lost(&mut self) -> Option<GestureCommand> {
        let contact = std::mem::replace(&mut self.contact, Contact::Idle);
        self.generation.bump();
        match contact {
            Contact::Pressed {
                hold_engaged: true, ..
            } if !self.suppressed => Some(GestureCommand::Release),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 400.0;

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::new(GestureConfig::default())
    }

    #[test]
    fn quick_release_on_right_half_is_tap_right() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(300.0, 200.0)).expect("hold check");
        assert_eq!(check.after, Duration::from_millis(180));
        assert_eq!(
            gestures.pointer_up(Point::new(310.0, 205.0), WIDTH),
            Some(GestureCommand::TapRight)
        );
        assert_eq!(gestures.hold_check_due(check.stamp), None);
    }

    #[test]
    fn quick_release_on_left_half_is_tap_left() {
        let mut gestures = interpreter();
        gestures.pointer_down(Point::new(50.0, 200.0));
        assert_eq!(
            gestures.pointer_up(Point::new(50.0, 200.0), WIDTH),
            Some(GestureCommand::TapLeft)
        );
    }

    #[test]
    fn hold_then_release() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(300.0, 200.0)).expect("hold check");
        assert_eq!(gestures.hold_check_due(check.stamp), Some(GestureCommand::Hold));
        assert!(gestures.is_holding());
        assert_eq!(
            gestures.pointer_up(Point::new(300.0, 200.0), WIDTH),
            Some(GestureCommand::Release)
        );
    }

    #[test]
    fn downward_drag_past_threshold_dismisses_once() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(200.0, 100.0)).expect("hold check");
        assert_eq!(gestures.pointer_moved(Point::new(200.0, 180.0)), None);
        assert_eq!(
            gestures.pointer_moved(Point::new(200.0, 230.0)),
            Some(GestureCommand::SwipeDismiss)
        );
        assert_eq!(gestures.hold_check_due(check.stamp), None);
        assert_eq!(gestures.pointer_up(Point::new(200.0, 240.0), WIDTH), None);
    }

    #[test]
    fn swipe_supersedes_engaged_hold() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(200.0, 100.0)).expect("hold check");
        gestures.hold_check_due(check.stamp);
        assert_eq!(
            gestures.pointer_moved(Point::new(200.0, 300.0)),
            Some(GestureCommand::SwipeDismiss)
        );
        assert_eq!(gestures.pointer_up(Point::new(200.0, 300.0), WIDTH), None);
    }

    #[test]
    fn hold_check_from_earlier_contact_is_stale() {
        let mut gestures = interpreter();
        let first = gestures.pointer_down(Point::new(10.0, 10.0)).expect("hold check");
        gestures.pointer_up(Point::new(10.0, 10.0), WIDTH);
        gestures.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(gestures.hold_check_due(first.stamp), None);
    }

    #[test]
    fn suppression_ignores_all_input() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(300.0, 10.0)).expect("hold check");
        gestures.set_suppressed(true);
        assert!(gestures.is_suppressed());
        assert_eq!(gestures.hold_check_due(check.stamp), None);
        assert_eq!(gestures.pointer_down(Point::new(300.0, 10.0)), None);
        assert_eq!(gestures.pointer_moved(Point::new(300.0, 500.0)), None);
        assert_eq!(gestures.pointer_up(Point::new(300.0, 10.0), WIDTH), None);

        gestures.set_suppressed(false);
        assert!(gestures.pointer_down(Point::new(300.0, 10.0)).is_some());
    }

    #[test]
    fn lost_contact_releases_engaged_hold() {
        let mut gestures = interpreter();
        let check = gestures.pointer_down(Point::new(0.0, 0.0)).expect("hold check");
        gestures.hold_check_due(check.stamp);
        assert_eq!(gestures.pointer_lost(), Some(GestureCommand::Release));
        assert_eq!(gestures.pointer_lost(), None);
    }
}
