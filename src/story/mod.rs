//! Story-style slideshow core.
//!
//! Pure, clock-injected state: nothing here spawns timers or touches the
//! GUI. Transitions return effects that `app::update` turns into tasks.

mod gesture;
mod playback;
mod progress;

pub use gesture::{GestureCommand, GestureConfig, GestureInterpreter};
pub use playback::{PlaybackController, PlaybackEffect, PlaybackSession, PlaybackState};
pub use progress::{PROGRESS_COMPLETE, ProgressBank};
