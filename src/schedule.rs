//! Generation-stamped scheduling primitives.
//!
//! Anything that arms a timer captures a [`Stamp`] from a [`Generation`]
//! counter. Bumping the counter invalidates every stamp handed out before,
//! so a timer that was cancelled but still fires is recognized as stale and
//! dropped by its consumer instead of mutating state.

use std::time::Duration;

/// Value captured when a task is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stamp(u64);

impl Stamp {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate all outstanding stamps and return the new current one.
    pub fn bump(&mut self) -> Stamp {
        self.current = self.current.wrapping_add(1);
        Stamp(self.current)
    }

    pub fn current(&self) -> Stamp {
        Stamp(self.current)
    }

    pub fn is_current(&self, stamp: Stamp) -> bool {
        stamp.0 == self.current
    }

    pub fn value(&self) -> u64 {
        self.current
    }
}

/// A delayed callback request; the runtime turns it into a sleeping task
/// that reports `stamp` back when `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub stamp: Stamp,
    pub after: Duration,
}

impl ScheduledTask {
    pub fn new(stamp: Stamp, after: Duration) -> Self {
        Self { stamp, after }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_invalidates_earlier_stamps() {
        let mut generation = Generation::new();
        let first = generation.bump();
        assert!(generation.is_current(first));

        let second = generation.bump();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn current_matches_last_bump() {
        let mut generation = Generation::new();
        assert_eq!(generation.value(), 0);
        let stamp = generation.bump();
        assert_eq!(generation.current(), stamp);
        assert_eq!(stamp.value(), 1);
    }
}
