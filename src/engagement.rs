//! Optimistic like/unlike with a single in-flight request.
//!
//! `toggle` applies the flipped state immediately and hands back the request
//! to issue. While that request is outstanding further toggles are dropped.
//! `resolve` keeps the optimistic value on success and restores the exact
//! pre-toggle snapshot on failure.

use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngagementState {
    pub liked: bool,
    pub count: u64,
}

impl EngagementState {
    pub fn new(liked: bool, count: u64) -> Self {
        Self { liked, count }
    }

    fn toggled(self) -> Self {
        if self.liked {
            Self {
                liked: false,
                count: self.count.saturating_sub(1),
            }
        } else {
            Self {
                liked: true,
                count: self.count.saturating_add(1),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementAction {
    Like,
    Unlike,
}

impl std::fmt::Display for EngagementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EngagementAction::Like => "like",
            EngagementAction::Unlike => "unlike",
        };
        write!(f, "{}", label)
    }
}

/// Request the host must send; `ticket` comes back through `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementRequest {
    pub ticket: u64,
    pub action: EngagementAction,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: u64,
    snapshot: EngagementState,
}

#[derive(Debug, Default)]
pub struct EngagementMutator {
    state: EngagementState,
    in_flight: Option<InFlight>,
    next_ticket: u64,
}

impl EngagementMutator {
    pub fn new(state: EngagementState) -> Self {
        Self {
            state,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> EngagementState {
        self.state
    }

    pub fn is_mutating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn toggle(&mut self) -> (EngagementState, Option<EngagementRequest>) {
        if let Some(in_flight) = self.in_flight {
            debug!(ticket = in_flight.ticket, "Toggle dropped; mutation in flight");
            return (self.state, None);
        }
        let snapshot = self.state;
        self.state = snapshot.toggled();
        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = self.next_ticket;
        self.in_flight = Some(InFlight { ticket, snapshot });
        let action = if self.state.liked {
            EngagementAction::Like
        } else {
            EngagementAction::Unlike
        };
        info!(
            ticket,
            %action,
            count = self.state.count,
            "Applied optimistic engagement"
        );
        (self.state, Some(EngagementRequest { ticket, action }))
    }

    pub fn resolve(&mut self, ticket: u64, outcome: &Result<(), String>) -> EngagementState {
        let Some(in_flight) = self.in_flight else {
            debug!(ticket, "Ignoring engagement result with nothing in flight");
            return self.state;
        };
        if in_flight.ticket != ticket {
            debug!(
                ticket,
                expected = in_flight.ticket,
                "Ignoring engagement result for another request"
            );
            return self.state;
        }
        self.in_flight = None;
        if let Err(error) = outcome {
            warn!(ticket, %error, "Engagement request failed; rolling back");
            self.state = in_flight.snapshot;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_is_applied_immediately() {
        let mut mutator = EngagementMutator::new(EngagementState::new(false, 5));
        let (state, request) = mutator.toggle();
        assert_eq!(state, EngagementState::new(true, 6));
        assert_eq!(request.map(|r| r.action), Some(EngagementAction::Like));
        assert!(mutator.is_mutating());
    }

    #[test]
    fn failure_rolls_back_to_snapshot() {
        let mut mutator = EngagementMutator::new(EngagementState::new(false, 5));
        let (_, request) = mutator.toggle();
        let ticket = request.expect("request").ticket;
        let state = mutator.resolve(ticket, &Err("offline".to_string()));
        assert_eq!(state, EngagementState::new(false, 5));
        assert!(!mutator.is_mutating());
    }

    #[test]
    fn success_keeps_optimistic_value() {
        let mut mutator = EngagementMutator::new(EngagementState::new(true, 3));
        let (_, request) = mutator.toggle();
        let request = request.expect("request");
        assert_eq!(request.action, EngagementAction::Unlike);
        assert_eq!(
            mutator.resolve(request.ticket, &Ok(())),
            EngagementState::new(false, 2)
        );
    }

    #[test]
    fn second_toggle_while_in_flight_is_dropped() {
        let mut mutator = EngagementMutator::new(EngagementState::new(false, 5));
        let (first, _) = mutator.toggle();
        let (second, request) = mutator.toggle();
        assert_eq!(first, second);
        assert_eq!(second, EngagementState::new(true, 6));
        assert!(request.is_none());
    }

    #[test]
    fn unknown_ticket_does_not_clear_in_flight() {
        let mut mutator = EngagementMutator::new(EngagementState::new(false, 0));
        let (_, request) = mutator.toggle();
        let ticket = request.expect("request").ticket;
        mutator.resolve(ticket + 1, &Err("late".to_string()));
        assert!(mutator.is_mutating());
        assert_eq!(mutator.state(), EngagementState::new(true, 1));
    }

    #[test]
    fn unlike_at_zero_saturates() {
        let mut mutator = EngagementMutator::new(EngagementState::new(true, 0));
        let (state, _) = mutator.toggle();
        assert_eq!(state, EngagementState::new(false, 0));
    }
}
