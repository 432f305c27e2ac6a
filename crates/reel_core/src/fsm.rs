//! State Machine Runtime
//!
//! Typed, flat state machines for widget behaviour. A state is a small
//! `Copy` enum that maps `(state, event)` pairs to the next state through
//! [`StateTransitions`]; [`StateMachine`] holds the current state and a
//! bounded transition history for debugging.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Number of transitions kept by [`StateMachine::history`]
const HISTORY_LIMIT: usize = 32;

/// Maps events to state transitions
///
/// ```ignore
/// impl StateTransitions for DriverState {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (DriverState::Idle, START) => Some(DriverState::Running),
///             (DriverState::Running, STOP) => Some(DriverState::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: VecDeque<(S, EventId, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in `initial_state`
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition
    ///
    /// Returns the state after the event; events with no transition leave the
    /// machine untouched.
    pub fn send(&mut self, event: EventId) -> S {
        let current = self.current_state;
        let Some(to_state) = current.on_event(event) else {
            return current;
        };

        self.current_state = to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, event, to_state));

        tracing::trace!("fsm {:?} --{}--> {:?}", current, event, to_state);
        to_state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventId, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER_ENTER: EventId = 1;
    const POINTER_LEAVE: EventId = 2;
    const POINTER_DOWN: EventId = 3;
    const POINTER_UP: EventId = 4;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Hover {
        #[default]
        Idle,
        Hovered,
        Pressed,
    }

    impl StateTransitions for Hover {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Hover::Idle, POINTER_ENTER) => Some(Hover::Hovered),
                (Hover::Hovered, POINTER_LEAVE) => Some(Hover::Idle),
                (Hover::Hovered, POINTER_DOWN) => Some(Hover::Pressed),
                (Hover::Pressed, POINTER_UP) => Some(Hover::Hovered),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(Hover::Idle);
        assert_eq!(fsm.current_state(), Hover::Idle);

        fsm.send(POINTER_ENTER);
        assert_eq!(fsm.current_state(), Hover::Hovered);

        fsm.send(POINTER_DOWN);
        assert_eq!(fsm.current_state(), Hover::Pressed);

        fsm.send(POINTER_UP);
        assert_eq!(fsm.current_state(), Hover::Hovered);

        fsm.send(POINTER_LEAVE);
        assert!(fsm.is_in(Hover::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::<Hover>::default();

        // POINTER_DOWN is not valid in Idle
        assert_eq!(fsm.send(POINTER_DOWN), Hover::Idle);
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_can_send() {
        let fsm = StateMachine::new(Hover::Idle);
        assert!(fsm.can_send(POINTER_ENTER));
        assert!(!fsm.can_send(POINTER_UP));
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Hover::Idle);
        fsm.send(POINTER_ENTER);
        fsm.send(POINTER_DOWN);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(
            history,
            vec![
                (Hover::Idle, POINTER_ENTER, Hover::Hovered),
                (Hover::Hovered, POINTER_DOWN, Hover::Pressed),
            ]
        );

        fsm.clear_history();
        assert_eq!(fsm.history().count(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Hover::Idle);
        for _ in 0..HISTORY_LIMIT {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }
        assert_eq!(fsm.history().count(), HISTORY_LIMIT);
        let last = fsm.history().last().copied();
        assert_eq!(last, Some((Hover::Hovered, POINTER_LEAVE, Hover::Idle)));
    }
}
