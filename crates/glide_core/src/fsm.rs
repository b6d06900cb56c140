//! Typed state machines
//!
//! Widget interaction states are plain enums that know their own transition
//! table through [`StateTransitions`]. [`StateMachine`] wraps such an enum and
//! records transition history for debugging and tests.
//!
//! ```rust
//! use glide_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Door { Open, Closed }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum DoorEvent { Push, Pull }
//!
//! impl StateTransitions<DoorEvent> for Door {
//!     fn on_event(&self, event: DoorEvent) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, DoorEvent::Push) => Some(Door::Open),
//!             (Door::Open, DoorEvent::Pull) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = StateMachine::new(Door::Closed);
//! door.send(DoorEvent::Push);
//! assert_eq!(door.current(), Door::Open);
//! ```

use smallvec::SmallVec;
use std::fmt::Debug;

/// Transition table of a state enum
pub trait StateTransitions<E>: Copy + PartialEq + Debug {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: E) -> Option<Self>;
}

/// Maximum number of transitions kept in history
const HISTORY_LIMIT: usize = 16;

/// A state machine instance over a typed state enum
#[derive(Debug, Clone)]
pub struct StateMachine<S, E> {
    current: S,
    /// Most recent transitions, oldest first (bounded)
    history: SmallVec<[(S, E, S); 4]>,
}

impl<S, E> StateMachine<S, E>
where
    S: StateTransitions<E>,
    E: Copy + Debug,
{
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: E) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        tracing::trace!("fsm transition {:?} --{:?}--> {:?}", from, event, to);
        Some(to)
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
