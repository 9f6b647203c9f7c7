//! Core session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime feeds [`Event`]s through [`transition`] and executes the returned
//! [`Effect`]s.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{Phase, SessionContext, SessionState, DEFAULT_MAX_TURNS};
pub use transition::{transition, TransitionError, TransitionResult};
