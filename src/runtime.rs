//! Session runtime
//!
//! Owns the session state and drives it: events go through the pure
//! [`transition`](crate::state_machine::transition) function, and the
//! returned effects are executed here, including the streamed provider
//! call. Front-ends observe the session through a broadcast channel of
//! [`UiEvent`]s.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;

use crate::state_machine::Phase;
use serde::Serialize;

/// Events pushed to the front-end as the session progresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// A fragment of the assistant reply currently streaming in
    AssistantChunk { text: String },

    /// The streamed reply finished (successfully or not)
    AssistantDone,

    /// A non-fatal notice, e.g. a provider error for one turn
    Notice { message: String },

    /// The session moved to a new phase
    PhaseChanged { phase: Phase },

    /// Feedback was accepted; `summary` is the confirmation text
    FeedbackRecorded { summary: String },
}
