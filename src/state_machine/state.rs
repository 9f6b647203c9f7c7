//! Session state types

use crate::llm::{ChatMessage, Role};
use serde::{Deserialize, Serialize};

/// Turn budget for a session unless overridden in configuration
pub const DEFAULT_MAX_TURNS: u32 = 15;

/// The session's current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting profile fields, chat not started
    #[default]
    Setup,
    /// Exchanging turns with the interviewer
    Chatting,
    /// Turn budget exhausted, collecting self-ratings
    Feedback,
}

/// Full mutable session state, threaded through every transition.
///
/// Invariants the transition function maintains:
/// - `messages` is append-only; index 0 holds the hidden system instruction
///   exactly once from the moment chat starts
/// - `turn_count` never decreases and never exceeds the configured budget
/// - once `turn_count` reaches the budget, `phase` is [`Phase::Feedback`]
///   and no user prompt is accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Ordered transcript, hidden system instruction included
    pub messages: Vec<ChatMessage>,
    /// Prompts submitted so far; a failed turn still counts
    pub turn_count: u32,
    pub phase: Phase,
    /// A provider stream is in flight; no other input is accepted
    pub awaiting_reply: bool,
    pub feedback_submitted: bool,
}

impl SessionState {
    /// Transcript entries the user actually sees (system instruction elided)
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    /// Check whether the session has fully run its course
    pub fn is_terminal(&self) -> bool {
        self.feedback_submitted
    }

    pub fn turns_remaining(&self, max_turns: u32) -> u32 {
        max_turns.saturating_sub(self.turn_count)
    }
}

/// Immutable per-session configuration.
///
/// The explicit replacement for process-global session storage: one context
/// object owned by the shell, passed into every transition.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Model identifier, fixed for the lifetime of the session
    pub model_id: String,
    /// Turn budget
    pub max_turns: u32,
}

impl SessionContext {
    pub fn new(model_id: impl Into<String>, max_turns: u32) -> Self {
        Self {
            model_id: model_id.into(),
            max_turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_fresh_setup() {
        let state = SessionState::default();
        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.turn_count, 0);
        assert!(state.messages.is_empty());
        assert!(!state.awaiting_reply);
        assert!(!state.feedback_submitted);
        assert!(!state.is_terminal());
    }

    #[test]
    fn visible_messages_hide_the_system_instruction() {
        let state = SessionState {
            messages: vec![
                ChatMessage::system("hidden"),
                ChatMessage::user("hello"),
                ChatMessage::assistant("hi"),
            ],
            ..SessionState::default()
        };
        let visible: Vec<_> = state.visible_messages().collect();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn turns_remaining_saturates() {
        let state = SessionState {
            turn_count: 20,
            ..SessionState::default()
        };
        assert_eq!(state.turns_remaining(15), 0);
    }
}
