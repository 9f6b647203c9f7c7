//! Pure state transition function

use super::{Effect, Event, Phase, SessionContext, SessionState};
use crate::llm::ChatMessage;
use crate::system_prompt::build_system_prompt;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    /// A transition that changes nothing and does nothing
    pub fn unchanged(state: &SessionState) -> Self {
        Self::new(state.clone())
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition.
///
/// Rejections leave the state untouched; the runtime surfaces them as
/// inline notices, never as session-ending failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still streaming; wait for it to finish")]
    SessionBusy,
    #[error("The interview turn limit has been reached")]
    TurnLimitReached,
    #[error("Chat has not started yet")]
    ChatNotStarted,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// Given the same state, context, and event this always produces the same
/// result, with no I/O. Idempotent re-deliveries (a second `StartChat`, a
/// whitespace-only prompt, a repeat feedback submission) come back as
/// unchanged-state results rather than errors.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Session initialization
        // ============================================================
        Event::StartChat { profile } => {
            // Re-rendering setup must never reset an in-progress session.
            if state.phase != Phase::Setup || !state.messages.is_empty() {
                return Ok(TransitionResult::unchanged(state));
            }

            let mut new_state = state.clone();
            new_state
                .messages
                .push(ChatMessage::system(build_system_prompt(&profile)));
            new_state.turn_count = 0;
            new_state.feedback_submitted = false;
            new_state.phase = Phase::Chatting;

            Ok(TransitionResult::new(new_state).with_effect(Effect::phase(Phase::Chatting)))
        }

        // ============================================================
        // Chat turns
        // ============================================================
        Event::UserPrompt { text } => {
            match state.phase {
                Phase::Setup => return Err(TransitionError::ChatNotStarted),
                Phase::Feedback => return Err(TransitionError::TurnLimitReached),
                Phase::Chatting => {}
            }
            if state.awaiting_reply {
                return Err(TransitionError::SessionBusy);
            }
            if state.turn_count >= context.max_turns {
                return Err(TransitionError::TurnLimitReached);
            }
            // Whitespace-only input is "no submission", not an error.
            if text.trim().is_empty() {
                return Ok(TransitionResult::unchanged(state));
            }

            let mut new_state = state.clone();
            new_state.messages.push(ChatMessage::user(text));
            new_state.turn_count += 1;
            new_state.awaiting_reply = true;

            Ok(TransitionResult::new(new_state).with_effect(Effect::RequestCompletion))
        }

        Event::AssistantReply { text } => {
            if state.phase != Phase::Chatting || !state.awaiting_reply {
                return Err(TransitionError::InvalidTransition(format!(
                    "AssistantReply with no request in flight (phase {:?})",
                    state.phase
                )));
            }

            let mut new_state = state.clone();
            new_state.messages.push(ChatMessage::assistant(text));
            new_state.awaiting_reply = false;

            let mut result = TransitionResult::new(new_state);
            result = finish_turn_if_budget_spent(result, context);
            Ok(result)
        }

        Event::ProviderFailed { message, kind } => {
            if state.phase != Phase::Chatting || !state.awaiting_reply {
                return Err(TransitionError::InvalidTransition(format!(
                    "ProviderFailed with no request in flight (phase {:?})",
                    state.phase
                )));
            }

            // The user message and incremented counter stay: a failed turn
            // still spends its slot. No assistant message is appended.
            let mut new_state = state.clone();
            new_state.awaiting_reply = false;

            let mut result = TransitionResult::new(new_state)
                .with_effect(Effect::notice(format!("API error ({kind:?}): {message}")));
            result = finish_turn_if_budget_spent(result, context);
            Ok(result)
        }

        // ============================================================
        // Feedback
        // ============================================================
        Event::SubmitFeedback { ratings } => {
            if state.phase != Phase::Feedback {
                return Err(TransitionError::InvalidTransition(format!(
                    "SubmitFeedback outside the feedback phase (phase {:?})",
                    state.phase
                )));
            }
            // One submission per session; later attempts are no-ops.
            if state.feedback_submitted {
                return Ok(TransitionResult::unchanged(state));
            }

            let mut new_state = state.clone();
            new_state.feedback_submitted = true;

            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::feedback_recorded(ratings.summary())))
        }
    }
}

/// Flip to the feedback phase once the turn that spent the budget settles,
/// whether the provider call succeeded or failed.
fn finish_turn_if_budget_spent(
    mut result: TransitionResult,
    context: &SessionContext,
) -> TransitionResult {
    if result.new_state.turn_count >= context.max_turns {
        result.new_state.phase = Phase::Feedback;
        result.effects.push(Effect::phase(Phase::Feedback));
    }
    result
}
