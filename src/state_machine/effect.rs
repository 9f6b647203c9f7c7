//! Effects produced by state transitions

use super::state::Phase;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the full transcript to the provider and stream the reply
    RequestCompletion,

    /// Surface a non-fatal notice to the user
    NotifyNotice { message: String },

    /// Tell the front-end the session moved to a new phase
    NotifyPhase { phase: Phase },

    /// Show the formatted feedback confirmation
    NotifyFeedbackRecorded { summary: String },
}

impl Effect {
    pub fn notice(message: impl Into<String>) -> Self {
        Effect::NotifyNotice {
            message: message.into(),
        }
    }

    pub fn phase(phase: Phase) -> Self {
        Effect::NotifyPhase { phase }
    }

    pub fn feedback_recorded(summary: impl Into<String>) -> Self {
        Effect::NotifyFeedbackRecorded {
            summary: summary.into(),
        }
    }
}
