//! Events that can occur in a session

use crate::feedback::FeedbackRatings;
use crate::llm::LlmErrorKind;
use crate::profile::Profile;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The user confirmed the setup form
    StartChat { profile: Profile },

    /// The user submitted a chat prompt
    UserPrompt { text: String },

    /// A streamed completion finished; `text` is the concatenation of every
    /// chunk the provider sent
    AssistantReply { text: String },

    /// The provider call failed; the turn stays consumed
    ProviderFailed {
        message: String,
        kind: LlmErrorKind,
    },

    /// The user submitted the five self-ratings
    SubmitFeedback { ratings: FeedbackRatings },
}
