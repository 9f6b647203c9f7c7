//! Property-based tests over arbitrary event sequences

use super::{transition, Event, Phase, SessionContext, SessionState};
use crate::feedback::FeedbackForm;
use crate::llm::{LlmErrorKind, Role};
use crate::profile::ProfileForm;
use proptest::prelude::*;

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::StartChat {
            profile: ProfileForm::new().freeze(),
        }),
        "[ a-zA-Z0-9?!.]{0,40}".prop_map(|text| Event::UserPrompt { text }),
        "[ a-zA-Z0-9?!.]{1,40}".prop_map(|text| Event::AssistantReply { text }),
        Just(Event::ProviderFailed {
            message: "simulated failure".to_string(),
            kind: LlmErrorKind::Network,
        }),
        Just(Event::SubmitFeedback {
            ratings: FeedbackForm::new().freeze(),
        }),
    ]
}

/// Drive the machine through a sequence of events, keeping the prior state
/// whenever a transition is rejected, as the runtime does.
fn run_events(context: &SessionContext, events: Vec<Event>) -> Vec<SessionState> {
    let mut states = vec![SessionState::default()];
    for event in events {
        let current = states.last().unwrap();
        let next = match transition(current, context, event) {
            Ok(result) => result.new_state,
            Err(_) => current.clone(),
        };
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn turn_count_never_exceeds_limit(
        max_turns in 1u32..=15,
        events in prop::collection::vec(arb_event(), 0..60),
    ) {
        let context = SessionContext::new("test-model", max_turns);
        for state in run_events(&context, events) {
            prop_assert!(state.turn_count <= max_turns);
        }
    }

    #[test]
    fn turn_count_is_monotone(events in prop::collection::vec(arb_event(), 0..60)) {
        let context = SessionContext::new("test-model", 15);
        let states = run_events(&context, events);
        for pair in states.windows(2) {
            prop_assert!(pair[0].turn_count <= pair[1].turn_count);
        }
    }

    #[test]
    fn system_message_appears_exactly_once_at_index_zero(
        events in prop::collection::vec(arb_event(), 0..60),
    ) {
        let context = SessionContext::new("test-model", 15);
        for state in run_events(&context, events) {
            let system_count = state
                .messages
                .iter()
                .filter(|m| m.role == Role::System)
                .count();
            if state.phase == Phase::Setup {
                prop_assert_eq!(system_count, 0);
            } else {
                prop_assert_eq!(system_count, 1);
                prop_assert_eq!(state.messages[0].role, Role::System);
            }
        }
    }

    #[test]
    fn transcript_is_append_only(events in prop::collection::vec(arb_event(), 0..60)) {
        let context = SessionContext::new("test-model", 15);
        let states = run_events(&context, events);
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert!(after.messages.len() >= before.messages.len());
            prop_assert_eq!(&after.messages[..before.messages.len()], &before.messages[..]);
        }
    }

    #[test]
    fn awaiting_reply_only_while_chatting(
        events in prop::collection::vec(arb_event(), 0..60),
    ) {
        let context = SessionContext::new("test-model", 15);
        for state in run_events(&context, events) {
            if state.awaiting_reply {
                prop_assert_eq!(state.phase, Phase::Chatting);
            }
        }
    }

    #[test]
    fn feedback_submission_is_permanent(
        events in prop::collection::vec(arb_event(), 0..60),
    ) {
        let context = SessionContext::new("test-model", 15);
        let states = run_events(&context, events);
        for pair in states.windows(2) {
            if pair[0].feedback_submitted {
                prop_assert!(pair[1].feedback_submitted);
            }
        }
    }
}
