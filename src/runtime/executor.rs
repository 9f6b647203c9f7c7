//! Session runtime executor

use super::UiEvent;
use crate::llm::{LlmService, StreamChunk};
use crate::state_machine::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError,
};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Generic session runtime that works with any provider implementation
pub struct SessionRuntime<L: LlmService> {
    context: SessionContext,
    state: SessionState,
    client: Arc<L>,
    ui_tx: broadcast::Sender<UiEvent>,
}

impl<L: LlmService> SessionRuntime<L> {
    pub fn new(context: SessionContext, client: L) -> Self {
        let (ui_tx, _) = broadcast::channel(256);
        Self {
            context,
            state: SessionState::default(),
            client: Arc::new(client),
            ui_tx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Subscribe to UI events. Subscribe before sending events, or streamed
    /// chunks may be missed.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.ui_tx.subscribe()
    }

    /// Feed one event through the state machine and execute the resulting
    /// effects, looping until no chained events remain.
    ///
    /// A rejected transition leaves the state untouched and is returned to
    /// the caller; it never tears the session down.
    pub async fn handle_event(&mut self, event: Event) -> Result<(), TransitionError> {
        // Process events in a loop, no recursion. A provider call generates
        // a follow-up event (reply or failure) that feeds back in here.
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(&self.state, &self.context, current_event)?;
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RequestCompletion => Some(self.request_completion().await),
            Effect::NotifyNotice { message } => {
                let _ = self.ui_tx.send(UiEvent::Notice { message });
                None
            }
            Effect::NotifyPhase { phase } => {
                let _ = self.ui_tx.send(UiEvent::PhaseChanged { phase });
                None
            }
            Effect::NotifyFeedbackRecorded { summary } => {
                let _ = self.ui_tx.send(UiEvent::FeedbackRecorded { summary });
                None
            }
        }
    }

    /// Send the transcript to the provider, broadcasting each delta as it
    /// arrives while accumulating the full reply.
    ///
    /// The stream is consumed to completion right here; the session takes no
    /// other input until it settles. Any failure, including a stream that
    /// ends without the completion marker, discards the partial text and
    /// produces a [`Event::ProviderFailed`].
    async fn request_completion(&mut self) -> Event {
        let started = Instant::now();

        let mut stream = match self.client.stream_chat(&self.state.messages).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(model = %self.client.model_id(), error = %e, "completion request failed");
                return Event::ProviderFailed {
                    message: e.message,
                    kind: e.kind,
                };
            }
        };

        let mut text = String::new();
        let mut chunk_count = 0usize;

        let outcome = loop {
            match stream.next().await {
                Some(Ok(StreamChunk::Delta(delta))) => {
                    chunk_count += 1;
                    let _ = self.ui_tx.send(UiEvent::AssistantChunk {
                        text: delta.clone(),
                    });
                    text.push_str(&delta);
                }
                Some(Ok(StreamChunk::Done)) => break Ok(()),
                Some(Err(e)) => break Err(e),
                None => {
                    break Err(crate::llm::LlmError::malformed_stream(
                        "stream ended without a completion marker",
                    ));
                }
            }
        };

        let _ = self.ui_tx.send(UiEvent::AssistantDone);

        match outcome {
            Ok(()) => {
                tracing::info!(
                    model = %self.client.model_id(),
                    chunks = chunk_count,
                    chars = text.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "completion finished"
                );
                Event::AssistantReply { text }
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.client.model_id(),
                    kind = ?e.kind,
                    error = %e,
                    "completion stream failed; partial reply discarded"
                );
                Event::ProviderFailed {
                    message: e.message,
                    kind: e.kind,
                }
            }
        }
    }
}
