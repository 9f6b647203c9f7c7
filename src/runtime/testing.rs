//! Mock provider for testing
//!
//! Lets integration tests drive full sessions without real I/O, including
//! provider failures and streams that cut off mid-reply.

use crate::llm::{ChatMessage, ChunkStream, LlmError, LlmService, StreamChunk};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

enum MockOutcome {
    /// Stream the text in small deltas, then the completion marker
    Reply(String),
    /// Fail before any chunk is produced
    Error(LlmError),
    /// Stream the text in deltas but end without the completion marker
    Truncated(String),
}

/// Mock provider that returns queued outcomes in order
pub struct MockLlmClient {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    model_id: String,
    /// Record of every transcript sent
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply that streams cleanly to completion
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(text.into()));
    }

    /// Queue a failure that occurs before any chunk arrives
    pub fn queue_error(&self, error: LlmError) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
    }

    /// Queue a reply whose stream ends without the completion marker
    pub fn queue_truncated(&self, text: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Truncated(text.into()));
    }

    /// Get every transcript the runtime has sent so far
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Split text into small deltas the way a real stream arrives
fn deltas(text: &str) -> Vec<StreamChunk> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(4)
        .map(|c| StreamChunk::Delta(c.iter().collect()))
        .collect()
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Error(LlmError::unknown("no mock outcome queued")));

        match outcome {
            MockOutcome::Reply(text) => {
                let mut chunks = deltas(&text);
                chunks.push(StreamChunk::Done);
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
            }
            MockOutcome::Truncated(text) => Ok(Box::pin(futures::stream::iter(
                deltas(&text).into_iter().map(Ok),
            ))),
            MockOutcome::Error(error) => Err(error),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
