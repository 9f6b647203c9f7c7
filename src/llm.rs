//! Chat-completion provider abstraction
//!
//! The session core depends on one external capability: send an ordered
//! message sequence to a chat-completion endpoint and consume the reply as a
//! lazy stream of text chunks.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{OpenAiService, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use types::{ChatMessage, ChunkStream, Role, StreamChunk};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for streaming chat-completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Open a streamed completion for the full transcript.
    ///
    /// The returned stream yields text deltas and ends with
    /// [`StreamChunk::Done`] once the provider signals completion. A stream
    /// that ends without the completion marker must be treated as a provider
    /// failure by the caller.
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, LlmError>;

    /// Get the model identifier, fixed per session
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, LlmError> {
        (**self).stream_chat(messages).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
