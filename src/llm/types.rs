//! Common types for provider interactions

use super::LlmError;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Message role on the wire and in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One transcript entry, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One item in a streamed completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// Incremental text to render as it arrives
    Delta(String),
    /// The provider signalled completion; no further deltas follow
    Done,
}

/// Lazy sequence of streamed chunks from a provider
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LlmError>> + Send>>;
