//! OpenAI-compatible streaming provider
//!
//! Talks to any `chat/completions` endpoint that speaks the OpenAI SSE wire
//! format (`data: {json}` lines terminated by `data: [DONE]`). The default
//! endpoint is the GitHub Models inference gateway.

use super::types::{ChatMessage, ChunkStream, StreamChunk};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default inference endpoint
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai/inference";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Streaming client for an OpenAI-compatible endpoint
pub struct OpenAiService {
    client: Client,
    api_key: String,
    model: String,
    completions_url: String,
}

impl OpenAiService {
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    fn classify_status(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map_or_else(|_| body.to_string(), |resp| resp.error.message);

        match status.as_u16() {
            401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
            429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
            400 => LlmError::invalid_request(format!("Invalid request: {message}")),
            500..=599 => LlmError::server_error(format!("Server error: {message}")),
            _ => LlmError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl LlmService for OpenAiService {
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkStream, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: true,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, &body));
        }

        // SSE events can split across network chunks, so completed lines are
        // carved out of a carry-over buffer as bytes arrive.
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| LlmError::network(format!("Stream error: {e}"))))
            .scan(SseBuffer::default(), |buffer, chunk| {
                let events = match chunk {
                    Ok(bytes) => buffer.push(&bytes),
                    Err(e) => vec![Err(e)],
                };
                futures::future::ready(Some(futures::stream::iter(events)))
            })
            .flatten();

        Ok(Box::pin(stream))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Line reassembly for SSE payloads that arrive split across reads
#[derive(Default)]
struct SseBuffer {
    pending: String,
}

impl SseBuffer {
    fn push(&mut self, bytes: &[u8]) -> Vec<Result<StreamChunk, LlmError>> {
        self.pending.push_str(&String::from_utf8_lossy(bytes));

        let mut events = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            if let Some(event) = parse_sse_line(line.trim_end()) {
                events.push(event);
            }
        }
        events
    }
}

/// Parse one complete SSE line into a chunk event.
///
/// Returns `None` for lines that carry no chunk: blank keep-alives, non-data
/// fields, and the empty-delta chunk that reports `finish_reason`.
fn parse_sse_line(line: &str) -> Option<Result<StreamChunk, LlmError>> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data.is_empty() {
        return None;
    }
    if data == "[DONE]" {
        return Some(Ok(StreamChunk::Done));
    }

    match serde_json::from_str::<ChunkResponse>(data) {
        Ok(chunk) => {
            let content = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .filter(|text| !text.is_empty())?;
            Some(Ok(StreamChunk::Delta(content)))
        }
        Err(e) => Some(Err(LlmError::malformed_stream(format!(
            "Failed to parse SSE chunk: {e}"
        )))),
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChunkResponse {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmErrorKind;

    #[test]
    fn parse_content_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hello"},"finish_reason":null}]}"#;
        let event = parse_sse_line(line).unwrap().unwrap();
        assert_eq!(event, StreamChunk::Delta("Hello".to_string()));
    }

    #[test]
    fn parse_done_marker() {
        let event = parse_sse_line("data: [DONE]").unwrap().unwrap();
        assert_eq!(event, StreamChunk::Done);
    }

    #[test]
    fn finish_reason_chunk_yields_nothing() {
        let line = r#"data: {"choices":[{"delta":{},"finish_reason":"stop"}]}"#;
        assert!(parse_sse_line(line).is_none());
    }

    #[test]
    fn non_data_lines_are_ignored() {
        assert!(parse_sse_line("").is_none());
        assert!(parse_sse_line(": keep-alive").is_none());
        assert!(parse_sse_line("event: ping").is_none());
    }

    #[test]
    fn garbage_data_is_a_malformed_stream_error() {
        let event = parse_sse_line("data: {not json").unwrap();
        assert_eq!(event.unwrap_err().kind, LlmErrorKind::MalformedStream);
    }

    #[test]
    fn buffer_reassembles_lines_split_across_reads() {
        let mut buffer = SseBuffer::default();

        let first = buffer.push(br#"data: {"choices":[{"delta":{"content":"Hel"#);
        assert!(first.is_empty());

        let second = buffer.push(b"lo\"},\"finish_reason\":null}]}\n");
        assert_eq!(second.len(), 1);
        assert_eq!(
            second[0].as_ref().unwrap(),
            &StreamChunk::Delta("Hello".to_string())
        );
    }

    #[test]
    fn buffer_handles_multiple_events_in_one_read() {
        let mut buffer = SseBuffer::default();
        let events = buffer.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"},\"finish_reason\":null}]}\r\n\
              data: [DONE]\n",
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_ref().unwrap(), &StreamChunk::Delta("a".to_string()));
        assert_eq!(events[1].as_ref().unwrap(), &StreamChunk::Done);
    }
}
