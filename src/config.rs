//! Environment-driven configuration

use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::state_machine::DEFAULT_MAX_TURNS;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the chat-completion endpoint
    pub api_key: String,
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Turn budget for the interview
    pub max_turns: u32,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY is not set".to_string())?;
        if api_key.trim().is_empty() {
            return Err("OPENAI_API_KEY is empty".to_string());
        }

        let base_url = std::env::var("INTERVIEW_COACH_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("INTERVIEW_COACH_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_turns = match std::env::var("INTERVIEW_COACH_MAX_TURNS") {
            Ok(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("INTERVIEW_COACH_MAX_TURNS is not a positive integer: {raw}"))?,
            Err(_) => DEFAULT_MAX_TURNS,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            max_turns,
        })
    }
}
