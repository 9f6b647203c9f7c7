//! Interview Coach - interview practice chatbot
//!
//! A terminal chatbot that plays an HR interviewer: collect a candidate
//! profile, run a turn-limited chat against a streaming chat-completion
//! endpoint, then collect self-rating feedback.

mod config;
mod feedback;
mod llm;
mod profile;
mod runtime;
mod shell;
mod state_machine;
mod system_prompt;

use config::AppConfig;
use llm::OpenAiService;
use runtime::SessionRuntime;
use shell::Shell;
use state_machine::SessionContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the chat output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_coach=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        max_turns = config.max_turns,
        "Starting interview session"
    );

    let client = OpenAiService::new(&config.api_key, &config.model, &config.base_url);
    let context = SessionContext::new(&config.model, config.max_turns);
    let runtime = SessionRuntime::new(context, client);

    Shell::new(runtime).run().await?;

    Ok(())
}
