//! Text generation provider abstraction
//!
//! Content generation only needs "prompt in, text out", so every large-language-model
//! backend (Gemini, the offline canned client, test mocks) implements one trait.

use tracing::instrument;

use crate::error::AppResult;

pub mod gemini;
pub mod offline;

pub use gemini::GeminiClient;
pub use offline::OfflineClient;

/// Trait for text generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for the prompt
    ///
    /// Errors are reported to the caller, which is expected to degrade to a
    /// fallback rather than abort the consultation.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Generates text and logs failures with the provider name attached
#[instrument(skip(client, prompt), fields(provider = client.name()))]
pub async fn generate_logged(
    client: &dyn LlmClient,
    purpose: &'static str,
    prompt: &str,
) -> AppResult<String> {
    client.generate(prompt).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Text generation failed");
    })
}
