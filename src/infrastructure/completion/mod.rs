use async_trait::async_trait;

use crate::infrastructure::error::ProviderError;

pub mod openai;

pub use openai::OpenAiClient;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Single-shot completion: no retries, no streaming.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
