pub mod ollama;
pub mod prompt;

use async_trait::async_trait;

/// A text-in, text-out language model.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn invoke(&self, prompt: &str) -> anyhow::Result<String>;
}
