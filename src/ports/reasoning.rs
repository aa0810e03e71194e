//! Text generation port (the external reasoning engine)

use async_trait::async_trait;

use super::models::PortResult;

/// A single-shot text generation capability
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to `model` and return the raw reply text
    async fn generate_text(&self, model: &str, prompt: &str) -> PortResult<String>;
}
