mod error;
pub mod openai;

use async_trait::async_trait;

pub use error::{LlmError, Result};
pub use openai::OpenAiClient;

/// Prompt in, text out. One independent call per prompt, no conversation state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
