use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Send a prompt to the model and return its raw text response.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AppResult<String>;
}
