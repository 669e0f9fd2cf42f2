pub mod gemini;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;

/// The borrowed brain: a prompt goes in, generated text comes out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logs and the startup banner.
    fn model(&self) -> &str;
}
