//! Chat completion
//!
//! Abstraction over chat models, with a Gemini REST backend. The answer
//! pipeline talks to the trait so tests can substitute a scripted model.

mod gemini;

pub use gemini::*;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for chat completion models
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete a prompt, returning the generated answer text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}
