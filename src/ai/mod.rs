pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

/// Error types for generative-text calls.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Service error: {0}")]
    Service(String),
    #[error("Response contained no generated text")]
    EmptyResponse,
}

/// Single-shot text generation capability. The batch pipeline depends on
/// this seam rather than a concrete client so tests can substitute fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}
