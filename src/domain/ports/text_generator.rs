use async_trait::async_trait;

use crate::domain::errors::GenerationError;

/// Result type for text generation
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Hint about the shape of text the model should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free prose
    #[default]
    Text,
    /// A JSON document
    Json,
}

/// Port trait for a generative text service
///
/// The plan and summary providers depend on this trait rather than on the
/// HTTP client, so tests can substitute canned or failing generators.
///
/// Implementations must be `Send + Sync`; providers hold them behind an
/// `Arc` and call them from spawned tasks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the model's text.
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> GenerationResult<String>;
}
