pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiClientConfig};
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
