//! Port traits (interfaces) for dependency inversion.

pub mod text_generator;

pub use text_generator::{GenerationResult, ResponseFormat, TextGenerator};
