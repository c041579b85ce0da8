//! Infrastructure layer: configuration, credentials, logging and the
//! generative text HTTP client.

pub mod config;
pub mod credentials;
pub mod gemini;
pub mod logging;
