//! Credentials management infrastructure
//!
//! API key resolution and redaction for logs.

use crate::domain::models::GeneratorConfig;

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Resolve the generator API key: config first, then the environment.
///
/// Blank values count as absent. A missing key is not an error; it selects
/// the fallback path in the providers.
pub fn resolve_api_key(config: &GeneratorConfig) -> Option<String> {
    let present = |key: &String| !key.trim().is_empty();
    config
        .api_key
        .clone()
        .filter(present)
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(present))
}

/// Redacted form of a key that is safe to log.
pub fn redact(key: &str) -> String {
    if key.chars().count() > 8 {
        let prefix: String = key.chars().take(4).collect();
        format!("{prefix}...[REDACTED]")
    } else {
        "[REDACTED]".to_string()
    }
}
