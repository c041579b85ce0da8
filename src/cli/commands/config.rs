//! Effective configuration command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::{label, output, section_header, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::credentials::{redact, resolve_api_key, API_KEY_ENV};

/// Configuration as shown to the user, with the API key redacted.
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub generator: GeneratorOutput,
    pub logging: LoggingOutput,
}

#[derive(Debug, Serialize)]
pub struct GeneratorOutput {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// "config", the environment variable name, or "none"
    pub api_key_source: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct LoggingOutput {
    pub level: String,
    pub format: String,
    pub log_dir: Option<String>,
    pub rotation: String,
}

impl From<&Config> for ConfigOutput {
    fn from(config: &Config) -> Self {
        let generator = &config.generator;
        let configured = generator
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        let resolved = resolve_api_key(generator);
        let api_key_source = match (&resolved, configured) {
            (None, _) => "none".to_string(),
            (Some(_), true) => "config".to_string(),
            (Some(_), false) => API_KEY_ENV.to_string(),
        };

        Self {
            generator: GeneratorOutput {
                base_url: generator.base_url.clone(),
                model: generator.model.clone(),
                api_key: resolved.as_deref().map(redact),
                api_key_source,
                timeout_secs: generator.timeout_secs,
            },
            logging: LoggingOutput {
                level: config.logging.level.clone(),
                format: format!("{:?}", config.logging.format).to_lowercase(),
                log_dir: config
                    .logging
                    .log_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string()),
                rotation: format!("{:?}", config.logging.rotation).to_lowercase(),
            },
        }
    }
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let g = &self.generator;
        let l = &self.logging;
        [
            section_header("Generator"),
            format!("  {} {}", label("Base URL"), g.base_url),
            format!("  {} {}", label("Model"), g.model),
            format!(
                "  {} {} ({})",
                label("API key"),
                g.api_key.as_deref().unwrap_or("not set"),
                g.api_key_source
            ),
            format!("  {} {}s", label("Timeout"), g.timeout_secs),
            section_header("Logging"),
            format!("  {} {}", label("Level"), l.level),
            format!("  {} {}", label("Format"), l.format),
            format!(
                "  {} {}",
                label("Directory"),
                l.log_dir.as_deref().unwrap_or("stderr only")
            ),
            format!("  {} {}", label("Rotation"), l.rotation),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput::from(config), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_is_redacted() {
        let mut config = Config::default();
        config.generator.api_key = Some("AIzaSyExampleKey123".to_string());

        let shown = ConfigOutput::from(&config);
        assert_eq!(shown.generator.api_key.as_deref(), Some("AIza...[REDACTED]"));
        assert_eq!(shown.generator.api_key_source, "config");
        assert!(!shown.to_json().to_string().contains("ExampleKey"));
    }

    #[test]
    fn test_missing_key_reported_as_none() {
        temp_env::with_var_unset(API_KEY_ENV, || {
            let shown = ConfigOutput::from(&Config::default());
            assert!(shown.generator.api_key.is_none());
            assert_eq!(shown.generator.api_key_source, "none");
            assert_eq!(shown.logging.format, "pretty");
            assert_eq!(shown.logging.rotation, "daily");
        });
    }
}
