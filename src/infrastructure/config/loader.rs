use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Generator base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid generator base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Generator model cannot be empty")]
    EmptyModel,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .agentmesh/config.yaml (project config)
    /// 3. .agentmesh/local.yaml (local overrides, optional)
    /// 4. Environment variables (AGENTMESH_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".agentmesh/config.yaml"))
            .merge(Yaml::file(".agentmesh/local.yaml"))
            .merge(Env::prefixed("AGENTMESH_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let base_url = config.generator.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        if config.generator.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.generator.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.generator.timeout_secs));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogFormat, RotationPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generator.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.generator.timeout_secs, 60);
        assert!(config.generator.api_key.is_none());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
generator:
  base_url: http://localhost:8080
  model: custom-model
  timeout_secs: 5
logging:
  level: debug
  format: json
  rotation: never
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.generator.base_url, "http://localhost:8080");
        assert_eq!(config.generator.model, "custom-model");
        assert_eq!(config.generator.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.rotation, RotationPolicy::Never);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.generator.base_url = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyBaseUrl
        ));

        config.generator.base_url = "ftp://example.test".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidBaseUrl(_)
        ));
    }

    #[test]
    fn test_validate_empty_model_and_zero_timeout() {
        let mut config = Config::default();
        config.generator.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyModel
        ));

        let mut config = Config::default();
        config.generator.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTimeout(0)
        ));
    }

    #[test]
    fn test_load_from_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: info").unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.generator.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "generator:\n  timeout_secs: 0").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "generator:\n  model: base-model\n  timeout_secs: 10\nlogging:\n  level: info"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "generator:\n  model: override-model").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.generator.model, "override-model", "Override should win");
        assert_eq!(
            config.generator.timeout_secs, 10,
            "Base value should persist when not overridden"
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_override() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_vars(
            [
                ("AGENTMESH_GENERATOR__MODEL", Some("env-model")),
                ("AGENTMESH_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config: Config = Figment::new()
                    .merge(Serialized::defaults(Config::default()))
                    .merge(Yaml::file(dir.path().join("missing.yaml")))
                    .merge(Env::prefixed("AGENTMESH_").split("__"))
                    .extract()
                    .unwrap();
                assert_eq!(config.generator.model, "env-model");
                assert_eq!(config.logging.level, "debug");
            },
        );
    }
}
