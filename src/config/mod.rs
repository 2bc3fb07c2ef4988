//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::agents::backend::AiBackendConfig;
use crate::agents::recommender::DEFAULT_COMBINATIONS;
use crate::fetch::DrawSourceConfig;

/// Largest window a single analysis may request.
pub const MAX_WINDOW: u32 = 100;

/// Most combinations a single recommendation may ask for.
pub const MAX_COMBINATIONS: usize = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Draw source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_source_timeout")]
    pub timeout_seconds: u64,

    /// Draws analysed when a request does not specify a count
    #[serde(default = "default_window")]
    pub default_window: u32,
}

fn default_source_url() -> String {
    "https://www.dhlottery.co.kr/common.do".to_string()
}

fn default_source_timeout() -> u64 {
    10
}

fn default_window() -> u32 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            timeout_seconds: default_source_timeout(),
            default_window: default_window(),
        }
    }
}

impl SourceConfig {
    pub fn draw_source(&self) -> DrawSourceConfig {
        DrawSourceConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            ..Default::default()
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Recommender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Combinations requested per analysis
    #[serde(default = "default_combinations")]
    pub combinations: usize,
}

fn default_combinations() -> usize {
    DEFAULT_COMBINATIONS
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            combinations: default_combinations(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub ai: AiBackendConfig,

    #[serde(default)]
    pub recommender: RecommenderConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            source: SourceConfig::default(),
            ai: AiBackendConfig::default(),
            recommender: RecommenderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.timeout_seconds() == 0 {
            return Err(ConfigError::ValidationError(
                "AI timeout must be greater than 0".to_string(),
            ));
        }

        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_WINDOW).contains(&self.source.default_window) {
            return Err(ConfigError::ValidationError(format!(
                "Default window must be between 1 and {}",
                MAX_WINDOW
            )));
        }

        if !(1..=MAX_COMBINATIONS).contains(&self.recommender.combinations) {
            return Err(ConfigError::ValidationError(format!(
                "Combinations must be between 1 and {}",
                MAX_COMBINATIONS
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.ai, AiBackendConfig::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.source.default_window, 10);
        assert_eq!(config.recommender.combinations, DEFAULT_COMBINATIONS);
    }

    #[test]
    fn test_source_config_default() {
        let source = SourceConfig::default();

        assert_eq!(source.base_url, "https://www.dhlottery.co.kr/common.do");
        assert_eq!(source.timeout_seconds, 10);

        let draw_source = source.draw_source();
        assert_eq!(draw_source.timeout, Duration::from_secs(10));
        assert_eq!(draw_source.base_url, source.base_url);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_ai_timeout() {
        let mut config = AppConfig::default();
        config.ai = AiBackendConfig::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_seconds: 0,
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_window() {
        let mut config = AppConfig::default();
        config.source.default_window = 0;
        assert!(config.validate().is_err());

        config.source.default_window = MAX_WINDOW + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_combinations() {
        let mut config = AppConfig::default();
        config.recommender.combinations = 0;
        assert!(config.validate().is_err());

        config.recommender.combinations = MAX_COMBINATIONS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.source.base_url, parsed.source.base_url);
        assert_eq!(config.ai, parsed.ai);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[source]
default_window = 20

[ai]
backend = "ollama"
model = "qwen2.5"

[recommender]
combinations = 5
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.source.default_window, 20);
        assert_eq!(config.source.timeout_seconds, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.recommender.combinations, 5);
        match config.ai {
            AiBackendConfig::Ollama {
                model, base_url, ..
            } => {
                assert_eq!(model, "qwen2.5");
                assert_eq!(base_url, "http://localhost:11434");
            }
            #[cfg(feature = "remote-ai")]
            _ => panic!("Expected Ollama"),
        }
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
