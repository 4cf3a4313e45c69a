//! Configuration loading and management for medsum.
//!
//! Loads settings from `medsum.toml` with environment variable overrides for sensitive data.
//! Every field has a default, so running without a config file is fine.

use crate::request::{
    round_temperature, validate_max_tokens, validate_temperature, ApiKey, ModelName,
    ValidationError, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the config file searched for in the standard locations
pub const CONFIG_FILE_NAME: &str = "medsum.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    InvalidValue(#[from] ValidationError),
}

/// LLM settings used when the command line does not override them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Chat model: "gpt-4o", "gpt-4" or "gpt-3.5-turbo"
    pub model: ModelName,
    /// Sampling temperature in [0.0, 1.0]
    pub temperature: f32,
    /// Completion limit in [50, 400]
    pub max_tokens: u32,
    /// OpenAI-compatible API root
    pub base_url: String,
    pub timeout_secs: u64,
}

/// HTTP settings for page retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent sent with every page request
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Skip TLS certificate verification for page requests.
    ///
    /// Some medical sites serve broken certificate chains. Off unless set explicitly.
    pub accept_invalid_certs: bool,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (medsum.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env();
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.agent.temperature = round_temperature(config.agent.temperature);
        validate_temperature(config.agent.temperature)?;
        validate_max_tokens(config.agent.max_tokens)?;
        Ok(config)
    }

    /// Override API keys from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("medsum")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }

    /// The configured OpenAI key, if any
    pub fn api_key(&self) -> Option<ApiKey> {
        self.api.openai_key.clone().map(ApiKey::new)
    }
}

impl AgentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Turn off certificate verification when asked; never turns it back on
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.accept_invalid_certs |= insecure;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: ModelName::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.agent.model, ModelName::Gpt4o);
        assert_eq!(config.agent.temperature, 0.7);
        assert_eq!(config.agent.max_tokens, 150);
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
        assert!(!config.fetch.accept_invalid_certs);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
[agent]
model = "gpt-3.5-turbo"
max_tokens = 300

[fetch]
accept_invalid_certs = true
"#,
        )
        .unwrap();
        assert_eq!(config.agent.model, ModelName::Gpt35Turbo);
        assert_eq!(config.agent.max_tokens, 300);
        assert_eq!(config.agent.temperature, 0.7);
        assert!(config.fetch.accept_invalid_certs);
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Config::parse("[agent]\ntemperature = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue(ValidationError::Temperature(_))
        ));

        let err = Config::parse("[agent]\nmax_tokens = 10\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue(ValidationError::MaxTokens(10))
        ));
    }

    #[test]
    fn temperature_is_snapped_to_tenths() {
        let config = Config::parse("[agent]\ntemperature = 0.46\n").unwrap();
        assert_eq!(config.agent.temperature, 0.5);
    }

    #[test]
    fn insecure_flag_only_relaxes_verification() {
        assert!(!FetchConfig::default().insecure(false).accept_invalid_certs);
        assert!(FetchConfig::default().insecure(true).accept_invalid_certs);

        let configured = FetchConfig {
            accept_invalid_certs: true,
            ..FetchConfig::default()
        };
        assert!(configured.insecure(false).accept_invalid_certs);
    }

    #[test]
    fn unknown_model_is_a_parse_error() {
        let err = Config::parse("[agent]\nmodel = \"llama\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fetch]\nuser_agent = \"medsum-test\"\ntimeout_secs = 5").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.fetch.user_agent, "medsum-test");
        assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
