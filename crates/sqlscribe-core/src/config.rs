//! Configuration schema (sqlscribe.toml)

use serde::{Deserialize, Serialize};

/// Default text-generation endpoint
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/google/gemma-2-2b-it";

/// Environment variable holding the API credential by default
pub const DEFAULT_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Text-generation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Inference endpoint URL
    pub api_url: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Upper bound on generated tokens per description
    pub max_new_tokens: u32,

    /// Sampling temperature (kept low for near-deterministic output)
    pub temperature: f64,

    /// Ask the service to echo the prompt in its response
    pub return_full_text: bool,

    /// Request timeout in seconds; unset means no client-side timeout
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_new_tokens: 200,
            temperature: 0.3,
            return_full_text: false,
            request_timeout_secs: None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Description service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// API key from the configured environment variable
    ///
    /// An empty value counts as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.service.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
