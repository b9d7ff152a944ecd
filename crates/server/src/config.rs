//! Server configuration loaded from the environment.

use narrative::GeminiConfig;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration errors raised at startup
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST:PORT configuration: {0}")]
    InvalidAddress(String),
}

/// Runtime settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Exported model weights; the forecast endpoint is disabled without them
    pub model_path: Option<PathBuf>,
    /// LLM settings; report and chat are disabled without an API key
    pub gemini: Option<GeminiConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: None,
            gemini: None,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `MODEL_PATH`, `GEMINI_API_KEY`, `GEMINI_MODEL`
    /// and `GEMINI_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let gemini = var("GEMINI_API_KEY").map(|key| {
            let mut config = GeminiConfig::new(key.trim());
            if let Some(model) = var("GEMINI_MODEL") {
                config = config.with_model(model);
            }
            if let Some(base_url) = var("GEMINI_BASE_URL") {
                config = config.with_base_url(base_url);
            }
            config
        });

        Ok(Self {
            host,
            port,
            model_path: var("MODEL_PATH").map(PathBuf::from),
            gemini,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
