use std::path::Path;
use std::time::Duration;

use advisor::flows::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use advisor::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use advisor::GenerationSettings;
use mavuno_core::DEFAULT_MAX_PHOTO_BYTES;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

pub const CONFIG_FILE: &str = "mavuno.toml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variables checked for the Gemini API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Model settings. The API key is read from the environment only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub max_photo_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

impl UploadsConfig {
    /// Request body limit large enough for a base64 photo at the size cap
    pub fn body_limit(&self) -> usize {
        self.max_photo_bytes.div_ceil(3) * 4 + 64 * 1024
    }
}

/// Contents of `mavuno.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub uploads: UploadsConfig,
}

impl AppConfig {
    /// Reads the config file, falling back to defaults when it does not exist
    pub async fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await?;
        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Config loaded successfully");
        Ok(config)
    }

    pub async fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        debug!(path = %path.display(), "Config saved successfully");
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// The first non-empty API key found in the environment
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::read(&temp_dir.path().join(CONFIG_FILE))
            .await
            .unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[tokio::test]
    async fn test_config_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[server]\nport = 8080\n\n[gemini]\nmodel = \"gemini-1.5-pro\"\n")
            .unwrap();

        let config = AppConfig::read(&path).await.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.uploads.max_photo_bytes, DEFAULT_MAX_PHOTO_BYTES);
    }

    #[tokio::test]
    async fn test_config_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = AppConfig::default();
        config.gemini.temperature = 0.4;
        config.uploads.max_photo_bytes = 1024;
        config.write(&path).await.unwrap();

        let loaded = AppConfig::read(&path).await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.gemini.settings().temperature, 0.4);
    }

    #[tokio::test]
    async fn test_config_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

        let err = AppConfig::read(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_body_limit_covers_base64_photo() {
        let uploads = UploadsConfig {
            max_photo_bytes: 3000,
        };
        assert_eq!(uploads.body_limit(), 4000 + 64 * 1024);
    }
}
