//! Service configuration.
//!
//! Settings come from an optional TOML file, then environment variables
//! override individual keys. Every key has a default, so running with no
//! file and no environment is valid.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [inaturalist]
//! base_url = "https://api.inaturalist.org/v1"
//! timeout_secs = 30
//!
//! [vision]
//! api_url = "https://router.huggingface.co/v1/chat/completions"
//! model = "Qwen/Qwen2.5-VL-7B-Instruct"
//! timeout_secs = 60
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "PLANT_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub inaturalist: InaturalistSettings,
    #[serde(default)]
    pub vision: VisionSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InaturalistSettings {
    #[serde(default = "default_inat_base_url")]
    pub base_url: String,
    #[serde(default = "default_inat_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionSettings {
    #[serde(default = "default_vision_api_url")]
    pub api_url: String,
    #[serde(default = "default_vision_model")]
    pub model: String,
    #[serde(default = "default_vision_timeout")]
    pub timeout_secs: u64,
    /// Bearer token. Without one, identification always serves mock results.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_inat_base_url() -> String {
    "https://api.inaturalist.org/v1".to_string()
}

fn default_inat_timeout() -> u64 {
    30
}

fn default_vision_api_url() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

fn default_vision_model() -> String {
    "Qwen/Qwen2.5-VL-7B-Instruct".to_string()
}

fn default_vision_timeout() -> u64 {
    60
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for InaturalistSettings {
    fn default() -> Self {
        Self {
            base_url: default_inat_base_url(),
            timeout_secs: default_inat_timeout(),
        }
    }
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            api_url: default_vision_api_url(),
            model: default_vision_model(),
            timeout_secs: default_vision_timeout(),
            api_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from the file named by `PLANT_CONFIG` (if set), then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Override individual keys from `lookup`.
    ///
    /// Recognized keys: `HOST`, `PORT`, `INATURALIST_API_BASE`,
    /// `INATURALIST_TIMEOUT_SECS`, `VISION_API_URL`, `VISION_MODEL`,
    /// `VISION_API_KEY`. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = parse_value("PORT", &port)?;
        }
        if let Some(base_url) = get("INATURALIST_API_BASE") {
            self.inaturalist.base_url = base_url;
        }
        if let Some(timeout) = get("INATURALIST_TIMEOUT_SECS") {
            self.inaturalist.timeout_secs = parse_value("INATURALIST_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(api_url) = get("VISION_API_URL") {
            self.vision.api_url = api_url;
        }
        if let Some(model) = get("VISION_MODEL") {
            self.vision.model = model;
        }
        if let Some(key) = get("VISION_API_KEY") {
            self.vision.api_key = Some(key);
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
