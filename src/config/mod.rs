//! Configuration loading and management
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables (`PORT`, `DATABASE_URL`, `DATABASE_NAME`, `LOG_LEVEL`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Environment variable naming an optional YAML config file
pub const CONFIG_PATH_ENV: &str = "LISTINGS_CONFIG";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: String, value: String },

    #[error("invalid listen address '{host}:{port}'")]
    InvalidAddress { host: String, port: u16 },
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::InvalidAddress {
            host: self.host.clone(),
            port: self.port,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Storage connection target, consumed only by the storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_url: Option<String>,
    pub database_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: "listings".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Defaults, the file named by `LISTINGS_CONFIG` if set, then the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let base = match vars.get(CONFIG_PATH_ENV) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.with_env(&vars)
    }

    /// Apply environment overrides; empty values are ignored
    pub fn with_env(mut self, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT".to_string(),
                value: port.to_string(),
            })?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.storage.database_url = Some(url.to_string());
        }
        if let Some(name) = get("DATABASE_NAME") {
            self.storage.database_name = name.to_string();
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.log_level = level.to_string();
        }

        Ok(self)
    }

    pub fn database_url_set(&self) -> bool {
        self.storage.database_url.is_some()
    }
}
