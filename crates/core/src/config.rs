//! Configuration management for the lending client

use crate::tracing::LoggingConfig;
use crate::{Error, FileStateStore, MemoryStateStore, Result, StateStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "LENDING";

/// Main client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://inventory.example.com`
    pub base_url: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    /// Location navigated to when the session ends
    pub login_path: String,

    /// Location navigated to after a successful login
    pub home_path: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Where the credential pair and preferences are persisted
    pub storage: StorageConfig,

    /// Log output
    pub logging: LoggingConfig,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

/// Persistent state configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// State file path, only used by the file backend
    pub path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            user_agent: concat!("lending-client/", env!("CARGO_PKG_VERSION")).to_string(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: default_state_dir().join("session.json"),
        }
    }
}

/// State directory: `LENDING_STATE_DIR`, else the platform data directory
pub fn default_state_dir() -> PathBuf {
    std::env::var("LENDING_STATE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lending")
        })
}

impl ClientConfig {
    /// Load configuration from file, layered over defaults and under
    /// `LENDING__*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(Self::environment())
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Check the values that would otherwise fail late, at first request
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an unparsable base URL or
    /// non-absolute navigation paths
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidConfig(format!("base_url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }
        for (name, path) in [("login_path", &self.login_path), ("home_path", &self.home_path)] {
            if !path.starts_with('/') {
                return Err(Error::InvalidConfig(format!(
                    "{name} must start with '/', got {path:?}"
                )));
            }
        }
        Ok(())
    }

    /// Request timeout, `None` when disabled
    pub const fn timeout(&self) -> Option<std::time::Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(self.timeout_secs))
        }
    }
}

impl StorageConfig {
    /// Open the configured state store
    pub fn open(&self) -> Arc<dyn StateStore> {
        match self.backend {
            StorageBackend::Memory => Arc::new(MemoryStateStore::new()),
            StorageBackend::File => Arc::new(FileStateStore::new(&self.path)),
        }
    }
}
