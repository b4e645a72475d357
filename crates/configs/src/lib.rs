//! # configs
//!
//! Layered application settings: built-in defaults, then an optional
//! `review-board.toml`, then `REVIEW_BOARD__*` environment variables
//! (a `.env` file is loaded into the environment first).
//!
//! Example: `REVIEW_BOARD__STORAGE__BACKEND=memory`.

use std::path::PathBuf;

use config::{Config, Environment, File};
use domains::is_valid_storage_key;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "REVIEW_BOARD";
pub const CONFIG_FILE: &str = "review-board";
pub const DEFAULT_STORAGE_KEY: &str = "reviews_v1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid storage key {0:?}: use letters, digits, '.', '_' or '-'")]
    InvalidStorageKey(String),

    #[error("storage quota must be greater than zero")]
    ZeroQuota,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `storage.dir`.
    File,
    /// Nothing survives the process. Useful for demos.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub dir: PathBuf,
    pub key: String,
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads `.env`, then builds the layered configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_builder(
            base_builder()?
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).separator("__")),
        )
    }

    /// Defaults plus the given TOML text, without touching files or the
    /// environment.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(
            base_builder()?.add_source(File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let cfg: AppConfig = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_storage_key(&self.storage.key) {
            return Err(ConfigError::InvalidStorageKey(self.storage.key.clone()));
        }
        if self.storage.quota_bytes == Some(0) {
            return Err(ConfigError::ZeroQuota);
        }
        Ok(())
    }
}

fn base_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("storage.backend", "file")?
        .set_default("storage.dir", "./data")?
        .set_default("storage.key", DEFAULT_STORAGE_KEY)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}
