use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::{ConfigError, Persistable, utils::sorted_map};

#[cfg(test)]
#[path = "./config.tests.rs"]
mod config_tests;

pub const APP_NAME: &str = "kpool";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Config {
    /// Namespace used for objects that do not specify one.\
    /// **Note** that the kube context namespace is used when it is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// API root path overrides keyed by API group (empty string is the core group).
    #[serde(default)]
    #[serde(serialize_with = "sorted_map")]
    pub api_paths: HashMap<String, String>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
}

impl Config {
    /// Loads the configuration from a file or creates a default one if the file does not exist.
    pub async fn load_or_create() -> Result<Self, ConfigError> {
        load_or_create_default(&Self::default_path()).await
    }
}

impl Persistable<Config> for Config {
    /// Returns the default configuration path: `HOME/.kpool/config.yaml`.
    fn default_path() -> PathBuf {
        match std::env::home_dir() {
            Some(path) => path.join(format!(".{APP_NAME}")).join("config.yaml"),
            None => PathBuf::from("config.yaml"),
        }
    }

    async fn load(path: &Path) -> Result<Config, ConfigError> {
        let mut file = File::open(path).await?;

        let mut config_str = String::new();
        file.read_to_string(&mut config_str).await?;

        Ok(serde_yaml::from_str::<Config>(&config_str)?)
    }

    async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config_str = serde_yaml::to_string(self)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = File::create(path).await?;
        file.write_all(config_str.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// Loads configuration from `path`.\
/// **Note** that a malformed or unreadable file results in the default configuration,
/// a missing one is created if possible.
pub async fn load_or_create_default<T: Persistable<T> + Default>(path: &Path) -> Result<T, ConfigError> {
    let configuration = T::load(path).await;
    match configuration {
        Ok(configuration) => Ok(configuration),
        Err(ConfigError::SerializationError(error)) => {
            tracing::error!("Cannot deserialize config: {}", error);
            Ok(T::default())
        },
        Err(error) => {
            tracing::debug!("Cannot load config: {}", error);
            let configuration = T::default();
            if let Err(error) = configuration.save(path).await {
                tracing::warn!("Cannot save default config to {}: {}", path.display(), error);
            }

            Ok(configuration)
        },
    }
}
