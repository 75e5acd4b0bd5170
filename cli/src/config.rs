//! Node configuration (TOML) and genesis loading
//!
//! Example:
//! ```toml
//! [node]
//! listen_addr = "127.0.0.1:24200"
//! admin_token = "change-me"
//! genesis_file = "$HOME/bloomex-node/genesis.json"
//!
//! [logging]
//! level = "info"
//! ```

use bloomex_economics::{EconomicsError, GenesisConfig};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// 2026-01-01T00:00:00Z
pub const DEFAULT_TGE: u64 = 1_767_225_600;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:24200";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Genesis error: {0}")]
    GenesisError(#[from] EconomicsError),
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    pub admin_token: Option<String>,
    pub genesis_file: Option<String>,
    /// TGE for the built-in table when no genesis file is configured
    pub tge: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            admin_token: None,
            genesis_file: None,
            tge: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn expand_path(path: &str) -> String {
    path.replace("$HOME", &std::env::var("HOME").unwrap_or_default())
}

/// Genesis from the configured file, or the built-in Bloomex table.
pub fn load_genesis(node: &NodeConfig) -> Result<GenesisConfig, ConfigError> {
    match &node.genesis_file {
        Some(path) => {
            let contents = std::fs::read_to_string(expand_path(path))?;
            Ok(GenesisConfig::from_json(&contents)?)
        }
        None => Ok(GenesisConfig::bloomex(node.tge.unwrap_or(DEFAULT_TGE))),
    }
}
