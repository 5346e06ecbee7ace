//! Configuration surface.
//!
//! The status server is off by default and binds to localhost when enabled.
//! Hosts load this from a TOML file and may override individual fields from
//! their own command line before applying it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default bind address spec.
pub const DEFAULT_ADDRESS: &str = "ip4://127.0.0.1:6511";

/// Status server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Whether the status server starts enabled.
    pub enabled: bool,
    /// Bind address spec: `ip4://HOST:PORT`, `ip6://[HOST]:PORT`, or bare
    /// `HOST:PORT`.
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: DEFAULT_ADDRESS.to_string(),
        }
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
