// Copyright 2025 Cowboy AI, LLC.

//! Server configuration
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. `workflow-engine.toml` in the working directory, or an explicit file
//! 3. `WORKFLOW_ENGINE_*` environment variables (e.g. `WORKFLOW_ENGINE_PORT`)
//!
//! Command line flags are applied on top by the binary.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default config file name, without extension
pub const DEFAULT_CONFIG_FILE: &str = "workflow-engine";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WORKFLOW_ENGINE";

/// Settings for the HTTP server process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
    /// Directory served for non-API paths; empty disables static files
    pub static_dir: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Builder seeded with the default values
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("static_dir", defaults.static_dir)?
            .set_default("log_filter", defaults.log_filter)
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Static directory, if enabled
    pub fn static_dir(&self) -> Option<PathBuf> {
        (!self.static_dir.is_empty()).then(|| PathBuf::from(&self.static_dir))
    }
}
