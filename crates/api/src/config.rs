//! Service Configuration
//!
//! Layered: built-in defaults, then an optional `thermolog.toml` in the
//! working directory, then `THERMOLOG_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,
    /// Listening port
    pub port: u16,
    /// SQLite database file, relative to the working directory
    pub database_path: PathBuf,
    /// Directory of static assets served for unmatched paths
    pub static_dir: Option<PathBuf>,
    /// Max log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl AppConfig {
    /// Load from the default sources
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("thermolog").required(false))
            .add_source(Environment::with_prefix("THERMOLOG"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_path", "temperatures.db")?
            .set_default("static_dir", "public")?
            .set_default("log_level", "info")
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: PathBuf::from("temperatures.db"),
            static_dir: Some(PathBuf::from("public")),
            log_level: "info".to_string(),
        }
    }
}
