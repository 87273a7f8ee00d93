//! Configuration management for the towadmin dashboard

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base path of the admin surface, prefixed to every request
    #[serde(default = "default_admin_path")]
    pub admin_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Third-party maps API key. Shipped as plain configuration rather than a
    /// runtime secret; only used to build static map links.
    #[serde(default)]
    pub maps_api_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path. The terminal owns stdout, so logs always go to a file.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

/// Terminal UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Rows per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seconds a toast notification stays visible
    #[serde(default = "default_toast_ttl")]
    pub toast_ttl: u64,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_admin_path() -> String {
    "/admins".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("towadmin.log")
}

const fn default_tick_ms() -> u64 {
    200
}

const fn default_page_size() -> usize {
    20
}

const fn default_toast_ttl() -> u64 {
    4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("TOWADMIN_API_BASE_URL")
                .unwrap_or_else(|_| default_base_url()),
            admin_path: default_admin_path(),
            request_timeout: default_request_timeout(),
            maps_api_key: std::env::var("TOWADMIN_MAPS_API_KEY").ok(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            page_size: default_page_size(),
            toast_ttl: default_toast_ttl(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and files
    ///
    /// Layers an optional `towadmin.toml` under `TOWADMIN_*` environment
    /// variables (nested keys separated by `__`, e.g.
    /// `TOWADMIN_API__BASE_URL`). `TOWADMIN_API_BASE_URL` is honored as a
    /// flat override for the most common case.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_layered(config::File::with_name("towadmin").required(false))
    }

    /// Load configuration from an explicit file path plus the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::load_layered(config::File::from(path))
    }

    fn load_layered(file: config::File<config::FileSourceFile, config::FileFormat>) -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("TOWADMIN").separator("__"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        let mut config: Self =
            config
                .try_deserialize()
                .map_err(|e| crate::Error::Configuration {
                    message: e.to_string(),
                })?;

        if let Ok(url) = std::env::var("TOWADMIN_API_BASE_URL") {
            config.api.base_url = url;
        }

        Ok(config)
    }
}
