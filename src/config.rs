//! Configuration module for modstack.
//!
//! Handles loading and parsing the .modstackrc configuration file.
//! Environment variables override file settings for the server URL and
//! the API token.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::LogConfig;

/// Default backend URL.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3939";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default .modstackrc file content with all settings documented.
const DEFAULT_MODSTACKRC: &str = r#"# modstack configuration file
# ===========================
# This file is read on startup.
# Lines starting with '#' are comments.
#
# Backend
# -------
# Base URL of the install backend.
# server_url = http://127.0.0.1:3939
server_url = http://127.0.0.1:3939

# Bearer token sent with every API request. Leave unset for open backends.
# The MODSTACK_TOKEN environment variable takes precedence over this value.
# auth_token = <token>

# Seconds before an API request is treated as failed.
# request_timeout = 30

# Logging
# -------
# Logs are stored in ~/.modstack/logs/ with automatic cleanup.
#
# log_enabled = true       # Enable/disable file logging (true/false)
# log_level = info         # Log level: trace, debug, info, warn, error, off
# log_retention = 24       # Hours to keep log files (default: 24)
"#;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend.
    pub server_url: String,
    /// Bearer token for API requests, if the backend requires one.
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Logging configuration.
    pub log_config: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            auth_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            config_path: Self::default_config_path(),
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path (~/.modstackrc).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".modstackrc")
    }

    /// Loads configuration from the default path, creating it if it
    /// doesn't exist.
    pub fn load() -> io::Result<Self> {
        let path = Self::default_config_path();
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> io::Result<Self> {
        // Create default config if it doesn't exist
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self {
            config_path: path.clone(),
            ..Self::default()
        };
        config.parse(&content);
        config.apply_env_overrides();

        Ok(config)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Creates the default config file.
    fn create_default_config(path: &PathBuf) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_MODSTACKRC.as_bytes())?;
        Ok(())
    }

    /// Parses the config file content.
    fn parse(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Remove inline comments
                let value = value.split('#').next().unwrap_or(value).trim();

                self.apply_setting(key, value);
            }
        }
    }

    /// Applies a single setting.
    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "server_url" | "server" => {
                if !value.is_empty() {
                    self.server_url = value.trim_end_matches('/').to_string();
                }
            }
            "auth_token" | "token" => {
                if value.is_empty() {
                    self.auth_token = None;
                } else {
                    self.auth_token = Some(value.to_string());
                }
            }
            "request_timeout" | "request_timeout_secs" => {
                self.request_timeout_secs =
                    value.parse().unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
            }
            "log_level" => {
                self.log_config.level = LogConfig::parse_level(value);
            }
            "log_retention" | "log_retention_hours" => {
                self.log_config.retention_hours = LogConfig::parse_retention(value);
            }
            "log_enabled" | "logging" => {
                self.log_config.enabled =
                    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1" | "on");
            }
            _ => {}
        }
    }

    /// Applies environment overrides (MODSTACK_SERVER_URL, MODSTACK_TOKEN).
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("MODSTACK_SERVER_URL") {
            if !url.is_empty() {
                self.server_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(token) = std::env::var("MODSTACK_TOKEN") {
            if !token.is_empty() {
                self.auth_token = Some(token);
            }
        }
    }

    /// Reloads the configuration from disk.
    pub fn reload(&mut self) -> io::Result<()> {
        let path = self.config_path.clone();
        let new_config = Self::load_from(&path)?;
        *self = new_config;
        Ok(())
    }
}
