//! Configuration management for the admin console

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name (without extension) looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "temizyuva";

/// Environment variable prefix, e.g. `TEMIZYUVA_API__BASE_URL`
pub const ENV_PREFIX: &str = "TEMIZYUVA";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; the HTTP client default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the bearer token and cached profile are persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,

    /// Background re-validation interval in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,

    /// Refresh ahead of expiry when the token has less than this many seconds left
    #[serde(default = "default_refresh_skew")]
    pub refresh_skew_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

const fn default_refresh_interval() -> u64 {
    15 * 60
}

const fn default_refresh_skew() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: None,
            refresh_interval_seconds: default_refresh_interval(),
            refresh_skew_seconds: default_refresh_skew(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Explicit request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl SessionConfig {
    /// Interval of the background refresher
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    /// Look-ahead window used by the background refresher
    pub const fn refresh_skew(&self) -> Duration {
        Duration::from_secs(self.refresh_skew_seconds)
    }

    /// Resolved token file location
    ///
    /// Falls back to the platform config directory, then to a dot-file in
    /// the working directory when no home directory can be determined.
    pub fn token_path(&self) -> PathBuf {
        if let Some(path) = &self.token_file {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "temizyuva", "temizyuva-admin").map_or_else(
            || PathBuf::from(".temizyuva-session.json"),
            |dirs| dirs.config_dir().join("session.json"),
        )
    }
}

impl Config {
    /// Load configuration from an optional file and the environment
    ///
    /// Without an explicit path, `temizyuva.{toml,json,yaml}` in the working
    /// directory is used when present. Environment variables override file
    /// values, e.g. `TEMIZYUVA_API__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = path.map_or_else(
            || config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
            |path| config::File::from(path).required(true),
        );

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        tracing::debug!(
            base_url = config.api.base_url(),
            file = ?path,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check values that serde defaults cannot guard
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.api.base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(crate::Error::configuration(format!(
                "api.base_url must be an http(s) URL, got '{base}'"
            )));
        }

        if self.session.refresh_interval_seconds == 0 {
            return Err(crate::Error::configuration(
                "session.refresh_interval_seconds must be greater than zero",
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(crate::Error::configuration(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }
}
