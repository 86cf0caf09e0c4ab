//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

use estatedesk_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/actions";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw backend configuration from TOML (`[api]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Root URL the action names are appended to
    pub base_url: String,
    /// Timeout in seconds for each request
    pub timeout_seconds: Option<u64>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl FileApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Raw search configuration from TOML (`[search]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: estatedesk_application::config::DEFAULT_DEBOUNCE_MS,
            min_query_chars: 1,
        }
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Prefix for formatted amounts (e.g. "$")
    pub currency_symbol: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            currency_symbol: String::new(),
        }
    }
}

/// Raw logging configuration from TOML (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file (tracing output)
    pub file: Option<PathBuf>,
    /// Submission audit log (JSONL)
    pub submissions: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub search: FileSearchConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.api.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }

    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_debounce_ms(self.search.debounce_ms)
            .with_min_query_chars(self.search.min_query_chars)
    }
}
