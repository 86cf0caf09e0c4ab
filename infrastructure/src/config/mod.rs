//! Configuration file loading for estatedesk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ESTATEDESK_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./estatedesk.toml` or `./.estatedesk.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/estatedesk/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileApiConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileSearchConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
