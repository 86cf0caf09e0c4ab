//! Infrastructure layer for estatedesk
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer:
//!
//! - [`http`]: reqwest client for the backend's action API
//! - [`config`]: figment-based configuration loading
//! - [`logging`]: JSONL submission audit log

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use http::HttpPropertyActions;
pub use logging::JsonlSubmissionLog;
