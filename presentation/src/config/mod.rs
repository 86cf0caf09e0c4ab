//! Presentation-level configuration
//!
//! Configuration for console output.

use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Prefix printed before amounts, e.g. "$" or "PKR "
    pub currency_symbol: String,
    /// Show a spinner while requests are in flight
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            currency_symbol: String::new(),
            show_progress: true,
        }
    }
}
