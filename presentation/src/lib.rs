//! Presentation layer for estatedesk
//!
//! This crate contains the CLI definition, console formatters, the toast
//! notifier, and the wizard script runner.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod script;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, DocumentsCommand};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ConsoleNotifier, SimpleNotifier};
pub use script::{PreparedWizard, ScriptError, ScriptRunner, WizardKind, WizardScript};
