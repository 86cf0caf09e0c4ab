//! Wizard scripts
//!
//! A wizard can be driven without prompts by a TOML file naming the project,
//! properties, parties and terms. The runner resolves every reference
//! through the backend and walks the wizard one step at a time.

pub mod error;
pub mod model;
pub mod runner;

pub use error::ScriptError;
pub use model::{ScriptTerms, WizardKind, WizardScript};
pub use runner::{PreparedWizard, ScriptRunner};
