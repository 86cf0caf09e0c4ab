use estatedesk_application::{ActionError, LookupError, SessionError};
use estatedesk_domain::ValidationErrors;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or running a wizard script
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid wizard script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{wizard} scripts need '{field}'")]
    Missing {
        wizard: &'static str,
        field: &'static str,
    },

    #[error("No {kind} '{name}' in this project")]
    UnknownProperty { kind: &'static str, name: String },

    #[error("No payment plan template named '{0}'")]
    UnknownTemplate(String),

    #[error("'{0}' is not one of the script's buyers")]
    UnknownParty(String),

    #[error("{wizard} takes exactly one property, the script names {count}")]
    TooManyProperties { wizard: &'static str, count: usize },

    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Step {step} ({title}) is blocked")]
    Blocked {
        step: usize,
        title: &'static str,
        errors: ValidationErrors,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Action(#[from] ActionError),
}
