//! Application layer for estatedesk
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    notifier::{NoNotifier, Notifier},
    property_actions::{ActionError, PropertyActions, SubmissionReceipt},
    submission_log::{NoSubmissionLogger, SubmissionLogger, SubmissionRecord},
};
pub use use_cases::catalog::{CatalogUseCase, LookupError};
pub use use_cases::documents::DocumentsUseCase;
pub use use_cases::search::{DebouncedSearch, SearchHits, SearchOutcome, SearchTarget};
pub use use_cases::submit::{Submission, SubmitError, SubmitWizardUseCase};
pub use use_cases::wizard_session::{SessionError, WizardSession};
