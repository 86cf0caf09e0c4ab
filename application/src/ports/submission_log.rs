//! Port for the submission audit log.
//!
//! Every attempt to create a record through a wizard is recorded with its
//! payload and outcome. This is separate from `tracing`-based operation logs:
//! tracing handles diagnostics, this port keeps a machine-readable trail of
//! what was sent to the backend.

use serde_json::Value;

/// One submission attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    /// Backend action name (e.g. `createContract`)
    pub action: &'static str,
    pub payload: Value,
    pub success: bool,
    /// Server message or error text
    pub message: Option<String>,
}

impl SubmissionRecord {
    pub fn new(action: &'static str, payload: Value, success: bool, message: Option<String>) -> Self {
        Self {
            action,
            payload,
            success,
            message,
        }
    }
}

/// Port for recording submission attempts.
///
/// `log` is synchronous and non-fallible; a broken log must not fail the
/// submission itself.
pub trait SubmissionLogger: Send + Sync {
    fn log(&self, record: SubmissionRecord);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoSubmissionLogger;

impl SubmissionLogger for NoSubmissionLogger {
    fn log(&self, _record: SubmissionRecord) {}
}
