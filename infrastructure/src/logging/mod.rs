//! Logging infrastructure: the submission audit trail.
//!
//! Provides [`JsonlSubmissionLog`], a JSONL file writer that implements
//! the [`SubmissionLogger`](estatedesk_application::SubmissionLogger) port.

mod jsonl_submission_log;

pub use jsonl_submission_log::JsonlSubmissionLog;
