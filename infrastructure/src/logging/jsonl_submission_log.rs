//! JSONL file writer for submission attempts.
//!
//! Each [`SubmissionRecord`] becomes one JSON line carrying the action name,
//! outcome, message, payload and a UTC timestamp. The file is opened in
//! append mode so the trail survives across runs.

use estatedesk_application::{SubmissionLogger, SubmissionRecord};
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL submission log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after each record and
/// on `Drop`.
pub struct JsonlSubmissionLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlSubmissionLog {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create submission log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open submission log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionLogger for JsonlSubmissionLog {
    fn log(&self, record: SubmissionRecord) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let line = json!({
            "timestamp": timestamp,
            "action": record.action,
            "success": record.success,
            "message": record.message,
            "payload": record.payload,
        });

        let Ok(line) = serde_json::to_string(&line) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Could not write submission log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlSubmissionLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
