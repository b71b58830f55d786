//! JSONL file writer for session lifecycle events.
//!
//! Each lifecycle notification is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered
//! writer.

use foreman_application::{LifecycleObserver, SessionFailed, SessionStarted};
use foreman_domain::PlannerResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL lifecycle logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`. Write
/// failures are swallowed: a broken log file must never abort a session.
pub struct JsonlLifecycleLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlLifecycleLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create lifecycle log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not create lifecycle log file {}: {}",
                    path.display(),
                    e
                );
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

    fn write_record(&self, record: serde_json::Value) {
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush per record for crash safety — JSONL is append-only
            let _ = writer.flush();
        }
    }

    fn timestamp() -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

impl LifecycleObserver for JsonlLifecycleLogger {
    fn on_start(&self, event: &SessionStarted) {
        self.write_record(serde_json::json!({
            "type": "start",
            "timestamp": Self::timestamp(),
            "session": event.session_id,
            "input": event.input,
        }));
    }

    fn on_complete(&self, result: &PlannerResult) {
        self.write_record(serde_json::json!({
            "type": "complete",
            "timestamp": Self::timestamp(),
            "session": result.id,
            "status": result.status,
            "actions": result.actions.len(),
            "errors": result.errors.len(),
            "confidence": result.confidence,
            "tokens_used": result.tokens_used,
            "duration_ms": result.duration_ms,
        }));
    }

    fn on_error(&self, event: &SessionFailed) {
        self.write_record(serde_json::json!({
            "type": "error",
            "timestamp": Self::timestamp(),
            "session": event.session_id,
            "message": event.message,
            "duration_ms": event.duration.as_millis() as u64,
        }));
    }
}

impl Drop for JsonlLifecycleLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
