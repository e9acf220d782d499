//! Rollover event logging.
//!
//! Each scheduler firing appends a JSONL line to
//! `<data_dir>/rollover-events.jsonl` so that missed or failed midnight runs
//! can be diagnosed after the fact.
//!
//! Errors are silently ignored — logging must never break the scheduler.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Log file name within the data directory.
const ROLLOVER_EVENTS_FILE: &str = "rollover-events.jsonl";

/// Append a rollover event to the log file.
pub fn log_rollover_event(data_dir: &Path, event: &str, detail: Option<&str>) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let log_path = data_dir.join(ROLLOVER_EVENTS_FILE);

    let entry = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "event": event,
        "detail": detail,
    });

    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}
