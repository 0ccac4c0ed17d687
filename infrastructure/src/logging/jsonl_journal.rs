//! JSONL file writer for run events.
//!
//! Each [`JournalEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use newsquiz_application::{JournalEvent, RunJournal};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL run journal that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
/// Successive runs append to the same file.
pub struct JsonlRunJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRunJournal {
    /// Open the journal at the given path for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create journal directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open journal file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunJournal for JsonlRunJournal {
    fn record(&self, event: JournalEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Journal write to {} failed: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlRunJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_journal_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("journal.jsonl");
        let journal = JsonlRunJournal::open(&path).unwrap();

        journal.record(JournalEvent::new(
            "question_verdict",
            serde_json::json!({
                "language": "spanish",
                "question_id": 2,
                "accepted": false,
                "reason": "correct option mismatch"
            }),
        ));
        journal.record(JournalEvent::new(
            "delivery_summary",
            serde_json::json!({"sent": 5, "failed": 0}),
        ));
        drop(journal);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.get("timestamp").is_some());
        }
        assert_eq!(records[0]["type"], "question_verdict");
        assert_eq!(records[0]["question_id"], 2);
        assert_eq!(records[1]["type"], "delivery_summary");
        assert_eq!(records[1]["sent"], 5);
    }

    #[test]
    fn test_journal_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");

        for run in 0..2 {
            let journal = JsonlRunJournal::open(&path).unwrap();
            journal.record(JournalEvent::new("run", serde_json::json!({"run": run})));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["run"], 1);
    }

    #[test]
    fn test_journal_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let journal = JsonlRunJournal::open(&path).unwrap();

        journal.record(JournalEvent::new(
            "skipped",
            serde_json::json!("sunday"),
        ));
        drop(journal);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "skipped");
        assert_eq!(records[0]["data"], "sunday");
    }

    #[test]
    fn test_journal_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlRunJournal::open(blocker.join("journal.jsonl")).is_none());
    }
}
