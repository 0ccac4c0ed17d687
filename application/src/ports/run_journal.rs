//! Port for the structured run journal.
//!
//! Records what a run produced and decided (news, quizzes, verdicts,
//! images, delivery) as machine-readable events. This is separate from
//! `tracing`: tracing carries human-readable diagnostics, the journal is the
//! audit trail of a run.

use serde_json::Value;

/// A structured run event.
pub struct JournalEvent {
    /// Event type identifier (e.g., "news_generated", "question_verdict").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl JournalEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording run events.
///
/// The `record` method is synchronous and infallible so that journaling never
/// disrupts a run; write failures are the implementation's concern.
pub trait RunJournal: Send + Sync {
    fn record(&self, event: JournalEvent);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoRunJournal;

impl RunJournal for NoRunJournal {
    fn record(&self, _event: JournalEvent) {}
}
