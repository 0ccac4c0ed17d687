//! Logging infrastructure: structured run journal.
//!
//! Provides [`JsonlRunJournal`], a JSONL file writer that implements
//! the [`RunJournal`](newsquiz_application::RunJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlRunJournal;
