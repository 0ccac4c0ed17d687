//! Vocabulary word sources.

mod file_word_source;

pub use file_word_source::{FileWordSource, VocabularyError};
