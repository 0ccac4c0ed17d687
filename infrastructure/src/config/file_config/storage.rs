//! Local file locations (`[vocabulary]` and `[journal]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVocabularyConfig {
    /// TOML file with `[[words]]` entries.
    pub path: PathBuf,
}

impl Default for FileVocabularyConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("words.toml"),
        }
    }
}

/// Structured run journal. Disabled when `path` is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJournalConfig {
    pub path: Option<PathBuf>,
}
