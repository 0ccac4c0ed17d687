//! Vocabulary loaded from a TOML word list.
//!
//! ```toml
//! [[words]]
//! word = "madrugar"
//! language = "spanish"
//! meaning = "to get up early"
//! word_type = "verb"
//! example = "Mañana tengo que madrugar."
//! ```

use async_trait::async_trait;
use newsquiz_application::{RandomWordSource, WordSourceError};
use newsquiz_domain::{Language, VocabularyWord};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("cannot read word list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid word list: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct WordFile {
    #[serde(default)]
    words: Vec<WordEntry>,
}

#[derive(Debug, Deserialize)]
struct WordEntry {
    word: String,
    language: String,
    meaning: Option<String>,
    /// Usage notes; folded into `meaning` when no meaning is given.
    context: Option<String>,
    word_type: Option<String>,
    example: Option<String>,
}

impl WordEntry {
    fn into_word(self) -> VocabularyWord {
        VocabularyWord {
            word: self.word,
            meaning: self.meaning.or(self.context),
            word_type: self.word_type,
            example: self.example,
        }
    }
}

/// In-memory word list grouped by language. Read once, sampled many times.
#[derive(Debug, Default)]
pub struct FileWordSource {
    words: BTreeMap<Language, Vec<VocabularyWord>>,
}

impl FileWordSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, VocabularyError> {
        let file: WordFile = toml::from_str(content)?;
        let mut words: BTreeMap<Language, Vec<VocabularyWord>> = BTreeMap::new();
        for entry in file.words {
            if entry.word.trim().is_empty() {
                continue;
            }
            match Language::new(&entry.language) {
                Ok(language) => words.entry(language).or_default().push(entry.into_word()),
                Err(_) => warn!("Skipping word '{}' with empty language", entry.word),
            }
        }
        Ok(Self { words })
    }

    /// A source with no words; every sample is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn count(&self, language: &Language) -> usize {
        self.words.get(language).map_or(0, Vec::len)
    }
}

#[async_trait]
impl RandomWordSource for FileWordSource {
    async fn sample(
        &self,
        language: &Language,
        count: usize,
    ) -> Result<Vec<VocabularyWord>, WordSourceError> {
        let Some(words) = self.words.get(language) else {
            return Ok(Vec::new());
        };
        let mut rng = rand::thread_rng();
        Ok(words.choose_multiple(&mut rng, count).cloned().collect())
    }
}
