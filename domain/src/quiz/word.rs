//! Vocabulary word value object

use serde::{Deserialize, Serialize};

/// A vocabulary entry used as the seed of the daily definition question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl VocabularyWord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: None,
            word_type: None,
            example: None,
        }
    }
}
