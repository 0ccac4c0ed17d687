//! News entities

use serde::{Deserialize, Serialize};

/// Maximum length of a story text, in characters.
pub const MAX_NEWS_TEXT_CHARS: usize = 1000;

/// A single generated news story (Entity)
///
/// Produced once per run and immutable afterwards. The field names match the
/// JSON the news model is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub region: String,
    pub text: String,
}

impl NewsItem {
    pub fn new(
        id: i64,
        category: impl Into<String>,
        region: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            region: region.into(),
            text: text.into(),
        }
    }

    /// Whether the story respects the length limit given to the model.
    pub fn is_within_length(&self) -> bool {
        self.text.chars().count() <= MAX_NEWS_TEXT_CHARS
    }
}
