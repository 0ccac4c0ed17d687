//! Question entity

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of options every question must carry.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question as produced by the quiz model (Entity)
///
/// `correct_option_id` is the generating model's own claim. The only
/// mutation a question ever sees is [`Question::reject`], which attaches
/// the reason it ended up in the bad bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: i64,
    #[serde(default)]
    pub grammar_topic: String,
    #[serde(rename = "question", alias = "question_text")]
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_id: i64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_error: Option<String>,
}

impl Question {
    pub fn new(
        question_id: i64,
        grammar_topic: impl Into<String>,
        question_text: impl Into<String>,
        options: Vec<String>,
        correct_option_id: i64,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            question_id,
            grammar_topic: grammar_topic.into(),
            question_text: question_text.into(),
            options,
            correct_option_id,
            explanation: explanation.into(),
            verification_error: None,
        }
    }

    /// Whether all options are pairwise distinct.
    pub fn has_distinct_options(&self) -> bool {
        let unique: HashSet<&str> = self.options.iter().map(String::as_str).collect();
        unique.len() == self.options.len()
    }

    pub fn has_expected_option_count(&self) -> bool {
        self.options.len() == OPTION_COUNT
    }

    /// Index of the claimed answer, if it points into `options`.
    pub fn claimed_index(&self) -> Option<usize> {
        usize::try_from(self.correct_option_id)
            .ok()
            .filter(|&i| i < self.options.len())
    }

    /// Option text of the generator's claimed answer.
    pub fn claimed_answer(&self) -> Option<&str> {
        self.claimed_index().map(|i| self.options[i].as_str())
    }

    /// Attach a rejection reason.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.verification_error = Some(reason.into());
    }
}
