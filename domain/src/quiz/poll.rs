//! Poll value object: a question rendered for a messaging channel.

use crate::core::string::truncate;
use crate::quiz::question::Question;
use serde::Serialize;
use std::collections::HashSet;

/// Maximum poll prompt length accepted by quiz polls.
pub const MAX_POLL_PROMPT_CHARS: usize = 300;
/// Maximum length of a single poll option.
pub const MAX_POLL_OPTION_CHARS: usize = 100;
/// Maximum length of the explanation shown after answering.
pub const MAX_POLL_EXPLANATION_CHARS: usize = 200;

/// A quiz poll ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poll {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl Poll {
    /// Render a question as a poll.
    ///
    /// Returns `None` when the claimed answer does not index into the
    /// options, or when truncation makes two options identical and the
    /// poll would become ambiguous.
    pub fn from_question(question: &Question) -> Option<Self> {
        let correct_index = question.claimed_index()?;
        let prompt = if question.grammar_topic.is_empty() {
            question.question_text.clone()
        } else {
            format!(
                "Topic: {}.\n{}",
                question.grammar_topic, question.question_text
            )
        };

        let options: Vec<String> = question
            .options
            .iter()
            .map(|o| truncate(o, MAX_POLL_OPTION_CHARS))
            .collect();
        let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
        if distinct.len() != options.len() {
            return None;
        }

        Some(Self {
            prompt: truncate(&prompt, MAX_POLL_PROMPT_CHARS),
            options,
            correct_index,
            explanation: truncate(&question.explanation, MAX_POLL_EXPLANATION_CHARS),
        })
    }
}
