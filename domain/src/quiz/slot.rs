//! Question slots: what each question of a batch must be about.

use crate::core::error::DomainError;
use crate::news::entities::NewsItem;
use serde::Serialize;

/// One planned question of a language batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionSlot {
    /// A grammar question on `topic`, set in the context of `news`.
    Grammar {
        question_id: usize,
        grammar_topic: String,
        news: String,
    },
    /// A definition question on `word`; the explanation is an example
    /// sentence drawing on `news`.
    Vocabulary {
        question_id: usize,
        word: String,
        news: String,
    },
}

impl QuestionSlot {
    pub fn question_id(&self) -> usize {
        match self {
            QuestionSlot::Grammar { question_id, .. } => *question_id,
            QuestionSlot::Vocabulary { question_id, .. } => *question_id,
        }
    }

    pub fn is_vocabulary(&self) -> bool {
        matches!(self, QuestionSlot::Vocabulary { .. })
    }
}

/// Plan `count` slots: `count - 1` grammar slots followed by one vocabulary slot.
///
/// Grammar slot `i` pairs `topics[i]` with story `i` (reusing stories when the
/// batch is shorter than the plan). The vocabulary slot uses story `count - 1`,
/// or the final story when there are fewer.
pub fn plan_slots(
    topics: &[String],
    word: &str,
    news: &[NewsItem],
    count: usize,
) -> Result<Vec<QuestionSlot>, DomainError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if news.is_empty() {
        return Err(DomainError::NoNews);
    }
    let grammar_count = count - 1;
    if topics.len() < grammar_count {
        return Err(DomainError::NotEnoughTopics {
            language: String::new(),
            needed: grammar_count,
            available: topics.len(),
        });
    }

    let mut slots: Vec<QuestionSlot> = topics
        .iter()
        .take(grammar_count)
        .enumerate()
        .map(|(i, topic)| QuestionSlot::Grammar {
            question_id: i + 1,
            grammar_topic: topic.clone(),
            news: news[i % news.len()].text.clone(),
        })
        .collect();

    let vocabulary_news = news.get(count - 1).or(news.last()).map(|n| n.text.clone());
    slots.push(QuestionSlot::Vocabulary {
        question_id: count,
        word: word.to_string(),
        news: vocabulary_news.unwrap_or_default(),
    });

    Ok(slots)
}
