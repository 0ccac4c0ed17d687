//! Opinion types

use crate::quiz::question::Question;
use serde::{Deserialize, Serialize};

/// A verifier model's claim about which option text(s) answer a question.
///
/// Opinions reference options by text, not index, so a verifier that
/// reorders options in its head still agrees with the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
    pub question_id: i64,
    #[serde(default)]
    pub correct_options: Vec<String>,
}

impl Opinion {
    pub fn new(question_id: i64, correct_options: Vec<String>) -> Self {
        Self {
            question_id,
            correct_options,
        }
    }

    pub fn single(question_id: i64, answer: impl Into<String>) -> Self {
        Self::new(question_id, vec![answer.into()])
    }

    /// True when this opinion names exactly one option and it is `answer`.
    pub fn is_sole_answer(&self, answer: &str) -> bool {
        matches!(self.correct_options.as_slice(), [only] if only == answer)
    }
}

/// All opinions one model gave for one language batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpinionSet {
    opinions: Vec<Opinion>,
}

impl OpinionSet {
    pub fn new(opinions: Vec<Opinion>) -> Self {
        Self { opinions }
    }

    /// The generator's self-reported answers, projected to option text.
    ///
    /// Questions whose claimed index is out of range contribute an opinion
    /// with no options, which never matches anything.
    pub fn from_claims(questions: &[Question]) -> Self {
        Self {
            opinions: questions
                .iter()
                .map(|q| {
                    Opinion::new(
                        q.question_id,
                        q.claimed_answer().map(str::to_string).into_iter().collect(),
                    )
                })
                .collect(),
        }
    }

    /// First opinion given for `question_id`, if any.
    pub fn find(&self, question_id: i64) -> Option<&Opinion> {
        self.opinions.iter().find(|o| o.question_id == question_id)
    }

    pub fn len(&self) -> usize {
        self.opinions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opinions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opinion> {
        self.opinions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct: i64) -> Question {
        Question::new(
            id,
            "topic",
            "text",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            "",
        )
    }

    #[test]
    fn test_sole_answer() {
        assert!(Opinion::single(1, "c").is_sole_answer("c"));
        assert!(!Opinion::single(1, "b").is_sole_answer("c"));
        assert!(!Opinion::new(1, vec!["c".into(), "b".into()]).is_sole_answer("c"));
        assert!(!Opinion::new(1, vec![]).is_sole_answer("c"));
    }

    #[test]
    fn test_from_claims_projects_to_text() {
        let set = OpinionSet::from_claims(&[question(1, 2), question(2, 0)]);
        assert_eq!(set.find(1), Some(&Opinion::single(1, "c")));
        assert_eq!(set.find(2), Some(&Opinion::single(2, "a")));
        assert_eq!(set.find(3), None);
    }

    #[test]
    fn test_from_claims_with_invalid_index() {
        let set = OpinionSet::from_claims(&[question(1, 7)]);
        assert_eq!(set.find(1).unwrap().correct_options, Vec::<String>::new());
    }

    #[test]
    fn test_find_returns_first_match() {
        let set = OpinionSet::new(vec![Opinion::single(1, "a"), Opinion::single(1, "b")]);
        assert_eq!(set.find(1).unwrap().correct_options, vec!["a".to_string()]);
    }

    #[test]
    fn test_decodes_without_correct_options() {
        let opinion: Opinion = serde_json::from_str(r#"{"question_id": 4}"#).unwrap();
        assert!(opinion.correct_options.is_empty());
    }
}
