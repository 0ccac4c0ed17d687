//! Verification outcome: good/bad buckets per language.

use crate::core::language::Language;
use crate::quiz::question::Question;
use serde::Serialize;
use std::collections::BTreeMap;

/// Good and bad questions of a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageVerdicts {
    pub good: Vec<Question>,
    pub bad: Vec<Question>,
}

impl LanguageVerdicts {
    /// Every question rejected with the same reason.
    pub fn rejected(questions: Vec<Question>, reason: &str) -> Self {
        let bad = questions
            .into_iter()
            .map(|mut q| {
                q.reject(reason);
                q
            })
            .collect();
        Self {
            good: Vec::new(),
            bad,
        }
    }

    pub fn total(&self) -> usize {
        self.good.len() + self.bad.len()
    }
}

/// Terminal artifact of verification.
///
/// Every language that took part in the run has an entry in both maps, even
/// when its buckets are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub good: BTreeMap<Language, Vec<Question>>,
    pub bad: BTreeMap<Language, Vec<Question>>,
}

impl VerificationOutcome {
    /// An outcome with empty buckets for each language.
    pub fn empty<'a>(languages: impl IntoIterator<Item = &'a Language>) -> Self {
        let mut outcome = Self::default();
        for language in languages {
            outcome.insert(language.clone(), LanguageVerdicts::default());
        }
        outcome
    }

    pub fn insert(&mut self, language: Language, verdicts: LanguageVerdicts) {
        self.good.insert(language.clone(), verdicts.good);
        self.bad.insert(language, verdicts.bad);
    }

    pub fn good_for(&self, language: &Language) -> &[Question] {
        self.good.get(language).map_or(&[], Vec::as_slice)
    }

    pub fn bad_for(&self, language: &Language) -> &[Question] {
        self.bad.get(language).map_or(&[], Vec::as_slice)
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.good.keys()
    }

    pub fn total_good(&self) -> usize {
        self.good.values().map(Vec::len).sum()
    }

    pub fn total_bad(&self) -> usize {
        self.bad.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_good() == 0 && self.total_bad() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome_has_entries_per_language() {
        let languages = Language::defaults();
        let outcome = VerificationOutcome::empty(&languages);

        assert_eq!(outcome.languages().count(), 2);
        assert!(outcome.good_for(&Language::english()).is_empty());
        assert!(outcome.bad_for(&Language::spanish()).is_empty());
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_rejected_marks_every_question() {
        let question = Question::new(
            1,
            "",
            "Pick one",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            0,
            "",
        );
        let verdicts = LanguageVerdicts::rejected(vec![question.clone(), question], "lost");

        assert!(verdicts.good.is_empty());
        assert_eq!(verdicts.total(), 2);
        assert!(
            verdicts
                .bad
                .iter()
                .all(|q| q.verification_error.as_deref() == Some("lost"))
        );
    }

    #[test]
    fn test_unknown_language_has_empty_buckets() {
        let outcome = VerificationOutcome::default();
        assert!(outcome.good_for(&Language::english()).is_empty());
    }
}
