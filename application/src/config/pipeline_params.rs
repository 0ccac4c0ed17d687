//! Pipeline parameters: run-wide knobs shared by the use cases.
//!
//! [`PipelineParams`] groups the static parameters that control a run:
//! which languages are produced, how many questions each batch holds, how
//! long any external call may take, and what happens when a verifier fails.

use newsquiz_domain::{Language, VerifierFailurePolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of questions per language (K).
pub const DEFAULT_QUESTIONS_PER_LANGUAGE: usize = 4;

/// Default bound on a single external call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Languages produced by a run, in configuration order.
    pub languages: Vec<Language>,
    /// Questions per language batch (K). Also the number of news stories.
    pub questions_per_language: usize,
    /// Upper bound on every model, image and publisher call.
    pub call_timeout: Duration,
    /// What a failed verifier contributes to reconciliation.
    pub verifier_failure_policy: VerifierFailurePolicy,
    /// Extra attempts for a failed verification call before the policy applies.
    pub verifier_retries: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            languages: Language::defaults(),
            questions_per_language: DEFAULT_QUESTIONS_PER_LANGUAGE,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            verifier_failure_policy: VerifierFailurePolicy::default(),
            verifier_retries: 0,
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_questions_per_language(mut self, count: usize) -> Self {
        self.questions_per_language = count;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_verifier_failure_policy(mut self, policy: VerifierFailurePolicy) -> Self {
        self.verifier_failure_policy = policy;
        self
    }

    pub fn with_verifier_retries(mut self, retries: usize) -> Self {
        self.verifier_retries = retries;
        self
    }
}
