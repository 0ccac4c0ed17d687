//! Verify Quizzes use case
//!
//! Cross-verifies every language batch with two independent models and
//! partitions it into good and bad questions.
//!
//! Per language: build the initial opinions from the generator's own claims,
//! ask both verifiers concurrently (claims withheld), resolve failed calls
//! through the [`VerifierFailurePolicy`], then reconcile question by question.

use crate::ports::progress::{NoProgress, PipelineProgress, PipelineStage};
use crate::ports::text_generator::{GatewayError, TextGenerator};
use crate::use_cases::shared::bounded;
use newsquiz_domain::{
    Language, LanguageVerdicts, OpinionSet, Prompt, PromptTemplate, Question,
    VerificationOutcome, VerifierFailurePolicy, VerifierRole, decode_opinions, partition,
    resolve_opinions,
};
use newsquiz_domain::verification::reconcile::REASON_TASK_FAILED;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

/// Use case for cross-verifying question batches
pub struct VerifyQuizzesUseCase {
    primary: Arc<dyn TextGenerator>,
    secondary: Arc<dyn TextGenerator>,
    policy: VerifierFailurePolicy,
    retries: usize,
    call_timeout: Duration,
}

/// One verifier bound to its role, cheap to clone into a task.
#[derive(Clone)]
struct Verifier {
    role: VerifierRole,
    generator: Arc<dyn TextGenerator>,
    retries: usize,
    call_timeout: Duration,
}

impl VerifyQuizzesUseCase {
    pub fn new(
        primary: Arc<dyn TextGenerator>,
        secondary: Arc<dyn TextGenerator>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            secondary,
            policy: VerifierFailurePolicy::default(),
            retries: 0,
            call_timeout,
        }
    }

    pub fn with_policy(mut self, policy: VerifierFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        questions: BTreeMap<Language, Vec<Question>>,
    ) -> VerificationOutcome {
        self.execute_with_progress(questions, &NoProgress).await
    }

    /// Every input language has an entry in both buckets of the outcome.
    pub async fn execute_with_progress(
        &self,
        questions: BTreeMap<Language, Vec<Question>>,
        progress: &dyn PipelineProgress,
    ) -> VerificationOutcome {
        let mut outcome = VerificationOutcome::empty(questions.keys());
        let pending: Vec<(Language, Vec<Question>)> = questions
            .into_iter()
            .filter(|(language, batch)| {
                if batch.is_empty() {
                    debug!("Nothing to verify for {}", language);
                }
                !batch.is_empty()
            })
            .collect();

        progress.on_stage_start(PipelineStage::Verification, pending.len());
        info!(
            "Verifying {} language batches with {} and {} (policy: {})",
            pending.len(),
            self.primary.name(),
            self.secondary.name(),
            self.policy
        );

        let primary = self.verifier(VerifierRole::Primary, &self.primary);
        let secondary = self.verifier(VerifierRole::Secondary, &self.secondary);
        let policy = self.policy;

        // A task that panics loses its batch; keep a copy so it can still be
        // reported as bad.
        let mut in_flight: HashMap<Id, (Language, Vec<Question>)> = HashMap::new();
        let mut join_set = JoinSet::new();
        for (language, batch) in pending {
            let primary = primary.clone();
            let secondary = secondary.clone();
            let task_language = language.clone();
            let task_batch = batch.clone();
            let handle = join_set.spawn(async move {
                let verdicts =
                    verify_language(&task_language, task_batch, &primary, &secondary, policy)
                        .await;
                (task_language, verdicts)
            });
            in_flight.insert(handle.id(), (language, batch));
        }

        while let Some(result) = join_set.join_next_with_id().await {
            match result {
                Ok((id, (language, verdicts))) => {
                    in_flight.remove(&id);
                    info!(
                        "{}: {} good, {} bad",
                        language,
                        verdicts.good.len(),
                        verdicts.bad.len()
                    );
                    progress.on_task_complete(
                        PipelineStage::Verification,
                        language.as_str(),
                        !verdicts.good.is_empty(),
                    );
                    outcome.insert(language, verdicts);
                }
                Err(e) => {
                    warn!("Verification task join error: {}", e);
                    let Some((language, batch)) = in_flight.remove(&e.id()) else {
                        continue;
                    };
                    progress.on_task_complete(
                        PipelineStage::Verification,
                        language.as_str(),
                        false,
                    );
                    outcome.insert(language, LanguageVerdicts::rejected(batch, REASON_TASK_FAILED));
                }
            }
        }

        progress.on_stage_complete(PipelineStage::Verification);
        outcome
    }

    fn verifier(&self, role: VerifierRole, generator: &Arc<dyn TextGenerator>) -> Verifier {
        Verifier {
            role,
            generator: Arc::clone(generator),
            retries: self.retries,
            call_timeout: self.call_timeout,
        }
    }
}

async fn verify_language(
    language: &Language,
    questions: Vec<Question>,
    primary: &Verifier,
    secondary: &Verifier,
    policy: VerifierFailurePolicy,
) -> LanguageVerdicts {
    let initial = OpinionSet::from_claims(&questions);
    let prompt = PromptTemplate::verification(language, &questions);

    let (primary_response, secondary_response) = tokio::join!(
        primary.ask(language, &prompt),
        secondary.ask(language, &prompt)
    );

    let primary_opinions = resolve_opinions(primary.role, primary_response, &initial, policy);
    let secondary_opinions =
        resolve_opinions(secondary.role, secondary_response, &initial, policy);

    partition(questions, &primary_opinions, &secondary_opinions)
}

impl Verifier {
    /// Ask for opinions; `None` once every attempt has failed.
    async fn ask(&self, language: &Language, prompt: &Prompt) -> Option<OpinionSet> {
        for attempt in 0..=self.retries {
            if attempt > 0 {
                debug!(
                    "Retrying {} verifier for {} (attempt {})",
                    self.role,
                    language,
                    attempt + 1
                );
            }

            let raw = match bounded(
                self.call_timeout,
                self.generator.generate(prompt),
                GatewayError::Timeout,
            )
            .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        "{} verifier ({}) failed for {}: {}",
                        self.role,
                        self.generator.name(),
                        language,
                        e
                    );
                    continue;
                }
            };

            match decode_opinions(&raw) {
                Ok((opinions, skipped)) => {
                    if skipped > 0 {
                        debug!(
                            "{} verifier for {}: skipped {} malformed opinions",
                            self.role, language, skipped
                        );
                    }
                    return Some(opinions);
                }
                Err(e) => {
                    warn!(
                        "{} verifier ({}) returned undecodable opinions for {}: {}",
                        self.role,
                        self.generator.name(),
                        language,
                        e
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        PanickingGenerator, RoutingGenerator, ScriptedGenerator, SlowGenerator, question,
    };
    use newsquiz_domain::verification::reconcile::{
        REASON_DUPLICATE_OPTIONS, REASON_MISMATCH, REASON_NO_OPINIONS,
    };

    fn opinions(answers: &[(i64, &[&str])]) -> String {
        let items: Vec<serde_json::Value> = answers
            .iter()
            .map(|(id, options)| serde_json::json!({"question_id": id, "correct_options": options}))
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    fn english(questions: Vec<Question>) -> BTreeMap<Language, Vec<Question>> {
        BTreeMap::from([(Language::english(), questions)])
    }

    fn use_case(
        primary: Arc<dyn TextGenerator>,
        secondary: Arc<dyn TextGenerator>,
    ) -> VerifyQuizzesUseCase {
        VerifyQuizzesUseCase::new(primary, secondary, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_full_agreement_accepts() {
        let reply = opinions(&[(1, &["c"])]);
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(reply.clone())),
            Arc::new(ScriptedGenerator::ok(reply)),
        );

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        assert_eq!(outcome.good_for(&Language::english()).len(), 1);
        assert!(outcome.bad_for(&Language::english()).is_empty());
    }

    #[tokio::test]
    async fn test_secondary_mismatch_rejects() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])]))),
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["b"])]))),
        );

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        let bad = outcome.bad_for(&Language::english());
        assert_eq!(bad.len(), 1);
        assert!(
            bad[0]
                .verification_error
                .as_deref()
                .unwrap()
                .starts_with(REASON_MISMATCH)
        );
    }

    #[tokio::test]
    async fn test_multi_answer_opinion_rejects() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])]))),
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c", "d"])]))),
        );

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;
        assert_eq!(outcome.bad_for(&Language::english()).len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_options_rejected_regardless_of_opinions() {
        let reply = opinions(&[(1, &["c"])]);
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(reply.clone())),
            Arc::new(ScriptedGenerator::ok(reply)),
        );

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "a", "c", "d"], 2)]))
            .await;

        let bad = outcome.bad_for(&Language::english());
        assert_eq!(
            bad[0].verification_error.as_deref(),
            Some(REASON_DUPLICATE_OPTIONS)
        );
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back_to_claim() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok("not json at all")),
            Arc::new(ScriptedGenerator::ok("{\"question_id\": 1}")),
        );

        let outcome = use_case
            .execute(english(vec![
                question(1, ["a", "b", "c", "d"], 2),
                question(2, ["a", "b", "c", "d"], 0),
            ]))
            .await;

        assert_eq!(outcome.good_for(&Language::english()).len(), 2);
    }

    #[tokio::test]
    async fn test_abstain_policy_rejects_when_both_fail() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::failing()),
            Arc::new(ScriptedGenerator::failing()),
        )
        .with_policy(VerifierFailurePolicy::Abstain);

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        let bad = outcome.bad_for(&Language::english());
        assert_eq!(bad[0].verification_error.as_deref(), Some(REASON_NO_OPINIONS));
    }

    #[tokio::test]
    async fn test_abstain_policy_uses_surviving_verifier() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])]))),
            Arc::new(ScriptedGenerator::failing()),
        )
        .with_policy(VerifierFailurePolicy::Abstain);

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;
        assert_eq!(outcome.good_for(&Language::english()).len(), 1);
    }

    #[tokio::test]
    async fn test_reject_policy_names_failed_role() {
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])]))),
            Arc::new(SlowGenerator),
        )
        .with_policy(VerifierFailurePolicy::Reject);
        let use_case = VerifyQuizzesUseCase {
            call_timeout: Duration::from_millis(20),
            ..use_case
        };

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        let bad = outcome.bad_for(&Language::english());
        assert_eq!(
            bad[0].verification_error.as_deref(),
            Some("verifier unavailable: secondary")
        );
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let flaky = Arc::new(ScriptedGenerator::new(vec![
            Err(GatewayError::RequestFailed("503".to_string())),
            Ok(opinions(&[(1, &["b"])])),
        ]));
        let use_case = use_case(
            Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])]))),
            flaky.clone(),
        )
        .with_retries(1);

        let outcome = use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        // The retried answer disagrees, so the question is rejected rather
        // than trusted through the fallback.
        assert_eq!(flaky.calls(), 2);
        assert_eq!(outcome.bad_for(&Language::english()).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_language_is_skipped() {
        let primary = Arc::new(ScriptedGenerator::failing());
        let use_case = use_case(primary.clone(), Arc::new(ScriptedGenerator::failing()));

        let outcome = use_case
            .execute(BTreeMap::from([
                (Language::english(), Vec::new()),
                (Language::spanish(), Vec::new()),
            ]))
            .await;

        assert_eq!(primary.calls(), 0);
        assert_eq!(outcome.languages().count(), 2);
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_languages_verified_independently() {
        let routes = || {
            vec![
                ("in English", Ok(opinions(&[(1, &["c"])]))),
                ("in Spanish", Ok(opinions(&[(1, &["a"])]))),
            ]
        };
        let use_case = use_case(
            Arc::new(RoutingGenerator::new(routes())),
            Arc::new(RoutingGenerator::new(routes())),
        );

        let outcome = use_case
            .execute(BTreeMap::from([
                (Language::english(), vec![question(1, ["a", "b", "c", "d"], 2)]),
                (Language::spanish(), vec![question(1, ["a", "b", "c", "d"], 2)]),
            ]))
            .await;

        assert_eq!(outcome.good_for(&Language::english()).len(), 1);
        assert_eq!(outcome.bad_for(&Language::spanish()).len(), 1);
    }

    #[tokio::test]
    async fn test_crashed_task_keeps_questions_as_bad() {
        let reply = opinions(&[(1, &["c"]), (2, &["a"])]);
        let use_case = use_case(
            Arc::new(PanickingGenerator::on("in Spanish", reply.clone())),
            Arc::new(ScriptedGenerator::new(vec![Ok(reply.clone()), Ok(reply)])),
        );

        let outcome = use_case
            .execute(BTreeMap::from([
                (
                    Language::english(),
                    vec![
                        question(1, ["a", "b", "c", "d"], 2),
                        question(2, ["a", "b", "c", "d"], 0),
                    ],
                ),
                (
                    Language::spanish(),
                    vec![
                        question(1, ["a", "b", "c", "d"], 2),
                        question(2, ["a", "b", "c", "d"], 0),
                    ],
                ),
            ]))
            .await;

        assert_eq!(outcome.good_for(&Language::english()).len(), 2);
        assert!(outcome.good_for(&Language::spanish()).is_empty());
        let bad = outcome.bad_for(&Language::spanish());
        assert_eq!(bad.len(), 2);
        assert!(
            bad.iter()
                .all(|q| q.verification_error.as_deref() == Some(REASON_TASK_FAILED))
        );
    }

    #[tokio::test]
    async fn test_prompt_withholds_claim() {
        let primary = Arc::new(ScriptedGenerator::ok(opinions(&[(1, &["c"])])));
        let use_case = use_case(primary.clone(), Arc::new(ScriptedGenerator::ok("[]")));

        use_case
            .execute(english(vec![question(1, ["a", "b", "c", "d"], 2)]))
            .await;

        let prompt = primary.prompts()[0].text();
        assert!(!prompt.contains("correct_option_id"));
        assert!(!prompt.contains("Because."));
    }
}
