//! Run Pipeline use case
//!
//! Orchestrates the full daily run:
//!
//! ```text
//! news ──► (empty? skip) ──► quizzes ──► verification ──► images(good) ──► delivery
//! ```
//!
//! Stages run strictly in sequence. A news failure aborts the run before
//! anything is published.

use crate::config::{Destinations, PacingPolicy, PipelineParams};
use crate::ports::image_generator::ImageGenerator;
use crate::ports::progress::{NoProgress, PipelineProgress, PipelineStage};
use crate::ports::publisher::Publisher;
use crate::ports::run_journal::{JournalEvent, NoRunJournal, RunJournal};
use crate::ports::text_generator::TextGenerator;
use crate::ports::word_source::RandomWordSource;
use crate::use_cases::annotate_images::AnnotateImagesUseCase;
use crate::use_cases::deliver_results::{DeliverResultsUseCase, DeliveryReport};
use crate::use_cases::produce_news::{NewsError, ProduceNewsUseCase};
use crate::use_cases::produce_quizzes::ProduceQuizzesUseCase;
use crate::use_cases::shared::DiagnosticChannel;
use crate::use_cases::verify_quizzes::VerifyQuizzesUseCase;
use chrono::NaiveDate;
use newsquiz_domain::{Language, NewsItem, VerificationOutcome, assign_news};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum RunPipelineError {
    #[error(transparent)]
    NewsFailed(#[from] NewsError),

    #[error("Planning failed: {0}")]
    Planning(String),
}

/// External collaborators of a run.
#[derive(Clone)]
pub struct PipelineServices {
    pub news_generator: Arc<dyn TextGenerator>,
    pub quiz_generator: Arc<dyn TextGenerator>,
    pub primary_verifier: Arc<dyn TextGenerator>,
    pub secondary_verifier: Arc<dyn TextGenerator>,
    pub image_generator: Arc<dyn ImageGenerator>,
    pub word_source: Arc<dyn RandomWordSource>,
    pub publisher: Arc<dyn Publisher>,
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunInput {
    /// Date the news and captions are generated for
    pub date: NaiveDate,
}

impl RunInput {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

/// Wall-clock time spent in one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: PipelineStage,
    pub elapsed_ms: u64,
}

/// Result of a run that was not aborted
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub date: NaiveDate,
    /// True when no news was produced and every later stage was skipped.
    pub skipped: bool,
    pub news_count: usize,
    pub outcome: VerificationOutcome,
    pub image_languages: Vec<Language>,
    pub delivery: DeliveryReport,
    pub timings: Vec<StageTiming>,
}

impl RunReport {
    fn skipped(date: NaiveDate, languages: &[Language], timings: Vec<StageTiming>) -> Self {
        Self {
            date,
            skipped: true,
            news_count: 0,
            outcome: VerificationOutcome::empty(languages),
            image_languages: Vec::new(),
            delivery: DeliveryReport::default(),
            timings,
        }
    }
}

/// Use case for running the daily pipeline
pub struct RunPipelineUseCase {
    params: PipelineParams,
    news: ProduceNewsUseCase,
    quizzes: ProduceQuizzesUseCase,
    verifier: VerifyQuizzesUseCase,
    images: AnnotateImagesUseCase,
    delivery: DeliverResultsUseCase,
    diagnostics: DiagnosticChannel,
    journal: Arc<dyn RunJournal>,
}

impl RunPipelineUseCase {
    pub fn new(
        services: PipelineServices,
        params: PipelineParams,
        destinations: Destinations,
        pacing: PacingPolicy,
    ) -> Self {
        let timeout = params.call_timeout;
        let diagnostics = DiagnosticChannel::new(
            Arc::clone(&services.publisher),
            destinations.log_channel.clone(),
            timeout,
        );

        Self {
            news: ProduceNewsUseCase::new(services.news_generator, diagnostics.clone(), timeout),
            quizzes: ProduceQuizzesUseCase::new(
                services.quiz_generator,
                services.word_source,
                diagnostics.clone(),
                timeout,
            ),
            verifier: VerifyQuizzesUseCase::new(
                services.primary_verifier,
                services.secondary_verifier,
                timeout,
            )
            .with_policy(params.verifier_failure_policy)
            .with_retries(params.verifier_retries),
            images: AnnotateImagesUseCase::new(services.image_generator, timeout),
            delivery: DeliverResultsUseCase::new(services.publisher, destinations, pacing, timeout),
            diagnostics,
            journal: Arc::new(NoRunJournal),
            params,
        }
    }

    pub fn with_journal(mut self, journal: Arc<dyn RunJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: &RunInput) -> Result<RunReport, RunPipelineError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: &RunInput,
        progress: &dyn PipelineProgress,
    ) -> Result<RunReport, RunPipelineError> {
        let languages = &self.params.languages;
        let count = self.params.questions_per_language;
        let mut timings = Vec::new();

        info!(
            "Starting run for {} ({} languages, {} questions each)",
            input.date,
            languages.len(),
            count
        );

        // Stage 1: News
        let started = Instant::now();
        let planned = assign_news(count, &mut rand::thread_rng());
        let assignments = match planned {
            Ok(assignments) => assignments,
            Err(e) => {
                self.diagnostics
                    .notify(&format!("Run for {} aborted: {}", input.date, e))
                    .await;
                return Err(RunPipelineError::Planning(e.to_string()));
            }
        };

        progress.on_stage_start(PipelineStage::News, 1);
        let news = self.news.execute(input.date, &assignments).await;
        progress.on_task_complete(PipelineStage::News, "news", news.is_ok());
        progress.on_stage_complete(PipelineStage::News);
        let news = news?;
        timings.push(timing(PipelineStage::News, started));
        self.journal_news(&news);

        if news.is_empty() {
            warn!("No news generated; skipping the rest of the run");
            self.diagnostics
                .notify(&format!("No news generated for {}; run skipped", input.date))
                .await;
            return Ok(RunReport::skipped(input.date, languages, timings));
        }

        // Stage 2: Quizzes
        let started = Instant::now();
        let quizzes = self
            .quizzes
            .execute_with_progress(&news, languages, count, progress)
            .await;
        timings.push(timing(PipelineStage::Quizzes, started));
        self.journal.record(JournalEvent::new(
            "quizzes_generated",
            json!({
                "counts": quizzes
                    .iter()
                    .map(|(language, questions)| (language.to_string(), questions.len()))
                    .collect::<BTreeMap<_, _>>(),
            }),
        ));

        // Stage 3: Verification
        let started = Instant::now();
        let outcome = self.verifier.execute_with_progress(quizzes, progress).await;
        timings.push(timing(PipelineStage::Verification, started));
        self.journal_verdicts(&outcome);

        // Stage 4: Images over the good bucket only
        let started = Instant::now();
        let images = self
            .images
            .execute_with_progress(&outcome.good, progress)
            .await;
        timings.push(timing(PipelineStage::Images, started));
        for (language, image) in &images {
            self.journal.record(JournalEvent::new(
                "image_generated",
                json!({ "language": language, "bytes": image.len(), "mime_type": image.mime_type }),
            ));
        }

        // Stage 5: Delivery
        let started = Instant::now();
        let delivery = self
            .delivery
            .execute_with_progress(input.date, &outcome, &images, progress)
            .await;
        timings.push(timing(PipelineStage::Delivery, started));
        self.journal.record(JournalEvent::new(
            "delivery_summary",
            json!({
                "sent": delivery.sent,
                "failed": delivery.failed,
                "skipped_languages": delivery.skipped_languages,
            }),
        ));

        info!(
            "Run finished: {} good, {} bad, {} sent",
            outcome.total_good(),
            outcome.total_bad(),
            delivery.sent
        );

        Ok(RunReport {
            date: input.date,
            skipped: false,
            news_count: news.len(),
            image_languages: images.into_keys().collect(),
            outcome,
            delivery,
            timings,
        })
    }

    fn journal_news(&self, news: &[NewsItem]) {
        self.journal.record(JournalEvent::new(
            "news_generated",
            json!({ "count": news.len(), "news": news }),
        ));
    }

    fn journal_verdicts(&self, outcome: &VerificationOutcome) {
        for (language, questions) in &outcome.good {
            for question in questions {
                self.journal.record(JournalEvent::new(
                    "question_verdict",
                    json!({
                        "language": language,
                        "question_id": question.question_id,
                        "verdict": "accepted",
                    }),
                ));
            }
        }
        for (language, questions) in &outcome.bad {
            for question in questions {
                self.journal.record(JournalEvent::new(
                    "question_verdict",
                    json!({
                        "language": language,
                        "question_id": question.question_id,
                        "verdict": "rejected",
                        "reason": question.verification_error,
                    }),
                ));
            }
        }
    }
}

fn timing(stage: PipelineStage, started: Instant) -> StageTiming {
    StageTiming {
        stage,
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}
