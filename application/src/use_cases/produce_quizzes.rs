//! Produce Quizzes use case
//!
//! Turns the news batch into one question batch per language. Languages are
//! processed concurrently and in isolation: a failure in one language leaves
//! its batch empty and never affects the others.

use crate::ports::progress::{NoProgress, PipelineProgress, PipelineStage};
use crate::ports::text_generator::{GatewayError, TextGenerator};
use crate::ports::word_source::{RandomWordSource, WordSourceError};
use crate::use_cases::shared::{DiagnosticChannel, QUIZ_LOG_PREFIX_CHARS, bounded};
use newsquiz_domain::{
    DomainError, Language, NewsItem, PromptTemplate, Question, decode_json_list, plan_slots,
    prefix, sample_topics,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

/// Use case for producing per-language question batches
pub struct ProduceQuizzesUseCase {
    generator: Arc<dyn TextGenerator>,
    words: Arc<dyn RandomWordSource>,
    diagnostics: DiagnosticChannel,
    call_timeout: Duration,
}

/// Everything one language task needs, owned so it can move into a task.
struct LanguageJob {
    language: Language,
    topics: Result<Vec<String>, DomainError>,
    news: Arc<[NewsItem]>,
    count: usize,
    generator: Arc<dyn TextGenerator>,
    words: Arc<dyn RandomWordSource>,
    diagnostics: DiagnosticChannel,
    call_timeout: Duration,
}

impl ProduceQuizzesUseCase {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        words: Arc<dyn RandomWordSource>,
        diagnostics: DiagnosticChannel,
        call_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            words,
            diagnostics,
            call_timeout,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        news: &[NewsItem],
        languages: &[Language],
        count: usize,
    ) -> BTreeMap<Language, Vec<Question>> {
        self.execute_with_progress(news, languages, count, &NoProgress)
            .await
    }

    /// Every requested language is present in the result, possibly empty.
    pub async fn execute_with_progress(
        &self,
        news: &[NewsItem],
        languages: &[Language],
        count: usize,
        progress: &dyn PipelineProgress,
    ) -> BTreeMap<Language, Vec<Question>> {
        progress.on_stage_start(PipelineStage::Quizzes, languages.len());

        let mut batches: BTreeMap<Language, Vec<Question>> = languages
            .iter()
            .map(|l| (l.clone(), Vec::new()))
            .collect();

        // Topics are drawn up front; the thread-local rng must not cross an await.
        let jobs: Vec<LanguageJob> = {
            let mut rng = rand::thread_rng();
            let news: Arc<[NewsItem]> = news.into();
            languages
                .iter()
                .map(|language| LanguageJob {
                    language: language.clone(),
                    topics: sample_topics(language, count.saturating_sub(1), &mut rng),
                    news: Arc::clone(&news),
                    count,
                    generator: Arc::clone(&self.generator),
                    words: Arc::clone(&self.words),
                    diagnostics: self.diagnostics.clone(),
                    call_timeout: self.call_timeout,
                })
                .collect()
        };

        let mut in_flight: HashMap<Id, Language> = HashMap::new();
        let mut join_set = JoinSet::new();
        for job in jobs {
            let language = job.language.clone();
            let handle = join_set.spawn(async move {
                let language = job.language.clone();
                let questions = job.run().await;
                (language, questions)
            });
            in_flight.insert(handle.id(), language);
        }

        while let Some(result) = join_set.join_next_with_id().await {
            match result {
                Ok((id, (language, questions))) => {
                    in_flight.remove(&id);
                    progress.on_task_complete(
                        PipelineStage::Quizzes,
                        language.as_str(),
                        !questions.is_empty(),
                    );
                    batches.insert(language, questions);
                }
                Err(e) => {
                    warn!("Quiz task join error: {}", e);
                    if let Some(language) = in_flight.remove(&e.id()) {
                        progress.on_task_complete(
                            PipelineStage::Quizzes,
                            language.as_str(),
                            false,
                        );
                        self.diagnostics
                            .notify(&format!("Quiz task for {} crashed: {}", language, e))
                            .await;
                    }
                }
            }
        }

        progress.on_stage_complete(PipelineStage::Quizzes);
        batches
    }
}

impl LanguageJob {
    async fn run(self) -> Vec<Question> {
        let language = &self.language;

        let word = match bounded(
            self.call_timeout,
            self.words.sample(language, 1),
            WordSourceError::Timeout,
        )
        .await
        {
            Ok(mut words) if !words.is_empty() => words.swap_remove(0),
            Ok(_) => {
                warn!("No vocabulary word available for {}", language);
                self.diagnostics
                    .notify(&format!("No vocabulary word for {}; quiz skipped", language))
                    .await;
                return Vec::new();
            }
            Err(e) => {
                warn!("Word source failed for {}: {}", language, e);
                self.diagnostics
                    .notify(&format!(
                        "Word source failed for {}: {}; quiz skipped",
                        language, e
                    ))
                    .await;
                return Vec::new();
            }
        };
        debug!("Word of the day for {}: {}", language, word.word);

        let slots = match self
            .topics
            .and_then(|topics| plan_slots(&topics, &word.word, &self.news, self.count))
        {
            Ok(slots) => slots,
            Err(e) => {
                warn!("Cannot plan questions for {}: {}", language, e);
                self.diagnostics
                    .notify(&format!("Cannot plan questions for {}: {}", language, e))
                    .await;
                return Vec::new();
            }
        };

        let prompt = PromptTemplate::quiz(language, &slots);
        let raw = match bounded(
            self.call_timeout,
            self.generator.generate(&prompt),
            GatewayError::Timeout,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Quiz generation failed for {}: {}", language, e);
                self.diagnostics
                    .notify(&format!("Quiz generation failed for {}: {}", language, e))
                    .await;
                return Vec::new();
            }
        };

        match decode_json_list::<Question>(&raw) {
            Ok(questions) => {
                if questions.len() != slots.len() {
                    warn!(
                        "{}: expected {} questions, got {}",
                        language,
                        slots.len(),
                        questions.len()
                    );
                }
                info!("Generated {} questions for {}", questions.len(), language);
                questions
            }
            Err(e) => {
                warn!("Could not decode questions for {}: {}", language, e);
                self.diagnostics
                    .notify(&format!(
                        "Quiz decode error for {}: {}. Prompt (partial): {}... Output: {}...",
                        language,
                        e,
                        prefix(prompt.user_content(), QUIZ_LOG_PREFIX_CHARS),
                        prefix(&raw, QUIZ_LOG_PREFIX_CHARS)
                    ))
                    .await;
                Vec::new()
            }
        }
    }
}
