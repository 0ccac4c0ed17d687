//! Deliver Results use case
//!
//! Publishes good quizzes (and their image) to each language's channel and
//! reports rejected questions to the log channel. Delivery failures are
//! counted and logged, never retried and never propagated.

use crate::config::{Destinations, PacingPolicy};
use crate::ports::progress::{NoProgress, PipelineProgress, PipelineStage};
use crate::ports::publisher::{DeliveryError, Publisher};
use crate::use_cases::shared::bounded;
use chrono::NaiveDate;
use newsquiz_domain::{Image, Language, Poll, Question, VerificationOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of the delivery stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
    /// Languages with good content but no configured channel.
    pub skipped_languages: Vec<Language>,
}

impl DeliveryReport {
    fn count(&mut self, result: Result<(), DeliveryError>, what: &str, destination: &str) {
        match result {
            Ok(()) => self.sent += 1,
            Err(e) => {
                warn!("Failed to send {} to {}: {}", what, destination, e);
                self.failed += 1;
            }
        }
    }
}

pub struct DeliverResultsUseCase {
    publisher: Arc<dyn Publisher>,
    destinations: Destinations,
    pacing: PacingPolicy,
    call_timeout: Duration,
}

impl DeliverResultsUseCase {
    pub fn new(
        publisher: Arc<dyn Publisher>,
        destinations: Destinations,
        pacing: PacingPolicy,
        call_timeout: Duration,
    ) -> Self {
        Self {
            publisher,
            destinations,
            pacing,
            call_timeout,
        }
    }

    pub async fn execute(
        &self,
        date: NaiveDate,
        outcome: &VerificationOutcome,
        images: &BTreeMap<Language, Image>,
    ) -> DeliveryReport {
        self.execute_with_progress(date, outcome, images, &NoProgress)
            .await
    }

    pub async fn execute_with_progress(
        &self,
        date: NaiveDate,
        outcome: &VerificationOutcome,
        images: &BTreeMap<Language, Image>,
        progress: &dyn PipelineProgress,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let languages: Vec<&Language> = outcome.languages().collect();
        progress.on_stage_start(PipelineStage::Delivery, languages.len());

        for language in languages {
            let good = outcome.good_for(language);
            let image = images.get(language);
            let before = report.failed;

            if !good.is_empty() || image.is_some() {
                match self.destinations.channel_for(language) {
                    Some(channel) => {
                        self.publish_language(language, channel, date, good, image, &mut report)
                            .await
                    }
                    None => {
                        warn!("No channel configured for {}; skipping delivery", language);
                        report.skipped_languages.push(language.clone());
                    }
                }
            }

            self.report_rejections(language, outcome.bad_for(language), &mut report)
                .await;

            progress.on_task_complete(
                PipelineStage::Delivery,
                language.as_str(),
                report.failed == before,
            );
        }

        info!(
            "Delivery finished: {} sent, {} failed",
            report.sent, report.failed
        );
        progress.on_stage_complete(PipelineStage::Delivery);
        report
    }

    async fn publish_language(
        &self,
        language: &Language,
        channel: &str,
        date: NaiveDate,
        good: &[Question],
        image: Option<&Image>,
        report: &mut DeliveryReport,
    ) {
        if let Some(image) = image {
            let caption = format!("{} quiz of {}", language.display_name(), date);
            let result = bounded(
                self.call_timeout,
                self.publisher.send_image(channel, image, Some(&caption)),
                DeliveryError::Timeout,
            )
            .await;
            report.count(result, "image", channel);
        }

        for (index, question) in good.iter().enumerate() {
            if index > 0 {
                self.pacing.pause().await;
            }

            let Some(poll) = Poll::from_question(question) else {
                warn!(
                    "Question {} for {} cannot be rendered as a poll",
                    question.question_id, language
                );
                report.failed += 1;
                continue;
            };

            debug!("Sending poll {} to {}", question.question_id, channel);
            let result = bounded(
                self.call_timeout,
                self.publisher.send_poll(channel, &poll),
                DeliveryError::Timeout,
            )
            .await;
            report.count(result, "poll", channel);
        }
    }

    async fn report_rejections(
        &self,
        language: &Language,
        bad: &[Question],
        report: &mut DeliveryReport,
    ) {
        if bad.is_empty() {
            return;
        }
        let Some(log_channel) = self.destinations.log_channel() else {
            debug!("No log channel; {} rejections for {} not reported", bad.len(), language);
            return;
        };

        let text = rejection_report(language, bad);
        let result = bounded(
            self.call_timeout,
            self.publisher.send_text(log_channel, &text),
            DeliveryError::Timeout,
        )
        .await;
        report.count(result, "rejection report", log_channel);
    }
}

/// One text message listing the rejected questions of a language.
pub fn rejection_report(language: &Language, bad: &[Question]) -> String {
    let mut text = format!(
        "Rejected {} questions ({}):\n",
        language.display_name(),
        bad.len()
    );
    for question in bad {
        text.push_str(&format!(
            "\n#{} {}\nOptions: {}\nReason: {}\n",
            question.question_id,
            question.question_text,
            question.options.join(" | "),
            question.verification_error.as_deref().unwrap_or("unknown")
        ));
    }
    text
}
