//! Produce News use case
//!
//! Asks the news model for one short story per category/region assignment.

use crate::ports::text_generator::{GatewayError, TextGenerator};
use crate::use_cases::shared::{DiagnosticChannel, NEWS_LOG_PREFIX_CHARS, bounded};
use chrono::NaiveDate;
use newsquiz_domain::{
    DecodeError, NewsAssignment, NewsItem, PromptTemplate, decode_json_list, prefix,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during news production
///
/// Both are fatal to the run: without news there is nothing to quiz on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("News generation failed: {0}")]
    GenerationFailed(GatewayError),

    #[error("Malformed news response: {0}")]
    MalformedResponse(DecodeError),
}

/// Use case for producing the day's news batch
pub struct ProduceNewsUseCase {
    generator: Arc<dyn TextGenerator>,
    diagnostics: DiagnosticChannel,
    call_timeout: Duration,
}

impl ProduceNewsUseCase {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        diagnostics: DiagnosticChannel,
        call_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            diagnostics,
            call_timeout,
        }
    }

    /// Generate one story per assignment. Not retried.
    pub async fn execute(
        &self,
        date: NaiveDate,
        assignments: &[NewsAssignment],
    ) -> Result<Vec<NewsItem>, NewsError> {
        info!(
            "Generating {} news stories for {} with {}",
            assignments.len(),
            date,
            self.generator.name()
        );

        let prompt = PromptTemplate::news(&date.to_string(), assignments);
        let raw = match bounded(
            self.call_timeout,
            self.generator.generate(&prompt),
            GatewayError::Timeout,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("News generation failed: {}", e);
                self.diagnostics
                    .notify(&format!("News generation failed: {}", e))
                    .await;
                return Err(NewsError::GenerationFailed(e));
            }
        };

        debug!("Raw news output: {}", prefix(&raw, NEWS_LOG_PREFIX_CHARS));

        let news: Vec<NewsItem> = match decode_json_list(&raw) {
            Ok(news) => news,
            Err(e) => {
                warn!("Could not decode news: {}", e);
                self.diagnostics
                    .notify(&format!(
                        "News decode error: {}. Output: {}",
                        e,
                        prefix(&raw, NEWS_LOG_PREFIX_CHARS)
                    ))
                    .await;
                return Err(NewsError::MalformedResponse(e));
            }
        };

        for item in news.iter().filter(|n| !n.is_within_length()) {
            warn!("News item {} exceeds the length limit", item.id);
        }
        info!("Generated {} news stories", news.len());
        Ok(news)
    }
}
