//! Annotate Images use case
//!
//! One illustration per language, drawn from the first accepted question.

use crate::ports::image_generator::ImageGenerator;
use crate::ports::progress::{NoProgress, PipelineProgress, PipelineStage};
use crate::ports::text_generator::GatewayError;
use crate::use_cases::shared::bounded;
use newsquiz_domain::{Image, Language, PromptTemplate, Question};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub struct AnnotateImagesUseCase {
    generator: Arc<dyn ImageGenerator>,
    call_timeout: Duration,
}

impl AnnotateImagesUseCase {
    pub fn new(generator: Arc<dyn ImageGenerator>, call_timeout: Duration) -> Self {
        Self {
            generator,
            call_timeout,
        }
    }

    pub async fn execute(
        &self,
        accepted: &BTreeMap<Language, Vec<Question>>,
    ) -> BTreeMap<Language, Image> {
        self.execute_with_progress(accepted, &NoProgress).await
    }

    /// Languages without accepted questions, or whose image failed, have no entry.
    pub async fn execute_with_progress(
        &self,
        accepted: &BTreeMap<Language, Vec<Question>>,
        progress: &dyn PipelineProgress,
    ) -> BTreeMap<Language, Image> {
        let requests: Vec<(Language, String)> = accepted
            .iter()
            .filter_map(|(language, questions)| {
                questions
                    .first()
                    .map(|q| (language.clone(), PromptTemplate::picture(q)))
            })
            .collect();

        progress.on_stage_start(PipelineStage::Images, requests.len());

        let mut join_set = JoinSet::new();
        for (language, picture_prompt) in requests {
            let generator = Arc::clone(&self.generator);
            let limit = self.call_timeout;
            join_set.spawn(async move {
                let result = bounded(
                    limit,
                    generator.generate_image(&picture_prompt),
                    GatewayError::Timeout,
                )
                .await;
                (language, result)
            });
        }

        let mut images = BTreeMap::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((language, Ok(image))) => {
                    info!("Generated image for {} ({} bytes)", language, image.len());
                    progress.on_task_complete(PipelineStage::Images, language.as_str(), true);
                    images.insert(language, image);
                }
                Ok((language, Err(e))) => {
                    warn!("Image generation failed for {}: {}", language, e);
                    progress.on_task_complete(PipelineStage::Images, language.as_str(), false);
                }
                Err(e) => {
                    warn!("Image task join error: {}", e);
                }
            }
        }

        progress.on_stage_complete(PipelineStage::Images);
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{StaticImages, question};

    #[tokio::test]
    async fn test_one_image_per_language_with_accepted_questions() {
        let generator = Arc::new(StaticImages::new());
        let use_case = AnnotateImagesUseCase::new(generator.clone(), Duration::from_secs(1));
        let accepted = BTreeMap::from([
            (
                Language::english(),
                vec![
                    question(1, ["a", "b", "c", "d"], 2),
                    question(2, ["a", "b", "c", "d"], 1),
                ],
            ),
            (Language::spanish(), Vec::new()),
        ]);

        let images = use_case.execute(&accepted).await;

        assert_eq!(images.len(), 1);
        assert!(images.contains_key(&Language::english()));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_image_is_absent() {
        let use_case =
            AnnotateImagesUseCase::new(Arc::new(StaticImages::failing()), Duration::from_secs(1));
        let accepted = BTreeMap::from([(
            Language::english(),
            vec![question(1, ["a", "b", "c", "d"], 2)],
        )]);

        assert!(use_case.execute(&accepted).await.is_empty());
    }
}
