//! Builds model adapters from the `[models]` and `[providers]` sections.

use super::{OpenAiCompatibleGenerator, OpenAiImageGenerator};
use crate::config::{FileModelSlot, FileProvidersConfig};
use newsquiz_application::{ImageGenerator, TextGenerator};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("models.{slot}: provider '{provider}' is not configured")]
    UnknownProvider { slot: String, provider: String },

    #[error("models.{slot}: no API key for provider '{provider}' (set {env_var})")]
    MissingApiKey {
        slot: String,
        provider: String,
        env_var: String,
    },
}

/// Resolves model slots against the configured providers.
pub struct ProviderFactory<'a> {
    providers: &'a FileProvidersConfig,
}

impl<'a> ProviderFactory<'a> {
    pub fn new(providers: &'a FileProvidersConfig) -> Self {
        Self { providers }
    }

    fn endpoint(&self, slot: &str, model: &FileModelSlot) -> Result<(String, String), ProviderError> {
        let provider = self.providers.get(&model.provider).ok_or_else(|| {
            ProviderError::UnknownProvider {
                slot: slot.to_string(),
                provider: model.provider.clone(),
            }
        })?;
        let api_key = provider
            .resolve_api_key()
            .ok_or_else(|| ProviderError::MissingApiKey {
                slot: slot.to_string(),
                provider: model.provider.clone(),
                env_var: provider.api_key_env.clone(),
            })?;
        Ok((provider.base_url.clone(), api_key))
    }

    pub fn text_generator(
        &self,
        slot: &str,
        model: &FileModelSlot,
    ) -> Result<Arc<dyn TextGenerator>, ProviderError> {
        let (base_url, api_key) = self.endpoint(slot, model)?;
        Ok(Arc::new(
            OpenAiCompatibleGenerator::new(&model.provider, Some(api_key), base_url, &model.model)
                .with_framing(model.framing)
                .with_temperature(model.temperature)
                .with_max_tokens(model.max_tokens),
        ))
    }

    pub fn image_generator(
        &self,
        slot: &str,
        model: &FileModelSlot,
    ) -> Result<Arc<dyn ImageGenerator>, ProviderError> {
        let (base_url, api_key) = self.endpoint(slot, model)?;
        Ok(Arc::new(OpenAiImageGenerator::new(
            &model.provider,
            Some(api_key),
            base_url,
            &model.model,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProviderConfig;

    fn providers_with_key() -> FileProvidersConfig {
        let mut providers = FileProvidersConfig::default();
        providers.0.insert(
            "local".to_string(),
            FileProviderConfig {
                base_url: "http://localhost:8080/v1".to_string(),
                api_key_env: "NEWSQUIZ_TEST_UNSET".to_string(),
                api_key: Some("sk-local".to_string()),
            },
        );
        providers
    }

    fn slot(provider: &str) -> FileModelSlot {
        FileModelSlot {
            provider: provider.to_string(),
            model: "m".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builds_named_generator() {
        let providers = providers_with_key();
        let generator = ProviderFactory::new(&providers)
            .text_generator("quiz", &slot("local"))
            .unwrap();
        assert_eq!(generator.name(), "local/m");
    }

    #[test]
    fn test_unknown_provider() {
        let providers = providers_with_key();
        let err = ProviderFactory::new(&providers)
            .image_generator("image", &slot("nope"))
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::UnknownProvider { .. }));
    }

    #[test]
    fn test_missing_key_names_env_var() {
        let mut providers = FileProvidersConfig::default();
        providers.0.insert(
            "keyless".to_string(),
            FileProviderConfig {
                api_key_env: "NEWSQUIZ_TEST_SURELY_UNSET_KEY".to_string(),
                ..Default::default()
            },
        );
        let err = ProviderFactory::new(&providers)
            .text_generator("news", &slot("keyless"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("NEWSQUIZ_TEST_SURELY_UNSET_KEY"));
    }
}
