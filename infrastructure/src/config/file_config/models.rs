//! Per-stage model configuration from TOML (`[models]` section)

use newsquiz_domain::{ConfigIssue, ConfigIssueCode, MessageFraming};
use serde::{Deserialize, Serialize};

/// One model slot: which provider serves it and how to call it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelSlot {
    /// Key into `[providers.<name>]`
    pub provider: String,
    /// Provider-specific model name
    pub model: String,
    /// Message layout the provider expects
    pub framing: MessageFraming,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for FileModelSlot {
    fn default() -> Self {
        Self::openai("gpt-4o")
    }
}

impl FileModelSlot {
    fn openai(model: &str) -> Self {
        Self {
            provider: "openai".to_string(),
            model: model.to_string(),
            framing: MessageFraming::RoleTagged,
            temperature: Some(0.3),
            max_tokens: Some(3000),
        }
    }

    fn validate(&self, slot: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (name, value) in [("provider", &self.provider), ("model", &self.model)] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: format!("models.{}.{}", slot, name),
                    },
                    format!("models.{}.{} cannot be empty", slot, name),
                ));
            }
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: format!("models.{}.temperature", slot),
                },
                format!("models.{}.temperature must be within 0.0..=2.0, got {}", slot, t),
            ));
        }
        issues
    }
}

/// Per-stage model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models.primary_verifier]
/// provider = "openai"
/// model = "gpt-4o"
///
/// [models.secondary_verifier]
/// provider = "gemini"
/// model = "gemini-1.5-pro"
/// framing = "flattened"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Generates the news batch
    pub news: FileModelSlot,
    /// Generates the question batches
    pub quiz: FileModelSlot,
    /// First independent verifier
    pub primary_verifier: FileModelSlot,
    /// Second independent verifier, ideally from another provider
    pub secondary_verifier: FileModelSlot,
    /// Draws the illustration
    pub image: FileModelSlot,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            news: FileModelSlot::openai("gpt-4o"),
            quiz: FileModelSlot::openai("gpt-4o"),
            primary_verifier: FileModelSlot::openai("gpt-4o"),
            secondary_verifier: FileModelSlot {
                provider: "gemini".to_string(),
                model: "gemini-1.5-pro".to_string(),
                framing: MessageFraming::Flattened,
                temperature: Some(0.7),
                max_tokens: Some(3000),
            },
            image: FileModelSlot {
                temperature: None,
                max_tokens: None,
                ..FileModelSlot::openai("dall-e-3")
            },
        }
    }
}

impl FileModelsConfig {
    /// All slots with their names, in pipeline order.
    pub fn slots(&self) -> [(&'static str, &FileModelSlot); 5] {
        [
            ("news", &self.news),
            ("quiz", &self.quiz),
            ("primary_verifier", &self.primary_verifier),
            ("secondary_verifier", &self.secondary_verifier),
            ("image", &self.image),
        ]
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.slots()
            .iter()
            .flat_map(|(name, slot)| slot.validate(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_verifiers_use_different_providers() {
        let models = FileModelsConfig::default();
        assert_ne!(
            models.primary_verifier.provider,
            models.secondary_verifier.provider
        );
        assert_eq!(models.secondary_verifier.framing, MessageFraming::Flattened);
    }

    #[test]
    fn test_partial_slot_keeps_defaults() {
        let toml_str = r#"
[quiz]
model = "gpt-4o-mini"
"#;
        let models: FileModelsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(models.quiz.model, "gpt-4o-mini");
        assert_eq!(models.quiz.provider, "openai");
        assert_eq!(models.quiz.framing, MessageFraming::RoleTagged);
    }

    #[test]
    fn test_empty_model_name_is_error() {
        let mut models = FileModelsConfig::default();
        models.news.model = " ".to_string();
        let issues = models.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::EmptyValue { field } if field == "models.news.model"
        ));
    }
}
