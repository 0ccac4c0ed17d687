//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! only after [`FileConfig::validate`] has been consulted.

mod delivery;
mod models;
mod pipeline;
mod providers;
mod storage;
mod telegram;

pub use delivery::FileDeliveryConfig;
pub use models::{FileModelSlot, FileModelsConfig};
pub use pipeline::{FilePipelineConfig, max_questions_per_language};
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use storage::{FileJournalConfig, FileVocabularyConfig};
pub use telegram::FileTelegramConfig;

use newsquiz_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Configuration rejected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("configuration has {} error(s):\n  - {}", .0.len(), .0.join("\n  - "))]
    Invalid(Vec<String>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Run-wide knobs
    pub pipeline: FilePipelineConfig,
    /// Per-stage model selection
    pub models: FileModelsConfig,
    /// OpenAI-compatible endpoints referenced by `[models]`
    pub providers: FileProvidersConfig,
    /// Publication channels
    pub telegram: FileTelegramConfig,
    /// Pacing between polls
    pub delivery: FileDeliveryConfig,
    pub vocabulary: FileVocabularyConfig,
    pub journal: FileJournalConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Pipeline values (languages, batch size, policy, timeout)
    /// 2. Model slots and the providers they reference
    /// 3. Pacing bounds
    /// 4. Languages without a destination channel (warning only)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.pipeline.validate());

        issues.extend(self.models.validate());
        for (slot, model) in self.models.slots() {
            if !model.provider.trim().is_empty() && !self.providers.contains(&model.provider) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider {
                        slot: slot.to_string(),
                        provider: model.provider.clone(),
                    },
                    format!(
                        "models.{}: provider '{}' is not defined (known: {})",
                        slot,
                        model.provider,
                        self.providers.names().collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        }

        issues.extend(self.delivery.validate());

        let destinations = self.telegram.to_destinations();
        for language in self.pipeline.parse_languages().0 {
            if destinations.channel_for(&language).is_none() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingDestination {
                        language: language.to_string(),
                    },
                    format!(
                        "telegram.channels has no entry for '{}'; its quizzes will not be published",
                        language
                    ),
                ));
            }
        }

        issues
    }

    /// Fail when [`validate`](Self::validate) reports any error.
    ///
    /// Warnings are returned so the caller can print them.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if ConfigIssue::has_errors(&issues) {
            let messages = issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .map(|i| i.message.clone())
                .collect();
            return Err(ConfigValidationError::Invalid(messages));
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsquiz_domain::MessageFraming;

    fn with_channels() -> FileConfig {
        let mut config = FileConfig::default();
        config
            .telegram
            .channels
            .insert("english".to_string(), "@en".to_string());
        config
            .telegram
            .channels
            .insert("spanish".to_string(), "@es".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pipeline]
languages = ["english", "german"]
questions_per_language = 3
verifier_failure_policy = "abstain"

[models.secondary_verifier]
provider = "gemini"
model = "gemini-2.0-flash"
framing = "flattened"

[providers.local]
base_url = "http://localhost:11434/v1"
api_key_env = "LOCAL_KEY"

[telegram]
log_channel = "-1001"

[telegram.channels]
english = "@en"

[delivery]
pacing_min_secs = 1
pacing_max_secs = 2

[journal]
path = "runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.languages, vec!["english", "german"]);
        assert_eq!(config.pipeline.questions_per_language, 3);
        assert_eq!(config.models.secondary_verifier.model, "gemini-2.0-flash");
        assert_eq!(
            config.models.secondary_verifier.framing,
            MessageFraming::Flattened
        );
        // Plain serde replaces the map; the loader merges it with the defaults.
        assert!(config.providers.contains("local"));
        assert!(!config.providers.contains("openai"));
        assert_eq!(config.delivery.pacing_max_secs, 2);
        assert_eq!(
            config.journal.path.as_deref(),
            Some(std::path::Path::new("runs.jsonl"))
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_defaults_only_warn_about_missing_channels() {
        let issues = FileConfig::default().validate();
        assert!(!ConfigIssue::has_errors(&issues));
        assert_eq!(issues.len(), 2);
        assert!(
            issues
                .iter()
                .all(|i| matches!(i.code, ConfigIssueCode::MissingDestination { .. }))
        );
    }

    #[test]
    fn test_fully_configured_has_no_issues() {
        assert!(with_channels().validate().is_empty());
    }

    #[test]
    fn test_unknown_provider_reference() {
        let mut config = with_channels();
        config.models.image.provider = "midjourney".to_string();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::UnknownProvider { slot, provider }
                if slot == "image" && provider == "midjourney"
        ));
    }

    #[test]
    fn test_check_collects_all_errors() {
        let mut config = with_channels();
        config.pipeline.questions_per_language = 0;
        config.delivery.pacing_min_secs = 20;
        let err = config.check().unwrap_err();
        let ConfigValidationError::Invalid(messages) = &err;
        assert_eq!(messages.len(), 2);
        assert!(err.to_string().contains("2 error(s)"));
    }

    #[test]
    fn test_check_passes_warnings_through() {
        let warnings = FileConfig::default().check().unwrap();
        assert_eq!(warnings.len(), 2);
    }
}
