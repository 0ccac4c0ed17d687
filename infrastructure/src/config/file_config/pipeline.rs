//! Pipeline configuration from TOML (`[pipeline]` section)

use newsquiz_application::PipelineParams;
use newsquiz_domain::{
    CATEGORIES, ConfigIssue, ConfigIssueCode, Language, REGIONS, VerifierFailurePolicy,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline configuration from TOML (`[pipeline]` section)
///
/// # Example
///
/// ```toml
/// [pipeline]
/// languages = ["english", "spanish", "german"]
/// questions_per_language = 4
/// call_timeout_secs = 90
/// verifier_failure_policy = "abstain"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub languages: Vec<String>,
    /// Questions per language, also the number of news stories.
    pub questions_per_language: usize,
    pub call_timeout_secs: u64,
    /// `"trust_claim"`, `"abstain"` or `"reject"`.
    pub verifier_failure_policy: String,
    pub verifier_retries: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            languages: vec!["english".to_string(), "spanish".to_string()],
            questions_per_language: 4,
            call_timeout_secs: 120,
            verifier_failure_policy: "trust_claim".to_string(),
            verifier_retries: 0,
        }
    }
}

/// Largest batch the news catalogue can cover without repeating a category.
pub fn max_questions_per_language() -> usize {
    CATEGORIES.len().min(REGIONS.len())
}

impl FilePipelineConfig {
    /// Parse languages, dropping (and reporting) invalid entries and duplicates.
    pub fn parse_languages(&self) -> (Vec<Language>, Vec<ConfigIssue>) {
        let mut languages: Vec<Language> = Vec::new();
        let mut issues = Vec::new();
        for raw in &self.languages {
            match Language::new(raw) {
                Ok(language) if !languages.contains(&language) => languages.push(language),
                Ok(_) => {}
                Err(_) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: "pipeline.languages".to_string(),
                    },
                    "pipeline.languages contains an empty entry",
                )),
            }
        }
        if languages.is_empty() && issues.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoLanguages,
                "pipeline.languages must name at least one language",
            ));
        }
        (languages, issues)
    }

    pub fn parse_policy(&self) -> (VerifierFailurePolicy, Option<ConfigIssue>) {
        match self.verifier_failure_policy.parse() {
            Ok(policy) => (policy, None),
            Err(_) => (
                VerifierFailurePolicy::default(),
                Some(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "pipeline.verifier_failure_policy".to_string(),
                        value: self.verifier_failure_policy.clone(),
                        valid_values: VerifierFailurePolicy::ALL
                            .iter()
                            .map(|p| p.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "pipeline.verifier_failure_policy: unknown value '{}'",
                        self.verifier_failure_policy
                    ),
                )),
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_languages().1;
        issues.extend(self.parse_policy().1);

        let max = max_questions_per_language();
        if self.questions_per_language == 0 || self.questions_per_language > max {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "pipeline.questions_per_language".to_string(),
                },
                format!(
                    "pipeline.questions_per_language must be within 1..={}, got {}",
                    max, self.questions_per_language
                ),
            ));
        }
        if self.call_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "pipeline.call_timeout_secs".to_string(),
                },
                "pipeline.call_timeout_secs must be positive",
            ));
        }
        issues
    }

    /// Convert to application params. Invalid values fall back to defaults;
    /// call [`validate`](Self::validate) first to surface them.
    pub fn to_params(&self) -> PipelineParams {
        let languages = self.parse_languages().0;
        PipelineParams::default()
            .with_languages(if languages.is_empty() {
                Language::defaults()
            } else {
                languages
            })
            .with_questions_per_language(self.questions_per_language)
            .with_call_timeout(Duration::from_secs(self.call_timeout_secs))
            .with_verifier_failure_policy(self.parse_policy().0)
            .with_verifier_retries(self.verifier_retries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FilePipelineConfig::default().validate().is_empty());
    }

    #[test]
    fn test_languages_are_normalized_and_deduplicated() {
        let config = FilePipelineConfig {
            languages: vec![
                "English".to_string(),
                " english ".to_string(),
                "German".to_string(),
            ],
            ..Default::default()
        };
        let (languages, issues) = config.parse_languages();
        assert!(issues.is_empty());
        assert_eq!(
            languages,
            vec![Language::english(), Language::new("german").unwrap()]
        );
    }

    #[test]
    fn test_empty_language_list_is_error() {
        let config = FilePipelineConfig {
            languages: vec![],
            ..Default::default()
        };
        let issues = config.validate();
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::NoLanguages)
        );
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let config = FilePipelineConfig {
            verifier_failure_policy: "coin_flip".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(ConfigIssue::has_errors(&issues));
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { value, .. } if value == "coin_flip"
        ));
    }

    #[test]
    fn test_question_count_bounds() {
        for bad in [0, max_questions_per_language() + 1] {
            let config = FilePipelineConfig {
                questions_per_language: bad,
                ..Default::default()
            };
            assert!(ConfigIssue::has_errors(&config.validate()), "K = {}", bad);
        }
    }

    #[test]
    fn test_to_params() {
        let config = FilePipelineConfig {
            languages: vec!["german".to_string()],
            questions_per_language: 3,
            call_timeout_secs: 30,
            verifier_failure_policy: "reject".to_string(),
            verifier_retries: 1,
        };
        let params = config.to_params();
        assert_eq!(params.languages, vec![Language::new("german").unwrap()]);
        assert_eq!(params.questions_per_language, 3);
        assert_eq!(params.call_timeout, Duration::from_secs(30));
        assert_eq!(params.verifier_failure_policy, VerifierFailurePolicy::Reject);
        assert_eq!(params.verifier_retries, 1);
    }
}
