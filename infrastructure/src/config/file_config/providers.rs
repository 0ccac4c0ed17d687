//! Provider configuration from TOML (`[providers.<name>]` sections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An OpenAI-compatible HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL up to (not including) `/chat/completions`.
    pub base_url: String,
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: direct value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }
}

/// Named providers; `openai` and `gemini` are always predefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileProvidersConfig(pub BTreeMap<String, FileProviderConfig>);

impl Default for FileProvidersConfig {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert("openai".to_string(), FileProviderConfig::default());
        providers.insert(
            "gemini".to_string(),
            FileProviderConfig {
                base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                api_key: None,
            },
        );
        Self(providers)
    }
}

impl FileProvidersConfig {
    pub fn get(&self, name: &str) -> Option<&FileProviderConfig> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_openai_and_gemini() {
        let providers = FileProvidersConfig::default();
        assert!(providers.contains("openai"));
        assert!(
            providers
                .get("gemini")
                .unwrap()
                .base_url
                .contains("generativelanguage")
        );
    }

    #[test]
    fn test_direct_key_wins() {
        let provider = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "NEWSQUIZ_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key(), Some("sk-direct".to_string()));
    }

    #[test]
    fn test_missing_key_is_none() {
        let provider = FileProviderConfig {
            api_key_env: "NEWSQUIZ_TEST_SURELY_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key(), None);
    }
}
