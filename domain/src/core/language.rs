//! Language value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A quiz language (Value Object)
///
/// Stored lowercase and trimmed so that `"English"`, `" english "` and
/// `"english"` all refer to the same batch, destination and topic list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = name.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidLanguage(name.as_ref().to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn english() -> Self {
        Self("english".to_string())
    }

    pub fn spanish() -> Self {
        Self("spanish".to_string())
    }

    /// Languages produced by a run when nothing is configured.
    pub fn defaults() -> Vec<Self> {
        vec![Self::english(), Self::spanish()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Capitalized name, used inside prompts and captions ("Spanish").
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}
