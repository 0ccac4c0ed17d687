//! Vocabulary word source port

use async_trait::async_trait;
use newsquiz_domain::{Language, VocabularyWord};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordSourceError {
    #[error("Word source unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,
}

/// Source of random vocabulary entries.
///
/// An empty sample is a valid answer, not an error.
#[async_trait]
pub trait RandomWordSource: Send + Sync {
    async fn sample(
        &self,
        language: &Language,
        count: usize,
    ) -> Result<Vec<VocabularyWord>, WordSourceError>;
}
