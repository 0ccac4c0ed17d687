//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error("Not enough news items to plan questions (need at least 1)")]
    NoNews,

    #[error("Not enough grammar topics for {language}: need {needed}, have {available}")]
    NotEnoughTopics {
        language: String,
        needed: usize,
        available: usize,
    },

    #[error("Cannot draw {requested} items from a catalogue of {available}")]
    CatalogueTooSmall { requested: usize, available: usize },

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}
