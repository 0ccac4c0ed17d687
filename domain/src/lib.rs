//! Domain layer for newsquiz
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Daily batch
//!
//! A run produces a small batch of [`NewsItem`]s. For every configured
//! [`Language`] the batch is turned into multiple-choice [`Question`]s:
//! grammar questions keyed to news stories, plus one vocabulary question.
//!
//! ## Cross-verification
//!
//! Two independent models give an [`Opinion`] on each question. The
//! [`verification`] module reconciles those opinions against the generator's
//! own claim and partitions the batch into good and bad buckets
//! ([`VerificationOutcome`]), recording a reason for every rejection.

pub mod config;
pub mod core;
pub mod decode;
pub mod media;
pub mod news;
pub mod prompt;
pub mod quiz;
pub mod verification;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    language::Language,
    string::{prefix, truncate},
};
pub use decode::{DecodeError, decode_json_list, decode_opinions, strip_code_fence};
pub use media::Image;
pub use news::{
    catalog::{CATEGORIES, NewsAssignment, REGIONS, assign_news},
    entities::NewsItem,
};
pub use prompt::{
    message::{Message, MessageFraming, Prompt, Role},
    template::PromptTemplate,
};
pub use quiz::{
    poll::Poll,
    question::{OPTION_COUNT, Question},
    slot::{QuestionSlot, plan_slots},
    topics::{grammar_topics, sample_topics},
    word::VocabularyWord,
};
pub use verification::{
    opinion::{Opinion, OpinionSet},
    outcome::{LanguageVerdicts, VerificationOutcome},
    policy::{VerifierFailurePolicy, VerifierRole},
    reconcile::{ResolvedOpinions, Verdict, partition, reconcile, resolve_opinions},
};
