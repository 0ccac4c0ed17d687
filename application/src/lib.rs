//! Application layer for newsquiz
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{Destinations, PacingPolicy, PipelineParams};
pub use ports::{
    image_generator::ImageGenerator,
    progress::{NoProgress, PipelineProgress, PipelineStage},
    publisher::{DeliveryError, Publisher},
    run_journal::{JournalEvent, NoRunJournal, RunJournal},
    text_generator::{GatewayError, TextGenerator},
    word_source::{RandomWordSource, WordSourceError},
};
pub use use_cases::annotate_images::AnnotateImagesUseCase;
pub use use_cases::deliver_results::{DeliverResultsUseCase, DeliveryReport};
pub use use_cases::produce_news::{NewsError, ProduceNewsUseCase};
pub use use_cases::produce_quizzes::ProduceQuizzesUseCase;
pub use use_cases::run_pipeline::{
    PipelineServices, RunInput, RunPipelineError, RunPipelineUseCase, RunReport, StageTiming,
};
pub use use_cases::shared::DiagnosticChannel;
pub use use_cases::verify_quizzes::VerifyQuizzesUseCase;
