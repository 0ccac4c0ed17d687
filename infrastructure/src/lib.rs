//! Infrastructure layer for newsquiz
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod telegram;
pub mod vocabulary;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlRunJournal;
pub use providers::{OpenAiCompatibleGenerator, OpenAiImageGenerator, ProviderError, ProviderFactory};
pub use telegram::TelegramPublisher;
pub use vocabulary::{FileWordSource, VocabularyError};
