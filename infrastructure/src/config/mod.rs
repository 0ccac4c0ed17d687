//! Configuration file loading for newsquiz
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NEWSQUIZ_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./newsquiz.toml` or `./.newsquiz.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/newsquiz/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDeliveryConfig, FileJournalConfig, FileModelSlot,
    FileModelsConfig, FilePipelineConfig, FileProviderConfig, FileProvidersConfig,
    FileTelegramConfig, FileVocabularyConfig, max_questions_per_language,
};
pub use loader::ConfigLoader;
