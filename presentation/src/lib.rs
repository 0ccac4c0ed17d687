//! Presentation layer for newsquiz
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the dry-run console publisher.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::publisher::ConsolePublisher;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
